use crate::command::Command;
use crate::error::Error;
use crate::segment::{self, Access};
use arch::{arith::ArithOp, reg, segment::Segment};

/// Assembly emitter for a whole translation batch. The label counters
/// are monotonic across files so that concatenated output never reuses
/// a comparison or return-site label; the static scope follows the
/// file currently being translated.
#[derive(Debug)]
pub struct CodeGen {
    output: Vec<String>,
    cmp_counter: usize,
    call_counter: usize,
    file_base: String,
}

impl CodeGen {
    pub fn new() -> Self {
        CodeGen {
            output: Vec::new(),
            cmp_counter: 0,
            call_counter: 0,
            file_base: String::new(),
        }
    }

    /// Point the static scope at a new source file's base name.
    pub fn set_file(&mut self, base: &str) {
        self.file_base = base.to_string();
    }

    fn emit(&mut self, line: impl Into<String>) {
        self.output.push(line.into());
    }

    /// Stack-machine startup: SP = 256, then `call Sys.init 0`.
    pub fn bootstrap(&mut self) -> Vec<String> {
        self.emit(format!("@{}", reg::STACK_BASE));
        self.emit("D=A");
        self.emit("@SP");
        self.emit("M=D");
        self.gen_call("Sys.init", 0);
        std::mem::take(&mut self.output)
    }

    /// The assembly block for one command.
    pub fn gen(&mut self, cmd: &Command) -> Result<Vec<String>, Error> {
        match cmd {
            Command::Arith(op) => self.gen_arith(*op),
            Command::Push(segment, index) => self.gen_push(*segment, *index)?,
            Command::Pop(segment, index) => self.gen_pop(*segment, *index)?,
            Command::Label(name) => self.emit(format!("({name})")),
            Command::Goto(name) => {
                self.emit(format!("@{name}"));
                self.emit("0;JMP");
            }
            Command::IfGoto(name) => {
                self.pop_to_d();
                self.emit(format!("@{name}"));
                self.emit("D;JNE");
            }
            Command::Function(name, locals) => self.gen_function(name, *locals),
            Command::Call(name, args) => self.gen_call(name, *args),
            Command::Return => self.gen_return(),
        }
        Ok(std::mem::take(&mut self.output))
    }

    fn gen_arith(&mut self, op: ArithOp) {
        match op {
            ArithOp::Neg => self.gen_unary("M=-M"),
            ArithOp::Not => self.gen_unary("M=!M"),
            ArithOp::Add => self.gen_binary("M=D+M"),
            ArithOp::Sub => self.gen_binary("M=M-D"),
            ArithOp::And => self.gen_binary("M=D&M"),
            ArithOp::Or => self.gen_binary("M=D|M"),
            ArithOp::Eq => self.gen_compare("EQ", "JEQ", "JNE"),
            ArithOp::Gt => self.gen_compare("GT", "JGT", "JLE"),
            ArithOp::Lt => self.gen_compare("LT", "JLT", "JGE"),
        }
    }

    fn gen_unary(&mut self, inst: &str) {
        self.emit("@SP");
        self.emit("A=M-1");
        self.emit(inst);
    }

    fn gen_binary(&mut self, inst: &str) {
        self.pop_to_d();
        self.emit("A=A-1");
        self.emit(inst);
    }

    /// D = first - second, then branch through a per-site TRUE/FALSE
    /// pair writing -1 or 0 at the stack top. The second jump is the
    /// complement of the first.
    fn gen_compare(&mut self, prefix: &str, jump_true: &str, jump_false: &str) {
        let n = self.cmp_counter;
        self.cmp_counter += 1;
        let true_label = format!("{prefix}_TRUE_{n}");
        let false_label = format!("{prefix}_FALSE_{n}");
        let end_label = format!("{prefix}_END_{n}");

        self.pop_to_d();
        self.emit("A=A-1");
        self.emit("D=M-D");
        self.emit(format!("@{true_label}"));
        self.emit(format!("D;{jump_true}"));
        self.emit(format!("@{false_label}"));
        self.emit(format!("D;{jump_false}"));
        self.emit(format!("({true_label})"));
        self.emit("@SP");
        self.emit("A=M-1");
        self.emit("M=-1");
        self.emit(format!("@{end_label}"));
        self.emit("0;JMP");
        self.emit(format!("({false_label})"));
        self.emit("@SP");
        self.emit("A=M-1");
        self.emit("M=0");
        self.emit(format!("({end_label})"));
    }

    fn gen_push(&mut self, segment: Segment, index: u16) -> Result<(), Error> {
        match segment::access(segment, index, &self.file_base)? {
            Access::Constant(value) => {
                self.emit(format!("@{value}"));
                self.emit("D=A");
            }
            Access::Direct(addr) => {
                self.emit(format!("@{addr}"));
                self.emit("D=M");
            }
            Access::Static(name) => {
                self.emit(format!("@{name}"));
                self.emit("D=M");
            }
            Access::Indirect(base) => {
                self.emit(format!("@{base}"));
                self.emit("D=M");
                self.emit(format!("@{index}"));
                self.emit("A=D+A");
                self.emit("D=M");
            }
        }
        self.push_from_d();
        Ok(())
    }

    fn gen_pop(&mut self, segment: Segment, index: u16) -> Result<(), Error> {
        match segment::access(segment, index, &self.file_base)? {
            Access::Constant(_) => return Err(Error::ConstantPop),
            Access::Direct(addr) => {
                self.pop_to_d();
                self.emit(format!("@{addr}"));
                self.emit("M=D");
            }
            Access::Static(name) => {
                self.pop_to_d();
                self.emit(format!("@{name}"));
                self.emit("M=D");
            }
            Access::Indirect(base) => {
                // target address into R13 before the stack moves
                self.emit(format!("@{base}"));
                self.emit("D=M");
                self.emit(format!("@{index}"));
                self.emit("D=D+A");
                self.emit("@R13");
                self.emit("M=D");
                self.pop_to_d();
                self.emit("@R13");
                self.emit("A=M");
                self.emit("M=D");
            }
        }
        Ok(())
    }

    fn gen_function(&mut self, name: &str, locals: u16) {
        self.emit(format!("({name})"));
        if locals > 0 {
            self.emit("D=0");
            for _ in 0..locals {
                self.push_from_d();
            }
        }
    }

    fn gen_call(&mut self, name: &str, args: u16) {
        let ret = format!("RET_{}", self.call_counter);
        self.call_counter += 1;

        // push the return-site address
        self.emit(format!("@{ret}"));
        self.emit("D=A");
        self.push_from_d();
        // save the caller frame
        for cell in ["LCL", "ARG", "THIS", "THAT"] {
            self.emit(format!("@{cell}"));
            self.emit("D=M");
            self.push_from_d();
        }
        // ARG = SP - 5 - args
        self.emit("@SP");
        self.emit("D=M");
        self.emit(format!("@{}", args + 5));
        self.emit("D=D-A");
        self.emit("@ARG");
        self.emit("M=D");
        // LCL = SP
        self.emit("@SP");
        self.emit("D=M");
        self.emit("@LCL");
        self.emit("M=D");
        // transfer control
        self.emit(format!("@{name}"));
        self.emit("0;JMP");
        self.emit(format!("({ret})"));
    }

    fn gen_return(&mut self) {
        // frame pointer into R13
        self.emit("@LCL");
        self.emit("D=M");
        self.emit("@R13");
        self.emit("M=D");
        // return address = *(frame - 5), saved before *ARG is overwritten
        self.emit("@5");
        self.emit("A=D-A");
        self.emit("D=M");
        self.emit("@R14");
        self.emit("M=D");
        // *ARG = pop(), the callee's result
        self.pop_to_d();
        self.emit("@ARG");
        self.emit("A=M");
        self.emit("M=D");
        // SP = ARG + 1
        self.emit("@ARG");
        self.emit("D=M+1");
        self.emit("@SP");
        self.emit("M=D");
        // restore the caller frame, walking down from frame - 1
        for cell in ["THAT", "THIS", "ARG", "LCL"] {
            self.emit("@R13");
            self.emit("AM=M-1");
            self.emit("D=M");
            self.emit(format!("@{cell}"));
            self.emit("M=D");
        }
        // jump to the return site
        self.emit("@R14");
        self.emit("A=M");
        self.emit("0;JMP");
    }

    /// *SP = D; SP += 1
    fn push_from_d(&mut self) {
        self.emit("@SP");
        self.emit("A=M");
        self.emit("M=D");
        self.emit("@SP");
        self.emit("M=M+1");
    }

    /// SP -= 1; D = *SP, leaving A at the new stack top
    fn pop_to_d(&mut self) {
        self.emit("@SP");
        self.emit("AM=M-1");
        self.emit("D=M");
    }
}

impl Default for CodeGen {
    fn default() -> Self {
        CodeGen::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gen(codegen: &mut CodeGen, line: &str) -> Vec<String> {
        let cmd = Command::parse(line).unwrap().unwrap();
        codegen.gen(&cmd).unwrap()
    }

    #[test]
    fn push_constant() {
        let mut codegen = CodeGen::new();
        assert_eq!(
            gen(&mut codegen, "push constant 7"),
            ["@7", "D=A", "@SP", "A=M", "M=D", "@SP", "M=M+1"]
        );
    }

    #[test]
    fn push_indirect() {
        let mut codegen = CodeGen::new();
        assert_eq!(
            gen(&mut codegen, "push local 2"),
            ["@LCL", "D=M", "@2", "A=D+A", "D=M", "@SP", "A=M", "M=D", "@SP", "M=M+1"]
        );
    }

    #[test]
    fn pop_computes_target_before_stack() {
        let mut codegen = CodeGen::new();
        let block = gen(&mut codegen, "pop that 5");
        let r13 = block.iter().position(|l| l == "@R13").unwrap();
        let sp = block.iter().position(|l| l == "@SP").unwrap();
        assert!(r13 < sp);
        assert_eq!(block.last().unwrap(), "M=D");
    }

    #[test]
    fn pop_direct_skips_scratch() {
        let mut codegen = CodeGen::new();
        assert_eq!(
            gen(&mut codegen, "pop temp 3"),
            ["@SP", "AM=M-1", "D=M", "@8", "M=D"]
        );
        assert_eq!(
            gen(&mut codegen, "pop pointer 1"),
            ["@SP", "AM=M-1", "D=M", "@4", "M=D"]
        );
    }

    #[test]
    fn static_uses_file_base() {
        let mut codegen = CodeGen::new();
        codegen.set_file("Main");
        assert!(gen(&mut codegen, "push static 3").contains(&"@Main.3".to_string()));
        codegen.set_file("Sys");
        assert!(gen(&mut codegen, "pop static 3").contains(&"@Sys.3".to_string()));
    }

    #[test]
    fn pop_constant_is_rejected() {
        let mut codegen = CodeGen::new();
        let cmd = Command::parse("pop constant 7").unwrap().unwrap();
        assert!(matches!(codegen.gen(&cmd), Err(Error::ConstantPop)));
    }

    #[test]
    fn comparison_labels_are_per_site() {
        let mut codegen = CodeGen::new();
        let first = gen(&mut codegen, "eq");
        let second = gen(&mut codegen, "eq");
        assert!(first.contains(&"(EQ_TRUE_0)".to_string()));
        assert!(second.contains(&"(EQ_TRUE_1)".to_string()));
        assert!(first.contains(&"D;JEQ".to_string()));
        assert!(first.contains(&"D;JNE".to_string()));
    }

    #[test]
    fn comparison_jump_pairs() {
        let mut codegen = CodeGen::new();
        let gt = gen(&mut codegen, "gt");
        assert!(gt.contains(&"D;JGT".to_string()));
        assert!(gt.contains(&"D;JLE".to_string()));
        let lt = gen(&mut codegen, "lt");
        assert!(lt.contains(&"D;JLT".to_string()));
        assert!(lt.contains(&"D;JGE".to_string()));
    }

    #[test]
    fn if_goto_pops_exactly_once() {
        let mut codegen = CodeGen::new();
        let block = gen(&mut codegen, "if-goto END");
        assert_eq!(
            block,
            ["@SP", "AM=M-1", "D=M", "@END", "D;JNE"]
        );
    }

    #[test]
    fn call_sites_get_distinct_return_labels() {
        let mut codegen = CodeGen::new();
        let first = gen(&mut codegen, "call Math.max 2");
        let second = gen(&mut codegen, "call Math.max 2");
        assert!(first.contains(&"(RET_0)".to_string()));
        assert!(first.contains(&"@RET_0".to_string()));
        assert!(second.contains(&"(RET_1)".to_string()));
        assert!(!second.contains(&"(RET_0)".to_string()));
    }

    #[test]
    fn function_declares_label_and_zeroes_locals() {
        let mut codegen = CodeGen::new();
        let block = gen(&mut codegen, "function Sys.init 2");
        assert_eq!(block[0], "(Sys.init)");
        assert_eq!(block.iter().filter(|l| *l == "M=M+1").count(), 2);

        let bare = gen(&mut codegen, "function Math.max 0");
        assert_eq!(bare, ["(Math.max)"]);
    }

    #[test]
    fn bootstrap_sets_sp_then_calls_sys_init() {
        let mut codegen = CodeGen::new();
        let block = codegen.bootstrap();
        assert_eq!(&block[..4], ["@256", "D=A", "@SP", "M=D"]);
        assert!(block.contains(&"@Sys.init".to_string()));
        assert!(block.contains(&"(RET_0)".to_string()));
        // the next call site continues the counter
        let call = gen(&mut codegen, "call Main.main 0");
        assert!(call.contains(&"(RET_1)".to_string()));
    }
}
