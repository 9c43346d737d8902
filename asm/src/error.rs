use color_print::cprintln;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Re-defined label: `{0}`")]
    DuplicateLabel(String),

    #[error("Unknown dest: `{0}`")]
    UnknownDest(String),

    #[error("Unknown comp: `{0}`")]
    UnknownComp(String),

    #[error("Unknown jump: `{0}`")]
    UnknownJump(String),

    #[error("Constant out of range: `@{0}`")]
    BadConstant(String),

    #[error("Syntax Error: Cannot parse")]
    SyntaxError,

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to read line")]
    FileRead(#[source] std::io::Error),

    #[error("Failed to create file: {0}")]
    FileCreate(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),
}

impl Error {
    /// Print the error with the offending file location and source line.
    pub fn print_diag(&self, file: &str, line_idx: usize, line: &str) {
        cprintln!("<red,bold>error</>: {}", self);

        // line_idx is 0-based, display as 1-based
        let line_num = line_idx + 1;
        cprintln!("     <blue>--></> <underline>{}:{}</>", file, line_num);
        cprintln!("      <blue>|</>");
        cprintln!(" <blue>{:>4} |</> {}", line_num, line);
        cprintln!("      <blue>|</>");
    }
}
