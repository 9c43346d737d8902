use color_print::{cformat, cprintln};
use hackasm::assembler::Program;
use hackasm::parser::{AValue, Instruction};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(version, about = "Hack assembler", help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file
    #[clap(default_value = "main.asm")]
    input: String,

    /// Output file (defaults to the input with a .hack extension)
    #[clap(short, long)]
    output: Option<String>,

    /// Dump the annotated listing
    #[clap(short, long)]
    dump: bool,
}

fn main() {
    use clap::Parser;
    use std::io::{BufRead, Write};

    let args: Args = Args::parse();
    println!("Hack Assembler");

    println!("1. Read and Parse");
    println!("  < {}", args.input);
    let file = std::fs::File::open(&args.input)
        .expect(&cformat!("<r,s>Failed to open File</>: {}", args.input));
    let mut lines = vec![];
    for raw in std::io::BufReader::new(file).lines() {
        lines.push(raw.expect(&cformat!("<r,s>Failed to read line</>")));
    }

    let mut program = match Program::parse(&lines) {
        Ok(program) => program,
        Err((idx, err)) => {
            err.print_diag(&args.input, idx, &lines[idx]);
            std::process::exit(1);
        }
    };
    let words = program.encode();

    println!("2. Resolve and Emit");
    let output = args.output.unwrap_or_else(|| output_name(&args.input));
    println!("  > {}", output);
    let mut file = std::fs::File::create(&output)
        .expect(&cformat!("<r,s>Failed to create File</>: {}", output));
    for word in &words {
        writeln!(file, "{word}").expect(&cformat!("<r,s>Failed to write File</>: {}", output));
    }

    if args.dump {
        print_dump(&program, &words);
    }
}

fn output_name(input: &str) -> String {
    std::path::Path::new(input)
        .with_extension("hack")
        .to_string_lossy()
        .into_owned()
}

/// Annotated listing: instruction address, emitted word, source line.
/// Address values that hit a well-known cell are named.
fn print_dump(program: &Program, words: &[String]) {
    let mut words = words.iter();
    for (idx, line) in program.lines.iter().enumerate() {
        let line_num = idx + 1;
        match &line.stmt {
            None => {
                println!("{:24}| {:>4}: {}", "", line_num, line.raw.trim());
            }
            Some(Instruction::Label(name)) => {
                cprintln!("{:24}| {:>4}: <green>({})</>", "", line_num, name);
            }
            Some(stmt) => {
                let word = words.next().map(String::as_str).unwrap_or("");
                let addr = line.addr.unwrap_or(0);
                let note = match stmt {
                    Instruction::Address(value) => {
                        let target = match value {
                            AValue::Literal(v) => Some(*v),
                            AValue::Symbol(name) => program.symbols.get(name),
                        };
                        target
                            .and_then(|t| arch::reg::CANONICAL.get_by_right(&t))
                            .map(|name| cformat!(" <cyan>; {}</>", name))
                            .unwrap_or_default()
                    }
                    _ => String::new(),
                };
                println!(
                    "[{:04X}] {} | {:>4}: {}{}",
                    addr,
                    word,
                    line_num,
                    line.raw.trim(),
                    note
                );
            }
        }
    }
    println!("------------------------+---------------------------------------------");
}
