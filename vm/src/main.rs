use color_print::cformat;
use hackvm::codegen::CodeGen;
use hackvm::command::Command;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(version, about = "Hack VM translator", help_template = HELP_TEMPLATE)]
struct Args {
    /// Input .vm file or a directory of .vm files
    #[clap(default_value = "main.vm")]
    input: String,

    /// Output file (defaults to the input with a .asm extension)
    #[clap(short, long)]
    output: Option<String>,

    /// Skip the SP=256 / call Sys.init startup block
    #[clap(long)]
    no_bootstrap: bool,
}

fn main() {
    use clap::Parser;
    use std::io::{BufRead, Write};

    let args: Args = Args::parse();
    println!("Hack VM Translator");

    let input = std::path::Path::new(&args.input);
    let sources = collect_sources(input);
    if sources.is_empty() {
        eprintln!("{}", cformat!("<r,s>No .vm files in</>: {}", args.input));
        std::process::exit(1);
    }

    let output = args.output.unwrap_or_else(|| output_name(input));
    println!("  > {}", output);
    let mut out = std::fs::File::create(&output)
        .expect(&cformat!("<r,s>Failed to create File</>: {}", output));

    let mut codegen = CodeGen::new();
    if !args.no_bootstrap {
        writeln!(out, "// bootstrap").expect(&cformat!("<r,s>Failed to write File</>: {}", output));
        for inst in codegen.bootstrap() {
            writeln!(out, "{inst}").expect(&cformat!("<r,s>Failed to write File</>: {}", output));
        }
        writeln!(out).expect(&cformat!("<r,s>Failed to write File</>: {}", output));
    }

    for source in &sources {
        let path = source.to_string_lossy();
        println!("  < {}", path);
        codegen.set_file(&file_base(source));

        let file = std::fs::File::open(source)
            .expect(&cformat!("<r,s>Failed to open File</>: {}", path));
        let mut lines = vec![];
        for raw in std::io::BufReader::new(file).lines() {
            lines.push(raw.expect(&cformat!("<r,s>Failed to read line</>")));
        }

        for (idx, raw) in lines.iter().enumerate() {
            let cmd = match Command::parse(raw) {
                Ok(Some(cmd)) => cmd,
                Ok(None) => continue,
                Err(err) => {
                    err.print_diag(&path, idx, raw);
                    std::process::exit(1);
                }
            };
            let block = match codegen.gen(&cmd) {
                Ok(block) => block,
                Err(err) => {
                    err.print_diag(&path, idx, raw);
                    std::process::exit(1);
                }
            };
            writeln!(out, "// {}", raw.trim())
                .expect(&cformat!("<r,s>Failed to write File</>: {}", output));
            for inst in block {
                writeln!(out, "{inst}")
                    .expect(&cformat!("<r,s>Failed to write File</>: {}", output));
            }
            writeln!(out).expect(&cformat!("<r,s>Failed to write File</>: {}", output));
        }
    }
}

/// A directory yields every .vm file inside, sorted by name; a plain
/// path yields itself.
fn collect_sources(input: &std::path::Path) -> Vec<std::path::PathBuf> {
    if !input.is_dir() {
        return vec![input.to_path_buf()];
    }
    let mut sources: Vec<_> = match std::fs::read_dir(input) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "vm"))
            .collect(),
        Err(_) => vec![],
    };
    sources.sort();
    sources
}

/// `Prog/` translates to `Prog/Prog.asm`; `Foo.vm` to `Foo.asm`.
fn output_name(input: &std::path::Path) -> String {
    let target = if input.is_dir() {
        input.join(format!("{}.asm", file_base(input)))
    } else {
        input.with_extension("asm")
    };
    target.to_string_lossy().into_owned()
}

/// File name without the extension; the static scope of a module.
fn file_base(path: &std::path::Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
