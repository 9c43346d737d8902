use arch::segment::Segment;
use color_print::cprintln;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown command: `{0}`")]
    UnknownCommand(String),

    #[error("Unknown segment: `{0}`")]
    UnknownSegment(String),

    #[error("Invalid name: `{0}`")]
    InvalidName(String),

    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("Cannot parse `{0}` as {1}")]
    ParseArgument(String, &'static str),

    #[error("Index out of range: `{segment} {index}`")]
    BadIndex { segment: Segment, index: u16 },

    #[error("Cannot pop to the constant segment")]
    ConstantPop,

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to read line")]
    FileRead(#[source] std::io::Error),

    #[error("Failed to read directory: {0}")]
    DirRead(String, #[source] std::io::Error),

    #[error("No .vm files in: {0}")]
    NoInput(String),

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
