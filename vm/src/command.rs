use crate::error::Error;
use arch::{arith::ArithOp, segment::Segment};

/// Remove a `//` comment and surrounding whitespace.
pub fn strip(raw: &str) -> &str {
    match raw.find("//") {
        Some(pos) => raw[..pos].trim(),
        None => raw.trim(),
    }
}

/// One VM command. The closed vocabulary of the source language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Arith(ArithOp),
    Push(Segment, u16),
    Pop(Segment, u16),
    Label(String),
    Goto(String),
    IfGoto(String),
    Function(String, u16),
    Call(String, u16),
    Return,
}

impl Command {
    /// Classify one source line. `None` for blank or comment-only lines.
    /// Name and shape validation happens here, before any code is
    /// generated for the command.
    pub fn parse(raw: &str) -> Result<Option<Command>, Error> {
        let code = strip(raw);
        if code.is_empty() {
            return Ok(None);
        }
        let words: Vec<&str> = code.split_whitespace().collect();

        // Get argument by index and parse as the given shape.
        // Example: arg!(1, index) -> u16
        macro_rules! arg {
            ($idx:expr, name) => {{
                let arg = *words.get($idx).ok_or(Error::MissingArgument("name"))?;
                parse_name(arg, FUNCTION_CHARS)?
            }};
            ($idx:expr, label) => {{
                let arg = *words.get($idx).ok_or(Error::MissingArgument("name"))?;
                parse_name(arg, LABEL_CHARS)?
            }};
            ($idx:expr, $kind:ident) => {{
                let arg = *words.get($idx).ok_or(Error::MissingArgument(stringify!($kind)))?;
                arg.parse::<u16>()
                    .map_err(|_| Error::ParseArgument(arg.to_string(), stringify!($kind)))?
            }};
        }

        let cmd = match words[0] {
            "push" => Command::Push(parse_segment(&words)?, arg!(2, index)),
            "pop" => Command::Pop(parse_segment(&words)?, arg!(2, index)),
            "label" => Command::Label(arg!(1, label)),
            "goto" => Command::Goto(arg!(1, label)),
            "if-goto" => Command::IfGoto(arg!(1, label)),
            "function" => Command::Function(arg!(1, name), arg!(2, arity)),
            "call" => Command::Call(arg!(1, name), arg!(2, arity)),
            "return" => Command::Return,
            head => match ArithOp::parse(head) {
                Ok(op) => Command::Arith(op),
                Err(_) => return Err(Error::UnknownCommand(head.to_string())),
            },
        };
        Ok(Some(cmd))
    }
}

fn parse_segment(words: &[&str]) -> Result<Segment, Error> {
    let arg = *words.get(1).ok_or(Error::MissingArgument("segment"))?;
    Segment::parse(arg).map_err(|_| Error::UnknownSegment(arg.to_string()))
}

const FUNCTION_CHARS: &str = "._";
const LABEL_CHARS: &str = "._:$";

/// Names are alphanumeric plus the given punctuation set and must not
/// start with a digit.
fn parse_name(s: &str, extra: &str) -> Result<String, Error> {
    let head_ok = !s.starts_with(|c: char| c.is_ascii_digit());
    let chars_ok = s
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || extra.contains(c));
    if s.is_empty() || !head_ok || !chars_ok {
        return Err(Error::InvalidName(s.to_string()));
    }
    Ok(s.to_string())
}
