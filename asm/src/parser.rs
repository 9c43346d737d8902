use crate::error::Error;
use arch::{comp::comp_bits, dest::Dest, jump::Jump};

/// Remove a `//` comment and surrounding whitespace.
pub fn strip(raw: &str) -> &str {
    match raw.find("//") {
        Some(pos) => raw[..pos].trim(),
        None => raw.trim(),
    }
}

/// Value of an `@` instruction: a decimal literal or a symbol resolved
/// against the table in pass 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AValue {
    Literal(u16),
    Symbol(String),
}

impl AValue {
    fn parse(s: &str) -> Result<AValue, Error> {
        if s.is_empty() {
            return Err(Error::SyntaxError);
        }
        match s.chars().next() {
            Some(c) if c.is_ascii_digit() => match s.parse::<u16>() {
                Ok(v) if v <= 0x7FFF => Ok(AValue::Literal(v)),
                _ => Err(Error::BadConstant(s.to_string())),
            },
            _ => Ok(AValue::Symbol(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// `@value`
    Address(AValue),
    /// `dest=comp;jump` with comp already encoded as its 7-bit field
    Compute { dest: Dest, comp: u16, jump: Jump },
    /// `(name)`
    Label(String),
}

impl Instruction {
    /// Classify one source line. `None` for blank or comment-only lines.
    pub fn parse(raw: &str) -> Result<Option<Instruction>, Error> {
        let code = strip(raw);
        if code.is_empty() {
            return Ok(None);
        }

        if let Some(rest) = code.strip_prefix('@') {
            return Ok(Some(Instruction::Address(AValue::parse(rest)?)));
        }

        if let Some(rest) = code.strip_prefix('(') {
            let name = rest.strip_suffix(')').ok_or(Error::SyntaxError)?;
            return Ok(Some(Instruction::Label(name.to_string())));
        }

        // dest=comp;jump, with `=` and `;` both optional
        let (dest, rest) = match code.split_once('=') {
            Some((dest, rest)) => (dest, rest),
            None => ("", code),
        };
        let (comp, jump) = match rest.split_once(';') {
            Some((comp, jump)) => (comp, jump),
            None => (rest, ""),
        };

        let dest = dest.trim();
        let comp = comp.trim();
        let jump = jump.trim();

        let dest = Dest::parse(dest).map_err(|_| Error::UnknownDest(dest.to_string()))?;
        let bits = comp_bits(comp).ok_or_else(|| Error::UnknownComp(comp.to_string()))?;
        let jump = Jump::parse(jump).map_err(|_| Error::UnknownJump(jump.to_string()))?;

        Ok(Some(Instruction::Compute {
            dest,
            comp: bits,
            jump,
        }))
    }
}
