use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The eight named memory regions of the VM language.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum Segment {
    Local,
    Argument,
    This,
    That,
    Pointer,
    Temp,
    Static,
    Constant,
}

impl Segment {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.parse::<Self>() {
            Ok(seg) => Ok(seg),
            Err(_) => Err(format!("Unknown segment: {s}")),
        }
    }

    /// Base-pointer cell name for the four indirect segments.
    pub fn base_name(self) -> Option<&'static str> {
        match self {
            Segment::Local => Some("LCL"),
            Segment::Argument => Some("ARG"),
            Segment::This => Some("THIS"),
            Segment::That => Some("THAT"),
            _ => None,
        }
    }
}

#[test]
fn test() {
    assert_eq!(Segment::parse("local"), Ok(Segment::Local));
    assert_eq!(Segment::parse("constant"), Ok(Segment::Constant));
    assert!(Segment::parse("Local").is_err());
    assert!(Segment::parse("heap").is_err());
    assert_eq!(Segment::Argument.base_name(), Some("ARG"));
    assert_eq!(Segment::Temp.base_name(), None);
    assert_eq!(Segment::Local.to_string(), "local");
}
