use num_enum::{FromPrimitive, IntoPrimitive};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Jump field of a compute instruction. Variant order is the 3-bit
/// encoding: never=000 up through unconditional=111.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Default,
    FromPrimitive,
    IntoPrimitive,
    EnumString,
    Display,
)]
#[repr(u8)]
pub enum Jump {
    #[default]
    #[strum(serialize = "")]
    Never,
    JGT,
    JEQ,
    JGE,
    JLT,
    JNE,
    JLE,
    JMP,
}

impl Jump {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.parse::<Self>() {
            Ok(j) => Ok(j),
            Err(_) => Err(format!("Unknown jump: {s}")),
        }
    }

    pub fn bits(self) -> u16 {
        u8::from(self) as u16
    }
}
