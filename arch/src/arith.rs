use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The nine stack arithmetic-logic commands of the VM language.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum ArithOp {
    Add,
    Sub,
    Neg,
    Eq,
    Gt,
    Lt,
    And,
    Or,
    Not,
}

impl ArithOp {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.parse::<Self>() {
            Ok(op) => Ok(op),
            Err(_) => Err(format!("Unknown arithmetic command: {s}")),
        }
    }

    /// Binary ops pop two operands; `neg` and `not` pop one.
    pub fn is_binary(self) -> bool {
        !matches!(self, ArithOp::Neg | ArithOp::Not)
    }

    /// The comparisons leave a boolean (0 or -1) on the stack.
    pub fn is_comparison(self) -> bool {
        matches!(self, ArithOp::Eq | ArithOp::Gt | ArithOp::Lt)
    }
}
