use serde::{Deserialize, Serialize};
use std::fmt;

/// Destination field of a compute instruction: the set of registers the
/// ALU result is written to. Letters may appear in any order in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Dest {
    pub a: bool,
    pub d: bool,
    pub m: bool,
}

impl Dest {
    pub const NONE: Dest = Dest {
        a: false,
        d: false,
        m: false,
    };

    pub fn parse(s: &str) -> Result<Self, String> {
        let mut dest = Dest::NONE;
        for c in s.chars() {
            let flag = match c {
                'A' => &mut dest.a,
                'D' => &mut dest.d,
                'M' => &mut dest.m,
                _ => return Err(format!("Unknown dest: {s}")),
            };
            if *flag {
                return Err(format!("Unknown dest: {s}"));
            }
            *flag = true;
        }
        Ok(dest)
    }

    pub fn bits(self) -> u16 {
        (self.a as u16) << 2 | (self.d as u16) << 1 | self.m as u16
    }
}

impl fmt::Display for Dest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a {
            write!(f, "A")?;
        }
        if self.d {
            write!(f, "D")?;
        }
        if self.m {
            write!(f, "M")?;
        }
        Ok(())
    }
}
