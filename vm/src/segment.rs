use crate::error::Error;
use arch::reg;
use arch::segment::Segment;

/// How a `segment index` pair reaches RAM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Address is `*base + index`; the base-pointer cell is named.
    Indirect(&'static str),
    /// Fixed RAM address, known at translation time.
    Direct(u16),
    /// Per-file synthetic symbol, allocated by the assembler.
    Static(String),
    /// Immediate value; push only.
    Constant(u16),
}

/// Resolve a segment reference against the current file's static scope.
pub fn access(segment: Segment, index: u16, file_base: &str) -> Result<Access, Error> {
    if let Some(base) = segment.base_name() {
        return Ok(Access::Indirect(base));
    }
    match segment {
        Segment::Pointer if index <= 1 => Ok(Access::Direct(reg::THIS + index)),
        Segment::Temp if index <= 7 => Ok(Access::Direct(reg::TEMP_BASE + index)),
        Segment::Static => Ok(Access::Static(format!("{file_base}.{index}"))),
        Segment::Constant => Ok(Access::Constant(index)),
        _ => Err(Error::BadIndex { segment, index }),
    }
}
