pub mod codegen;
pub mod command;
pub mod error;
pub mod segment;

pub use codegen::CodeGen;
pub use command::Command;
pub use error::Error;
