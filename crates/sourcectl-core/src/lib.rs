use error::SourceError;

pub mod command;
pub mod error;
pub mod manager;
pub mod runner;
pub mod source;
pub mod table;

#[cfg(test)]
pub mod test_utils;

pub use manager::SourceManager;
pub use runner::{CommandRunner, ProcessOutput, SystemCommandRunner};
pub use source::Source;
pub use table::{FixedWidthTableParser, SourceTableParser};

pub type SourceResult<T> = std::result::Result<T, SourceError>;
