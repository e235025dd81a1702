// File: ./src/error.rs
//! Error taxonomy shared by the parser, the commands and the storage adapter.
//!
//! Every variant is recoverable: the controller turns it into a response line
//! and keeps accepting input.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LictError {
    /// Unknown keyword or malformed arguments.
    #[error("{0}")]
    Parse(String),

    /// The command was well-formed but cannot be applied to the current list.
    #[error("{0}")]
    Execution(String),

    /// Reading or writing the data file failed.
    #[error("{0}")]
    Storage(String),
}

impl LictError {
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

impl From<std::io::Error> for LictError {
    fn from(e: std::io::Error) -> Self {
        Self::Storage(e.to_string())
    }
}

pub type Result<T, E = LictError> = std::result::Result<T, E>;
