//! Error types used across mount-chown.
use thiserror::Error;

/// High-level error categories for parsing, validation and filesystem work.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("invalid path")]
    InvalidPath,
    #[error("invalid owner")]
    InvalidOwner,
    #[error("invalid mode")]
    InvalidMode,
    #[error("invalid policy")]
    InvalidPolicy,
    #[error("missing field")]
    MissingField,
    #[error("unknown argument")]
    UnknownArgument,
    #[error("io error")]
    Io,
}

/// Structured error with a kind and human message.
#[derive(Debug, Error)]
#[error("{kind}: {msg}")]
pub struct Error {
    pub kind: ErrorKind,
    pub msg: String,
}

impl Error {
    pub fn new(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            msg: msg.into(),
        }
    }

    /// Wrap an I/O failure, prefixing the operation that produced it.
    pub fn io(op: &str, e: &std::io::Error) -> Self {
        Self::new(ErrorKind::Io, format!("{op}: {e}"))
    }
}

/// Convenient alias for results returning a `types::Error`.
pub type Result<T> = std::result::Result<T, Error>;
