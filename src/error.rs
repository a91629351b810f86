//! Error types shared by the loaders and both engines.

use std::fmt;
use std::io;

/// Fatal errors raised before an evolutionary loop starts.
#[derive(Debug)]
pub enum Error {
    /// Reading the instance or writing the solution failed.
    Io(io::Error),
    /// The input record is not valid JSON or misses required fields.
    Json(serde_json::Error),
    /// The instance is structurally broken (ids, references, weights).
    InvalidInstance(String),
    /// No selected facility could ever cover this demand point.
    Uncoverable { point: usize },
    /// Engine parameters that cannot work for this instance.
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "I/O error: {err}"),
            Error::Json(err) => write!(f, "malformed input record: {err}"),
            Error::InvalidInstance(msg) => write!(f, "invalid problem instance: {msg}"),
            Error::Uncoverable { point } => {
                write!(f, "point {point} cannot be covered by any facility")
            }
            Error::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
