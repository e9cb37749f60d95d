//! Error enum
use std::fmt;
use std::path::PathBuf;

use crate::rules::RuleKind;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Serde(serde_json::Error),
    Url(url::ParseError),
    ThreadPool(rayon::ThreadPoolBuildError),
    /// Malformed declaration, bad rule arguments, missing source/target files.
    Config(String),
    /// Rule name absent from the filter/transform/augmenter registry.
    UnknownRule { kind: RuleKind, name: String },
    /// One side of a source pair ended before the other.
    Alignment { path: PathBuf, line: usize },
    Custom(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {e}"),
            Error::Serde(e) => write!(f, "json error: {e}"),
            Error::Url(e) => write!(f, "invalid location: {e}"),
            Error::ThreadPool(e) => write!(f, "could not build worker pool: {e}"),
            Error::Config(msg) => write!(f, "configuration error: {msg}"),
            Error::UnknownRule { kind, name } => write!(f, "unknown {kind} rule: {name:?}"),
            Error::Alignment { path, line } => write!(
                f,
                "alignment error: {:?} ended at line {} before its counterpart",
                path, line
            ),
            Error::Custom(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serde(e)
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Error {
        Error::Url(e)
    }
}

impl From<rayon::ThreadPoolBuildError> for Error {
    fn from(e: rayon::ThreadPoolBuildError) -> Error {
        Error::ThreadPool(e)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}
