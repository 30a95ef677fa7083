//! Error types for generation and persistence.

use std::path::PathBuf;

use thiserror::Error;

/// Reasons a generation request is rejected before any randomness is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRequest {
    #[error("select at least one character class")]
    NoClasses,

    #[error("length {length} is smaller than the {classes} selected character classes")]
    LengthTooShort { length: usize, classes: usize },

    #[error("the symbol set is empty")]
    EmptySymbolSet,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] InvalidRequest),

    #[error("secure random source unavailable: {0}")]
    RandomSourceUnavailable(#[from] rand_core::Error),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }

    /// True when the caller asked for something impossible, as opposed to
    /// an environment failure.
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, Self::InvalidRequest(_))
    }
}

/// Result type for strongpass operations
pub type Result<T> = std::result::Result<T, Error>;
