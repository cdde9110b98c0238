use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown property: {0}")]
    UnknownProperty(String),

    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error("corrupt document {}: {message}", path.display())]
    CorruptDocument { path: PathBuf, message: String },

    #[error("could not encode {format} document: {message}")]
    Encode {
        format: &'static str,
        message: String,
    },

    #[error("unknown format: {0} (expected xml, json or yaml)")]
    UnknownFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("input closed before a value was entered")]
    InputClosed,
}

impl Error {
    pub(crate) fn corrupt(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::CorruptDocument {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Returns `true` for configuration or programming errors that should
    /// abort the current operation rather than be reported and retried.
    pub fn is_bug(&self) -> bool {
        matches!(self, Self::UnknownProperty(_) | Self::InvariantViolation(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
