use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("{strategy} strategy expected {expected}, found {found}")]
    UnexpectedShape {
        strategy: String,
        expected: String,
        found: String,
    },

    #[error("invalid base64 payload: {message}")]
    InvalidBase64 { message: String },

    #[error("payload object for '{key}' is missing field '{field}'")]
    MissingField { key: String, field: String },

    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("refusing to write through '{path}': {reason}")]
    UnsafePath { path: PathBuf, reason: String },
}

impl PayloadError {
    pub fn unexpected_shape(
        strategy: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::UnexpectedShape {
            strategy: strategy.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn invalid_base64(message: impl Into<String>) -> Self {
        Self::InvalidBase64 {
            message: message.into(),
        }
    }

    pub fn missing_field(key: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingField {
            key: key.into(),
            field: field.into(),
        }
    }

    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    pub fn file_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    pub fn unsafe_path(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::UnsafePath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
