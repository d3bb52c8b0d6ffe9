use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("payload '{id}' not found in store '{store}'")]
    NotFound { store: String, id: String },

    #[error("store i/o failed at '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to encode store metadata: {message}")]
    Serialization { message: String },

    #[error("store '{store}' lock poisoned")]
    Poisoned { store: String },
}

impl StoreError {
    pub fn not_found(store: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            store: store.into(),
            id: id.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    pub fn poisoned(store: impl Into<String>) -> Self {
        Self::Poisoned {
            store: store.into(),
        }
    }
}
