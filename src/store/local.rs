use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{new_id, BackingStore, Payload};
use crate::error::StoreError;

const STORE_NAME: &str = "local";

#[derive(Debug, Serialize, Deserialize)]
struct PayloadMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    filename: Option<String>,
    size: usize,
}

/// Directory-backed store. Each payload is written as `<id>.bin` next to a
/// `<id>.json` metadata sidecar.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| StoreError::io(&root, e))?;
        debug!(root = %root.display(), "opened local store");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn content_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}.bin"))
    }

    fn metadata_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }
}

impl BackingStore for LocalStore {
    fn name(&self) -> &str {
        STORE_NAME
    }

    fn store(&self, payload: Payload) -> Result<String, StoreError> {
        let id = new_id();
        let content_path = self.content_path(&id);
        let metadata_path = self.metadata_path(&id);

        let metadata = PayloadMetadata {
            filename: payload.filename,
            size: payload.content.len(),
        };
        let encoded = serde_json::to_vec(&metadata)
            .map_err(|e| StoreError::serialization(e.to_string()))?;

        fs::write(&content_path, &payload.content).map_err(|e| StoreError::io(&content_path, e))?;
        fs::write(&metadata_path, encoded).map_err(|e| StoreError::io(&metadata_path, e))?;

        trace!(id = %id, size = metadata.size, "stored payload");
        Ok(id)
    }

    fn fetch(&self, id: &str) -> Result<Payload, StoreError> {
        // Ids come from remote callers; refuse anything that could escape the root.
        if id.is_empty() || id.contains(['/', '\\']) || id.contains("..") {
            return Err(StoreError::not_found(STORE_NAME, id));
        }

        let content_path = self.content_path(id);
        let content = match fs::read(&content_path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::not_found(STORE_NAME, id));
            }
            Err(e) => return Err(StoreError::io(&content_path, e)),
        };

        let metadata_path = self.metadata_path(id);
        let filename = match fs::read(&metadata_path) {
            Ok(raw) => {
                let metadata: PayloadMetadata = serde_json::from_slice(&raw)
                    .map_err(|e| StoreError::serialization(e.to_string()))?;
                metadata.filename
            }
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(StoreError::io(&metadata_path, e)),
        };

        trace!(id = %id, size = content.len(), "fetched payload");
        Ok(Payload { content, filename })
    }
}
