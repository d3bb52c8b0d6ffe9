//! Backing store accessors.
//!
//! Strategies hand large or opaque payloads to a backing store and keep only
//! the returned id. The store is shared by every strategy in a registry, so
//! implementations must be safe to call from several threads at once.

pub mod local;
pub mod memory;

pub use local::LocalStore;
pub use memory::MemoryStore;

use crate::error::StoreError;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Payload {
    pub content: Vec<u8>,
    pub filename: Option<String>,
}

impl Payload {
    pub fn new(content: impl Into<Vec<u8>>) -> Self {
        Self {
            content: content.into(),
            filename: None,
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

pub trait BackingStore: Send + Sync {
    /// Name recorded in the `storage` field of issued references.
    fn name(&self) -> &str;

    /// Persist a payload and return its id.
    fn store(&self, payload: Payload) -> Result<String, StoreError>;

    fn fetch(&self, id: &str) -> Result<Payload, StoreError>;
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
