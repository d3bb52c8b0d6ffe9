use std::collections::HashMap;
use std::sync::RwLock;

use super::{new_id, BackingStore, Payload};
use crate::error::StoreError;

const STORE_NAME: &str = "memory";

/// In-process store. Payloads live as long as the store does.
#[derive(Debug, Default)]
pub struct MemoryStore {
    payloads: RwLock<HashMap<String, Payload>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.payloads.read().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BackingStore for MemoryStore {
    fn name(&self) -> &str {
        STORE_NAME
    }

    fn store(&self, payload: Payload) -> Result<String, StoreError> {
        let id = new_id();
        let mut payloads = self
            .payloads
            .write()
            .map_err(|_| StoreError::poisoned(STORE_NAME))?;
        payloads.insert(id.clone(), payload);
        Ok(id)
    }

    fn fetch(&self, id: &str) -> Result<Payload, StoreError> {
        let payloads = self
            .payloads
            .read()
            .map_err(|_| StoreError::poisoned(STORE_NAME))?;
        payloads
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(STORE_NAME, id))
    }
}
