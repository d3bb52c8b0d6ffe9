use std::sync::Arc;

use super::definition_allows;
use crate::engine::{Leaf, Parameter, Resolvable, ResolvableKind, Strategy, Value};
use crate::error::{PayloadError, Result};
use crate::store::{BackingStore, Payload};

pub struct BytesStrategy {
    store: Arc<dyn BackingStore>,
}

impl BytesStrategy {
    pub fn new(store: Arc<dyn BackingStore>) -> Self {
        Self { store }
    }

    fn accepts(definition: Option<&Parameter>) -> bool {
        definition_allows(definition, |d| d.kind.is_bytes())
    }
}

impl Strategy for BytesStrategy {
    fn name(&self) -> &'static str {
        "bytes"
    }

    fn claims_for_upload(&self, value: &Leaf, definition: Option<&Parameter>) -> bool {
        matches!(value, Leaf::Bytes(_)) && Self::accepts(definition)
    }

    fn claims_for_download(&self, value: &Leaf, definition: Option<&Parameter>) -> bool {
        matches!(value, Leaf::Reference(r) if r.kind == ResolvableKind::Bytes)
            && Self::accepts(definition)
    }

    fn upload(&self, value: &Leaf, _definition: Option<&Parameter>) -> Result<Value> {
        let Leaf::Bytes(content) = value else {
            return Err(PayloadError::unexpected_shape(self.name(), "bytes", value.kind_name()).into());
        };

        let id = self.store.store(Payload::new(content.clone()))?;
        Ok(Value::reference(Resolvable::new(
            id,
            ResolvableKind::Bytes,
            self.store.name(),
        )))
    }

    fn download(&self, value: &Leaf, _definition: Option<&Parameter>) -> Result<Value> {
        let reference = match value {
            Leaf::Reference(r) if r.kind == ResolvableKind::Bytes => r,
            other => {
                return Err(PayloadError::unexpected_shape(
                    self.name(),
                    "bytes reference",
                    other.kind_name(),
                )
                .into())
            }
        };

        let payload = self.store.fetch(&reference.id)?;
        Ok(Value::bytes(payload.content))
    }
}
