pub mod definition;
pub mod registry;
pub mod strategies;
pub mod value;

pub use definition::{find_definition, Parameter, ParameterType};
pub use registry::{Registry, RegistryBuilder};
pub use value::{
    InlineFile, Leaf, LocalFile, ParameterMap, Resolvable, ResolvableKind, Value,
};

use crate::error::{Result, SchemaError};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};

/// Which half of the transform family a resolve call runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Plain values become references suitable to send out.
    Upload,
    /// References received from a remote caller become plain values.
    Download,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::Download => "download",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How disagreements between a value's shape and its definition are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaMode {
    /// Walk the value's shape and ignore the definition's `multi` and nesting.
    #[default]
    Lenient,
    /// Fail with a [`SchemaError`] when a sequence meets a non-multi
    /// definition or a mapping meets a definition without nested parameters.
    Strict,
}

pub trait Strategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Must be free of side effects; `definition` may be absent.
    fn claims_for_upload(&self, value: &Leaf, definition: Option<&Parameter>) -> bool;

    /// Must be free of side effects; `definition` may be absent.
    fn claims_for_download(&self, value: &Leaf, definition: Option<&Parameter>) -> bool;

    fn upload(&self, value: &Leaf, definition: Option<&Parameter>) -> Result<Value>;

    fn download(&self, value: &Leaf, definition: Option<&Parameter>) -> Result<Value>;

    fn claims(&self, direction: Direction, value: &Leaf, definition: Option<&Parameter>) -> bool {
        match direction {
            Direction::Upload => self.claims_for_upload(value, definition),
            Direction::Download => self.claims_for_download(value, definition),
        }
    }

    fn transform(
        &self,
        direction: Direction,
        value: &Leaf,
        definition: Option<&Parameter>,
    ) -> Result<Value> {
        match direction {
            Direction::Upload => self.upload(value, definition),
            Direction::Download => self.download(value, definition),
        }
    }
}

/// Walks a parameter value tree alongside its definitions and hands every
/// leaf to the first registered strategy that claims it.
///
/// The input tree is never modified; every call builds a new tree with the
/// same keys and sequence lengths. Any strategy error aborts the whole call.
pub struct Resolver {
    registry: Registry,
    schema_mode: SchemaMode,
}

impl Resolver {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            schema_mode: SchemaMode::default(),
        }
    }

    pub fn with_schema_mode(mut self, schema_mode: SchemaMode) -> Self {
        self.schema_mode = schema_mode;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn schema_mode(&self) -> SchemaMode {
        self.schema_mode
    }

    pub fn resolve(
        &self,
        values: &ParameterMap,
        definitions: &[Parameter],
        direction: Direction,
    ) -> Result<ParameterMap> {
        let mut resolved = ParameterMap::new();
        for (key, value) in values {
            let definition = find_definition(definitions, key);
            let value = self.resolve_node(key, value, definition, direction)?;
            resolved.insert(key.clone(), value);
        }
        Ok(resolved)
    }

    /// Resolve a single node against an optional definition.
    pub fn resolve_value(
        &self,
        value: &Value,
        definition: Option<&Parameter>,
        direction: Direction,
    ) -> Result<Value> {
        let key = definition.map(|d| d.key.as_str()).unwrap_or_default();
        self.resolve_node(key, value, definition, direction)
    }

    fn resolve_node(
        &self,
        key: &str,
        value: &Value,
        definition: Option<&Parameter>,
        direction: Direction,
    ) -> Result<Value> {
        match value {
            Value::Mapping(map) => {
                let nested: &[Parameter] = match definition {
                    Some(d) => {
                        if self.schema_mode == SchemaMode::Strict && d.parameters.is_empty() {
                            return Err(SchemaError::no_nested_definitions(key).into());
                        }
                        &d.parameters
                    }
                    None => &[],
                };
                trace!(key, entries = map.len(), "resolving nested parameters");
                self.resolve(map, nested, direction).map(Value::Mapping)
            }
            Value::Sequence(items) => {
                if self.schema_mode == SchemaMode::Strict {
                    if let Some(d) = definition.filter(|d| !d.multi) {
                        return Err(SchemaError::not_multi(&d.key).into());
                    }
                }
                trace!(key, len = items.len(), "resolving multi parameter");
                items
                    .iter()
                    .map(|item| self.resolve_node(key, item, definition, direction))
                    .collect::<Result<Vec<_>>>()
                    .map(Value::Sequence)
            }
            Value::Leaf(leaf) => self.resolve_leaf(key, leaf, definition, direction),
        }
    }

    fn resolve_leaf(
        &self,
        key: &str,
        leaf: &Leaf,
        definition: Option<&Parameter>,
        direction: Direction,
    ) -> Result<Value> {
        for (name, strategy) in self.registry.iter() {
            if strategy.claims(direction, leaf, definition) {
                debug!(key, strategy = name, %direction, "strategy claimed parameter");
                return strategy.transform(direction, leaf, definition);
            }
        }
        trace!(key, kind = leaf.kind_name(), "no strategy claimed parameter");
        Ok(Value::Leaf(leaf.clone()))
    }
}
