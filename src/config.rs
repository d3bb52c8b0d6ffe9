//! Resolver configuration, loaded from JSON or YAML.
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::registry::default_download_dir;
use crate::engine::{Registry, Resolver, SchemaMode};
use crate::error::{ConfigError, Result};
use crate::store::{BackingStore, LocalStore, MemoryStore};

pub const STORE_ROOT_ENV: &str = "PARAM_RESOLVER_STORE_ROOT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    #[default]
    Memory,
    Local,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub kind: StoreKind,
    pub root: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub store: StoreConfig,
    pub download_dir: Option<PathBuf>,
    pub schema_mode: SchemaMode,
    /// Strategy names in consultation order; empty keeps the defaults.
    pub strategies: Vec<String>,
}

impl ResolverConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> std::result::Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading resolver config");

        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::read_error(path, e.to_string()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let mut config: Self = match extension {
            "json" => serde_json::from_str(&content)
                .map_err(|e| ConfigError::parse_error(path, e.to_string()))?,
            "yaml" | "yml" => serde_yaml::from_str(&content)
                .map_err(|e| ConfigError::parse_error(path, e.to_string()))?,
            _ => return Err(ConfigError::unsupported_format(extension)),
        };

        config.apply_env();
        Ok(config)
    }

    /// Apply environment overrides on top of file values. A store root from
    /// the environment always selects the local store.
    pub fn apply_env(&mut self) {
        if let Ok(root) = std::env::var(STORE_ROOT_ENV) {
            if !root.is_empty() {
                self.store.kind = StoreKind::Local;
                self.store.root = Some(PathBuf::from(root));
            }
        }
    }

    pub fn build_store(&self) -> Result<Arc<dyn BackingStore>> {
        let store: Arc<dyn BackingStore> = match self.store.kind {
            StoreKind::Memory => Arc::new(MemoryStore::new()),
            StoreKind::Local => {
                let root = self
                    .store
                    .root
                    .clone()
                    .unwrap_or_else(|| std::env::temp_dir().join("param-resolver-store"));
                Arc::new(LocalStore::new(root)?)
            }
        };
        Ok(store)
    }

    pub fn build_resolver(&self, store: Arc<dyn BackingStore>) -> Result<Resolver> {
        let mut builder = Registry::builder(store).with_download_dir(
            self.download_dir
                .clone()
                .unwrap_or_else(default_download_dir),
        );
        if !self.strategies.is_empty() {
            builder = builder.with_order(self.strategies.iter().cloned());
        }

        let registry = builder.build()?;
        debug!(strategies = ?registry.strategy_names(), schema_mode = ?self.schema_mode, "built resolver");
        Ok(Resolver::new(registry).with_schema_mode(self.schema_mode))
    }
}
