/// Ordered registry of resolver strategies.
///
/// Built once per session around a shared backing store and never mutated
/// afterwards. Iteration order is registration order; the engine gives a leaf
/// to the first strategy that claims it.
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use super::strategies::{BytesStrategy, FileStrategy};
use super::Strategy;
use crate::error::ConfigError;
use crate::store::BackingStore;

pub const DEFAULT_DOWNLOAD_DIR: &str = "param-resolver";

pub struct Registry {
    strategies: Vec<(String, Box<dyn Strategy>)>,
}

impl Registry {
    /// Registry with the default `file`, `bytes` strategy chain.
    pub fn new(store: Arc<dyn BackingStore>) -> Self {
        Self {
            strategies: named(Self::default_strategies(store, default_download_dir())),
        }
    }

    fn default_strategies(
        store: Arc<dyn BackingStore>,
        download_dir: PathBuf,
    ) -> Vec<Box<dyn Strategy>> {
        vec![
            Box::new(FileStrategy::new(store.clone(), download_dir)),
            Box::new(BytesStrategy::new(store)),
        ]
    }

    pub fn builder(store: Arc<dyn BackingStore>) -> RegistryBuilder {
        RegistryBuilder::new(store)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Strategy)> {
        self.strategies
            .iter()
            .map(|(name, strategy)| (name.as_str(), strategy.as_ref()))
    }

    pub fn get(&self, name: &str) -> Option<&dyn Strategy> {
        self.iter().find(|(n, _)| *n == name).map(|(_, s)| s)
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|(name, _)| name.as_str()).collect()
    }
}

fn named(strategies: Vec<Box<dyn Strategy>>) -> Vec<(String, Box<dyn Strategy>)> {
    strategies
        .into_iter()
        .map(|s| (s.name().to_string(), s))
        .collect()
}

fn first_duplicate<'a>(names: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = HashSet::new();
    names.into_iter().find(|name| !seen.insert(*name))
}

pub fn default_download_dir() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_DOWNLOAD_DIR)
}

pub struct RegistryBuilder {
    store: Arc<dyn BackingStore>,
    strategies: Vec<Box<dyn Strategy>>,
    download_dir: PathBuf,
    order: Option<Vec<String>>,
    include_defaults: bool,
}

impl RegistryBuilder {
    pub fn new(store: Arc<dyn BackingStore>) -> Self {
        Self {
            store,
            strategies: Vec::new(),
            download_dir: default_download_dir(),
            order: None,
            include_defaults: true,
        }
    }

    /// Register a strategy after the defaults, under its `Strategy::name`.
    pub fn with_strategy<S: Strategy + 'static>(mut self, strategy: S) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = dir.into();
        self
    }

    /// Keep only the named strategies, in the given order.
    pub fn with_order<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn without_defaults(mut self) -> Self {
        self.include_defaults = false;
        self
    }

    pub fn build(self) -> Result<Registry, ConfigError> {
        let mut available = Vec::new();
        if self.include_defaults {
            available.extend(Registry::default_strategies(
                self.store.clone(),
                self.download_dir,
            ));
        }
        available.extend(self.strategies);
        let mut available = named(available);
        if let Some(name) = first_duplicate(available.iter().map(|(n, _)| n.as_str())) {
            return Err(ConfigError::duplicate_strategy(name));
        }

        let strategies = match self.order {
            None => available,
            Some(order) => {
                if let Some(name) = first_duplicate(order.iter().map(String::as_str)) {
                    return Err(ConfigError::duplicate_strategy(name));
                }
                let mut ordered = Vec::with_capacity(order.len());
                for name in order {
                    let Some(pos) = available.iter().position(|(n, _)| *n == name) else {
                        let names: Vec<&str> = available.iter().map(|(n, _)| n.as_str()).collect();
                        return Err(ConfigError::unknown_strategy(name, &names));
                    };
                    ordered.push(available.remove(pos));
                }
                ordered
            }
        };

        Ok(Registry { strategies })
    }
}
