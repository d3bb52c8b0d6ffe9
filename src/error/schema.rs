use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("parameter '{key}' received a sequence but is not declared multi")]
    NotMulti { key: String },

    #[error("parameter '{key}' received a mapping but declares no nested parameters")]
    NoNestedDefinitions { key: String },
}

impl SchemaError {
    pub fn not_multi(key: impl Into<String>) -> Self {
        Self::NotMulti { key: key.into() }
    }

    pub fn no_nested_definitions(key: impl Into<String>) -> Self {
        Self::NoNestedDefinitions { key: key.into() }
    }
}
