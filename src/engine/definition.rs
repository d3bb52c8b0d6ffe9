/// Parameter definitions: the author-supplied schema a value tree is walked
/// against. Definitions are read-only input to the engine.
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub key: String,

    #[serde(rename = "type", default)]
    pub kind: ParameterType,

    #[serde(default, deserialize_with = "null_as_default")]
    pub multi: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub parameters: Vec<Parameter>,
}

impl Parameter {
    pub fn new(key: impl Into<String>, kind: ParameterType) -> Self {
        Self {
            key: key.into(),
            kind,
            multi: false,
            parameters: Vec::new(),
        }
    }

    pub fn multi(mut self) -> Self {
        self.multi = true;
        self
    }

    pub fn with_parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters = parameters;
        self
    }
}

/// Semantic type tag of a parameter. Parsing is case-insensitive and unknown
/// tags are preserved.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum ParameterType {
    #[default]
    Any,
    String,
    Integer,
    Float,
    Boolean,
    Dictionary,
    Bytes,
    File,
    Base64,
    Other(String),
}

impl ParameterType {
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "any" => Self::Any,
            "string" => Self::String,
            "integer" => Self::Integer,
            "float" => Self::Float,
            "boolean" => Self::Boolean,
            "dictionary" => Self::Dictionary,
            "bytes" => Self::Bytes,
            "file" => Self::File,
            "base64" => Self::Base64,
            _ => Self::Other(s.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Any => "Any",
            Self::String => "String",
            Self::Integer => "Integer",
            Self::Float => "Float",
            Self::Boolean => "Boolean",
            Self::Dictionary => "Dictionary",
            Self::Bytes => "Bytes",
            Self::File => "File",
            Self::Base64 => "Base64",
            Self::Other(s) => s,
        }
    }

    pub fn is_bytes(&self) -> bool {
        matches!(self, Self::Bytes)
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Self::File | Self::Base64)
    }
}

impl From<Option<String>> for ParameterType {
    fn from(s: Option<String>) -> Self {
        s.map(|s| Self::parse(&s)).unwrap_or_default()
    }
}

impl From<ParameterType> for String {
    fn from(kind: ParameterType) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// First definition whose key matches, if any.
pub fn find_definition<'d>(definitions: &'d [Parameter], key: &str) -> Option<&'d Parameter> {
    definitions.iter().find(|d| d.key == key)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
