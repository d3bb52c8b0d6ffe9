/// Value tree representation for request parameters.
///
/// A tree node is either a keyed mapping (a nested parameter group), an
/// ordered sequence (a `multi` parameter) or a leaf. Leaves cover plain
/// scalars as well as the payload shapes strategies know how to move in and
/// out of a backing store.
use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

pub type ParameterMap = BTreeMap<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Mapping(ParameterMap),
    Sequence(Vec<Value>),
    Leaf(Leaf),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Leaf {
    Null,
    Bool(bool),
    Integer(i64),
    /// Integers above `i64::MAX`
    Unsigned(u64),
    Float(f64),
    String(String),
    /// Raw in-memory payload
    Bytes(Vec<u8>),
    /// File on the local filesystem
    File(LocalFile),
    /// File contents carried inline under their filename
    InlineFile(InlineFile),
    /// Token pointing at a payload held by a backing store
    Reference(Resolvable),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub filename: String,
    pub path: PathBuf,
}

impl LocalFile {
    pub fn new(filename: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            filename: filename.into(),
            path: path.into(),
        }
    }

    /// Build a handle named after the last component of `path`.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { filename, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn open(&self) -> io::Result<File> {
        File::open(&self.path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineFile {
    pub filename: String,
    pub content: Vec<u8>,
}

impl InlineFile {
    pub fn new(filename: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolvableKind {
    Bytes,
    File,
}

impl ResolvableKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bytes => "bytes",
            Self::File => "file",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "bytes" => Some(Self::Bytes),
            "file" => Some(Self::File),
            _ => None,
        }
    }
}

impl fmt::Display for ResolvableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolvable {
    pub id: String,
    pub kind: ResolvableKind,
    pub storage: String,
    pub details: BTreeMap<String, String>,
}

impl Resolvable {
    pub fn new(id: impl Into<String>, kind: ResolvableKind, storage: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            storage: storage.into(),
            details: BTreeMap::new(),
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    pub fn detail(&self, key: &str) -> Option<&str> {
        self.details.get(key).map(String::as_str)
    }
}

impl Value {
    pub fn null() -> Self {
        Self::Leaf(Leaf::Null)
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::Leaf(Leaf::String(value.into()))
    }

    pub fn bytes(value: impl Into<Vec<u8>>) -> Self {
        Self::Leaf(Leaf::Bytes(value.into()))
    }

    pub fn file(file: LocalFile) -> Self {
        Self::Leaf(Leaf::File(file))
    }

    pub fn inline_file(file: InlineFile) -> Self {
        Self::Leaf(Leaf::InlineFile(file))
    }

    pub fn reference(resolvable: Resolvable) -> Self {
        Self::Leaf(Leaf::Reference(resolvable))
    }

    pub fn mapping<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn sequence(items: impl IntoIterator<Item = Value>) -> Self {
        Self::Sequence(items.into_iter().collect())
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&ParameterMap> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Mapping(_) => "mapping",
            Self::Sequence(_) => "sequence",
            Self::Leaf(leaf) => leaf.kind_name(),
        }
    }
}

impl Leaf {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Integer(_) | Self::Unsigned(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::File(_) => "file",
            Self::InlineFile(_) => "inline file",
            Self::Reference(_) => "reference",
        }
    }

    pub fn as_reference(&self) -> Option<&Resolvable> {
        match self {
            Self::Reference(r) => Some(r),
            _ => None,
        }
    }
}

impl From<Leaf> for Value {
    fn from(leaf: Leaf) -> Self {
        Self::Leaf(leaf)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Leaf(Leaf::Bool(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Leaf(Leaf::Integer(v))
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(i) => Self::Leaf(Leaf::Integer(i)),
            Err(_) => Self::Leaf(Leaf::Unsigned(v)),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Leaf(Leaf::Float(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::string(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::string(v)
    }
}

impl From<ParameterMap> for Value {
    fn from(map: ParameterMap) -> Self {
        Self::Mapping(map)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Sequence(items)
    }
}
