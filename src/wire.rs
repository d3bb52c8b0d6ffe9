//! JSON rendering of parameter value trees.
//!
//! Payload leaves have no natural JSON form, so decoding is guided by the
//! parameter definitions: only under a bytes- or file-typed definition is a
//! JSON object read as a payload leaf instead of a nested mapping.

use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde_json::{json, Map, Value as JsonValue};

use crate::engine::{
    find_definition, InlineFile, Leaf, LocalFile, Parameter, ParameterMap, Resolvable,
    ResolvableKind, Value,
};
use crate::error::{PayloadError, Result};

const BASE64_FIELD: &str = "base64";

pub fn decode(values: &Map<String, JsonValue>, definitions: &[Parameter]) -> Result<ParameterMap> {
    let mut decoded = ParameterMap::new();
    for (key, value) in values {
        let definition = find_definition(definitions, key);
        decoded.insert(key.clone(), decode_node(key, value, definition)?);
    }
    Ok(decoded)
}

fn decode_node(key: &str, value: &JsonValue, definition: Option<&Parameter>) -> Result<Value> {
    match value {
        JsonValue::Object(object) => {
            if let Some(leaf) = decode_payload(key, object, definition)? {
                return Ok(Value::Leaf(leaf));
            }
            let nested = definition.map(|d| d.parameters.as_slice()).unwrap_or_default();
            decode(object, nested).map(Value::Mapping)
        }
        JsonValue::Array(items) => items
            .iter()
            .map(|item| decode_node(key, item, definition))
            .collect::<Result<Vec<_>>>()
            .map(Value::Sequence),
        JsonValue::Null => Ok(Value::null()),
        JsonValue::Bool(b) => Ok(Value::from(*b)),
        JsonValue::Number(n) => Ok(if let Some(i) = n.as_i64() {
            Value::from(i)
        } else if let Some(u) = n.as_u64() {
            Value::from(u)
        } else {
            Value::from(n.as_f64().unwrap_or(f64::NAN))
        }),
        JsonValue::String(s) => Ok(Value::string(s.clone())),
    }
}

fn decode_payload(
    key: &str,
    object: &Map<String, JsonValue>,
    definition: Option<&Parameter>,
) -> Result<Option<Leaf>> {
    let Some(definition) = definition else {
        return Ok(None);
    };
    let is_bytes = definition.kind.is_bytes();
    let is_file = definition.kind.is_file();
    if !is_bytes && !is_file {
        return Ok(None);
    }

    if object.contains_key("id") && object.contains_key("storage") {
        return decode_reference(key, object, is_file).map(Some);
    }

    if is_bytes {
        if let Some(encoded) = object.get(BASE64_FIELD) {
            let encoded = encoded
                .as_str()
                .ok_or_else(|| PayloadError::missing_field(key, BASE64_FIELD))?;
            let content = BASE64
                .decode(encoded)
                .map_err(|e| PayloadError::invalid_base64(e.to_string()))?;
            return Ok(Some(Leaf::Bytes(content)));
        }
    }

    if is_file {
        if let Some(path) = object.get("path").and_then(JsonValue::as_str) {
            let file = match object.get("filename").and_then(JsonValue::as_str) {
                Some(filename) => LocalFile::new(filename, path),
                None => LocalFile::from_path(path),
            };
            return Ok(Some(Leaf::File(file)));
        }

        // `{"filename", "content"}`: base64 content when it decodes, raw text otherwise.
        if let (Some(filename), Some(content)) = (
            object.get("filename").and_then(JsonValue::as_str),
            object.get("content"),
        ) {
            let content = content
                .as_str()
                .ok_or_else(|| PayloadError::missing_field(key, "content"))?;
            let content = BASE64
                .decode(content)
                .unwrap_or_else(|_| content.as_bytes().to_vec());
            return Ok(Some(Leaf::InlineFile(InlineFile::new(filename, content))));
        }
    }

    Ok(None)
}

fn decode_reference(key: &str, object: &Map<String, JsonValue>, is_file: bool) -> Result<Leaf> {
    let field = |name: &str| -> Result<String> {
        object
            .get(name)
            .and_then(JsonValue::as_str)
            .map(str::to_string)
            .ok_or_else(|| PayloadError::missing_field(key, name).into())
    };

    let default_kind = if is_file {
        ResolvableKind::File
    } else {
        ResolvableKind::Bytes
    };
    let kind = object
        .get("type")
        .and_then(JsonValue::as_str)
        .and_then(ResolvableKind::parse)
        .unwrap_or(default_kind);

    let details: BTreeMap<String, String> = object
        .get("details")
        .and_then(JsonValue::as_object)
        .map(|details| {
            details
                .iter()
                .filter_map(|(k, v)| v.as_str().map(|v| (k.clone(), v.to_string())))
                .collect()
        })
        .unwrap_or_default();

    Ok(Leaf::Reference(Resolvable {
        id: field("id")?,
        kind,
        storage: field("storage")?,
        details,
    }))
}

pub fn encode(values: &ParameterMap) -> JsonValue {
    JsonValue::Object(
        values
            .iter()
            .map(|(key, value)| (key.clone(), encode_value(value)))
            .collect(),
    )
}

pub fn encode_value(value: &Value) -> JsonValue {
    match value {
        Value::Mapping(map) => encode(map),
        Value::Sequence(items) => JsonValue::Array(items.iter().map(encode_value).collect()),
        Value::Leaf(leaf) => encode_leaf(leaf),
    }
}

fn encode_leaf(leaf: &Leaf) -> JsonValue {
    match leaf {
        Leaf::Null => JsonValue::Null,
        Leaf::Bool(b) => json!(b),
        Leaf::Integer(i) => json!(i),
        Leaf::Unsigned(u) => json!(u),
        Leaf::Float(f) => json!(f),
        Leaf::String(s) => json!(s),
        Leaf::Bytes(content) => json!({ "base64": BASE64.encode(content) }),
        Leaf::File(file) => json!({
            "filename": file.filename,
            "path": file.path.display().to_string(),
        }),
        Leaf::InlineFile(file) => json!({
            "filename": file.filename,
            "content": BASE64.encode(&file.content),
        }),
        Leaf::Reference(r) => json!({
            "id": r.id,
            "type": r.kind.as_str(),
            "storage": r.storage,
            "details": r.details,
        }),
    }
}
