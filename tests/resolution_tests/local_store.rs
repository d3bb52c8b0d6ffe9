//! Resolution against a directory-backed store

use std::fs;
use std::sync::Arc;

use super::test_utils::params;
use param_resolver::engine::{Direction, Leaf, Parameter, ParameterType, Registry, Resolver, Value};
use param_resolver::store::{BackingStore, LocalStore};
use param_resolver::wire;
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;

fn local_resolver(temp_dir: &TempDir) -> Resolver {
    let store: Arc<dyn BackingStore> =
        Arc::new(LocalStore::new(temp_dir.path().join("store")).unwrap());
    let registry = Registry::builder(store)
        .with_download_dir(temp_dir.path().join("downloads"))
        .build()
        .unwrap();
    Resolver::new(registry)
}

#[test]
fn test_bytes_persist_across_resolver_instances() {
    let temp_dir = TempDir::new().unwrap();
    let defs = vec![Parameter::new("data", ParameterType::Bytes)];
    let values = params(vec![("data", Value::bytes(b"persisted".to_vec()))]);

    let uploaded = local_resolver(&temp_dir)
        .resolve(&values, &defs, Direction::Upload)
        .unwrap();
    let downloaded = local_resolver(&temp_dir)
        .resolve(&uploaded, &defs, Direction::Download)
        .unwrap();

    assert_eq!(downloaded, values);
}

#[test]
fn test_wire_decode_resolve_encode() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("notes.txt");
    fs::write(&source, b"remember").unwrap();
    let resolver = local_resolver(&temp_dir);
    let defs = vec![
        Parameter::new("doc", ParameterType::File),
        Parameter::new("data", ParameterType::Bytes),
        Parameter::new("tags", ParameterType::String).multi(),
    ];
    let raw = json!({
        "doc": {"path": source.display().to_string()},
        "data": {"base64": "aGk="},
        "tags": ["x", "y"]
    });

    let values = wire::decode(raw.as_object().unwrap(), &defs).unwrap();
    let uploaded = resolver.resolve(&values, &defs, Direction::Upload).unwrap();
    let encoded = wire::encode(&uploaded);

    assert_eq!(encoded["doc"]["type"], json!("file"));
    assert_eq!(encoded["doc"]["storage"], json!("local"));
    assert_eq!(encoded["doc"]["details"]["filename"], json!("notes.txt"));
    assert_eq!(encoded["data"]["type"], json!("bytes"));
    assert_eq!(encoded["tags"], json!(["x", "y"]));

    // What a remote caller would send back.
    let received = wire::decode(encoded.as_object().unwrap(), &defs).unwrap();
    let downloaded = resolver.resolve(&received, &defs, Direction::Download).unwrap();

    assert_eq!(downloaded["data"], Value::bytes(b"hi".to_vec()));
    let Some(Leaf::File(file)) = downloaded["doc"].as_leaf() else {
        panic!("expected a file leaf");
    };
    assert_eq!(fs::read_to_string(file.path()).unwrap(), "remember");
}
