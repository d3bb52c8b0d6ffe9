//! Properties every resolve call must hold

use super::test_utils::{memory_resolver, params, shape_of_map};
use param_resolver::engine::{
    Direction, Leaf, Parameter, ParameterType, Resolvable, ResolvableKind, Value,
};
use param_resolver::Error;
use pretty_assertions::assert_eq;

fn mixed_tree() -> param_resolver::ParameterMap {
    params(vec![
        ("blob", Value::bytes(b"\x00\x01binary".to_vec())),
        ("count", Value::from(7i64)),
        (
            "group",
            Value::mapping([
                ("inner_blob", Value::bytes(b"inner".to_vec())),
                ("label", Value::from("x")),
                (
                    "deeper",
                    Value::mapping([("flags", Value::sequence(vec![Value::from(true)]))]),
                ),
            ]),
        ),
        (
            "many",
            Value::sequence(vec![
                Value::bytes(b"one".to_vec()),
                Value::bytes(b"two".to_vec()),
                Value::null(),
            ]),
        ),
    ])
}

fn mixed_definitions() -> Vec<Parameter> {
    vec![
        Parameter::new("blob", ParameterType::Bytes),
        Parameter::new("count", ParameterType::Integer),
        Parameter::new("group", ParameterType::Dictionary).with_parameters(vec![
            Parameter::new("inner_blob", ParameterType::Bytes),
            Parameter::new("label", ParameterType::String),
        ]),
        Parameter::new("many", ParameterType::Bytes).multi(),
    ]
}

#[test]
fn test_shape_preserved_on_upload() {
    let (_, resolver) = memory_resolver();
    let values = mixed_tree();

    let resolved = resolver
        .resolve(&values, &mixed_definitions(), Direction::Upload)
        .unwrap();

    assert_eq!(shape_of_map(&resolved), shape_of_map(&values));
}

#[test]
fn test_shape_preserved_on_download() {
    let (_, resolver) = memory_resolver();
    let uploaded = resolver
        .resolve(&mixed_tree(), &mixed_definitions(), Direction::Upload)
        .unwrap();

    let downloaded = resolver
        .resolve(&uploaded, &mixed_definitions(), Direction::Download)
        .unwrap();

    assert_eq!(shape_of_map(&downloaded), shape_of_map(&uploaded));
}

#[test]
fn test_input_tree_is_not_modified() {
    let (_, resolver) = memory_resolver();
    let values = mixed_tree();
    let snapshot = values.clone();

    resolver
        .resolve(&values, &mixed_definitions(), Direction::Upload)
        .unwrap();

    assert_eq!(values, snapshot);
}

#[test]
fn test_unclaimed_leaves_pass_through_both_directions() {
    let (_, resolver) = memory_resolver();
    let values = params(vec![
        ("text", Value::from("hello")),
        ("ratio", Value::from(0.25)),
        ("none", Value::null()),
        ("enabled", Value::from(false)),
    ]);
    let defs = vec![Parameter::new("text", ParameterType::String)];

    let once = resolver.resolve(&values, &defs, Direction::Upload).unwrap();
    let twice = resolver.resolve(&once, &defs, Direction::Download).unwrap();
    assert_eq!(once, values);
    assert_eq!(twice, values);

    let down_twice = resolver
        .resolve(
            &resolver.resolve(&values, &defs, Direction::Download).unwrap(),
            &defs,
            Direction::Download,
        )
        .unwrap();
    assert_eq!(down_twice, values);
}

#[test]
fn test_bytes_round_trip_is_byte_for_byte() {
    let (store, resolver) = memory_resolver();
    let values = mixed_tree();
    let defs = mixed_definitions();

    let uploaded = resolver.resolve(&values, &defs, Direction::Upload).unwrap();
    assert_eq!(store.len(), 4);
    assert!(matches!(
        uploaded["blob"],
        Value::Leaf(Leaf::Reference(Resolvable {
            kind: ResolvableKind::Bytes,
            ..
        }))
    ));

    let downloaded = resolver.resolve(&uploaded, &defs, Direction::Download).unwrap();
    assert_eq!(downloaded, values);
}

#[test]
fn test_absent_definitions_do_not_fail() {
    let (_, resolver) = memory_resolver();
    let values = params(vec![
        ("unknown_text", Value::from("a")),
        ("unknown_group", Value::mapping([("x", Value::from(1i64))])),
        ("unknown_list", Value::sequence(vec![Value::from(2i64)])),
    ]);

    for direction in [Direction::Upload, Direction::Download] {
        let resolved = resolver.resolve(&values, &[], direction).unwrap();
        assert_eq!(resolved, values);
    }
}

#[test]
fn test_absent_definition_still_resolves_payload_leaf() {
    let (_, resolver) = memory_resolver();
    let values = params(vec![("raw", Value::bytes(vec![1, 2, 3]))]);

    let resolved = resolver.resolve(&values, &[], Direction::Upload).unwrap();
    assert!(resolved["raw"]
        .as_leaf()
        .and_then(Leaf::as_reference)
        .is_some());
}

#[test]
fn test_null_leaf_is_not_claimed() {
    let (store, resolver) = memory_resolver();
    let values = params(vec![("blob", Value::null())]);
    let defs = vec![Parameter::new("blob", ParameterType::Bytes)];

    let resolved = resolver.resolve(&values, &defs, Direction::Upload).unwrap();
    assert_eq!(resolved, values);
    assert!(store.is_empty());
}

#[test]
fn test_single_failure_aborts_call() {
    let (_, resolver) = memory_resolver();
    let values = params(vec![
        ("good", Value::from("fine")),
        (
            "lost",
            Value::reference(Resolvable::new("nope", ResolvableKind::Bytes, "memory")),
        ),
    ]);

    let result = resolver.resolve(&values, &[], Direction::Download);
    assert!(matches!(result, Err(Error::Store(_))));
}
