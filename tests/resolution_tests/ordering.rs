//! Registration order decides which strategy resolves a leaf

use std::sync::atomic::Ordering;
use std::sync::Arc;

use super::test_utils::{params, TaggingStrategy};
use param_resolver::engine::{Direction, Registry, Resolver, Value};
use param_resolver::store::{BackingStore, MemoryStore};
use pretty_assertions::assert_eq;

fn store() -> Arc<dyn BackingStore> {
    Arc::new(MemoryStore::new())
}

#[test]
fn test_first_registered_strategy_wins() {
    let first = TaggingStrategy::new("first");
    let second = TaggingStrategy::new("second");
    let first_calls = first.calls.clone();
    let second_calls = second.calls.clone();

    let registry = Registry::builder(store())
        .without_defaults()
        .with_strategy(first)
        .with_strategy(second)
        .build()
        .unwrap();
    let resolver = Resolver::new(registry);
    let values = params(vec![("name", Value::from("widget"))]);

    for direction in [Direction::Upload, Direction::Download] {
        let resolved = resolver.resolve(&values, &[], direction).unwrap();
        assert_eq!(resolved["name"], Value::from("first:widget"));
    }
    assert_eq!(first_calls.load(Ordering::SeqCst), 2);
    assert_eq!(second_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_reordering_changes_winner() {
    let registry = Registry::builder(store())
        .without_defaults()
        .with_strategy(TaggingStrategy::new("first"))
        .with_strategy(TaggingStrategy::new("second"))
        .with_order(["second", "first"])
        .build()
        .unwrap();
    let resolver = Resolver::new(registry);
    let values = params(vec![("name", Value::from("widget"))]);

    let resolved = resolver.resolve(&values, &[], Direction::Upload).unwrap();
    assert_eq!(resolved["name"], Value::from("second:widget"));
}

#[test]
fn test_custom_strategy_after_defaults_only_sees_unclaimed_leaves() {
    let tagger = TaggingStrategy::new("tag");
    let calls = tagger.calls.clone();
    let registry = Registry::builder(store())
        .with_strategy(tagger)
        .build()
        .unwrap();
    assert_eq!(registry.strategy_names(), vec!["file", "bytes", "tag"]);
    let resolver = Resolver::new(registry);

    let values = params(vec![
        ("blob", Value::bytes(vec![1])),
        ("label", Value::from("x")),
        ("labels", Value::sequence(vec![Value::from("y"), Value::from("z")])),
    ]);
    let resolved = resolver.resolve(&values, &[], Direction::Upload).unwrap();

    assert_eq!(resolved["label"], Value::from("tag:x"));
    assert_eq!(
        resolved["labels"],
        Value::sequence(vec![Value::from("tag:y"), Value::from("tag:z")])
    );
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_registry_is_shareable_across_threads() {
    let registry = Registry::builder(store())
        .with_strategy(TaggingStrategy::new("tag"))
        .build()
        .unwrap();
    let resolver = Arc::new(Resolver::new(registry));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let resolver = Arc::clone(&resolver);
            std::thread::spawn(move || {
                let values = params(vec![
                    ("name", Value::from(format!("n{i}"))),
                    ("blob", Value::bytes(vec![i as u8])),
                ]);
                let uploaded = resolver.resolve(&values, &[], Direction::Upload).unwrap();
                let downloaded = resolver
                    .resolve(&uploaded, &[], Direction::Download)
                    .unwrap();
                (i, downloaded)
            })
        })
        .collect();

    for handle in handles {
        let (i, downloaded) = handle.join().unwrap();
        assert_eq!(downloaded["blob"], Value::bytes(vec![i as u8]));
        assert_eq!(downloaded["name"], Value::from(format!("tag:tag:n{i}")));
    }
}
