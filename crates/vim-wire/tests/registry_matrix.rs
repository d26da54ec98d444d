mod common;

use std::sync::Arc;
use std::thread;

use serde_json::json;
use vim_wire::{json, AnyType, ArrayOf, RegistryBuilder, RegistryError};

use common::{circle, registry, Circle, Shape, ShapeKind, Square};

#[test]
fn names_bind_once() {
    let mut builder = RegistryBuilder::with_builtins();
    builder.register::<Circle>().unwrap();
    let err = builder.register::<Circle>().unwrap_err();
    assert!(matches!(
        err,
        RegistryError::Duplicate { ref name, existing } if name == "Circle" && existing.ends_with("Circle")
    ));

    let err = builder.register_as::<Square>("Circle").unwrap_err();
    assert!(err.to_string().contains("`Circle` is already registered"));

    // A type may answer to several names; the latest one is written.
    builder.register_as::<Circle>("Round").unwrap();
    let registry = builder.build();
    assert!(registry.lookup("Round").unwrap().is::<Circle>());
    assert_eq!(registry.name_of::<Circle>(), Some("Round"));
}

#[test]
fn invalid_names_are_rejected() {
    let mut builder = RegistryBuilder::new();
    for name in ["", "1Shape", "vim25:Shape", "Array Of"] {
        let err = builder.register_as::<Shape>(name).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidName { .. }), "{name}");
    }
    assert!(builder.build().is_empty());
}

#[test]
fn lookups_ignore_namespace_prefixes() {
    let registry = registry();
    assert!(registry.lookup("Circle").unwrap().is::<Circle>());
    assert!(registry.lookup("vim25:Circle").unwrap().is::<Circle>());
    assert!(registry.lookup("Triangle").is_none());
    assert!(registry.contains("ArrayOfShape"));
    assert_eq!(registry.name_of::<ArrayOf<ShapeKind>>(), Some("ArrayOfShape"));
    assert!(registry.names().any(|name| name == "ArrayOfInt"));
}

#[test]
fn override_rebinds_a_name_for_one_registry() {
    let base = registry();
    let swapped = base.with_override::<Square>("Circle");
    assert!(swapped.lookup("Circle").unwrap().is::<Square>());
    assert!(base.lookup("Circle").unwrap().is::<Circle>());

    let document = json!({"_typeName": "Circle", "name": "c", "side": 3});
    let value: AnyType = json::from_value(&document, &swapped).unwrap();
    let square = value.downcast_ref::<Square>().unwrap();
    assert_eq!(square.side, 3);

    let value: AnyType = json::from_value(&document, &base).unwrap();
    assert!(value.downcast_ref::<Circle>().is_some());
}

#[test]
fn override_returns_the_previous_binding() {
    let mut builder = registry().to_builder();
    let previous = builder.override_type::<Square>("Circle");
    assert!(previous.is_some_and(|entry| entry.is::<Circle>()));
    assert!(builder.override_type::<Square>("Hexagon").is_none());

    builder.restore("Circle", previous);
    builder.restore("Hexagon", None);
    let restored = builder.build();
    assert!(restored.lookup("Circle").unwrap().is::<Circle>());
    assert!(!restored.contains("Hexagon"));
    assert_eq!(restored.name_of::<Circle>(), Some("Circle"));
}

#[test]
fn registries_are_shared_across_threads() {
    let registry = Arc::new(registry());
    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let value = AnyType::object(circle(&format!("c{worker}"), f64::from(worker)));
                let text = json::to_string(&value, &registry).unwrap();
                let back: AnyType = json::from_str(&text, &registry).unwrap();
                back == value
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

#[test]
fn scoped_readers_borrow_one_registry() {
    let registry = registry();
    thread::scope(|scope| {
        for side in 1..=3i16 {
            let registry = &registry;
            scope.spawn(move || {
                let value = ShapeKind::from(common::square("s", side));
                let text = json::to_string(&value, registry).unwrap();
                let back: ShapeKind = json::from_str(&text, registry).unwrap();
                assert_eq!(back, value);
            });
        }
    });
}
