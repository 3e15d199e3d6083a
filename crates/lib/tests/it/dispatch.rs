//! MethodRegistry and element method dispatch.

use kollect::{
    Collection, Value,
    dispatch::{MethodRegistry, apply_to_all},
    kollect,
};

use crate::helpers::*;

#[test]
fn test_registered_method_receives_collection_and_args() {
    let mut registry = MethodRegistry::new();
    registry.register("scaled_sum", |c: &Collection, args: &[Value]| {
        let factor = args.first().and_then(Value::as_int).unwrap_or(1);
        Ok(Value::Int(c.sum().as_int().unwrap_or(0) * factor))
    });

    let c = kollect![1, 2, 3];
    assert_eq!(registry.invoke(&c, "scaled_sum", &[Value::Int(10)]).unwrap(), 60);
}

#[test]
fn test_registered_method_shadows_element_methods() {
    let mut registry = MethodRegistry::new();
    registry.register("deposit", |_: &Collection, _: &[Value]| Ok(Value::from("shadowed")));

    let c = kollect![account("ann", 10)];
    assert_eq!(registry.invoke(&c, "deposit", &[]).unwrap(), "shadowed");

    registry.unregister("deposit");
    let results = registry.invoke(&c, "deposit", &[Value::Int(5)]).unwrap();
    assert_eq!(results, Value::from(vec![15]));
}

#[test]
fn test_fallback_collects_per_element_results() {
    let registry = MethodRegistry::new();
    let c = kollect![
        "ann" => account("ann", 10),
        "plain" => "not an object",
        "bob" => account("bob", 0),
    ];
    let results = registry.invoke(&c, "deposit", &[Value::Int(1)]).unwrap();
    assert_eq!(results, Value::Collection(kollect!["ann" => 11, "bob" => 1]));

    assert_eq!(apply_to_all(&c, "withdraw", &[]).unwrap(), Collection::new());
}

#[test]
fn test_unsupported_method_gives_empty_collection() {
    let registry = MethodRegistry::new();
    let results = registry.invoke(&kollect![account("ann", 1), 2], "withdraw", &[]).unwrap();
    assert_eq!(results, Value::Collection(Collection::new()));
}

#[test]
fn test_registries_are_independent() {
    let mut first = MethodRegistry::new();
    let second = MethodRegistry::new();
    first.register("noop", |_: &Collection, _: &[Value]| Ok(Value::Null));
    assert!(first.contains("noop"));
    assert!(!second.contains("noop"));
    assert_eq!(first.names().collect::<Vec<_>>(), vec!["noop"]);
    assert_eq!(format!("{first:?}"), r#"MethodRegistry { methods: ["noop"] }"#);
}
