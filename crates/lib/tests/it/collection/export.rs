//! Array and JSON export, serde round trips.

use kollect::{Collection, JsonOptions, Key, Value, kollect};

use crate::helpers::*;

#[test]
fn test_to_array_round_trip() {
    let c = kollect!["a" => 1, 4 => kollect!["x" => Value::Null], "s" => "text"];
    let entries = c.to_array();
    assert_eq!(entries[1].0, Key::Int(4));
    assert_eq!(Collection::from_entries(entries), c);
}

#[test]
fn test_to_array_shares_nothing() {
    let inner = kollect![1, 2];
    let c = kollect!["inner" => inner.clone()];
    let entries = c.to_array();
    let Value::Collection(exported) = &entries[0].1 else {
        panic!("expected a nested collection");
    };
    assert!(!exported.shares_storage_with(&inner));
    assert_eq!(exported, &inner);
}

#[test]
fn test_to_vec_drops_keys() {
    let c = kollect!["a" => 1, "b" => 2];
    assert_eq!(c.to_vec(), vec![Value::Int(1), Value::Int(2)]);
}

#[test]
fn test_json_array_vs_object() {
    let list = kollect![1, "two", Value::Null];
    assert_eq!(list.to_json(JsonOptions::default()).unwrap(), r#"[1,"two",null]"#);

    let gap = kollect![0 => "a", 2 => "b"];
    assert_eq!(gap.to_json(JsonOptions::default()).unwrap(), r#"{"0":"a","2":"b"}"#);

    let out_of_order = kollect![1 => "b", 0 => "a"];
    assert_eq!(out_of_order.to_json(JsonOptions::default()).unwrap(), r#"{"1":"b","0":"a"}"#);

    assert_eq!(Collection::new().to_json(JsonOptions::default()).unwrap(), "[]");
    assert_eq!(
        Collection::new().to_json(JsonOptions::default().force_object()).unwrap(),
        "{}"
    );
}

#[test]
fn test_force_object_applies_at_every_depth() {
    let c = kollect!["nested" => kollect!["x"]];
    assert_eq!(c.to_json(JsonOptions::default()).unwrap(), r#"{"nested":["x"]}"#);
    assert_eq!(
        c.to_json(JsonOptions::default().force_object()).unwrap(),
        r#"{"nested":{"0":"x"}}"#
    );
}

#[test]
fn test_pretty_json() {
    let c = kollect!["a" => 1];
    assert_eq!(
        c.to_json(JsonOptions::default().pretty()).unwrap(),
        "{\n  \"a\": 1\n}"
    );
}

#[test]
fn test_json_round_trip() {
    let json = r#"{"name":"Ann","tags":["x","y"],"meta":{"age":31,"score":1.5,"ok":true,"none":null},"7":"seven"}"#;
    let c = Collection::from_json(json).unwrap();
    assert_eq!(keys_of(&c).last(), Some(&Key::Int(7)));
    assert_eq!(c.get("meta/score"), Some(Value::Float(1.5)));
    assert_eq!(c.to_json(JsonOptions::default()).unwrap(), json);

    assert!(Collection::from_json("{not json").unwrap_err().is_serialization_error());
}

#[test]
fn test_serde_traits() {
    let c = kollect!["a" => kollect![1, 2], "b" => "x"];
    let encoded = serde_json::to_string(&c).unwrap();
    assert_eq!(encoded, r#"{"a":[1,2],"b":"x"}"#);

    let decoded: Collection = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, c);

    let value: Value = serde_json::from_str("[1,2]").unwrap();
    assert_eq!(value, Value::from(vec![1, 2]));
}

#[test]
fn test_objects_export_their_text_form() {
    let c = kollect![account("ann", 3)];
    assert_eq!(c.to_json(JsonOptions::default()).unwrap(), r#"["ann:3"]"#);
}

#[test]
fn test_json_value_of_nested_objects() -> kollect::Result<()> {
    let c = kollect!["owners" => kollect![account("ann", 3), account("bob", 0)]];
    let json = c.to_json_value()?;
    assert_eq!(json, serde_json::json!({"owners": ["ann:3", "bob:0"]}));
    assert_eq!(Collection::from(json), kollect!["owners" => kollect!["ann:3", "bob:0"]]);
    Ok(())
}
