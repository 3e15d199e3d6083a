//! Construction, key normalization, append semantics and copy-on-write.

use kollect::{Collection, Key, Value, kollect};

use crate::helpers::*;

#[test]
fn test_numeric_string_keys_normalize_to_integers() {
    let mut c = Collection::new();
    c.set("1", "a");
    assert!(c.has(1));
    assert_eq!(c.get_key(1), Some(&Value::from("a")));
    assert_eq!(keys_of(&c), vec![Key::Int(1)]);

    c.set(1, "b");
    assert_eq!(c.len(), 1);
    assert_eq!(c.get(1), Some(Value::from("b")));

    // Non-canonical spellings stay distinct string keys
    c.set("01", "c");
    c.set("1.0", "d");
    assert_eq!(c.len(), 3);
    assert_eq!(keys_of(&c), vec![Key::Int(1), Key::from("01"), Key::from("1.0")]);
}

#[test]
fn test_append_uses_next_integer_key() {
    let mut c = kollect![5 => "five", "x" => "ex"];
    c.push("next");
    assert_eq!(c.last_key(), Some(&Key::Int(6)));

    let mut negative = kollect![-3 => "a"];
    negative.push("b");
    assert_eq!(keys_of(&negative), vec![Key::Int(-3), Key::Int(-2)]);

    let mut strings = kollect!["a" => 1];
    strings.push(2);
    assert_eq!(keys_of(&strings), vec![Key::from("a"), Key::Int(0)]);
}

#[test]
fn test_upsert_keeps_position() {
    let mut c = kollect!["a" => 1, "b" => 2, "c" => 3];
    let previous = c.insert("b", 20);
    assert_eq!(previous, Some(Value::Int(2)));
    assert_eq!(keys_of(&c), vec![Key::from("a"), Key::from("b"), Key::from("c")]);
    assert_eq!(c.get("b"), Some(Value::Int(20)));
}

#[test]
fn test_copy_shares_until_mutation() {
    let original = kollect!["a" => 1, "b" => kollect![1, 2]];
    let mut copy = original.copy();
    assert!(copy.shares_storage_with(&original));
    assert_eq!(copy, original);

    copy.remove("a");
    assert!(!copy.shares_storage_with(&original));
    assert_eq!(original.len(), 2);
    assert_eq!(copy.len(), 1);

    // Reads never split the storage
    let reader = original.copy();
    let _ = reader.get("b/1");
    let _ = reader.filter_truthy();
    assert!(reader.shares_storage_with(&original));
}

#[test]
fn test_nested_mutation_does_not_leak_into_copies() {
    let original = kollect!["inner" => kollect![1, 2]];
    let mut copy = original.copy();
    if let Some(Value::Collection(inner)) = copy.get_mut("inner") {
        inner.push(3);
    }
    assert_eq!(original.get("inner"), Some(Value::from(vec![1, 2])));
    assert_eq!(copy.get("inner"), Some(Value::from(vec![1, 2, 3])));
}

#[test]
fn test_from_conversions() {
    let from_vec = Collection::from(vec!["a", "b"]);
    assert!(from_vec.is_list());

    let from_pairs: Collection = vec![("x", 1), ("y", 2)].into_iter().collect();
    assert_eq!(from_pairs, kollect!["x" => 1, "y" => 2]);

    let from_entries = Collection::from_entries([(Key::Int(3), Value::Null)]);
    assert_eq!(from_entries.get(3), Some(Value::Null));

    let scalar = Collection::from(serde_json::json!(42));
    assert_eq!(scalar, kollect![42]);
}

#[test]
fn test_extend_with_values_and_pairs() {
    let mut c = kollect!["a" => 1];
    c.extend([Value::from(2), Value::from(3)]);
    c.extend([("a", 10)]);
    assert_eq!(c, kollect!["a" => 10, 0 => 2, 1 => 3]);
}

#[test]
fn test_display_and_debug() {
    assert_eq!(kollect![1, "x"].to_string(), "[1, x]");
    assert_eq!(kollect!["a" => 1, 3 => true].to_string(), "{a: 1, 3: true}");
    assert_eq!(format!("{:?}", kollect!["a" => 1]), r#"{Str("a"): Int(1)}"#);
}

#[test]
fn test_iteration_visits_entries_in_order() {
    let c = kollect!["a" => 1, 5 => 2, "b" => 3];
    let mut iter = c.iter();
    assert_eq!(iter.next(), Some((&Key::from("a"), &Value::Int(1))));
    assert_eq!(iter.next(), Some((&Key::Int(5), &Value::Int(2))));

    let rest: Vec<_> = iter.collect();
    assert_eq!(rest, vec![(&Key::from("b"), &Value::Int(3))]);
    assert_eq!((&c).into_iter().count(), 3);
}
