//! map, filter, walk, collapse, flat, col and friends.

use kollect::{Collection, Key, Value, kollect};

use crate::helpers::*;

#[test]
fn test_map_keeps_keys() {
    let c = kollect!["a" => 1, 7 => 2];
    let mapped = c.map(|v, k| Value::from(format!("{k}={v}")));
    assert_eq!(mapped, kollect!["a" => "a=1", 7 => "7=2"]);
}

#[test]
fn test_filter_and_reject() {
    let c = kollect![1, 2, 3, 4];
    let even = c.filter(|v, _| v.as_int().is_some_and(|n| n % 2 == 0));
    assert_eq!(keys_of(&even), vec![Key::Int(1), Key::Int(3)]);
    let odd = c.reject(|v, _| v.as_int().is_some_and(|n| n % 2 == 0));
    assert_eq!(keys_of(&odd), vec![Key::Int(0), Key::Int(2)]);
}

#[test]
fn test_filter_truthy() {
    let c = kollect![
        "", 0, 0.0, "0", false, Value::Null, Collection::new(), "a", 1, true, kollect![0]
    ];
    let kept = c.filter_truthy();
    assert_eq!(keys_of(&kept), vec![Key::Int(7), Key::Int(8), Key::Int(9), Key::Int(10)]);
}

#[test]
fn test_walk_recursive_and_flat() {
    let mut recursive = kollect!["a" => 1, "b" => kollect![2, kollect![3]]];
    recursive.walk(
        |v, _, add: &i64| *v = Value::Int(v.as_int().unwrap_or(0) + add),
        &100,
        true,
    );
    assert_eq!(recursive, kollect!["a" => 101, "b" => kollect![102, kollect![103]]]);

    let mut shallow = kollect!["a" => 1, "b" => kollect![2]];
    let mut seen = Vec::new();
    shallow.walk(
        |v, k, _: &()| {
            seen.push(k.clone());
            if v.is_collection() {
                *v = Value::from("replaced");
            }
        },
        &(),
        false,
    );
    assert_eq!(seen, vec![Key::from("a"), Key::from("b")]);
    assert_eq!(shallow, kollect!["a" => 1, "b" => "replaced"]);
}

#[test]
fn test_walk_splits_shared_storage_only() {
    let original = kollect![kollect![1]];
    let mut copy = original.copy();
    copy.walk(|v, _, _: &()| *v = Value::Null, &(), true);
    assert_eq!(original, kollect![kollect![1]]);
    assert_eq!(copy, kollect![kollect![Value::Null]]);
}

#[test]
fn test_collapse_overwrites_and_respects_depth() {
    let c = kollect![kollect!["a" => 0, "b" => 1], kollect!["a" => 5]];
    assert_eq!(c.collapse(None).unwrap(), kollect!["a" => 5, "b" => 1]);

    let deep = kollect![kollect!["x" => kollect!["y" => 1]]];
    assert_eq!(deep.collapse(Some(1)).unwrap(), kollect!["x" => kollect!["y" => 1]]);
    assert_eq!(deep.collapse(Some(2)).unwrap(), kollect!["y" => 1]);
    assert_eq!(deep.collapse(Some(0)).unwrap(), deep);

    let err = deep.collapse(Some(-1)).unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn test_flat_never_overwrites() {
    let c = kollect![kollect!["a" => 1], kollect!["a" => 2]];
    assert_eq!(c.flat(None).unwrap(), kollect![1, 2]);
    assert!(c.flat(Some(-2)).unwrap_err().is_invalid_argument());
}

#[test]
fn test_col_variants() {
    let users = users();
    assert_eq!(users.col(Some("name"), None), kollect!["Ann", "Bob", "Cy"]);
    assert_eq!(
        users.col(Some("address/city"), Some("id")),
        kollect!["u1" => "Oslo", "u2" => "Rome"]
    );

    let whole = users.col(None, Some("id"));
    assert_eq!(keys_of(&whole), vec![Key::from("u1"), Key::from("u2"), Key::from("u3")]);
    assert_eq!(whole.get("u3/age"), Some(Value::Int(40)));

    // Duplicate index overwrites, missing index appends
    let records = kollect![
        kollect!["k" => "x", "v" => 1],
        kollect!["v" => 2],
        kollect!["k" => "x", "v" => 3],
    ];
    assert_eq!(records.col(Some("v"), Some("k")), kollect!["x" => 3, 0 => 2]);
}

#[test]
fn test_col_reads_object_fields() {
    let accounts = kollect![account("ann", 10), account("bob", 20)];
    assert_eq!(
        accounts.col(Some("balance"), Some("owner")),
        kollect!["ann" => 10, "bob" => 20]
    );
}

#[test]
fn test_each_every_some() {
    let c = kollect![1, 2, 3, 4];
    let mut visited = Vec::new();
    c.each(|v, _| {
        visited.push(v.clone());
        v.as_int() != Some(2)
    });
    assert_eq!(visited, vec![Value::Int(1), Value::Int(2)]);

    assert!(c.every(|v, _| v.as_int().is_some()));
    assert!(c.some(|v, _| v == &Value::Int(3)));
    assert!(!c.some(|v, _| v == &Value::Int(9)));
    assert!(Collection::new().every(|_, _| false));
}

#[test]
fn test_key_and_value_lists() {
    let c = kollect!["a" => 1, 4 => 2];
    assert_eq!(c.key_list(), kollect!["a", 4]);
    assert_eq!(c.value_list(), kollect![1, 2]);
}

#[test]
fn test_flip_and_unique() {
    let c = kollect!["a" => "x", "b" => 1, "c" => "x", "d" => 1.5];
    assert_eq!(c.flip(), kollect!["x" => "c", 1 => "d"]);

    let dupes = kollect!["a" => 1, "b" => "1", "c" => 2, "d" => 1.0];
    assert_eq!(dupes.unique(), kollect!["a" => 1, "c" => 2]);
}

#[test]
fn test_chunk() {
    let c = kollect!["a" => 1, "b" => 2, "c" => 3];
    assert_eq!(c.chunk(2, false).unwrap(), kollect![kollect![1, 2], kollect![3]]);
    assert_eq!(
        c.chunk(2, true).unwrap(),
        kollect![kollect!["a" => 1, "b" => 2], kollect!["c" => 3]]
    );
    assert!(c.chunk(0, false).unwrap_err().is_invalid_argument());
    assert!(Collection::new().chunk(3, false).unwrap().is_empty());
}

#[test]
fn test_combine_and_pad() {
    let keys = kollect!["name", "age"];
    assert_eq!(
        keys.combine(kollect!["Ann", 31]).unwrap(),
        kollect!["name" => "Ann", "age" => 31]
    );
    assert!(keys.combine(kollect![1]).unwrap_err().is_invalid_argument());
    assert!(kollect![kollect![1]].combine(kollect![1]).unwrap_err().is_type_error());

    let c = kollect![5 => "a", "k" => "b"];
    assert_eq!(c.pad(4, 0), kollect![0 => "a", "k" => "b", 1 => 0, 2 => 0]);
    assert_eq!(c.pad(-3, 0), kollect![0 => 0, 1 => "a", "k" => "b"]);
    assert_eq!(c.pad(1, 0), c);
}
