//! End-to-end scenarios combining several operations.

use kollect::{Collection, Value, kollect};

#[test]
fn test_collapse_nested_records() {
    let c = kollect![kollect!["a" => 0, "b" => 1], kollect!["c" => 2, "d" => 3]];
    assert_eq!(
        c.collapse(None).unwrap(),
        kollect!["a" => 0, "b" => 1, "c" => 2, "d" => 3]
    );
}

#[test]
fn test_flat_unbounded_vs_one_level() {
    let c = kollect![kollect![0, 1], kollect![kollect![2, 3], 4]];
    assert_eq!(c.flat(None).unwrap(), kollect![0, 1, 2, 3, 4]);
    assert_eq!(c.flat(Some(1)).unwrap(), kollect![0, 1, kollect![2, 3], 4]);
}

#[test]
fn test_slice_from_the_end() {
    let c = kollect!["a", "b", "c", "d"];
    let sliced = c.slice(-2, Some(-1));
    assert_eq!(sliced, kollect![2 => "c"]);
}

#[test]
fn test_diff_by_value() {
    let c = kollect!["a" => "foo", "b" => "bar"];
    assert_eq!(c.diff(kollect!["bar"]), kollect!["a" => "foo"]);
}

#[test]
fn test_col_with_index() {
    let c = kollect![
        kollect!["id" => "i1", "val" => "v1"],
        kollect!["id" => "i2", "val" => "v2"],
    ];
    assert_eq!(c.col(Some("val"), Some("id")), kollect!["i1" => "v1", "i2" => "v2"]);
}

#[test]
fn test_union_keeps_existing_keys_where_merge_overwrites() {
    let c = kollect![0 => "a", 1 => "b"];
    assert_eq!(c.union(kollect![0 => "c"]), kollect![0 => "a", 1 => "b"]);
    assert_eq!(c.merge(kollect![0 => "c"], false), kollect![0 => "c", 1 => "b"]);
}

#[test]
fn test_fluent_pipeline() {
    let orders = kollect![
        kollect!["customer" => "ann", "total" => 30, "status" => "paid"],
        kollect!["customer" => "bob", "total" => 12, "status" => "open"],
        kollect!["customer" => "cy", "total" => 55, "status" => "paid"],
        kollect!["customer" => "ann", "total" => 8, "status" => "paid"],
    ];

    let mut paid = orders.filter(|order, _| {
        order.as_collection().and_then(|o| o.get("status")) == Some(Value::from("paid"))
    });
    paid.usort(|a, b| {
        let total = |v: &Value| v.as_collection().and_then(|o| o.get_as::<i64>("total"));
        total(b).cmp(&total(a))
    });
    let top = paid.slice(0, Some(2)).col(Some("customer"), None);
    assert_eq!(top.join(", ").unwrap(), "cy, ann");

    let revenue = paid.col(Some("total"), None).sum();
    assert_eq!(revenue, Value::Int(93));

    // The source collection is untouched by the whole pipeline
    assert_eq!(orders.len(), 4);
    assert_eq!(orders, Collection::from(orders.to_json_value().unwrap()));
}
