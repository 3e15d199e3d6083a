//! Sorting, reverse, shuffle and random sampling.

use kollect::{Collection, Key, SortFlags, Value, kollect};
use rand::{SeedableRng, rngs::StdRng};

use crate::helpers::*;

#[test]
fn test_sort_renumbers_and_asort_keeps_keys() {
    let mut sorted = kollect!["x" => 3, "y" => 1, "z" => 2];
    sorted.sort(SortFlags::REGULAR);
    assert_eq!(sorted, kollect![1, 2, 3]);

    let mut kept = kollect!["x" => 3, "y" => 1, "z" => 2];
    kept.asort(SortFlags::REGULAR);
    assert_eq!(keys_of(&kept), vec![Key::from("y"), Key::from("z"), Key::from("x")]);

    kept.arsort(SortFlags::REGULAR);
    assert_eq!(keys_of(&kept), vec![Key::from("x"), Key::from("z"), Key::from("y")]);

    let mut reversed = kollect![1, 3, 2];
    reversed.rsort(SortFlags::REGULAR);
    assert_eq!(reversed, kollect![3, 2, 1]);
}

#[test]
fn test_ksort_modes() {
    let mut c = kollect![10 => "a", 9 => "b", "x" => "c", 100 => "d"];
    c.ksort(SortFlags::REGULAR);
    assert_eq!(keys_of(&c), vec![Key::Int(9), Key::Int(10), Key::Int(100), Key::from("x")]);

    c.ksort(SortFlags::STRING);
    assert_eq!(keys_of(&c), vec![Key::Int(10), Key::Int(100), Key::Int(9), Key::from("x")]);

    c.krsort(SortFlags::NUMERIC);
    assert_eq!(keys_of(&c)[..3], [Key::Int(100), Key::Int(10), Key::Int(9)]);
}

#[test]
fn test_flag_modes() {
    let mut numeric = kollect!["10", "9", "2.5", "1e1"];
    numeric.sort(SortFlags::NUMERIC);
    assert_eq!(texts_of(&numeric), vec!["2.5", "9", "10", "1e1"]);

    let mut strings = kollect![10, 9, 100];
    strings.sort(SortFlags::STRING);
    assert_eq!(strings, kollect![10, 100, 9]);

    let mut cased = kollect!["b", "B", "a", "A"];
    cased.sort(SortFlags::STRING);
    assert_eq!(texts_of(&cased), vec!["A", "B", "a", "b"]);
    cased.sort(SortFlags::STRING.case_insensitive());
    assert_eq!(texts_of(&cased), vec!["A", "a", "B", "b"]);
    cased.sort(SortFlags::LOCALE_STRING);
    assert_eq!(texts_of(&cased), vec!["A", "a", "B", "b"]);

    let mut files = kollect!["img12.png", "IMG10.png", "img2.png", "img1.png"];
    files.sort(SortFlags::NATURAL);
    assert_eq!(texts_of(&files), vec!["IMG10.png", "img1.png", "img2.png", "img12.png"]);
    files.sort(SortFlags::NATURAL.case_insensitive());
    assert_eq!(texts_of(&files), vec!["img1.png", "img2.png", "IMG10.png", "img12.png"]);
}

#[test]
fn test_regular_mode_mixes_types() {
    let mut c = kollect![kollect![1], "b", 2, Value::Null, "10", 1.5];
    c.sort(SortFlags::REGULAR);
    assert_eq!(c.first(), Some(&Value::Null));
    assert_eq!(c.get(1), Some(Value::Float(1.5)));
    assert_eq!(c.get(3), Some(Value::from("10")));
    assert_eq!(c.last(), Some(&Value::from(vec![1])));
}

#[test]
fn test_regular_sorts_large_mixed_input() {
    // Long enough to leave the small-slice insertion sort path
    let mut c: Collection = (0..200)
        .map(|i| match i % 4 {
            0 => Value::Int(i),
            1 => Value::Float(i as f64 / 3.0),
            2 => Value::from(format!("{i}a")),
            _ => Value::from(format!("{}", 200 - i)),
        })
        .collect();
    c.asort(SortFlags::REGULAR);
    let values: Vec<&Value> = c.values().collect();
    for pair in values.windows(2) {
        assert!(SortFlags::REGULAR.compare(pair[0], pair[1]).is_le());
    }
    // Numeric values come before non-numeric text
    assert_eq!(c.first(), Some(&Value::Int(0)));
    assert_eq!(c.last(), Some(&Value::from("98a")));

    let mut keyed: Collection = (0..200)
        .map(|i| {
            let key = if i % 3 == 0 { Key::from(format!("{i}a")) } else { Key::Int(i) };
            (key, Value::Int(i))
        })
        .collect();
    keyed.ksort(SortFlags::REGULAR);
    assert_eq!(keyed.first_key(), Some(&Key::Int(1)));
    keyed.uksort(|a, b| a.cmp(b));
    assert_eq!(keyed.first_key(), Some(&Key::Int(1)));
    assert_eq!(keyed.last_key(), Some(&Key::from("9a")));
}

#[test]
fn test_custom_sorts_are_stable() {
    let records = kollect![
        "a" => kollect!["g" => 2, "n" => "first"],
        "b" => kollect!["g" => 1, "n" => "second"],
        "c" => kollect!["g" => 2, "n" => "third"],
        "d" => kollect!["g" => 1, "n" => "fourth"],
    ];
    let by_group = |a: &Value, b: &Value| {
        let group = |v: &Value| v.as_collection().and_then(|c| c.get_as::<i64>("g"));
        group(a).cmp(&group(b))
    };

    let mut assoc = records.clone();
    assoc.uasort(by_group);
    assert_eq!(
        keys_of(&assoc),
        vec![Key::from("b"), Key::from("d"), Key::from("a"), Key::from("c")]
    );

    let mut list = records.clone();
    list.usort(by_group);
    assert_eq!(list.col(Some("n"), None), kollect!["second", "fourth", "first", "third"]);

    let mut by_key = records;
    by_key.uksort(|a, b| b.cmp(a));
    assert_eq!(by_key.first_key(), Some(&Key::from("d")));
}

#[test]
fn test_equal_values_keep_order_in_builtin_sorts() {
    let mut c = kollect!["x" => "1", "y" => 1, "z" => 1.0];
    c.asort(SortFlags::NUMERIC);
    assert_eq!(keys_of(&c), vec![Key::from("x"), Key::from("y"), Key::from("z")]);
}

#[test]
fn test_reverse_keeps_keys() {
    let mut c = kollect!["a" => 1, 5 => 2];
    c.reverse();
    assert_eq!(keys_of(&c), vec![Key::Int(5), Key::from("a")]);
}

#[test]
fn test_shuffle_modes() {
    let original = kollect!["a" => 1, "b" => 2, "c" => 3, "d" => 4, "e" => 5];
    let mut rng = StdRng::seed_from_u64(7);

    let mut renumbered = original.clone();
    renumbered.shuffle_with(false, &mut rng);
    assert!(renumbered.is_list());
    assert!(renumbered.equals(original.clone(), false));

    let mut kept = original.clone();
    kept.shuffle_with(true, &mut rng);
    assert_eq!(kept.len(), 5);
    for (key, value) in &original {
        assert_eq!(kept.get_key(key), Some(value));
    }

    let mut empty = Collection::new();
    empty.shuffle(false);
    assert!(empty.is_empty());
}

#[test]
fn test_random_sampling() {
    let c = kollect!["a" => 1, "b" => 2, "c" => 3];
    let mut rng = StdRng::seed_from_u64(42);

    let two = c.random_with(2, &mut rng).unwrap();
    assert_eq!(two.len(), 2);
    for (key, value) in &two {
        assert_eq!(c.get_key(key), Some(value));
    }

    let all = c.random_with(10, &mut rng).unwrap();
    assert!(all.equals(c.clone(), true));

    assert!(Collection::new().random(1).unwrap().is_empty());
    assert!(c.random(0).unwrap_err().is_invalid_argument());
}
