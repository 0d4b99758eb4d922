use serde_toml_tree::{toml_value, Datetime, Hex, Radix, Table, Value};

#[test]
fn test_toml_value_booleans() {
    assert_eq!(toml_value!(true), Value::Bool(true));
    assert_eq!(toml_value!(false), Value::Bool(false));
}

#[test]
fn test_toml_value_numbers() {
    assert_eq!(toml_value!(42), Value::from(42));
    assert_eq!(toml_value!(3.5), Value::Float(3.5));
    assert_eq!(toml_value!(-123), Value::from(-123));

    let int = toml_value!(7);
    assert!(int.is_integer());
    assert_eq!(int.as_float(), None);
}

#[test]
fn test_toml_value_strings() {
    assert_eq!(toml_value!("hello world"), Value::String("hello world".to_string()));
    assert_eq!(toml_value!(""), Value::String(String::new()));

    let owned = String::from("owned");
    assert_eq!(toml_value!(owned), Value::from("owned"));
}

#[test]
fn test_toml_value_arrays() {
    assert_eq!(toml_value!([]), Value::Array(vec![]));

    assert_eq!(
        toml_value!([1, 2, 3]),
        Value::Array(vec![Value::from(1), Value::from(2), Value::from(3)])
    );

    assert_eq!(
        toml_value!([1, "hello", true]),
        Value::Array(vec![Value::from(1), Value::from("hello"), Value::Bool(true)])
    );
}

#[test]
fn test_toml_value_tables() {
    assert_eq!(toml_value!({}), Value::Table(Table::new()));

    let table = toml_value!({
        "name": "Alice",
        "age": 30
    });

    match table {
        Value::Table(ref map) => {
            assert_eq!(map.len(), 2);
            assert_eq!(map.get("name"), Some(&Value::from("Alice")));
            assert_eq!(map.get("age"), Some(&Value::from(30)));
        }
        _ => panic!("Expected table"),
    }
}

#[test]
fn test_toml_value_nested() {
    let nested = toml_value!({
        "user": {
            "id": 123,
            "name": "Bob",
            "active": true
        },
        "tags": ["admin", "developer"],
        "count": 42
    });

    let root = nested.as_table().unwrap();
    assert_eq!(root.len(), 3);

    let user = root.get("user").and_then(Value::as_table).unwrap();
    assert_eq!(user.get("id"), Some(&Value::from(123)));
    assert_eq!(user.get("active"), Some(&Value::Bool(true)));

    let tags = root.get("tags").and_then(Value::as_array).unwrap();
    assert_eq!(tags, &vec![Value::from("admin"), Value::from("developer")]);

    let keys: Vec<_> = root.keys().cloned().collect();
    assert_eq!(keys, vec!["user", "tags", "count"]);
}

#[test]
fn test_value_methods() {
    let bool_val = toml_value!(true);
    assert!(bool_val.is_bool());
    assert!(!bool_val.is_str());
    assert_eq!(bool_val.as_bool(), Some(true));

    let str_val = toml_value!("hello");
    assert!(str_val.is_str());
    assert_eq!(str_val.as_str(), Some("hello"));
    assert_eq!(str_val.as_table(), None);

    let array_val = toml_value!([1, 2, 3]);
    assert!(array_val.is_array());
    assert_eq!(array_val.as_array().map(Vec::len), Some(3));

    let table_val = toml_value!({"key": "value"});
    assert!(table_val.is_table());
    assert_eq!(table_val.as_table().map(Table::len), Some(1));
    assert_eq!(table_val.get("key"), Some(&Value::from("value")));
}

#[test]
fn test_mutation() {
    let mut list = toml_value!([1]);
    list.append_value(toml_value!(2)).unwrap();
    assert_eq!(list, toml_value!([1, 2]));

    let mut doc = toml_value!({ "a": 1 });
    assert!(doc.append_value(toml_value!(2)).is_err());

    let table = doc.as_table_mut().unwrap();
    table.set_path(&["b", "c"], toml_value!("deep")).unwrap();
    assert!(table.set_path(&["a", "x"], toml_value!(0)).is_err());
    assert_eq!(doc, toml_value!({ "a": 1, "b": { "c": "deep" } }));
}

#[test]
fn test_toml_style_tables() {
    let owner = toml_value!({
        name = "Tom",
        "full name" = "Tom Preston-Werner",
        servers = [{ host = "alpha" }, { host = "beta" }],
        limits = {}
    });

    let keys: Vec<_> = owner.as_table().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["name", "full name", "servers", "limits"]);
    assert_eq!(
        owner,
        toml_value!({
            "name": "Tom",
            "full name": "Tom Preston-Werner",
            "servers": [{ "host": "alpha" }, { "host": "beta" }],
            "limits": {}
        })
    );

    // Bare keys and string keys mix in the JSON form too.
    assert_eq!(toml_value!({ port: 80, "host": "a" }), toml_value!({ port = 80, host = "a" }));
}

#[test]
fn test_toml_value_leaves() {
    let released: Datetime = "1979-05-27T07:32:00Z".parse().unwrap();
    let doc = toml_value!({
        released = released,
        mask = (Hex(255)),
        offset = (-8)
    });

    assert_eq!(doc.get("released"), Some(&Value::Datetime(released)));
    match doc.get("mask") {
        Some(Value::Integer(mask)) => {
            assert_eq!(mask.value(), 255);
            assert_eq!(mask.radix(), Radix::Hexadecimal);
        }
        other => panic!("Expected integer, got {:?}", other),
    }
    assert_eq!(doc.get("offset"), Some(&Value::from(-8)));
    assert_eq!(doc.to_string(), "released = 1979-05-27T07:32:00Z\nmask = 255\noffset = -8\n");
}
