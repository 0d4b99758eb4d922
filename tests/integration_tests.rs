use serde::{Deserialize, Serialize};
use serde_toml_tree::{
    from_str, from_value, to_string, to_table, to_value, toml_value, Bytes, Datetime, Decoder,
    Error, Options, Table, Value,
};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct User {
    id: u32,
    name: String,
    active: bool,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Product {
    sku: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Order {
    order_id: u32,
    customer: User,
    items: Vec<Product>,
    total: f64,
}

fn assert_roundtrip<T>(value: &T)
where
    T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug,
{
    let tree = to_value(value).unwrap();
    let back: T = from_value(&tree).unwrap();
    assert_eq!(*value, back);

    let text = to_string(value).unwrap();
    let back: T = from_str(&text).unwrap();
    assert_eq!(*value, back, "text was:\n{}", text);
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Scalars {
    b: bool,
    s: String,
    c: char,
    i8: i8,
    i16: i16,
    i32: i32,
    i64: i64,
    u8: u8,
    u16: u16,
    u32: u32,
    u64: u64,
    f32: f32,
    f64: f64,
}

#[test]
fn test_scalar_roundtrip() {
    assert_roundtrip(&Scalars {
        b: true,
        s: "hello".to_string(),
        c: 'x',
        i8: i8::MIN,
        i16: i16::MAX,
        i32: -42,
        i64: i64::MIN,
        u8: u8::MAX,
        u16: 65535,
        u32: u32::MAX,
        u64: i64::MAX as u64,
        f32: 1.5,
        f64: -0.125,
    });
}

#[test]
fn test_table_order_follows_declaration_order() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Ordered {
        c: i32,
        a: i32,
        b: i32,
    }

    let table = to_table(&Ordered { c: 1, a: 2, b: 3 }).unwrap();
    let keys: Vec<_> = table.keys().cloned().collect();
    assert_eq!(keys, vec!["c", "a", "b"]);

    // Decoding does not care about key order.
    let shuffled = toml_value!({ "b": 3, "a": 2, "c": 1 });
    let back: Ordered = from_value(&shuffled).unwrap();
    assert_eq!(back, Ordered { c: 1, a: 2, b: 3 });
}

#[test]
fn test_array_order_and_count() {
    #[derive(Serialize)]
    struct Wrapper {
        items: Vec<i32>,
    }

    let items = vec![5, 3, 9, 1];
    let tree = to_value(&Wrapper {
        items: items.clone(),
    })
    .unwrap();
    let array = tree.get("items").and_then(Value::as_array).unwrap();
    assert_eq!(array.len(), items.len());

    let options = Options::new();
    let root = Decoder::new(&tree, &options).table().unwrap();
    let mut cursor = root.nested_array("items").unwrap();
    assert_eq!(cursor.count(), 4);
    for expected in &items {
        assert_eq!(cursor.decode_next::<i32>().unwrap(), *expected);
    }
    assert!(cursor.is_at_end());
    assert!(matches!(
        cursor.decode_next::<i32>(),
        Err(Error::ValueAbsent { .. })
    ));
}

#[test]
fn test_missing_key_fails_with_path() {
    #[derive(Deserialize, Debug)]
    struct Inner {
        #[allow(dead_code)]
        x: i32,
    }

    #[derive(Deserialize, Debug)]
    struct Outer {
        #[allow(dead_code)]
        inner: Inner,
    }

    let tree = toml_value!({ "inner": { "y": 1 } });
    match from_value::<Outer>(&tree) {
        Err(Error::KeyNotFound { key, path }) => {
            assert_eq!(key, "x");
            assert_eq!(path.map(|p| p.to_string()), Some("inner.x".to_string()));
        }
        other => panic!("Expected KeyNotFound, got {:?}", other),
    }
}

#[test]
fn test_type_mismatch_carries_container_path() {
    #[derive(Deserialize, Debug)]
    struct Server {
        #[allow(dead_code)]
        port: i64,
    }

    #[derive(Deserialize, Debug)]
    struct Config {
        #[allow(dead_code)]
        servers: Vec<Server>,
    }

    let tree = toml_value!({ "servers": [{ "port": 80 }, { "port": "eighty" }] });
    match from_value::<Config>(&tree) {
        Err(Error::TypeMismatch {
            expected,
            found,
            path,
        }) => {
            assert_eq!(expected, "i64");
            assert_eq!(found, "string");
            assert_eq!(
                path.map(|p| p.to_string()),
                Some("servers[1].port".to_string())
            );
        }
        other => panic!("Expected TypeMismatch, got {:?}", other),
    }
}

#[test]
fn test_binary_transform_default() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Blob {
        data: Bytes,
    }

    let blob = Blob {
        data: Bytes(vec![72, 105]),
    };
    let tree = to_value(&blob).unwrap();
    assert_eq!(tree.get("data"), Some(&Value::from("SGk=")));

    let back: Blob = from_value(&tree).unwrap();
    assert_eq!(back.data.as_slice(), &[72, 105]);
}

#[test]
fn test_decode_nil_is_always_false() {
    let options = Options::new();
    let nodes = [
        Value::from(true),
        Value::from(""),
        Value::from(0),
        Value::Array(vec![]),
        Value::Table(Table::new()),
    ];
    for node in &nodes {
        assert!(!Decoder::new(node, &options).decode_nil());
    }
}

#[test]
fn test_narrowing_boundary() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Byte {
        value: u8,
    }

    assert_roundtrip(&Byte { value: 255 });

    let tree = toml_value!({ "value": 300 });
    match from_value::<Byte>(&tree) {
        Err(Error::OutOfRange {
            value,
            target,
            path,
        }) => {
            assert_eq!(value, "300");
            assert_eq!(target, "u8");
            assert_eq!(path.map(|p| p.to_string()), Some("value".to_string()));
        }
        other => panic!("Expected OutOfRange, got {:?}", other),
    }

    let negative = toml_value!({ "value": (-1) });
    assert!(matches!(
        from_value::<Byte>(&negative),
        Err(Error::OutOfRange { .. })
    ));
}

#[test]
fn test_f32_overflow_is_out_of_range() {
    #[derive(Deserialize, Debug)]
    struct Ratio {
        #[allow(dead_code)]
        r: f32,
    }

    let tree = toml_value!({ "r": 1e300 });
    assert!(matches!(
        from_value::<Ratio>(&tree),
        Err(Error::OutOfRange { .. })
    ));
}

#[test]
fn test_structural_projection_is_not_coercive() {
    #[derive(Deserialize, Debug)]
    struct Numbers {
        #[allow(dead_code)]
        f: f64,
    }

    let tree = toml_value!({ "f": 1 });
    assert!(matches!(
        from_value::<Numbers>(&tree),
        Err(Error::TypeMismatch { .. })
    ));
}

#[test]
fn test_nested_struct() {
    let order = Order {
        order_id: 12345,
        customer: User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["vip".to_string()],
        },
        items: vec![
            Product {
                sku: "WIDGET-001".to_string(),
                price: 29.99,
                quantity: 2,
            },
            Product {
                sku: "GADGET-002".to_string(),
                price: 49.99,
                quantity: 1,
            },
        ],
        total: 109.97,
    };

    assert_roundtrip(&order);

    let text = to_string(&order).unwrap();
    assert!(text.contains("[customer]\n"));
    assert!(text.contains("[[items]]\n"));
}

#[test]
fn test_optional_fields() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Profile {
        name: String,
        nickname: Option<String>,
        age: Option<u8>,
    }

    let full = Profile {
        name: "Ada".to_string(),
        nickname: Some("countess".to_string()),
        age: Some(36),
    };
    assert_roundtrip(&full);

    let sparse = Profile {
        name: "Ada".to_string(),
        nickname: None,
        age: None,
    };
    let table = to_table(&sparse).unwrap();
    assert_eq!(table.len(), 1);
    assert_roundtrip(&sparse);
}

#[test]
fn test_enums() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    enum Shape {
        Empty,
        Circle(f64),
        Point(i32, i32),
        Rect { w: u32, h: u32 },
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Drawing {
        shapes: Vec<Shape>,
        main: Shape,
    }

    assert_roundtrip(&Drawing {
        shapes: vec![
            Shape::Empty,
            Shape::Circle(2.5),
            Shape::Point(-1, 4),
            Shape::Rect { w: 3, h: 4 },
        ],
        main: Shape::Rect { w: 1, h: 1 },
    });
}

#[test]
fn test_maps() {
    let mut limits = BTreeMap::new();
    limits.insert("cpu".to_string(), 4);
    limits.insert("memory".to_string(), 512);
    assert_roundtrip(&limits);
}

#[test]
fn test_flatten_shares_the_table() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Base {
        id: u32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Derived {
        #[serde(flatten)]
        base: Base,
        name: String,
    }

    let derived = Derived {
        base: Base { id: 7 },
        name: "seven".to_string(),
    };
    let table = to_table(&derived).unwrap();
    assert_eq!(table.get("id"), Some(&Value::from(7)));
    assert_roundtrip(&derived);
}

#[test]
fn test_flatten_keeps_binary_payloads() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Attachment {
        data: Bytes,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Message {
        #[serde(flatten)]
        attachment: Attachment,
        subject: String,
    }

    let message = Message {
        attachment: Attachment {
            data: Bytes(vec![72, 105]),
        },
        subject: "hi".to_string(),
    };
    let tree = to_value(&message).unwrap();
    assert_eq!(tree.get("data"), Some(&Value::from("SGk=")));
    assert_roundtrip(&message);

    let as_array = toml_value!({ "data": [72, 105], "subject": "hi" });
    assert_eq!(from_value::<Message>(&as_array).unwrap(), message);
}

#[test]
fn test_narrowing_under_flatten() {
    #[derive(Deserialize, Debug, PartialEq)]
    struct Limits {
        level: u8,
        ratio: f32,
    }

    #[derive(Deserialize, Debug, PartialEq)]
    struct Job {
        #[serde(flatten)]
        limits: Limits,
        name: String,
    }

    // Flattened fields are buffered by serde, which narrows them itself.
    // Integers still refuse to truncate, but the error is serde's own.
    let too_wide = toml_value!({ "level": 300, "ratio": 0.5, "name": "x" });
    assert!(matches!(
        from_value::<Job>(&too_wide),
        Err(Error::Custom { .. })
    ));

    // Floats are cast by serde, so an f32 overflow becomes infinity.
    let huge = toml_value!({ "level": 1, "ratio": 1e300, "name": "x" });
    let job = from_value::<Job>(&huge).unwrap();
    assert!(job.limits.ratio.is_infinite());

    // The shared-table route keeps strict narrowing and exact paths.
    let options = Options::new();
    let table = Decoder::new(&too_wide, &options).table().unwrap();
    match table.super_decoder().decode::<Limits>() {
        Err(Error::OutOfRange { target, path, .. }) => {
            assert_eq!(target, "u8");
            assert_eq!(path.map(|p| p.to_string()), Some("level".to_string()));
        }
        other => panic!("Expected OutOfRange, got {:?}", other),
    }

    let table = Decoder::new(&huge, &options).table().unwrap();
    match table.super_decoder().decode::<Limits>() {
        Err(Error::OutOfRange { target, path, .. }) => {
            assert_eq!(target, "f32");
            assert_eq!(path.map(|p| p.to_string()), Some("ratio".to_string()));
        }
        other => panic!("Expected OutOfRange, got {:?}", other),
    }
}

#[test]
fn test_datetimes() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Event {
        at: Datetime,
        day: Datetime,
    }

    let event = Event {
        at: "1979-05-27T07:32:00-08:00".parse().unwrap(),
        day: "1979-05-27".parse().unwrap(),
    };

    let text = to_string(&event).unwrap();
    assert_eq!(text, "at = 1979-05-27T07:32:00-08:00\nday = 1979-05-27\n");
    assert_roundtrip(&event);

    let tree = to_value(&event).unwrap();
    assert!(tree.get("at").map_or(false, Value::is_datetime));
}

#[test]
fn test_datetime_outside_toml_range() {
    #[derive(Serialize)]
    struct Event {
        day: Datetime,
    }

    let far = chrono::NaiveDate::from_ymd_opt(12345, 1, 1).unwrap();
    match to_string(&Event { day: far.into() }) {
        Err(Error::OutOfRange { value, target, path }) => {
            assert_eq!(value, "+12345-01-01");
            assert_eq!(target, "TOML datetime");
            assert_eq!(path.map(|p| p.to_string()), Some("day".to_string()));
        }
        other => panic!("Expected OutOfRange, got {:?}", other),
    }

    let offset = chrono::FixedOffset::east_opt(3600 + 15).unwrap();
    let at = chrono::TimeZone::with_ymd_and_hms(&offset, 2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap();
    assert!(matches!(
        to_value(&Event { day: at.into() }),
        Err(Error::OutOfRange { .. })
    ));

    let last = chrono::NaiveDate::from_ymd_opt(9999, 12, 31).unwrap();
    assert_eq!(
        to_string(&Event { day: last.into() }).unwrap(),
        "day = 9999-12-31\n"
    );
}

#[test]
fn test_untyped_value_roundtrip() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Plugin {
        name: String,
        settings: Value,
    }

    let text = "name = \"cache\"\n\n[settings]\nsize = 10\nexpires = 2024-01-01\n";
    let plugin: Plugin = from_str(text).unwrap();
    assert!(plugin
        .settings
        .get("expires")
        .map_or(false, Value::is_datetime));
    assert_eq!(to_string(&plugin).unwrap(), text);
}

#[test]
fn test_unit_struct_is_unsupported() {
    #[derive(Serialize)]
    struct Marker;

    #[derive(Serialize)]
    struct Holder {
        marker: Marker,
    }

    match to_value(&Holder { marker: Marker }) {
        Err(Error::UnsupportedType { ty, path }) => {
            assert_eq!(ty, "Marker");
            assert_eq!(path.map(|p| p.to_string()), Some("marker".to_string()));
        }
        other => panic!("Expected UnsupportedType, got {:?}", other),
    }
}

#[test]
fn test_parse_error() {
    assert!(matches!(from_str::<User>("id = "), Err(Error::Parse(_))));
}

#[test]
fn test_error_messages() {
    #[derive(Deserialize, Debug)]
    struct Port {
        #[allow(dead_code)]
        port: u16,
    }

    let err = from_str::<Port>("port = 'http'").unwrap_err();
    assert_eq!(
        err.to_string(),
        "type mismatch at `port`: a value of type u16 does not exist at this location (found string)"
    );
}
