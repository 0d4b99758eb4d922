//! Property-based tests for the core round-trip guarantees.
//!
//! Every value is wrapped in a one-field struct, since a document root must be
//! a table, and goes through both the tree and the rendered text.

use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use serde_toml_tree::{from_str, from_value, to_string, to_value, Bytes};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Wrap<T> {
    v: T,
}

fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(
    value: T,
) -> bool {
    let wrapped = Wrap { v: value };

    let tree = match to_value(&wrapped) {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("Encode failed: {}", e);
            return false;
        }
    };
    match from_value::<Wrap<T>>(&tree) {
        Ok(back) if back == wrapped => {}
        other => {
            eprintln!("Tree decode mismatch: {:?}", other);
            return false;
        }
    }

    match to_string(&wrapped) {
        Ok(serialized) => match from_str::<Wrap<T>>(&serialized) {
            Ok(deserialized) => wrapped == deserialized,
            Err(e) => {
                eprintln!("Deserialize failed: {}", e);
                eprintln!("Serialized was: {}", serialized);
                false
            }
        },
        Err(e) => {
            eprintln!("Serialize failed: {}", e);
            false
        }
    }
}

proptest! {
    #[test]
    fn prop_i32(n in any::<i32>()) {
        prop_assert!(roundtrip(n));
    }

    #[test]
    fn prop_i64(n in any::<i64>()) {
        prop_assert!(roundtrip(n));
    }

    #[test]
    fn prop_u8(n in any::<u8>()) {
        prop_assert!(roundtrip(n));
    }

    #[test]
    fn prop_u32(n in any::<u32>()) {
        prop_assert!(roundtrip(n));
    }

    #[test]
    fn prop_u64_in_range(n in 0..=i64::MAX as u64) {
        prop_assert!(roundtrip(n));
    }

    #[test]
    fn prop_bool(b in any::<bool>()) {
        prop_assert!(roundtrip(b));
    }

    #[test]
    fn prop_f64(f in proptest::num::f64::NORMAL | proptest::num::f64::ZERO) {
        prop_assert!(roundtrip(f));
    }

    #[test]
    fn prop_string(s in any::<String>()) {
        prop_assert!(roundtrip(s));
    }

    #[test]
    fn prop_vec_i32(v in prop::collection::vec(any::<i32>(), 0..20)) {
        prop_assert!(roundtrip(v));
    }

    #[test]
    fn prop_option_i32(opt in proptest::option::of(any::<i32>())) {
        prop_assert!(roundtrip(opt));
    }

    #[test]
    fn prop_tuple_i32_bool(t in (any::<i32>(), any::<bool>())) {
        prop_assert!(roundtrip(t));
    }

    #[test]
    fn prop_bytes(data in prop::collection::vec(any::<u8>(), 0..64)) {
        prop_assert!(roundtrip(Bytes(data)));
    }

    #[test]
    fn prop_narrowing_never_truncates(n in any::<i64>()) {
        let tree = to_value(&Wrap { v: n }).unwrap();
        let decoded = from_value::<Wrap<i16>>(&tree).map(|w| i64::from(w.v));
        match i16::try_from(n) {
            Ok(expected) => prop_assert_eq!(decoded.ok(), Some(i64::from(expected))),
            Err(_) => prop_assert!(decoded.is_err()),
        }
    }
}
