//! Encoding Rust values into document trees.
//!
//! Three containers cooperate to build a [`Value`]:
//!
//! - [`Encoder`] is the single-value container. It implements
//!   [`serde::Serializer`] and turns one Rust value into one node.
//! - [`TableEncoder`] is the keyed container. Struct fields and map entries
//!   accumulate into one [`Table`] in first-write order.
//! - [`ArrayEncoder`] is the sequential container and appends elements in order.
//!
//! Each container owns the node it is building and hands it to its parent
//! only once it is complete, so a parent never sees a half-built child.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde::Serialize;
//! use serde_toml_tree::{to_value, Value};
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: i32 }
//!
//! let value = to_value(&Point { x: 1, y: 2 }).unwrap();
//! assert_eq!(value.get("x"), Some(&Value::from(1)));
//! ```
//!
//! ## Direct Encoder Usage
//!
//! The containers can also be driven by hand:
//!
//! ```rust
//! use serde_toml_tree::{Options, TableEncoder};
//!
//! let options = Options::new();
//! let mut table = TableEncoder::new(&options);
//! table.encode("name", "widget").unwrap();
//! table.encode("tags", &["a", "b"]).unwrap();
//!
//! let node = table.finish();
//! assert_eq!(node.to_string(), "name = \"widget\"\ntags = [\"a\", \"b\"]\n");
//! ```

use crate::datetime::DATETIME_NEWTYPE;
use crate::{CodingPath, Datetime, Error, Integer, Options, Radix, Result, Table, Value};
use serde::{ser, Serialize};
use tracing::trace;

/// The single-value encoding container.
///
/// Produces exactly one node for the value it is given. The coding path is
/// where that node will be installed and is only used for error reporting.
pub struct Encoder<'a> {
    path: CodingPath,
    options: &'a Options,
}

impl<'a> Encoder<'a> {
    /// Creates an encoder for the root of a document.
    pub fn new(options: &'a Options) -> Self {
        Encoder {
            path: CodingPath::root(),
            options,
        }
    }

    pub(crate) fn at(path: CodingPath, options: &'a Options) -> Self {
        Encoder { path, options }
    }

    #[must_use]
    pub fn path(&self) -> &CodingPath {
        &self.path
    }

    /// Encodes `value` into a node.
    pub fn encode<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let path = self.path.clone();
        value.serialize(self).map_err(|e| e.located(&path))
    }

    fn integer<V>(&self, value: V, target: &str) -> Result<Value>
    where
        V: Copy + std::fmt::Display,
        i64: TryFrom<V>,
    {
        i64::try_from(value)
            .map(|v| Value::Integer(Integer::new(v)))
            .map_err(|_| Error::out_of_range(value, target, &self.path))
    }
}

impl<'a> ser::Serializer for Encoder<'a> {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = ArrayEncoder<'a>;
    type SerializeTuple = ArrayEncoder<'a>;
    type SerializeTupleStruct = ArrayEncoder<'a>;
    type SerializeTupleVariant = ArrayEncoder<'a>;
    type SerializeMap = TableEncoder<'a>;
    type SerializeStruct = TableEncoder<'a>;
    type SerializeStructVariant = TableEncoder<'a>;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Integer(Integer::new(v)))
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        self.integer(v, "i64")
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        self.integer(v, "i64")
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        self.integer(v, "i64")
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        let node = self.options.encode_data(v);
        trace!(
            path = %self.path,
            len = v.len(),
            node = node.type_name(),
            "encoded binary payload"
        );
        Ok(node)
    }

    fn serialize_none(self) -> Result<Value> {
        Err(Error::UnsupportedNone {
            path: Some(self.path),
        })
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Err(Error::unsupported_type("()", &self.path))
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Value> {
        Err(Error::unsupported_type(name, &self.path))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        if name == DATETIME_NEWTYPE {
            let path = self.path.clone();
            return match value.serialize(self)? {
                // Text that does not parse back is outside what TOML can hold.
                Value::String(text) => match text.parse::<Datetime>() {
                    Ok(dt) => Ok(Value::Datetime(dt)),
                    Err(_) => Err(Error::out_of_range(&text, "TOML datetime", &path)),
                },
                other => Err(Error::type_mismatch("datetime", other.type_name(), &path)),
            };
        }

        if let Some(radix) = Radix::from_newtype_name(name) {
            let path = self.path.clone();
            return match value.serialize(self)? {
                Value::Integer(i) => Ok(Value::Integer(i.in_radix(radix))),
                other => Err(Error::type_mismatch("integer", other.type_name(), &path)),
            };
        }

        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let child = self.path.child_key(variant);
        let inner = Encoder::at(child, self.options).encode(value)?;
        let mut table = Table::with_capacity(1);
        table.insert(variant.to_string(), inner);
        Ok(Value::Table(table))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<ArrayEncoder<'a>> {
        Ok(ArrayEncoder::at(self.path, self.options, None, len))
    }

    fn serialize_tuple(self, len: usize) -> Result<ArrayEncoder<'a>> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<ArrayEncoder<'a>> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<ArrayEncoder<'a>> {
        let path = self.path.child_key(variant);
        Ok(ArrayEncoder::at(path, self.options, Some(variant), Some(len)))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<TableEncoder<'a>> {
        Ok(TableEncoder::at(self.path, self.options, None, len))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<TableEncoder<'a>> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<TableEncoder<'a>> {
        let path = self.path.child_key(variant);
        Ok(TableEncoder::at(path, self.options, Some(variant), Some(len)))
    }
}

/// Wraps the body of an enum variant as `{ Variant = body }`.
fn wrap_variant(variant: Option<&'static str>, body: Value) -> Value {
    match variant {
        Some(name) => {
            let mut table = Table::with_capacity(1);
            table.insert(name.to_string(), body);
            Value::Table(table)
        }
        None => body,
    }
}

/// The keyed encoding container.
///
/// Entries are written in call order. Writing a key twice overwrites the
/// first value in place.
pub struct TableEncoder<'a> {
    table: Table,
    path: CodingPath,
    options: &'a Options,
    pending_key: Option<String>,
    variant: Option<&'static str>,
}

impl<'a> TableEncoder<'a> {
    /// Creates a keyed container for the root table of a document.
    pub fn new(options: &'a Options) -> Self {
        TableEncoder::at(CodingPath::root(), options, None, None)
    }

    fn at(
        path: CodingPath,
        options: &'a Options,
        variant: Option<&'static str>,
        len: Option<usize>,
    ) -> Self {
        TableEncoder {
            table: Table::with_capacity(len.unwrap_or(0)),
            path,
            options,
            pending_key: None,
            variant,
        }
    }

    #[must_use]
    pub fn path(&self) -> &CodingPath {
        &self.path
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.table.contains_key(key)
    }

    /// Encodes `value` under `key`.
    ///
    /// A `None` written directly under a key leaves the key out.
    pub fn encode<T>(&mut self, key: &str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let child = self.path.child_key(key);
        match Encoder::at(child.clone(), self.options).encode(value) {
            Ok(node) => {
                self.table.insert(key.to_string(), node);
                Ok(())
            }
            Err(Error::UnsupportedNone { path: Some(path) }) if path == child => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Installs a finished node under `key`.
    pub fn insert_value(&mut self, key: &str, value: Value) {
        self.table.insert(key.to_string(), value);
    }

    /// A fresh keyed container for a child table at `key`.
    ///
    /// Install its result with [`insert_value`](Self::insert_value).
    #[must_use]
    pub fn nested_table(&self, key: &str) -> TableEncoder<'a> {
        TableEncoder::at(self.path.child_key(key), self.options, None, None)
    }

    /// A fresh sequential container for a child array at `key`.
    #[must_use]
    pub fn nested_array(&self, key: &str) -> ArrayEncoder<'a> {
        ArrayEncoder::at(self.path.child_key(key), self.options, None, None)
    }

    /// Finishes the container and returns the table node.
    #[must_use]
    pub fn finish(self) -> Value {
        wrap_variant(self.variant, Value::Table(self.table))
    }
}

impl<'a> ser::SerializeMap for TableEncoder<'a> {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match Encoder::at(self.path.clone(), self.options).encode(key)? {
            Value::String(s) => {
                self.pending_key = Some(s);
                Ok(())
            }
            other => Err(Error::type_mismatch(
                "string key",
                other.type_name(),
                &self.path,
            )),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match self.pending_key.take() {
            Some(key) => self.encode(&key, value),
            None => Err(Error::custom("serialize_value called before serialize_key")
                .located(&self.path)),
        }
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl<'a> ser::SerializeStruct for TableEncoder<'a> {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.encode(key, value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl<'a> ser::SerializeStructVariant for TableEncoder<'a> {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.encode(key, value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

/// The sequential encoding container. Elements are appended in order.
pub struct ArrayEncoder<'a> {
    items: Vec<Value>,
    path: CodingPath,
    options: &'a Options,
    variant: Option<&'static str>,
}

impl<'a> ArrayEncoder<'a> {
    /// Creates a sequential container for a root array.
    pub fn new(options: &'a Options) -> Self {
        ArrayEncoder::at(CodingPath::root(), options, None, None)
    }

    fn at(
        path: CodingPath,
        options: &'a Options,
        variant: Option<&'static str>,
        len: Option<usize>,
    ) -> Self {
        ArrayEncoder {
            items: Vec::with_capacity(len.unwrap_or(0)),
            path,
            options,
            variant,
        }
    }

    #[must_use]
    pub fn path(&self) -> &CodingPath {
        &self.path
    }

    /// Number of elements appended so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Encodes `value` and appends it.
    pub fn encode<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let child = self.path.child_index(self.items.len());
        let node = Encoder::at(child, self.options).encode(value)?;
        self.items.push(node);
        Ok(())
    }

    /// Appends a finished node.
    pub fn push_value(&mut self, value: Value) {
        self.items.push(value);
    }

    /// A fresh keyed container for the next element.
    #[must_use]
    pub fn nested_table(&self) -> TableEncoder<'a> {
        TableEncoder::at(
            self.path.child_index(self.items.len()),
            self.options,
            None,
            None,
        )
    }

    /// A fresh sequential container for the next element.
    #[must_use]
    pub fn nested_array(&self) -> ArrayEncoder<'a> {
        ArrayEncoder::at(
            self.path.child_index(self.items.len()),
            self.options,
            None,
            None,
        )
    }

    /// Finishes the container and returns the array node.
    #[must_use]
    pub fn finish(self) -> Value {
        wrap_variant(self.variant, Value::Array(self.items))
    }
}

impl<'a> ser::SerializeSeq for ArrayEncoder<'a> {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.encode(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl<'a> ser::SerializeTuple for ArrayEncoder<'a> {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.encode(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl<'a> ser::SerializeTupleStruct for ArrayEncoder<'a> {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.encode(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl<'a> ser::SerializeTupleVariant for ArrayEncoder<'a> {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.encode(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Hex;
    use serde::Serialize;
    use std::collections::BTreeMap;

    fn encode<T: Serialize>(value: &T) -> Result<Value> {
        let options = Options::new();
        Encoder::new(&options).encode(value)
    }

    #[derive(Serialize)]
    struct Server {
        host: String,
        port: u16,
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        backup: Option<String>,
    }

    #[test]
    fn test_struct_fields_keep_declaration_order() {
        let server = Server {
            host: "localhost".to_string(),
            port: 8080,
            label: None,
            backup: Some("b".to_string()),
        };
        let value = encode(&server).unwrap();
        let keys: Vec<_> = value.as_table().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["host", "port", "backup"]);
    }

    #[test]
    fn test_none_field_is_omitted() {
        let server = Server {
            host: "h".to_string(),
            port: 1,
            label: None,
            backup: None,
        };
        let value = encode(&server).unwrap();
        assert!(!value.as_table().unwrap().contains_key("backup"));
    }

    #[test]
    fn test_none_in_array_fails() {
        let err = encode(&vec![Some(1), None]).unwrap_err();
        match err {
            Error::UnsupportedNone { path } => {
                assert_eq!(path.map(|p| p.to_string()), Some("[1]".to_string()));
            }
            other => panic!("Expected UnsupportedNone, got {:?}", other),
        }
    }

    #[test]
    fn test_u64_overflow() {
        assert_eq!(encode(&(i64::MAX as u64)).unwrap(), Value::from(i64::MAX));
        assert!(matches!(
            encode(&u64::MAX),
            Err(Error::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_unit_is_unsupported() {
        assert!(matches!(encode(&()), Err(Error::UnsupportedType { .. })));
    }

    #[test]
    fn test_non_string_map_keys_fail() {
        let mut map = BTreeMap::new();
        map.insert(1, "one");
        assert!(matches!(encode(&map), Err(Error::TypeMismatch { .. })));
    }

    #[test]
    fn test_radix_wrapper_sets_radix() {
        match encode(&Hex(255u8)).unwrap() {
            Value::Integer(i) => {
                assert_eq!(i.value(), 255);
                assert_eq!(i.radix(), Radix::Hexadecimal);
            }
            other => panic!("Expected integer, got {:?}", other),
        }
    }

    #[derive(Serialize)]
    enum Shape {
        Empty,
        Circle(f64),
        Point(i32, i32),
        Rect { w: u32, h: u32 },
    }

    #[test]
    fn test_enums_are_externally_tagged() {
        assert_eq!(encode(&Shape::Empty).unwrap(), Value::from("Empty"));
        assert_eq!(
            encode(&Shape::Circle(1.5)).unwrap().get("Circle"),
            Some(&Value::from(1.5))
        );
        assert_eq!(
            encode(&Shape::Point(1, 2)).unwrap().get("Point"),
            Some(&Value::Array(vec![Value::from(1), Value::from(2)]))
        );
        let rect = encode(&Shape::Rect { w: 3, h: 4 }).unwrap();
        assert_eq!(rect.get("Rect").and_then(|r| r.get("h")), Some(&Value::from(4)));
    }

    #[test]
    fn test_custom_error_is_located() {
        struct Broken;

        impl Serialize for Broken {
            fn serialize<S: ser::Serializer>(&self, _s: S) -> std::result::Result<S::Ok, S::Error> {
                Err(ser::Error::custom("broken"))
            }
        }

        #[derive(Serialize)]
        struct Outer {
            items: Vec<Broken>,
        }

        let err = encode(&Outer { items: vec![Broken] }).unwrap_err();
        assert_eq!(err.path().map(|p| p.to_string()), Some("items[0]".to_string()));
    }
}
