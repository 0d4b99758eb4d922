//! Decoding Rust values out of document trees.
//!
//! Three containers walk a borrowed [`Value`] tree:
//!
//! - [`Decoder`] is the single-value container. It implements
//!   [`serde::Deserializer`] over one node.
//! - [`TableDecoder`] is the keyed container over a table node. It implements
//!   [`serde::de::MapAccess`].
//! - [`ArrayDecoder`] is the sequential container over an array node. It
//!   implements [`serde::de::SeqAccess`] and keeps a read cursor that only
//!   moves forward.
//!
//! Leaf projections are structural and strict. A string node never decodes as
//! an integer, an integer never decodes as a float, and a value that does not
//! fit the requested width fails with [`Error::OutOfRange`].
//!
//! ## Usage
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_toml_tree::{from_value, toml_value};
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Data { x: i32, y: i32 }
//!
//! let tree = toml_value!({ "x": 1, "y": 2 });
//! let data: Data = from_value(&tree).unwrap();
//! assert_eq!(data, Data { x: 1, y: 2 });
//! ```
//!
//! ## Driving the containers by hand
//!
//! ```rust
//! use serde_toml_tree::{toml_value, Decoder, Options};
//!
//! let tree = toml_value!({ "ports": [80, 443] });
//! let options = Options::new();
//! let root = Decoder::new(&tree, &options).table().unwrap();
//!
//! let mut ports = root.nested_array("ports").unwrap();
//! assert_eq!(ports.count(), 2);
//! assert_eq!(ports.decode_next::<u16>().unwrap(), 80);
//! assert_eq!(ports.decode_next::<u16>().unwrap(), 443);
//! assert!(ports.is_at_end());
//! assert!(ports.decode_next::<u16>().is_err());
//! ```

use crate::datetime::DATETIME_NEWTYPE;
use crate::{CodingPath, Error, Options, Result, Table, Value};
use serde::de::value::BorrowedStrDeserializer;
use serde::de::{self, Deserialize, DeserializeSeed, IntoDeserializer, Visitor};
use tracing::trace;

/// The single-value decoding container.
pub struct Decoder<'de, 'a> {
    node: &'de Value,
    path: CodingPath,
    options: &'a Options,
}

impl<'de, 'a> Decoder<'de, 'a> {
    /// Creates a decoder over a root node.
    pub fn new(node: &'de Value, options: &'a Options) -> Self {
        Decoder::at(node, CodingPath::root(), options)
    }

    pub(crate) fn at(node: &'de Value, path: CodingPath, options: &'a Options) -> Self {
        Decoder {
            node,
            path,
            options,
        }
    }

    #[must_use]
    pub fn path(&self) -> &CodingPath {
        &self.path
    }

    #[must_use]
    pub fn node(&self) -> &'de Value {
        self.node
    }

    /// Always `false`: the tree has no null leaf. Optional values are modelled
    /// by leaving the key out of the parent table.
    #[must_use]
    pub fn decode_nil(&self) -> bool {
        false
    }

    /// Decodes the node as a `T`.
    pub fn decode<T>(self) -> Result<T>
    where
        T: Deserialize<'de>,
    {
        let path = self.path.clone();
        T::deserialize(self).map_err(|e| e.located(&path))
    }

    /// A keyed container over this node, which must be a table.
    pub fn table(&self) -> Result<TableDecoder<'de, 'a>> {
        match self.node {
            Value::Table(table) => Ok(TableDecoder::new(
                self.node,
                table,
                self.path.clone(),
                self.options,
            )),
            other => Err(Error::type_mismatch("table", other.type_name(), &self.path)),
        }
    }

    /// A sequential container over this node, which must be an array.
    pub fn array(&self) -> Result<ArrayDecoder<'de, 'a>> {
        match self.node {
            Value::Array(items) => Ok(ArrayDecoder::new(items, self.path.clone(), self.options)),
            other => Err(Error::type_mismatch("array", other.type_name(), &self.path)),
        }
    }

    fn mismatch(&self, expected: &str) -> Error {
        Error::type_mismatch(expected, self.node.type_name(), &self.path)
    }

    fn integer(&self, expected: &str) -> Result<i64> {
        self.node.as_integer().ok_or_else(|| self.mismatch(expected))
    }
}

macro_rules! deserialize_integer {
    ($($method:ident => $ty:ty, $visit:ident;)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: Visitor<'de>,
            {
                let value = self.integer(stringify!($ty))?;
                let narrowed = <$ty>::try_from(value)
                    .map_err(|_| Error::out_of_range(value, stringify!($ty), &self.path))?;
                visitor.$visit(narrowed)
            }
        )*
    };
}

impl<'de, 'a> de::Deserializer<'de> for Decoder<'de, 'a> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.node {
            Value::Bool(b) => visitor.visit_bool(*b),
            Value::String(s) => visitor.visit_borrowed_str(s),
            Value::Integer(i) => visitor.visit_i64(i.value()),
            Value::Float(f) => visitor.visit_f64(*f),
            Value::Datetime(dt) => {
                let text: de::value::StringDeserializer<Error> = dt.to_string().into_deserializer();
                visitor.visit_newtype_struct(text)
            }
            Value::Array(items) => {
                visitor.visit_seq(ArrayDecoder::new(items, self.path, self.options))
            }
            Value::Table(table) => {
                visitor.visit_map(TableDecoder::new(self.node, table, self.path, self.options))
            }
        }
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.node.as_bool() {
            Some(b) => visitor.visit_bool(b),
            None => Err(self.mismatch("bool")),
        }
    }

    deserialize_integer! {
        deserialize_i8 => i8, visit_i8;
        deserialize_i16 => i16, visit_i16;
        deserialize_i32 => i32, visit_i32;
        deserialize_i64 => i64, visit_i64;
        deserialize_i128 => i128, visit_i128;
        deserialize_u8 => u8, visit_u8;
        deserialize_u16 => u16, visit_u16;
        deserialize_u32 => u32, visit_u32;
        deserialize_u64 => u64, visit_u64;
        deserialize_u128 => u128, visit_u128;
    }

    // f32 is narrowed from the f64 projection.
    fn deserialize_f32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let value = self.node.as_float().ok_or_else(|| self.mismatch("f32"))?;
        if value.is_finite() && value.abs() > f64::from(f32::MAX) {
            return Err(Error::out_of_range(value, "f32", &self.path));
        }
        visitor.visit_f32(value as f32)
    }

    fn deserialize_f64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.node.as_float() {
            Some(f) => visitor.visit_f64(f),
            None => Err(self.mismatch("f64")),
        }
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let s = self.node.as_str().ok_or_else(|| self.mismatch("char"))?;
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => visitor.visit_char(c),
            _ => Err(Error::type_mismatch("char", "string", &self.path)),
        }
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.node {
            Value::String(s) => visitor.visit_borrowed_str(s),
            _ => Err(self.mismatch("String")),
        }
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_byte_buf(visitor)
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.options.decode_data(self.node) {
            Some(bytes) => {
                trace!(path = %self.path, len = bytes.len(), "decoded binary payload");
                visitor.visit_byte_buf(bytes)
            }
            None => Err(self.mismatch("binary data")),
        }
    }

    // A node is never null, so an optional target always holds a value.
    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_unit<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        Err(self.mismatch("()"))
    }

    fn deserialize_unit_struct<V>(self, name: &'static str, _visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        Err(self.mismatch(name))
    }

    fn deserialize_newtype_struct<V>(self, name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        if name == DATETIME_NEWTYPE {
            return match self.node {
                Value::Datetime(dt) => {
                    let text: de::value::StringDeserializer<Error> =
                        dt.to_string().into_deserializer();
                    visitor.visit_newtype_struct(text)
                }
                Value::String(_) => visitor.visit_newtype_struct(self),
                _ => Err(self.mismatch("datetime")),
            };
        }
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let array = self.array()?;
        visitor.visit_seq(array)
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let table = self.table()?;
        visitor.visit_map(table)
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.node {
            Value::String(s) => {
                visitor.visit_enum(BorrowedStrDeserializer::<Error>::new(s.as_str()))
            }
            Value::Table(table) if table.len() == 1 => match table.iter().next() {
                Some((variant, value)) => visitor.visit_enum(VariantDecoder {
                    variant,
                    value,
                    path: self.path.child_key(variant),
                    options: self.options,
                }),
                None => Err(self.mismatch("enum")),
            },
            _ => Err(self.mismatch("enum")),
        }
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_unit()
    }
}

/// The keyed decoding container over a table node.
pub struct TableDecoder<'de, 'a> {
    node: &'de Value,
    table: &'de Table,
    path: CodingPath,
    options: &'a Options,
    entries: indexmap::map::Iter<'de, String, Value>,
    pending: Option<(&'de String, &'de Value)>,
}

impl<'de, 'a> TableDecoder<'de, 'a> {
    fn new(node: &'de Value, table: &'de Table, path: CodingPath, options: &'a Options) -> Self {
        TableDecoder {
            node,
            table,
            path,
            options,
            entries: table.iter(),
            pending: None,
        }
    }

    #[must_use]
    pub fn path(&self) -> &CodingPath {
        &self.path
    }

    /// Returns `true` if the table has an entry for `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.table.contains_key(key)
    }

    /// The table's keys in document order.
    pub fn keys(&self) -> indexmap::map::Keys<'de, String, Value> {
        self.table.keys()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    fn child(&self, key: &str) -> Result<(&'de Value, CodingPath)> {
        match self.table.get(key) {
            Some(node) => Ok((node, self.path.child_key(key))),
            None => Err(Error::key_not_found(key, &self.path)),
        }
    }

    /// Decodes the value stored under `key`.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if the key is missing, or the error raised while
    /// decoding the child, located at the child's path.
    pub fn decode<T>(&self, key: &str) -> Result<T>
    where
        T: Deserialize<'de>,
    {
        let (node, path) = self.child(key)?;
        Decoder::at(node, path, self.options).decode()
    }

    /// Decodes the value under `key`, or returns `None` if the key is absent.
    pub fn decode_if_present<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: Deserialize<'de>,
    {
        if self.contains(key) {
            self.decode(key).map(Some)
        } else {
            Ok(None)
        }
    }

    /// A keyed container over the child table at `key`.
    pub fn nested_table(&self, key: &str) -> Result<TableDecoder<'de, 'a>> {
        let (node, path) = self.child(key)?;
        Decoder::at(node, path, self.options).table()
    }

    /// A sequential container over the child array at `key`.
    pub fn nested_array(&self, key: &str) -> Result<ArrayDecoder<'de, 'a>> {
        let (node, path) = self.child(key)?;
        Decoder::at(node, path, self.options).array()
    }

    /// A decoder over this same table, for decoding a base shape whose fields
    /// live alongside the derived shape's fields.
    ///
    /// Unlike `#[serde(flatten)]`, which serde buffers before the fields reach
    /// this crate, the base shape is decoded with strict narrowing, the
    /// configured data decoder and exact coding paths.
    #[must_use]
    pub fn super_decoder(&self) -> Decoder<'de, 'a> {
        Decoder::at(self.node, self.path.clone(), self.options)
    }
}

impl<'de, 'a> de::MapAccess<'de> for TableDecoder<'de, 'a> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: DeserializeSeed<'de>,
    {
        match self.entries.next() {
            Some((key, value)) => {
                self.pending = Some((key, value));
                seed.deserialize(BorrowedStrDeserializer::<Error>::new(key))
                    .map(Some)
                    .map_err(|e| e.located(&self.path.child_key(key)))
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: DeserializeSeed<'de>,
    {
        match self.pending.take() {
            Some((key, value)) => {
                let path = self.path.child_key(key);
                seed.deserialize(Decoder::at(value, path.clone(), self.options))
                    .map_err(|e| e.located(&path))
            }
            None => Err(Error::custom("next_value_seed called before next_key_seed")
                .located(&self.path)),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.entries.len())
    }
}

/// The sequential decoding container over an array node.
pub struct ArrayDecoder<'de, 'a> {
    items: &'de [Value],
    cursor: usize,
    path: CodingPath,
    options: &'a Options,
}

impl<'de, 'a> ArrayDecoder<'de, 'a> {
    fn new(items: &'de [Value], path: CodingPath, options: &'a Options) -> Self {
        ArrayDecoder {
            items,
            cursor: 0,
            path,
            options,
        }
    }

    #[must_use]
    pub fn path(&self) -> &CodingPath {
        &self.path
    }

    /// Number of elements in the array.
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Index of the next element to be read.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.cursor >= self.items.len()
    }

    fn next_node(&self, expected: &str) -> Result<(&'de Value, CodingPath)> {
        let path = self.path.child_index(self.cursor);
        match self.items.get(self.cursor) {
            Some(node) => Ok((node, path)),
            None => Err(Error::value_absent(expected, &path)),
        }
    }

    /// Decodes the element under the cursor and advances past it.
    ///
    /// # Errors
    ///
    /// [`Error::ValueAbsent`] once the cursor has reached the end. A failed
    /// decode leaves the cursor where it was.
    pub fn decode_next<T>(&mut self) -> Result<T>
    where
        T: Deserialize<'de>,
    {
        let (node, path) = self.next_node(std::any::type_name::<T>())?;
        let value = Decoder::at(node, path, self.options).decode()?;
        self.cursor += 1;
        Ok(value)
    }

    /// A keyed container over the element under the cursor.
    pub fn nested_table(&mut self) -> Result<TableDecoder<'de, 'a>> {
        let (node, path) = self.next_node("table")?;
        let table = Decoder::at(node, path, self.options).table()?;
        self.cursor += 1;
        Ok(table)
    }

    /// A sequential container over the element under the cursor.
    pub fn nested_array(&mut self) -> Result<ArrayDecoder<'de, 'a>> {
        let (node, path) = self.next_node("array")?;
        let array = Decoder::at(node, path, self.options).array()?;
        self.cursor += 1;
        Ok(array)
    }
}

impl<'de, 'a> de::SeqAccess<'de> for ArrayDecoder<'de, 'a> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: DeserializeSeed<'de>,
    {
        let node = match self.items.get(self.cursor) {
            Some(node) => node,
            None => return Ok(None),
        };
        let path = self.path.child_index(self.cursor);
        let value = seed
            .deserialize(Decoder::at(node, path.clone(), self.options))
            .map_err(|e| e.located(&path))?;
        self.cursor += 1;
        Ok(Some(value))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.items.len().saturating_sub(self.cursor))
    }
}

/// Decodes the body of a `{ Variant = body }` table.
struct VariantDecoder<'de, 'a> {
    variant: &'de str,
    value: &'de Value,
    path: CodingPath,
    options: &'a Options,
}

impl<'de, 'a> de::EnumAccess<'de> for VariantDecoder<'de, 'a> {
    type Error = Error;
    type Variant = Self;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self)>
    where
        V: DeserializeSeed<'de>,
    {
        let variant = seed
            .deserialize(BorrowedStrDeserializer::<Error>::new(self.variant))
            .map_err(|e| e.located(&self.path))?;
        Ok((variant, self))
    }
}

impl<'de, 'a> de::VariantAccess<'de> for VariantDecoder<'de, 'a> {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        Err(Error::type_mismatch(
            "unit variant",
            self.value.type_name(),
            &self.path,
        ))
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: DeserializeSeed<'de>,
    {
        let path = self.path.clone();
        seed.deserialize(Decoder::at(self.value, self.path, self.options))
            .map_err(|e| e.located(&path))
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let array = Decoder::at(self.value, self.path.clone(), self.options).array()?;
        visitor
            .visit_seq(array)
            .map_err(|e| e.located(&self.path))
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let table = Decoder::at(self.value, self.path.clone(), self.options).table()?;
        visitor
            .visit_map(table)
            .map_err(|e| e.located(&self.path))
    }
}
