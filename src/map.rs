//! Ordered table type for TOML documents.
//!
//! [`Table`] wraps an [`IndexMap`] so keys iterate in first-insertion order.
//! Encoding a struct with fields `a, b, c` yields a table whose keys iterate
//! `a, b, c`; overwriting a key keeps its original position.
//!
//! ```rust
//! use serde_toml_tree::{Table, Value};
//!
//! let mut table = Table::new();
//! table.insert("name".to_string(), Value::from("Alice"));
//! table.insert("age".to_string(), Value::from(30));
//!
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use crate::{CodingPath, Error, Result, Value};
use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// An insertion-ordered map of string keys to TOML values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table(IndexMap<String, Value>);

impl Table {
    /// Creates an empty `Table`.
    #[must_use]
    pub fn new() -> Self {
        Table(IndexMap::new())
    }

    /// Creates an empty `Table` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Table(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the table.
    ///
    /// A new key is appended; an existing key is overwritten in place and the
    /// old value is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_toml_tree::{Table, Value};
    ///
    /// let mut table = Table::new();
    /// table.insert("a".to_string(), Value::from(1));
    /// table.insert("b".to_string(), Value::from(2));
    /// assert!(table.insert("a".to_string(), Value::from(3)).is_some());
    ///
    /// let keys: Vec<_> = table.keys().cloned().collect();
    /// assert_eq!(keys, vec!["a", "b"]);
    /// ```
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    /// Sets a value at a dotted path below this table, creating intermediate
    /// tables as needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if an intermediate key holds something
    /// other than a table, and [`Error::ValueAbsent`] for an empty path.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_toml_tree::{Table, Value};
    ///
    /// let mut table = Table::new();
    /// table.set_path(&["server", "port"], Value::from(8080)).unwrap();
    /// let port = table.get("server").and_then(|s| s.get("port")).and_then(|p| p.as_integer());
    /// assert_eq!(port, Some(8080));
    /// ```
    pub fn set_path(&mut self, path: &[&str], value: Value) -> Result<Option<Value>> {
        let (last, parents) = path
            .split_last()
            .ok_or_else(|| Error::value_absent("a non-empty key path", &CodingPath::root()))?;

        let mut current = self;
        let mut location = CodingPath::root();
        for key in parents {
            location = location.child_key(key);
            let child = current
                .0
                .entry((*key).to_string())
                .or_insert_with(|| Value::Table(Table::new()));
            current = match child {
                Value::Table(table) => table,
                other => return Err(Error::type_mismatch("table", other.type_name(), &location)),
            };
        }

        Ok(current.insert((*last).to_string(), value))
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Returns `true` if the table contains the key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes a key, shifting later entries down to keep their order.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the table, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the table, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the table, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }
}

impl IntoIterator for Table {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for Table {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Table(IndexMap::from_iter(iter))
    }
}

impl Serialize for Table {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Table {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Table(table) => Ok(table),
            other => Err(de::Error::invalid_type(
                de::Unexpected::Other(other.type_name()),
                &"a table",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overwrite_keeps_first_position() {
        let mut table = Table::new();
        table.insert("x".to_string(), Value::from(1));
        table.insert("y".to_string(), Value::from(2));
        table.insert("x".to_string(), Value::from(3));

        let entries: Vec<_> = table
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_integer()))
            .collect();
        assert_eq!(entries, vec![("x", Some(3)), ("y", Some(2))]);
    }

    #[test]
    fn test_set_path_through_scalar_fails() {
        let mut table = Table::new();
        table.insert("a".to_string(), Value::from(true));

        let err = table.set_path(&["a", "b"], Value::from(1)).unwrap_err();
        match err {
            Error::TypeMismatch { expected, path, .. } => {
                assert_eq!(expected, "table");
                assert_eq!(path.map(|p| p.to_string()), Some("a".to_string()));
            }
            other => panic!("Expected TypeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_set_path_empty() {
        let mut table = Table::new();
        assert!(matches!(
            table.set_path(&[], Value::from(1)),
            Err(Error::ValueAbsent { .. })
        ));
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut table: Table = vec![
            ("a".to_string(), Value::from(1)),
            ("b".to_string(), Value::from(2)),
            ("c".to_string(), Value::from(3)),
        ]
        .into_iter()
        .collect();

        table.remove("a");
        let keys: Vec<_> = table.keys().cloned().collect();
        assert_eq!(keys, vec!["b", "c"]);
    }
}
