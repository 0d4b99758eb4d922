//! Reading TOML text into document trees.
//!
//! Parsing is delegated to the `toml` crate. Its tree is converted into
//! [`Value`] nodes with the document's key order preserved.

use crate::{Datetime, Error, Integer, Result, Table, Value};
use std::str::FromStr;
use tracing::debug;

/// Parses a TOML document into its root table.
///
/// # Errors
///
/// Returns [`Error::Parse`] if the text is not valid TOML.
///
/// # Examples
///
/// ```rust
/// use serde_toml_tree::parse_table;
///
/// let table = parse_table("name = \"demo\"\n[server]\nport = 8080\n").unwrap();
/// let keys: Vec<_> = table.keys().cloned().collect();
/// assert_eq!(keys, vec!["name", "server"]);
/// ```
pub fn parse_table(input: &str) -> Result<Table> {
    debug!(len = input.len(), "parsing TOML document");
    let parsed = toml::Table::from_str(input).map_err(|e| Error::parse(&e.to_string()))?;
    convert_table(parsed)
}

fn convert_table(table: toml::Table) -> Result<Table> {
    let mut converted = Table::with_capacity(table.len());
    for (key, value) in table {
        converted.insert(key, convert(value)?);
    }
    Ok(converted)
}

fn convert(value: toml::Value) -> Result<Value> {
    Ok(match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Integer(Integer::new(i)),
        toml::Value::Float(f) => Value::Float(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::Datetime(Datetime::try_from(dt)?),
        toml::Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(convert)
                .collect::<Result<Vec<_>>>()?,
        ),
        toml::Value::Table(table) => Value::Table(convert_table(table)?),
    })
}

impl FromStr for Table {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_table(s)
    }
}
