//! # serde_toml_tree
//!
//! A Serde bridge between Rust types and an ordered TOML document tree.
//!
//! Encoding turns any `T: Serialize` into a [`Value`] tree, which can then be
//! rendered as TOML text. Decoding reads any `T: Deserialize` back out of a
//! tree, whether it was parsed from text or built in code. Format intent
//! survives the trip: integers remember the radix they should be printed in,
//! datetimes stay datetimes, and binary payloads go through a pluggable
//! transform.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_toml_tree::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Server {
//!     host: String,
//!     port: u16,
//!     tags: Vec<String>,
//! }
//!
//! let server = Server {
//!     host: "localhost".to_string(),
//!     port: 8080,
//!     tags: vec!["edge".to_string()],
//! };
//!
//! let toml = to_string(&server).unwrap();
//! assert_eq!(toml, "host = \"localhost\"\nport = 8080\ntags = [\"edge\"]\n");
//!
//! let back: Server = from_str(&toml).unwrap();
//! assert_eq!(server, back);
//! ```
//!
//! ### Working with the tree
//!
//! ```rust
//! use serde::Serialize;
//! use serde_toml_tree::{to_table, Value};
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: i32 }
//!
//! let mut table = to_table(&Point { x: 1, y: 2 }).unwrap();
//! table.set_path(&["meta", "label"], Value::from("origin")).unwrap();
//! assert_eq!(table.to_string(), "x = 1\ny = 2\n\n[meta]\nlabel = \"origin\"\n");
//! ```
//!
//! ### Optional values
//!
//! TOML has no null. A `None` field is left out of its table, and a missing
//! key decodes as `None`:
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_toml_tree::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Profile { name: String, email: Option<String> }
//!
//! let profile = Profile { name: "Ada".to_string(), email: None };
//! let toml = to_string(&profile).unwrap();
//! assert_eq!(toml, "name = \"Ada\"\n");
//! assert_eq!(from_str::<Profile>(&toml).unwrap(), profile);
//! ```
//!
//! ## Error Handling
//!
//! Every engine error carries the [`CodingPath`] where it happened:
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_toml_tree::{from_str, Error};
//!
//! #[derive(Deserialize, Debug)]
//! struct Limits { max: u8 }
//!
//! let err = from_str::<Limits>("max = 300").unwrap_err();
//! assert!(matches!(err, Error::OutOfRange { .. }));
//! ```
//!
//! ## Demos
//!
//! See the `demos/` directory, runnable with `cargo run --example <name>`:
//!
//! - **`basic.rs`** - encoding a config struct and reading it back
//! - **`binary_data.rs`** - base64 and byte-array payload transforms
//! - **`format_options.rs`** - every printer flag side by side

pub mod bytes;
pub mod datetime;
pub mod de;
pub mod error;
pub mod integer;
pub mod macros;
pub mod map;
pub mod options;
pub mod parse;
pub mod path;
pub mod printer;
pub mod ser;
pub mod value;

pub use bytes::Bytes;
pub use datetime::Datetime;
pub use de::{ArrayDecoder, Decoder, TableDecoder};
pub use error::{Error, Result};
pub use integer::{Binary, Hex, Integer, Octal, Radix};
pub use map::Table;
pub use options::{
    base64_data, byte_array_data, decode_base64_data, decode_base64_or_byte_array,
    decode_byte_array_data, DataDecoder, DataEncoder, FormatOptions, Options,
};
pub use parse::parse_table;
pub use path::{CodingPath, PathSegment};
pub use printer::Printer;
pub use ser::{ArrayEncoder, Encoder, TableEncoder};
pub use value::Value;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io;
use tracing::debug;

/// Encode any `T: Serialize` into a document tree node.
///
/// The root may be any node. Use [`to_table`] when a document is required.
///
/// # Examples
///
/// ```rust
/// use serde_toml_tree::{to_value, Value};
///
/// assert_eq!(to_value(&[1, 2]).unwrap(), Value::Array(vec![Value::from(1), Value::from(2)]));
/// ```
///
/// # Errors
///
/// Returns an error if the value has no TOML representation.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    to_value_with_options(value, &Options::default())
}

fn to_value_with_options<T>(value: &T, options: &Options) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    debug!(ty = std::any::type_name::<T>(), "encoding value");
    Encoder::new(options).encode(value)
}

/// Encode any `T: Serialize` into a root table.
///
/// # Errors
///
/// Returns [`Error::TypeMismatch`] if `T` does not encode as a table, or any
/// error raised while encoding.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_table<T>(value: &T) -> Result<Table>
where
    T: ?Sized + Serialize,
{
    to_table_with_options(value, Options::default())
}

/// Encode any `T: Serialize` into a root table with a custom transform policy.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_toml_tree::{byte_array_data, to_table_with_options, Bytes, Options, Value};
///
/// #[derive(Serialize)]
/// struct Blob { data: Bytes }
///
/// let options = Options::new().with_data_encoder(byte_array_data);
/// let table = to_table_with_options(&Blob { data: Bytes(vec![1]) }, options).unwrap();
/// assert_eq!(table.get("data"), Some(&Value::Array(vec![Value::from(1)])));
/// ```
///
/// # Errors
///
/// Returns [`Error::TypeMismatch`] if `T` does not encode as a table.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_table_with_options<T>(value: &T, options: Options) -> Result<Table>
where
    T: ?Sized + Serialize,
{
    match to_value_with_options(value, &options)? {
        Value::Table(table) => Ok(table),
        other => Err(Error::type_mismatch(
            "table",
            other.type_name(),
            &CodingPath::root(),
        )),
    }
}

/// Serialize any `T: Serialize` to a TOML string.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_toml_tree::to_string;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// assert_eq!(to_string(&Point { x: 1, y: 2 }).unwrap(), "x = 1\ny = 2\n");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be encoded or is not a table.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, Options::default())
}

/// Serialize any `T: Serialize` to a TOML string with custom options.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_toml_tree::{to_string_with_options, FormatOptions, Octal, Options};
///
/// #[derive(Serialize)]
/// struct File { mode: Octal<u32> }
///
/// let options = Options::new().with_format(FormatOptions::new().with_octal_integers(true));
/// let toml = to_string_with_options(&File { mode: Octal(0o755) }, options).unwrap();
/// assert_eq!(toml, "mode = 0o755\n");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be encoded or is not a table.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: Options) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let format = options.format.clone();
    let table = to_table_with_options(value, options)?;
    debug!(keys = table.len(), "rendering TOML document");
    Ok(Printer::new(&format).print_document(&table))
}

/// Serialize any `T: Serialize` as TOML into a writer.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_toml_tree::to_writer;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(buffer, b"x = 1\ny = 2\n");
/// ```
///
/// # Errors
///
/// Returns an error if encoding fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, Options::default())
}

/// Serialize any `T: Serialize` as TOML into a writer with custom options.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_toml_tree::{to_writer_with_options, FormatOptions, Hex, Options};
///
/// #[derive(Serialize)]
/// struct Color { rgb: Hex<u32> }
///
/// let options = Options::new().with_format(FormatOptions::new().with_hexadecimal_integers(true));
/// let mut buffer = Vec::new();
/// to_writer_with_options(&mut buffer, &Color { rgb: Hex(0xFF8800) }, options).unwrap();
/// assert_eq!(buffer, b"rgb = 0xFF8800\n");
/// ```
///
/// # Errors
///
/// Returns an error if encoding fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: Options) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let toml = to_string_with_options(value, options)?;
    writer
        .write_all(toml.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Decode a `T` out of a document tree.
///
/// The root must be a table.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use serde_toml_tree::{from_value, toml_value};
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let tree = toml_value!({ "x": 1, "y": 2 });
/// assert_eq!(from_value::<Point>(&tree).unwrap(), Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns [`Error::TypeMismatch`] if the root is not a table, or the first
/// error raised while decoding.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<'de, T>(value: &'de Value) -> Result<T>
where
    T: Deserialize<'de>,
{
    from_value_with_options(value, Options::default())
}

/// Decode a `T` out of a document tree with a custom transform policy.
///
/// # Errors
///
/// Returns [`Error::TypeMismatch`] if the root is not a table, or the first
/// error raised while decoding.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value_with_options<'de, T>(value: &'de Value, options: Options) -> Result<T>
where
    T: Deserialize<'de>,
{
    debug!(ty = std::any::type_name::<T>(), "decoding value");
    let root = CodingPath::root();
    if !value.is_table() {
        return Err(Error::type_mismatch("table", value.type_name(), &root));
    }
    Decoder::new(value, &options).decode()
}

/// Deserialize an instance of type `T` from a string of TOML text.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use serde_toml_tree::from_str;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x = 1\ny = 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns [`Error::Parse`] if the input is not valid TOML, or the first
/// error raised while decoding.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_str_with_options(s, Options::default())
}

/// Deserialize an instance of type `T` from TOML text with a custom transform policy.
///
/// # Errors
///
/// Returns [`Error::Parse`] if the input is not valid TOML, or the first
/// error raised while decoding.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<T>(s: &str, options: Options) -> Result<T>
where
    T: DeserializeOwned,
{
    let root = Value::Table(parse_table(s)?);
    from_value_with_options(&root, options)
}

/// Deserialize an instance of type `T` from bytes of TOML text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid TOML, or
/// cannot be decoded as `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::parse(&e.to_string()))?;
    from_str(s)
}

/// Deserialize an instance of type `T` from an I/O stream of TOML.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use serde_toml_tree::from_reader;
/// use std::io::Cursor;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_reader(Cursor::new(b"x = 1\ny = 2")).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, the input is not valid TOML, or the
/// data cannot be decoded as `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}
