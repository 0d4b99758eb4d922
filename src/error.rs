//! Error types for encoding and decoding TOML document trees.
//!
//! Every failure raised while walking a tree carries the [`CodingPath`] of the
//! container that hit it, so a message points at the offending key or index.
//!
//! ## Error Categories
//!
//! - **Type mismatch**: a node holds a different variant than the one requested
//! - **Key not found**: a required table key is missing
//! - **Value absent**: an array ran out of elements, or a value was structurally missing
//! - **Out of range**: a number does not fit the requested width
//! - **Parse / I/O**: failures reported by the text layer
//!
//! ## Examples
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_toml_tree::{from_str, Error};
//!
//! #[derive(Deserialize, Debug)]
//! struct Config { port: u16 }
//!
//! let err = from_str::<Config>("port = \"eighty\"").unwrap_err();
//! assert!(matches!(err, Error::TypeMismatch { .. }));
//! assert_eq!(err.path().map(|p| p.to_string()), Some("port".to_string()));
//! ```

use crate::CodingPath;
use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised while converting between Rust values
/// and TOML document trees.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The node at this location is of a different variant than requested.
    #[error("type mismatch at {}: a value of type {expected} does not exist at this location (found {found})", at(.path))]
    TypeMismatch {
        expected: String,
        found: String,
        path: Option<CodingPath>,
    },

    /// A table lookup missed a required key. The path ends with the key.
    #[error("key not found at {}: no value associated with key `{key}`", at(.path))]
    KeyNotFound {
        key: String,
        path: Option<CodingPath>,
    },

    /// An array was read past its end, or a value was structurally missing.
    #[error("value absent at {}: expected {expected}", at(.path))]
    ValueAbsent {
        expected: String,
        path: Option<CodingPath>,
    },

    /// A number does not fit the width of the requested type.
    #[error("out of range at {}: {value} does not fit in {target}", at(.path))]
    OutOfRange {
        value: String,
        target: String,
        path: Option<CodingPath>,
    },

    /// The Rust value has no TOML representation.
    #[error("unsupported type at {}: {ty}", at(.path))]
    UnsupportedType {
        ty: String,
        path: Option<CodingPath>,
    },

    /// `None` can only be expressed by leaving a table key out.
    #[error("unsupported none at {}: TOML has no null value, optional values must be table entries", at(.path))]
    UnsupportedNone { path: Option<CodingPath> },

    /// The TOML text could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error raised by a `Serialize`/`Deserialize` implementation.
    #[error("{msg} (at {})", at(.path))]
    Custom {
        msg: String,
        path: Option<CodingPath>,
    },
}

fn at(path: &Option<CodingPath>) -> String {
    match path {
        Some(path) => format!("`{}`", path),
        None => "an unknown location".to_string(),
    }
}

impl Error {
    /// Creates a type mismatch error for the given location.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_toml_tree::{CodingPath, Error};
    ///
    /// let err = Error::type_mismatch("i64", "string", &CodingPath::root().child_key("port"));
    /// assert!(err.to_string().contains("a value of type i64 does not exist"));
    /// ```
    pub fn type_mismatch(expected: &str, found: &str, path: &CodingPath) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
            path: Some(path.clone()),
        }
    }

    /// Creates a key-not-found error. `table_path` is the path of the table
    /// that was searched; the reported path is extended by `key`.
    pub fn key_not_found(key: &str, table_path: &CodingPath) -> Self {
        Error::KeyNotFound {
            key: key.to_string(),
            path: Some(table_path.child_key(key)),
        }
    }

    /// Creates a value-absent error.
    pub fn value_absent(expected: &str, path: &CodingPath) -> Self {
        Error::ValueAbsent {
            expected: expected.to_string(),
            path: Some(path.clone()),
        }
    }

    /// Creates an out-of-range error for a narrowing conversion.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_toml_tree::{CodingPath, Error};
    ///
    /// let err = Error::out_of_range(300, "u8", &CodingPath::root());
    /// assert!(err.to_string().contains("300 does not fit in u8"));
    /// ```
    pub fn out_of_range<V: fmt::Display>(value: V, target: &str, path: &CodingPath) -> Self {
        Error::OutOfRange {
            value: value.to_string(),
            target: target.to_string(),
            path: Some(path.clone()),
        }
    }

    /// Creates an unsupported type error for values TOML cannot represent.
    pub fn unsupported_type(ty: &str, path: &CodingPath) -> Self {
        Error::UnsupportedType {
            ty: ty.to_string(),
            path: Some(path.clone()),
        }
    }

    /// Creates a custom error with a display message and no location.
    ///
    /// The location is filled in by the first container the error passes
    /// through on its way out.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom {
            msg: msg.to_string(),
            path: None,
        }
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Creates a parse error reported by the text layer.
    pub fn parse(msg: &str) -> Self {
        Error::Parse(msg.to_string())
    }

    /// Returns the coding path this error was raised at, if known.
    #[must_use]
    pub fn path(&self) -> Option<&CodingPath> {
        match self {
            Error::TypeMismatch { path, .. }
            | Error::KeyNotFound { path, .. }
            | Error::ValueAbsent { path, .. }
            | Error::OutOfRange { path, .. }
            | Error::UnsupportedType { path, .. }
            | Error::UnsupportedNone { path }
            | Error::Custom { path, .. } => path.as_ref(),
            Error::Parse(_) | Error::Io(_) => None,
        }
    }

    /// Fills in the location of an error that has none yet.
    ///
    /// Errors that already carry a path keep it: the innermost container
    /// knows the most precise location. A `KeyNotFound` raised by a visitor
    /// is located at `path` extended by the missing key.
    #[must_use]
    pub fn located(mut self, at: &CodingPath) -> Self {
        match &mut self {
            Error::KeyNotFound { key, path } => {
                if path.is_none() {
                    *path = Some(at.child_key(key));
                }
            }
            Error::TypeMismatch { path, .. }
            | Error::ValueAbsent { path, .. }
            | Error::OutOfRange { path, .. }
            | Error::UnsupportedType { path, .. }
            | Error::UnsupportedNone { path }
            | Error::Custom { path, .. } => {
                if path.is_none() {
                    *path = Some(at.clone());
                }
            }
            Error::Parse(_) | Error::Io(_) => {}
        }
        self
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::custom(msg)
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::custom(msg)
    }

    fn invalid_type(unexp: serde::de::Unexpected<'_>, exp: &dyn serde::de::Expected) -> Self {
        Error::TypeMismatch {
            expected: exp.to_string(),
            found: unexp.to_string(),
            path: None,
        }
    }

    fn invalid_length(len: usize, exp: &dyn serde::de::Expected) -> Self {
        Error::ValueAbsent {
            expected: format!("{} (found {} elements)", exp, len),
            path: None,
        }
    }

    fn missing_field(field: &'static str) -> Self {
        Error::KeyNotFound {
            key: field.to_string(),
            path: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
