//! Transform policy and output formatting.
//!
//! - [`Options`]: the policy for one encode or decode call. It holds how
//!   binary payloads become nodes (and back) and the [`FormatOptions`] used
//!   when a tree is rendered to text.
//! - [`FormatOptions`]: flags consumed only by the printer. The engines
//!   never look at them; they just pass them through.
//!
//! ## Examples
//!
//! ```rust
//! use serde::Serialize;
//! use serde_toml_tree::{byte_array_data, to_string_with_options, Bytes, Options};
//!
//! #[derive(Serialize)]
//! struct Blob { data: Bytes }
//!
//! let options = Options::new().with_data_encoder(byte_array_data);
//! let toml = to_string_with_options(&Blob { data: Bytes(vec![72, 105]) }, options).unwrap();
//! assert_eq!(toml, "data = [72, 105]\n");
//! ```

use crate::{Integer, Value};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::fmt;
use std::sync::Arc;

/// Maps a binary payload to the node stored in its place.
pub type DataEncoder = Arc<dyn Fn(&[u8]) -> Value + Send + Sync>;

/// Recovers a binary payload from a node, or `None` if the node does not hold one.
pub type DataDecoder = Arc<dyn Fn(&Value) -> Option<Vec<u8>> + Send + Sync>;

/// Flags controlling how a document tree is rendered as TOML text.
///
/// # Examples
///
/// ```rust
/// use serde_toml_tree::FormatOptions;
///
/// let options = FormatOptions::default();
/// assert!(options.allow_literal_strings);
/// assert!(!options.allow_hexadecimal_integers);
///
/// let options = FormatOptions::all().with_indent(2);
/// assert!(options.indentations);
/// assert_eq!(options.indent, 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatOptions {
    /// Strings that need escaping may be written as `'literal'` strings.
    pub allow_literal_strings: bool,
    /// Strings containing newlines may be written as `"""multi-line"""` strings.
    pub allow_multiline_strings: bool,
    /// Non-ASCII characters are written as-is instead of `\u` escapes.
    pub allow_unicode_strings: bool,
    /// Integers with binary intent are written as `0b...`.
    pub allow_binary_integers: bool,
    /// Integers with octal intent are written as `0o...`.
    pub allow_octal_integers: bool,
    /// Integers with hexadecimal intent are written as `0x...`.
    pub allow_hexadecimal_integers: bool,
    /// Nested tables are indented below their parent.
    pub indentations: bool,
    /// Spaces per indentation level.
    pub indent: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            allow_literal_strings: true,
            allow_multiline_strings: true,
            allow_unicode_strings: false,
            allow_binary_integers: false,
            allow_octal_integers: false,
            allow_hexadecimal_integers: false,
            indentations: false,
            indent: 4,
        }
    }
}

impl FormatOptions {
    /// Creates the default flag set: literal and multi-line strings allowed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every flag enabled.
    #[must_use]
    pub fn all() -> Self {
        FormatOptions {
            allow_literal_strings: true,
            allow_multiline_strings: true,
            allow_unicode_strings: true,
            allow_binary_integers: true,
            allow_octal_integers: true,
            allow_hexadecimal_integers: true,
            indentations: true,
            indent: 4,
        }
    }

    /// Every flag disabled: plain escaped strings and decimal integers only.
    #[must_use]
    pub fn none() -> Self {
        FormatOptions {
            allow_literal_strings: false,
            allow_multiline_strings: false,
            allow_unicode_strings: false,
            allow_binary_integers: false,
            allow_octal_integers: false,
            allow_hexadecimal_integers: false,
            indentations: false,
            indent: 4,
        }
    }

    #[must_use]
    pub fn with_literal_strings(mut self, allow: bool) -> Self {
        self.allow_literal_strings = allow;
        self
    }

    #[must_use]
    pub fn with_multiline_strings(mut self, allow: bool) -> Self {
        self.allow_multiline_strings = allow;
        self
    }

    #[must_use]
    pub fn with_unicode_strings(mut self, allow: bool) -> Self {
        self.allow_unicode_strings = allow;
        self
    }

    #[must_use]
    pub fn with_binary_integers(mut self, allow: bool) -> Self {
        self.allow_binary_integers = allow;
        self
    }

    #[must_use]
    pub fn with_octal_integers(mut self, allow: bool) -> Self {
        self.allow_octal_integers = allow;
        self
    }

    #[must_use]
    pub fn with_hexadecimal_integers(mut self, allow: bool) -> Self {
        self.allow_hexadecimal_integers = allow;
        self
    }

    #[must_use]
    pub fn with_indentations(mut self, indent: bool) -> Self {
        self.indentations = indent;
        self
    }

    /// Sets the indentation width. Only used when `indentations` is on.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}

/// The transform policy for a single encode or decode call.
///
/// Cloning is cheap; the data transforms are shared behind `Arc`s.
///
/// # Examples
///
/// ```rust
/// use serde_toml_tree::{FormatOptions, Options, Value};
///
/// let options = Options::new()
///     .with_format(FormatOptions::all())
///     .with_data_encoder(|bytes| Value::from(bytes.len() as i64));
///
/// assert_eq!(options.encode_data(b"abc"), Value::from(3));
/// ```
#[derive(Clone)]
pub struct Options {
    pub format: FormatOptions,
    data_encoder: DataEncoder,
    data_decoder: DataDecoder,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            format: FormatOptions::default(),
            data_encoder: Arc::new(base64_data),
            data_decoder: Arc::new(decode_base64_or_byte_array),
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

impl Options {
    /// Creates the default policy: base64 binary payloads and default formatting.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_format(mut self, format: FormatOptions) -> Self {
        self.format = format;
        self
    }

    /// Sets the function used to turn binary payloads into nodes.
    #[must_use]
    pub fn with_data_encoder<F>(mut self, encoder: F) -> Self
    where
        F: Fn(&[u8]) -> Value + Send + Sync + 'static,
    {
        self.data_encoder = Arc::new(encoder);
        self
    }

    /// Sets the function used to recover binary payloads from nodes.
    #[must_use]
    pub fn with_data_decoder<F>(mut self, decoder: F) -> Self
    where
        F: Fn(&Value) -> Option<Vec<u8>> + Send + Sync + 'static,
    {
        self.data_decoder = Arc::new(decoder);
        self
    }

    /// Runs the binary payload transform.
    #[must_use]
    pub fn encode_data(&self, bytes: &[u8]) -> Value {
        (self.data_encoder)(bytes)
    }

    /// Runs the inverse binary payload transform.
    #[must_use]
    pub fn decode_data(&self, value: &Value) -> Option<Vec<u8>> {
        (self.data_decoder)(value)
    }
}

/// Encodes bytes as a standard, padded base64 string node. This is the default.
///
/// ```rust
/// use serde_toml_tree::{base64_data, Value};
///
/// assert_eq!(base64_data(&[72, 105]), Value::from("SGk="));
/// ```
#[must_use]
pub fn base64_data(bytes: &[u8]) -> Value {
    Value::String(STANDARD.encode(bytes))
}

/// Encodes bytes as an array of integer nodes.
#[must_use]
pub fn byte_array_data(bytes: &[u8]) -> Value {
    Value::Array(
        bytes
            .iter()
            .map(|&b| Value::Integer(Integer::new(i64::from(b))))
            .collect(),
    )
}

/// Decodes a base64 string node.
#[must_use]
pub fn decode_base64_data(value: &Value) -> Option<Vec<u8>> {
    value.as_str().and_then(|s| STANDARD.decode(s).ok())
}

/// Decodes an array of integer nodes in `0..=255`.
#[must_use]
pub fn decode_byte_array_data(value: &Value) -> Option<Vec<u8>> {
    value
        .as_array()?
        .iter()
        .map(|item| item.as_integer().and_then(|i| u8::try_from(i).ok()))
        .collect()
}

/// The default data decoder: a base64 string or an array of bytes.
#[must_use]
pub fn decode_base64_or_byte_array(value: &Value) -> Option<Vec<u8>> {
    match value {
        Value::String(_) => decode_base64_data(value),
        Value::Array(_) => decode_byte_array_data(value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_format_flags() {
        let options = FormatOptions::default();
        assert!(options.allow_literal_strings);
        assert!(options.allow_multiline_strings);
        assert!(!options.allow_unicode_strings);
        assert!(!options.allow_binary_integers);
        assert!(!options.allow_octal_integers);
        assert!(!options.allow_hexadecimal_integers);
        assert!(!options.indentations);
    }

    #[test]
    fn test_builders() {
        let options = FormatOptions::none()
            .with_hexadecimal_integers(true)
            .with_indentations(true)
            .with_indent(2);
        assert!(options.allow_hexadecimal_integers);
        assert!(!options.allow_literal_strings);
        assert!(options.indentations);
        assert_eq!(options.indent, 2);
    }

    #[test]
    fn test_base64_round_trip() {
        let options = Options::new();
        let node = options.encode_data(&[72, 105]);
        assert_eq!(node, Value::from("SGk="));
        assert_eq!(options.decode_data(&node), Some(vec![72, 105]));
    }

    #[test]
    fn test_byte_array_decoding_rejects_out_of_range() {
        let good = byte_array_data(&[0, 255]);
        assert_eq!(decode_byte_array_data(&good), Some(vec![0, 255]));

        let bad = Value::Array(vec![Value::from(256)]);
        assert_eq!(decode_byte_array_data(&bad), None);
        assert_eq!(decode_base64_or_byte_array(&Value::from(true)), None);
    }

    #[test]
    fn test_invalid_base64() {
        assert_eq!(decode_base64_data(&Value::from("not base64!")), None);
    }
}
