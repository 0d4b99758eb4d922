//! Rendering document trees as TOML text.
//!
//! The [`Printer`] writes a root [`Table`] as a TOML document. Within each
//! table, plain keys come first. Subtables follow as `[a.b]` sections and
//! arrays of tables as `[[a]]` sections. Everything nested inside an inline
//! value is written inline.
//!
//! Which string and integer forms are used is decided by [`FormatOptions`].
//!
//! ```rust
//! use serde_toml_tree::{toml_value, FormatOptions, Printer};
//!
//! let doc = toml_value!({
//!     "title": "example",
//!     "owner": { "name": "Tom" }
//! });
//!
//! let format = FormatOptions::default();
//! let text = Printer::new(&format).print_document(doc.as_table().unwrap());
//! assert_eq!(text, "title = \"example\"\n\n[owner]\nname = \"Tom\"\n");
//! ```

use crate::path::is_bare_key;
use crate::{FormatOptions, Integer, Radix, Table, Value};
use std::fmt::Write as _;

/// Renders [`Value`] trees with a fixed set of [`FormatOptions`].
pub struct Printer<'a> {
    output: String,
    format: &'a FormatOptions,
}

impl<'a> Printer<'a> {
    pub fn new(format: &'a FormatOptions) -> Self {
        Printer {
            output: String::with_capacity(256),
            format,
        }
    }

    /// Renders `table` as a complete TOML document.
    #[must_use]
    pub fn print_document(mut self, table: &Table) -> String {
        self.write_table(table, &[]);
        self.output
    }

    /// Renders a single value in inline form, as it would appear after `key = `.
    #[must_use]
    pub fn print_inline(mut self, value: &Value) -> String {
        self.write_value(value);
        self.output
    }

    fn indent(&mut self, level: usize) {
        if self.format.indentations {
            for _ in 0..level * self.format.indent {
                self.output.push(' ');
            }
        }
    }

    fn start_header(&mut self) {
        if !self.output.is_empty() {
            self.output.push('\n');
        }
    }

    fn write_header(&mut self, path: &[&str], array: bool) {
        self.start_header();
        self.indent(path.len().saturating_sub(1));
        self.output.push_str(if array { "[[" } else { "[" });
        for (i, key) in path.iter().enumerate() {
            if i > 0 {
                self.output.push('.');
            }
            self.write_key(key);
        }
        self.output.push_str(if array { "]]\n" } else { "]\n" });
    }

    fn write_table(&mut self, table: &Table, path: &[&str]) {
        for (key, value) in table.iter() {
            if is_section(value) {
                continue;
            }
            self.indent(path.len());
            self.write_key(key);
            self.output.push_str(" = ");
            self.write_value(value);
            self.output.push('\n');
        }

        for (key, value) in table.iter() {
            let mut child_path = path.to_vec();
            child_path.push(key.as_str());

            match value {
                Value::Table(child) => {
                    // A table holding only sections is implied by their headers.
                    let implied = !child.is_empty() && child.values().all(is_section);
                    if !implied {
                        self.write_header(&child_path, false);
                    }
                    self.write_table(child, &child_path);
                }
                Value::Array(items) if is_array_of_tables(items) => {
                    for item in items {
                        if let Value::Table(child) = item {
                            self.write_header(&child_path, true);
                            self.write_table(child, &child_path);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn write_key(&mut self, key: &str) {
        if is_bare_key(key) {
            self.output.push_str(key);
        } else {
            self.write_basic_string(key);
        }
    }

    fn write_value(&mut self, value: &Value) {
        match value {
            Value::Bool(b) => self.output.push_str(if *b { "true" } else { "false" }),
            Value::String(s) => self.write_string(s),
            Value::Integer(i) => self.write_integer(*i),
            Value::Float(f) => self.write_float(*f),
            Value::Datetime(dt) => {
                let _ = write!(self.output, "{}", dt);
            }
            Value::Array(items) => {
                self.output.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(", ");
                    }
                    self.write_value(item);
                }
                self.output.push(']');
            }
            Value::Table(table) => {
                if table.is_empty() {
                    self.output.push_str("{}");
                    return;
                }
                self.output.push_str("{ ");
                for (i, (key, item)) in table.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(", ");
                    }
                    self.write_key(key);
                    self.output.push_str(" = ");
                    self.write_value(item);
                }
                self.output.push_str(" }");
            }
        }
    }

    fn write_integer(&mut self, integer: Integer) {
        let value = integer.value();
        // Prefixed forms cannot carry a sign.
        let _ = match integer.radix() {
            Radix::Hexadecimal if value >= 0 && self.format.allow_hexadecimal_integers => {
                write!(self.output, "0x{:X}", value)
            }
            Radix::Octal if value >= 0 && self.format.allow_octal_integers => {
                write!(self.output, "0o{:o}", value)
            }
            Radix::Binary if value >= 0 && self.format.allow_binary_integers => {
                write!(self.output, "0b{:b}", value)
            }
            _ => write!(self.output, "{}", value),
        };
    }

    fn write_float(&mut self, value: f64) {
        if value.is_nan() {
            self.output.push_str("nan");
        } else if value.is_infinite() {
            self.output
                .push_str(if value > 0.0 { "inf" } else { "-inf" });
        } else {
            let _ = write!(self.output, "{:?}", value);
        }
    }

    fn write_string(&mut self, s: &str) {
        if self.format.allow_multiline_strings && s.contains('\n') {
            self.write_multiline_string(s);
        } else if self.can_write_literal(s) {
            self.output.push('\'');
            self.output.push_str(s);
            self.output.push('\'');
        } else {
            self.write_basic_string(s);
        }
    }

    // Literal strings are only worth it when a basic string would need escapes.
    fn can_write_literal(&self, s: &str) -> bool {
        self.format.allow_literal_strings
            && (s.contains('\\') || s.contains('"'))
            && !s.contains('\'')
            && !s.chars().any(|c| c.is_control() && c != '\t')
            && (s.is_ascii() || self.format.allow_unicode_strings)
    }

    fn write_basic_string(&mut self, s: &str) {
        self.output.push('"');
        for ch in s.chars() {
            match ch {
                '"' => self.output.push_str("\\\""),
                _ => self.write_escaped_char(ch),
            }
        }
        self.output.push('"');
    }

    fn write_multiline_string(&mut self, s: &str) {
        // The newline after the opening delimiter is trimmed by parsers.
        self.output.push_str("\"\"\"\n");
        for ch in s.chars() {
            match ch {
                '\n' => self.output.push('\n'),
                '"' => self.output.push_str("\\\""),
                _ => self.write_escaped_char(ch),
            }
        }
        self.output.push_str("\"\"\"");
    }

    fn write_escaped_char(&mut self, ch: char) {
        match ch {
            '\\' => self.output.push_str("\\\\"),
            '\n' => self.output.push_str("\\n"),
            '\r' => self.output.push_str("\\r"),
            '\t' => self.output.push_str("\\t"),
            '\u{0008}' => self.output.push_str("\\b"),
            '\u{000C}' => self.output.push_str("\\f"),
            c if c.is_control() => {
                let _ = write!(self.output, "\\u{:04X}", c as u32);
            }
            c if !c.is_ascii() && !self.format.allow_unicode_strings => {
                let code = c as u32;
                let _ = if code <= 0xFFFF {
                    write!(self.output, "\\u{:04X}", code)
                } else {
                    write!(self.output, "\\U{:08X}", code)
                };
            }
            c => self.output.push(c),
        }
    }
}

/// `key` as it would be written before ` = `, quoted and escaped when it is not bare.
pub(crate) fn key_text(key: &str) -> String {
    let format = FormatOptions::all();
    let mut printer = Printer::new(&format);
    printer.write_key(key);
    printer.output
}

fn is_section(value: &Value) -> bool {
    match value {
        Value::Table(_) => true,
        Value::Array(items) => is_array_of_tables(items),
        _ => false,
    }
}

fn is_array_of_tables(items: &[Value]) -> bool {
    !items.is_empty() && items.iter().all(Value::is_table)
}
