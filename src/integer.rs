//! Integer nodes and numeric-base intent.
//!
//! TOML integers are 64-bit signed. An [`Integer`] node also remembers the
//! [`Radix`] it should be printed in, so a value written as hexadecimal by the
//! caller comes out as `0xFF` instead of `255` when the printer allows it.
//!
//! The radix is requested from Rust code through the [`Hex`], [`Octal`] and
//! [`Binary`] wrappers. They are transparent for every other serde format.
//!
//! ```rust
//! use serde::Serialize;
//! use serde_toml_tree::{to_string_with_options, FormatOptions, Hex, Options};
//!
//! #[derive(Serialize)]
//! struct Theme { accent: Hex<u32> }
//!
//! let options = Options::new().with_format(FormatOptions::all());
//! let toml = to_string_with_options(&Theme { accent: Hex(0xFF8800) }, options).unwrap();
//! assert_eq!(toml, "accent = 0xFF8800\n");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

pub(crate) const HEX_NEWTYPE: &str = "$__toml_tree_private_Hex";
pub(crate) const OCTAL_NEWTYPE: &str = "$__toml_tree_private_Octal";
pub(crate) const BINARY_NEWTYPE: &str = "$__toml_tree_private_Binary";

/// The numeric base an integer should be written in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Radix {
    #[default]
    Decimal,
    Binary,
    Octal,
    Hexadecimal,
}

impl Radix {
    pub(crate) fn from_newtype_name(name: &str) -> Option<Radix> {
        match name {
            HEX_NEWTYPE => Some(Radix::Hexadecimal),
            OCTAL_NEWTYPE => Some(Radix::Octal),
            BINARY_NEWTYPE => Some(Radix::Binary),
            _ => None,
        }
    }

    pub(crate) const fn newtype_name(self) -> Option<&'static str> {
        match self {
            Radix::Decimal => None,
            Radix::Binary => Some(BINARY_NEWTYPE),
            Radix::Octal => Some(OCTAL_NEWTYPE),
            Radix::Hexadecimal => Some(HEX_NEWTYPE),
        }
    }
}

/// A TOML integer node: the value plus the radix it prefers to be printed in.
///
/// Equality and hashing only consider the value; the radix is presentation.
///
/// # Examples
///
/// ```rust
/// use serde_toml_tree::{Integer, Radix};
///
/// let plain = Integer::new(255);
/// let hex = Integer::with_radix(255, Radix::Hexadecimal);
/// assert_eq!(plain, hex);
/// assert_eq!(hex.radix(), Radix::Hexadecimal);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Integer {
    value: i64,
    radix: Radix,
}

impl Integer {
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Integer {
            value,
            radix: Radix::Decimal,
        }
    }

    #[must_use]
    pub const fn with_radix(value: i64, radix: Radix) -> Self {
        Integer { value, radix }
    }

    #[inline]
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.value
    }

    #[inline]
    #[must_use]
    pub const fn radix(&self) -> Radix {
        self.radix
    }

    /// Returns a copy of this integer printed in `radix`.
    #[must_use]
    pub const fn in_radix(self, radix: Radix) -> Self {
        Integer {
            value: self.value,
            radix,
        }
    }
}

impl PartialEq for Integer {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Integer {}

impl std::hash::Hash for Integer {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Integer::new(value)
    }
}

macro_rules! radix_wrapper {
    ($(#[$meta:meta])* $name:ident, $newtype:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name<T>(pub T);

        impl<T> $name<T> {
            /// Unwraps the inner value.
            pub fn into_inner(self) -> T {
                self.0
            }
        }

        impl<T: Serialize> Serialize for $name<T> {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_newtype_struct($newtype, &self.0)
            }
        }

        impl<'de, T: Deserialize<'de>> Deserialize<'de> for $name<T> {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                struct WrapperVisitor<T>(std::marker::PhantomData<T>);

                impl<'de, T: Deserialize<'de>> serde::de::Visitor<'de> for WrapperVisitor<T> {
                    type Value = $name<T>;

                    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                        formatter.write_str("an integer")
                    }

                    fn visit_newtype_struct<D>(
                        self,
                        deserializer: D,
                    ) -> Result<Self::Value, D::Error>
                    where
                        D: Deserializer<'de>,
                    {
                        T::deserialize(deserializer).map($name)
                    }
                }

                deserializer.deserialize_newtype_struct(
                    $newtype,
                    WrapperVisitor(std::marker::PhantomData),
                )
            }
        }
    };
}

radix_wrapper!(
    /// Encodes the wrapped integer with hexadecimal intent (`0xFF`).
    Hex,
    HEX_NEWTYPE
);
radix_wrapper!(
    /// Encodes the wrapped integer with octal intent (`0o755`).
    Octal,
    OCTAL_NEWTYPE
);
radix_wrapper!(
    /// Encodes the wrapped integer with binary intent (`0b1010`).
    Binary,
    BINARY_NEWTYPE
);
