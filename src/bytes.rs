//! Binary payloads.
//!
//! TOML has no binary type. Bytes reach the document tree through the
//! transform policy in [`Options`](crate::Options): the default turns them
//! into a base64 string and reads them back from one.
//!
//! `Vec<u8>` serializes as a sequence of integers through serde; wrap it in
//! [`Bytes`] to route it through the binary transform instead.
//!
//! Fields under `#[serde(flatten)]` are buffered by serde before they reach
//! [`Bytes`], so the configured data decoder never sees them. In that case
//! `Bytes` reads the two default forms itself: a standard base64 string or an
//! array of byte integers.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::de::Unexpected;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Deref, DerefMut};

/// A byte buffer that serializes as an opaque binary payload.
///
/// # Examples
///
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use serde_toml_tree::{from_str, to_string, Bytes};
///
/// #[derive(Serialize, Deserialize, PartialEq, Debug)]
/// struct Blob { data: Bytes }
///
/// let blob = Blob { data: Bytes::from(b"Hi".to_vec()) };
/// let toml = to_string(&blob).unwrap();
/// assert_eq!(toml, "data = \"SGk=\"\n");
///
/// let back: Blob = from_str(&toml).unwrap();
/// assert_eq!(back, blob);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(bytes: Vec<u8>) -> Self {
        Bytes(bytes)
    }
}

impl From<&[u8]> for Bytes {
    fn from(bytes: &[u8]) -> Self {
        Bytes(bytes.to_vec())
    }
}

impl Deref for Bytes {
    type Target = Vec<u8>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Bytes {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Serialize for Bytes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(&self.0)
    }
}

impl<'de> Deserialize<'de> for Bytes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BytesVisitor;

        impl<'de> serde::de::Visitor<'de> for BytesVisitor {
            type Value = Bytes;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("binary data")
            }

            fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E> {
                Ok(Bytes(v.to_vec()))
            }

            fn visit_byte_buf<E>(self, v: Vec<u8>) -> Result<Self::Value, E> {
                Ok(Bytes(v))
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                STANDARD
                    .decode(v)
                    .map(Bytes)
                    .map_err(|_| E::invalid_value(Unexpected::Str(v), &"a base64 string"))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(byte) = seq.next_element::<u8>()? {
                    bytes.push(byte);
                }
                Ok(Bytes(bytes))
            }
        }

        deserializer.deserialize_byte_buf(BytesVisitor)
    }
}
