//! Date and time leaves.
//!
//! TOML has four date/time shapes. [`Datetime`] models each of them with the
//! matching `chrono` type and prints them in TOML (RFC 3339) syntax.
//!
//! ```rust
//! use serde_toml_tree::Datetime;
//!
//! let dt: Datetime = "1979-05-27T07:32:00Z".parse().unwrap();
//! assert!(dt.is_offset_date_time());
//! assert_eq!(dt.to_string(), "1979-05-27T07:32:00Z");
//!
//! let day: Datetime = "1979-05-27".parse().unwrap();
//! assert!(day.as_date().is_some());
//! ```
//!
//! `chrono` reaches further than TOML does. Years outside `0000..=9999` and
//! offsets with a seconds part print in a form TOML cannot read back, and
//! encoding such a value into a tree fails with [`Error::OutOfRange`].

use crate::Error;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub(crate) const DATETIME_NEWTYPE: &str = "$__toml_tree_private_Datetime";

/// A TOML date, time, or date-time value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Datetime {
    /// `1979-05-27T07:32:00-08:00`
    OffsetDateTime(DateTime<FixedOffset>),
    /// `1979-05-27T07:32:00`
    LocalDateTime(NaiveDateTime),
    /// `1979-05-27`
    LocalDate(NaiveDate),
    /// `07:32:00`
    LocalTime(NaiveTime),
}

impl Datetime {
    #[must_use]
    pub const fn is_offset_date_time(&self) -> bool {
        matches!(self, Datetime::OffsetDateTime(_))
    }

    /// The calendar date, if this value has one.
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Datetime::OffsetDateTime(dt) => Some(dt.date_naive()),
            Datetime::LocalDateTime(dt) => Some(dt.date()),
            Datetime::LocalDate(date) => Some(*date),
            Datetime::LocalTime(_) => None,
        }
    }

    /// The wall-clock time, if this value has one.
    #[must_use]
    pub fn as_time(&self) -> Option<NaiveTime> {
        match self {
            Datetime::OffsetDateTime(dt) => Some(dt.time()),
            Datetime::LocalDateTime(dt) => Some(dt.time()),
            Datetime::LocalDate(_) => None,
            Datetime::LocalTime(time) => Some(*time),
        }
    }

    /// The UTC offset, if this value has one.
    #[must_use]
    pub fn offset(&self) -> Option<FixedOffset> {
        match self {
            Datetime::OffsetDateTime(dt) => Some(*dt.offset()),
            _ => None,
        }
    }
}

impl fmt::Display for Datetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datetime::OffsetDateTime(dt) => {
                let seconds = dt.offset().local_minus_utc();
                if seconds == 0 {
                    write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.fZ"))
                } else if seconds % 60 == 0 {
                    write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f%:z"))
                } else {
                    // TOML offsets stop at minutes; keep the seconds visible.
                    write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f%::z"))
                }
            }
            Datetime::LocalDateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
            Datetime::LocalDate(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Datetime::LocalTime(time) => write!(f, "{}", time.format("%H:%M:%S%.f")),
        }
    }
}

impl FromStr for Datetime {
    type Err = Error;

    /// Parses any of the four TOML date/time forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = toml::value::Datetime::from_str(s)
            .map_err(|e| Error::parse(&format!("invalid datetime `{}`: {}", s, e)))?;
        Datetime::try_from(parsed)
    }
}

impl TryFrom<toml::value::Datetime> for Datetime {
    type Error = Error;

    fn try_from(value: toml::value::Datetime) -> Result<Self, Self::Error> {
        let invalid = || Error::parse(&format!("datetime `{}` is out of range", value));

        let date = value
            .date
            .map(|d| {
                NaiveDate::from_ymd_opt(i32::from(d.year), u32::from(d.month), u32::from(d.day))
            })
            .map(|d| d.ok_or_else(invalid))
            .transpose()?;
        let time = value
            .time
            .map(|t| {
                NaiveTime::from_hms_nano_opt(
                    u32::from(t.hour),
                    u32::from(t.minute),
                    u32::from(t.second),
                    t.nanosecond,
                )
            })
            .map(|t| t.ok_or_else(invalid))
            .transpose()?;

        match (date, time, value.offset) {
            (Some(date), Some(time), Some(offset)) => {
                let seconds = match offset {
                    toml::value::Offset::Z => 0,
                    toml::value::Offset::Custom { minutes } => i32::from(minutes) * 60,
                };
                let offset = FixedOffset::east_opt(seconds).ok_or_else(invalid)?;
                let dt = offset
                    .from_local_datetime(&NaiveDateTime::new(date, time))
                    .single()
                    .ok_or_else(invalid)?;
                Ok(Datetime::OffsetDateTime(dt))
            }
            (Some(date), Some(time), None) => {
                Ok(Datetime::LocalDateTime(NaiveDateTime::new(date, time)))
            }
            (Some(date), None, None) => Ok(Datetime::LocalDate(date)),
            (None, Some(time), None) => Ok(Datetime::LocalTime(time)),
            _ => Err(invalid()),
        }
    }
}

impl From<DateTime<FixedOffset>> for Datetime {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Datetime::OffsetDateTime(value)
    }
}

impl From<NaiveDateTime> for Datetime {
    fn from(value: NaiveDateTime) -> Self {
        Datetime::LocalDateTime(value)
    }
}

impl From<NaiveDate> for Datetime {
    fn from(value: NaiveDate) -> Self {
        Datetime::LocalDate(value)
    }
}

impl From<NaiveTime> for Datetime {
    fn from(value: NaiveTime) -> Self {
        Datetime::LocalTime(value)
    }
}

// Datetimes travel through serde as a named newtype around their text form.
// The tree encoder and decoder recognise the name and use a Datetime node;
// every other format sees a plain string.
impl Serialize for Datetime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_newtype_struct(DATETIME_NEWTYPE, &self.to_string())
    }
}

impl<'de> Deserialize<'de> for Datetime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DatetimeVisitor;

        impl<'de> serde::de::Visitor<'de> for DatetimeVisitor {
            type Value = Datetime;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a TOML datetime")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(E::custom)
            }

            fn visit_newtype_struct<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserializer.deserialize_str(self)
            }
        }

        deserializer.deserialize_newtype_struct(DATETIME_NEWTYPE, DatetimeVisitor)
    }
}
