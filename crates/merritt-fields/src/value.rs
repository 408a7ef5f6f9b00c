//! Raw attribute values and the coerced scalars stored in manifest entries.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use url::Url;

/// An attribute as a source object hands it over, before coercion.
///
/// Sources are heterogeneous: a file URL may arrive as a parsed [`Url`] or as
/// plain text, a size as an integer or as a numeric string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Text(String),
    Integer(u64),
    Url(Url),
    Timestamp(DateTime<Utc>),
}

impl RawValue {
    /// Short type label used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Integer(_) => "integer",
            Self::Url(_) => "URL",
            Self::Timestamp(_) => "timestamp",
        }
    }

    /// Blank text carries no value.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<u64> for RawValue {
    fn from(n: u64) -> Self {
        Self::Integer(n)
    }
}

impl From<u32> for RawValue {
    fn from(n: u32) -> Self {
        Self::Integer(u64::from(n))
    }
}

impl From<Url> for RawValue {
    fn from(url: Url) -> Self {
        Self::Url(url)
    }
}

impl From<DateTime<Utc>> for RawValue {
    fn from(ts: DateTime<Utc>) -> Self {
        Self::Timestamp(ts)
    }
}

/// A coerced scalar, ready to be placed in a manifest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Integer(u64),
    Url(Url),
    Timestamp(DateTime<Utc>),
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<u64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_url(&self) -> Option<&Url> {
        match self {
            Self::Url(url) => Some(url),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::Timestamp(ts) => Some(ts),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Url(url) => f.write_str(url.as_str()),
            Self::Timestamp(ts) => f.write_str(&ts.to_rfc3339_opts(SecondsFormat::Secs, true)),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Integer(n) => serializer.serialize_u64(*n),
            other => serializer.collect_str(other),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Self::Integer(n)
    }
}

impl From<Url> for Value {
    fn from(url: Url) -> Self {
        Self::Url(url)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(ts: DateTime<Utc>) -> Self {
        Self::Timestamp(ts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn blank_text_is_blank() {
        assert!(RawValue::from("   ").is_blank());
        assert!(RawValue::from("").is_blank());
        assert!(!RawValue::from("x").is_blank());
        assert!(!RawValue::from(0_u64).is_blank());
    }

    #[test]
    fn timestamp_displays_as_utc_seconds() {
        let ts = Utc.with_ymd_and_hms(2017, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(Value::from(ts).to_string(), "2017-01-02T03:04:05Z");
    }

    #[test]
    fn url_displays_canonically() {
        let url = Url::parse("HTTP://Example.org/a b.txt").unwrap();
        assert_eq!(Value::from(url).to_string(), "http://example.org/a%20b.txt");
    }

    #[test]
    fn serializes_integers_as_numbers() {
        assert_eq!(serde_json::to_string(&Value::from(1234_u64)).unwrap(), "1234");
        assert_eq!(
            serde_json::to_string(&Value::from("text/plain")).unwrap(),
            "\"text/plain\""
        );
        let url = Url::parse("http://example.org/example.txt").unwrap();
        assert_eq!(
            serde_json::to_string(&Value::from(url)).unwrap(),
            "\"http://example.org/example.txt\""
        );
    }

    #[test]
    fn accessors_match_variant() {
        assert_eq!(Value::from("a").as_text(), Some("a"));
        assert_eq!(Value::from("a").as_integer(), None);
        assert_eq!(Value::from(7_u64).as_integer(), Some(7));
        assert!(Value::from(7_u64).as_url().is_none());
    }
}
