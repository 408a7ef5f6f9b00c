use crate::value::{RawValue, Value};
use crate::FieldError;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;
use tracing::trace;
use url::Url;

/// Coercion rule applied to a raw attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Canonical URL; accepts a parsed URL or URL text.
    Url,
    /// Unsigned integer; accepts an integer or a decimal string.
    Integer,
    /// Free text; any raw value is rendered to its display form.
    Text,
    /// UTC timestamp; accepts a timestamp or RFC 3339 text.
    Timestamp,
}

impl FieldKind {
    fn expects(self) -> &'static str {
        match self {
            Self::Url => "a URL",
            Self::Integer => "an integer",
            Self::Text => "text",
            Self::Timestamp => "a timestamp",
        }
    }

    /// Coerce `raw` for the field targeting `field`.
    pub fn coerce(self, field: &'static str, raw: RawValue) -> Result<Value, FieldError> {
        match (self, raw) {
            (Self::Url, RawValue::Url(url)) => Ok(Value::Url(url)),
            (Self::Url, RawValue::Text(s)) => {
                Url::parse(s.trim())
                    .map(Value::Url)
                    .map_err(|e| FieldError::InvalidUrl {
                        field,
                        value: s,
                        reason: e.to_string(),
                    })
            }
            (Self::Integer, RawValue::Integer(n)) => Ok(Value::Integer(n)),
            (Self::Integer, RawValue::Text(s)) => match s.parse::<u64>() {
                Ok(n) => Ok(Value::Integer(n)),
                Err(_) => Err(FieldError::InvalidInteger { field, value: s }),
            },
            (Self::Text, raw) => Ok(Value::Text(display_raw(raw))),
            (Self::Timestamp, RawValue::Timestamp(ts)) => Ok(Value::Timestamp(ts)),
            (Self::Timestamp, RawValue::Text(s)) => match DateTime::parse_from_rfc3339(s.trim()) {
                Ok(ts) => Ok(Value::Timestamp(ts.with_timezone(&Utc))),
                Err(_) => Err(FieldError::InvalidTimestamp { field, value: s }),
            },
            (kind, other) => Err(FieldError::UnexpectedType {
                field,
                expected: kind.expects(),
                found: other.type_name(),
            }),
        }
    }
}

fn display_raw(raw: RawValue) -> String {
    match raw {
        RawValue::Text(s) => s,
        RawValue::Integer(n) => n.to_string(),
        RawValue::Url(url) => url.into(),
        RawValue::Timestamp(ts) => ts.to_rfc3339_opts(SecondsFormat::Secs, true),
    }
}

/// Fallback used when the primary attribute is absent.
pub enum Derivation<S: ?Sized + 'static> {
    /// Final path segment (percent-decoded) of another field's resolved URL.
    LastPathSegment(&'static Field<S>),
}

impl<S: ?Sized + 'static> Derivation<S> {
    fn derive(&self, field: &'static str, source: &S) -> Result<Option<Value>, FieldError> {
        match self {
            Self::LastPathSegment(from) => {
                let resolved = from
                    .value_from(source)
                    .map_err(|e| FieldError::DerivationFailed {
                        field,
                        source: Box::new(e),
                    })?;
                let Some(value) = resolved else {
                    return Ok(None);
                };
                let Value::Url(url) = &value else {
                    return Err(FieldError::UnexpectedType {
                        field,
                        expected: "a URL to derive from",
                        found: "a non-URL value",
                    });
                };
                let segment = url
                    .path_segments()
                    .and_then(|mut segments| segments.next_back())
                    .filter(|segment| !segment.is_empty())
                    .ok_or_else(|| FieldError::NoPathSegment {
                        field,
                        url: url.to_string(),
                    })?;
                let name = urlencoding::decode(segment).map_err(|_| {
                    FieldError::UndecodableSegment {
                        field,
                        segment: segment.to_owned(),
                    }
                })?;
                Ok(Some(Value::Text(name.into_owned())))
            }
        }
    }
}

impl<S: ?Sized + 'static> fmt::Debug for Derivation<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LastPathSegment(from) => f
                .debug_tuple("LastPathSegment")
                .field(&from.target)
                .finish(),
        }
    }
}

/// A declarative extraction rule bound to a destination key.
///
/// Descriptors are `const` data: a symbolic name for registry lookup, the
/// target key written into manifest entries, a coercion kind, a reader that
/// pulls the raw attribute off a source of type `S`, and an optional
/// derivation used when that attribute is absent.
pub struct Field<S: ?Sized + 'static> {
    name: &'static str,
    target: &'static str,
    kind: FieldKind,
    required: bool,
    read: fn(&S) -> Option<RawValue>,
    derive: Option<Derivation<S>>,
}

impl<S: ?Sized + 'static> Field<S> {
    pub const fn required(
        name: &'static str,
        target: &'static str,
        kind: FieldKind,
        read: fn(&S) -> Option<RawValue>,
    ) -> Self {
        Self {
            name,
            target,
            kind,
            required: true,
            read,
            derive: None,
        }
    }

    pub const fn optional(
        name: &'static str,
        target: &'static str,
        kind: FieldKind,
        read: fn(&S) -> Option<RawValue>,
    ) -> Self {
        Self {
            name,
            target,
            kind,
            required: false,
            read,
            derive: None,
        }
    }

    #[must_use]
    pub const fn derived(self, derivation: Derivation<S>) -> Self {
        Self {
            derive: Some(derivation),
            ..self
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn target(&self) -> &'static str {
        self.target
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn derivation(&self) -> Option<&Derivation<S>> {
        self.derive.as_ref()
    }

    /// Extract this field's value from `source`.
    ///
    /// An explicit attribute always wins over derivation. Blank text counts
    /// as absent. A present value that fails coercion is an error even for
    /// optional fields; only absence yields `Ok(None)`.
    pub fn value_from(&self, source: &S) -> Result<Option<Value>, FieldError> {
        if let Some(raw) = (self.read)(source).filter(|raw| !raw.is_blank()) {
            return self.kind.coerce(self.target, raw).map(Some);
        }

        if let Some(derivation) = &self.derive {
            if let Some(value) = derivation.derive(self.target, source)? {
                trace!("derived {} = {value}", self.target);
                return Ok(Some(value));
            }
        }

        if self.required {
            Err(FieldError::Missing { field: self.target })
        } else {
            Ok(None)
        }
    }
}

impl<S: ?Sized + 'static> fmt::Debug for Field<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("target", &self.target)
            .field("kind", &self.kind)
            .field("required", &self.required)
            .field("derive", &self.derive)
            .finish_non_exhaustive()
    }
}
