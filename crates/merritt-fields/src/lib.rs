//! Field extraction and coercion for Merritt manifests.
//!
//! This crate defines the value layer: raw attribute values handed over by
//! source objects (`RawValue`), coerced scalars placed in manifest entries
//! (`Value`), declarative field descriptors (`Field`) that read, coerce and
//! derive a value from a source, and immutable registries of descriptors
//! (`FieldRegistry`). The generic file-object registry lives in [`object`].

pub mod field;
pub mod object;
pub mod registry;
pub mod value;

pub use field::{Derivation, Field, FieldKind};
pub use object::{ObjectAttributes, ObjectFile, OBJECT_FIELDS};
pub use registry::FieldRegistry;
pub use value::{RawValue, Value};

use thiserror::Error;

/// A required field could not be produced, or a present value failed coercion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("required field '{field}' is missing")]
    Missing { field: &'static str },
    #[error("field '{field}' is not a valid URL: '{value}' ({reason})")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },
    #[error("field '{field}' is not an integer: '{value}'")]
    InvalidInteger { field: &'static str, value: String },
    #[error("field '{field}' is not an RFC 3339 timestamp: '{value}'")]
    InvalidTimestamp { field: &'static str, value: String },
    #[error("field '{field}' expects {expected}, got {found}")]
    UnexpectedType {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    #[error("cannot derive field '{field}': URL '{url}' has no final path segment")]
    NoPathSegment { field: &'static str, url: String },
    #[error("cannot derive field '{field}': path segment '{segment}' is not UTF-8 once decoded")]
    UndecodableSegment {
        field: &'static str,
        segment: String,
    },
    #[error("cannot derive field '{field}': {source}")]
    DerivationFailed {
        field: &'static str,
        source: Box<FieldError>,
    },
}

impl FieldError {
    /// Target key of the field that failed.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Missing { field }
            | Self::InvalidUrl { field, .. }
            | Self::InvalidInteger { field, .. }
            | Self::InvalidTimestamp { field, .. }
            | Self::UnexpectedType { field, .. }
            | Self::NoPathSegment { field, .. }
            | Self::UndecodableSegment { field, .. }
            | Self::DerivationFailed { field, .. } => field,
        }
    }
}

/// Lookup of a descriptor that the registry does not declare.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("registry '{registry}' has no field named '{name}'")]
    UnknownField {
        registry: &'static str,
        name: String,
    },
    #[error("registry '{registry}' has no field targeting '{target}'")]
    UnknownTarget {
        registry: &'static str,
        target: String,
    },
}
