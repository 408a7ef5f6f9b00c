//! Profile-driven manifest assembly for Merritt submissions.
//!
//! A [`Manifest`] packages a [`Profile`] (conformance tag, profile URI,
//! namespace prefixes, ordered fields) with the entries produced by a profile
//! specialization. Two specializations ship here: [`dataone`] cross-products
//! data files against fixed science-metadata descriptors, and [`object`]
//! extracts one entry per file object through the `merritt-fields` Object
//! registry. Manifests render to checkm text ([`checkm`]) or JSON.

pub mod checkm;
pub mod dataone;
pub mod manifest;
pub mod object;
pub mod profile;

pub use dataone::{dataone_manifest, DataOneFile, ScienceMetadata, SCIENCE_METADATA};
pub use manifest::{Entry, Manifest, ManifestDocument};
pub use merritt_fields::{
    FieldError, ObjectAttributes, ObjectFile, RawValue, RegistryError, Value, OBJECT_FIELDS,
};
pub use object::{object_manifest, object_manifest_with, validate_objects, ObjectFailure};
pub use profile::{
    builtin_profile, parse_profile_file, parse_profile_str, BuiltinProfile, Profile,
    BUILTIN_PROFILES,
};

use thiserror::Error;

/// Broad classification of a [`ManifestError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Source data could not produce a required or well-formed value.
    Validation,
    /// An entry or field list violates the manifest's declared shape.
    Schema,
    /// A profile or field lookup refers to something never declared.
    Configuration,
    Io,
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error("object {index}: {source}")]
    ObjectField { index: usize, source: FieldError },
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("manifest declares no fields")]
    EmptyFields,
    #[error("field '{0}' is declared more than once")]
    DuplicateField(String),
    #[error("field '{field}' uses undeclared namespace prefix '{prefix}'")]
    UndeclaredPrefix { field: String, prefix: String },
    #[error("entry {index} has key '{key}' which is not a declared field")]
    UndeclaredField { index: usize, key: String },
    #[error("unknown built-in profile: '{0}'")]
    UnknownProfile(String),
    #[error("failed to parse profile: {0}")]
    ParseToml(#[from] toml::de::Error),
    #[error("value of '{field}' cannot be rendered on one checkm line: {value:?}")]
    UnrenderableValue { field: String, value: String },
    #[error("manifest I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("rendered manifest is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl ManifestError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Field(_) | Self::ObjectField { .. } | Self::UnrenderableValue { .. } => {
                ErrorKind::Validation
            }
            Self::EmptyFields
            | Self::DuplicateField(_)
            | Self::UndeclaredPrefix { .. }
            | Self::UndeclaredField { .. } => ErrorKind::Schema,
            Self::Registry(_) | Self::UnknownProfile(_) | Self::ParseToml(_) => {
                ErrorKind::Configuration
            }
            Self::Io(_) | Self::Json(_) | Self::Utf8(_) => ErrorKind::Io,
        }
    }
}
