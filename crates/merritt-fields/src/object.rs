//! Fields describing a generic submitted file object.

use crate::field::{Derivation, Field, FieldKind};
use crate::registry::FieldRegistry;
use crate::value::RawValue;

/// Capability of a source that describes one submitted file.
///
/// Only `file_url` is mandatory to implement; every other attribute defaults
/// to absent.
pub trait ObjectFile {
    fn file_url(&self) -> Option<RawValue>;

    fn hash_algorithm(&self) -> Option<RawValue> {
        None
    }

    fn hash_value(&self) -> Option<RawValue> {
        None
    }

    fn file_size(&self) -> Option<RawValue> {
        None
    }

    fn file_last_modified(&self) -> Option<RawValue> {
        None
    }

    fn file_name(&self) -> Option<RawValue> {
        None
    }

    fn mime_type(&self) -> Option<RawValue> {
        None
    }
}

/// Ad-hoc attribute bag implementing [`ObjectFile`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectAttributes {
    pub file_url: Option<RawValue>,
    pub hash_algorithm: Option<RawValue>,
    pub hash_value: Option<RawValue>,
    pub file_size: Option<RawValue>,
    pub file_last_modified: Option<RawValue>,
    pub file_name: Option<RawValue>,
    pub mime_type: Option<RawValue>,
}

impl ObjectAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_file_url(mut self, url: impl Into<RawValue>) -> Self {
        self.file_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_hash(mut self, algorithm: impl Into<RawValue>, value: impl Into<RawValue>) -> Self {
        self.hash_algorithm = Some(algorithm.into());
        self.hash_value = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_file_size(mut self, size: impl Into<RawValue>) -> Self {
        self.file_size = Some(size.into());
        self
    }

    #[must_use]
    pub fn with_file_last_modified(mut self, modified: impl Into<RawValue>) -> Self {
        self.file_last_modified = Some(modified.into());
        self
    }

    #[must_use]
    pub fn with_file_name(mut self, name: impl Into<RawValue>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<RawValue>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

impl ObjectFile for ObjectAttributes {
    fn file_url(&self) -> Option<RawValue> {
        self.file_url.clone()
    }

    fn hash_algorithm(&self) -> Option<RawValue> {
        self.hash_algorithm.clone()
    }

    fn hash_value(&self) -> Option<RawValue> {
        self.hash_value.clone()
    }

    fn file_size(&self) -> Option<RawValue> {
        self.file_size.clone()
    }

    fn file_last_modified(&self) -> Option<RawValue> {
        self.file_last_modified.clone()
    }

    fn file_name(&self) -> Option<RawValue> {
        self.file_name.clone()
    }

    fn mime_type(&self) -> Option<RawValue> {
        self.mime_type.clone()
    }
}

pub const FILE_URL: Field<dyn ObjectFile> =
    Field::required("FILE_URL", "nfo:fileUrl", FieldKind::Url, |o| o.file_url());

pub const HASH_ALGORITHM: Field<dyn ObjectFile> = Field::optional(
    "HASH_ALGORITHM",
    "nfo:hashAlgorithm",
    FieldKind::Text,
    |o| o.hash_algorithm(),
);

pub const HASH_VALUE: Field<dyn ObjectFile> =
    Field::optional("HASH_VALUE", "nfo:hashValue", FieldKind::Text, |o| o.hash_value());

pub const FILE_SIZE: Field<dyn ObjectFile> =
    Field::optional("FILE_SIZE", "nfo:fileSize", FieldKind::Integer, |o| o.file_size());

pub const FILE_LAST_MODIFIED: Field<dyn ObjectFile> = Field::optional(
    "FILE_LAST_MODIFIED",
    "nfo:fileLastModified",
    FieldKind::Timestamp,
    |o| o.file_last_modified(),
);

/// Explicit file name, or the last path segment of [`FILE_URL`].
pub const FILE_NAME: Field<dyn ObjectFile> = Field::<dyn ObjectFile>::required(
    "FILE_NAME",
    "nfo:fileName",
    FieldKind::Text,
    |o| o.file_name(),
)
.derived(Derivation::LastPathSegment(&FILE_URL));

pub const MIME_TYPE: Field<dyn ObjectFile> =
    Field::optional("MIME_TYPE", "mrt:mimeType", FieldKind::Text, |o| o.mime_type());

/// Object fields in manifest column order.
pub static OBJECT_FIELDS: FieldRegistry<dyn ObjectFile> = FieldRegistry::new(
    "Object",
    &[
        &FILE_URL,
        &HASH_ALGORITHM,
        &HASH_VALUE,
        &FILE_SIZE,
        &FILE_LAST_MODIFIED,
        &FILE_NAME,
        &MIME_TYPE,
    ],
);
