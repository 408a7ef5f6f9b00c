use crate::manifest::{Entry, Manifest};
use crate::profile::{builtin_profile, DATAONE};
use crate::ManifestError;
use merritt_fields::Value;
use tracing::debug;

pub const METADATA_FILE: &str = "dom:scienceMetadataFile";
pub const METADATA_FORMAT: &str = "dom:scienceMetadataFormat";
pub const DATA_FILE: &str = "dom:scienceDataFile";
pub const MIME_TYPE: &str = "mrt:mimeType";

/// Capability of a data file listed in a DataONE manifest.
pub trait DataOneFile {
    fn name(&self) -> &str;
    fn mime_type(&self) -> &str;
}

impl<T: DataOneFile + ?Sized> DataOneFile for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn mime_type(&self) -> &str {
        (**self).mime_type()
    }
}

/// A science metadata file paired with every data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScienceMetadata {
    pub name: &'static str,
    pub format: &'static str,
}

pub const SCIENCE_METADATA: &[ScienceMetadata] = &[
    ScienceMetadata {
        name: "mrt-datacite.xml",
        format: "http://datacite.org/schema/kernel-3.1",
    },
    ScienceMetadata {
        name: "mrt-oaidc.xml",
        format: "http://dublincore.org/schemas/xmls/qdc/2008/02/11/qualifieddc.xsd",
    },
];

/// One entry per (file, science metadata) pair, file-major.
pub fn to_entries<F: DataOneFile>(files: &[F]) -> Vec<Entry> {
    let mut entries = Vec::with_capacity(files.len() * SCIENCE_METADATA.len());
    for file in files {
        for metadata in SCIENCE_METADATA {
            entries.push(Entry::from([
                (METADATA_FILE.to_owned(), Value::from(metadata.name)),
                (METADATA_FORMAT.to_owned(), Value::from(metadata.format)),
                (DATA_FILE.to_owned(), Value::from(file.name())),
                (MIME_TYPE.to_owned(), Value::from(file.mime_type())),
            ]));
        }
    }
    entries
}

pub fn dataone_manifest<F: DataOneFile>(files: &[F]) -> Result<Manifest, ManifestError> {
    let profile = builtin_profile(DATAONE)?;
    debug!(
        "expanding {} data files across {} science metadata files",
        files.len(),
        SCIENCE_METADATA.len()
    );
    Manifest::from_profile(profile, to_entries(files))
}
