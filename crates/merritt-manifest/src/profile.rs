use crate::ManifestError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use url::Url;

/// Manifest profile: conformance tag, profile URI, namespaces and columns.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    pub conformance: String,
    #[serde(rename = "profile")]
    pub uri: Url,
    #[serde(default)]
    pub prefixes: BTreeMap<String, String>,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuiltinProfile {
    pub name: &'static str,
    pub description: &'static str,
    pub definition: &'static str,
}

pub const DATAONE: &str = "dataone";
pub const OBJECT: &str = "object";

pub const BUILTIN_PROFILES: &[BuiltinProfile] = &[
    BuiltinProfile {
        name: DATAONE,
        description: "DataONE science data paired with Merritt science metadata files",
        definition: r#"conformance = "dataonem_0.1"
profile = "http://uc3.cdlib.org/registry/ingest/manifest/mrt-dataone-manifest"
fields = [
  "dom:scienceMetadataFile",
  "dom:scienceMetadataFormat",
  "dom:scienceDataFile",
  "mrt:mimeType",
]

[prefixes]
dom = "http://uc3.cdlib.org/ontology/dataonem"
mrt = "http://uc3.cdlib.org/ontology/mom"
"#,
    },
    BuiltinProfile {
        name: OBJECT,
        description: "Merritt ingest manifest, one entry per object file",
        definition: r#"conformance = "checkm_0.7"
profile = "http://uc3.cdlib.org/registry/ingest/manifest/mrt-ingest-manifest"
fields = [
  "nfo:fileUrl",
  "nfo:hashAlgorithm",
  "nfo:hashValue",
  "nfo:fileSize",
  "nfo:fileLastModified",
  "nfo:fileName",
  "mrt:mimeType",
]

[prefixes]
mrt = "http://merritt.cdlib.org/terms#"
nfo = "http://www.semanticdesktop.org/ontologies/2007/03/22/nfo#"
"#,
    },
];

pub fn parse_profile_str(input: &str) -> Result<Profile, ManifestError> {
    Ok(toml::from_str(input)?)
}

pub fn parse_profile_file(path: impl AsRef<Path>) -> Result<Profile, ManifestError> {
    let content = fs::read_to_string(path)?;
    parse_profile_str(&content)
}

pub fn get_builtin(name: &str) -> Option<&'static BuiltinProfile> {
    BUILTIN_PROFILES.iter().find(|p| p.name == name)
}

/// Parse the built-in profile registered under `name`.
pub fn builtin_profile(name: &str) -> Result<Profile, ManifestError> {
    let builtin = get_builtin(name).ok_or_else(|| ManifestError::UnknownProfile(name.to_owned()))?;
    parse_profile_str(builtin.definition)
}
