use crate::checkm;
use crate::profile::Profile;
use crate::ManifestError;
use merritt_fields::Value;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use tracing::debug;
use url::Url;

/// One manifest row: field name to scalar value.
pub type Entry = BTreeMap<String, Value>;

/// A validated manifest: profile metadata plus ordered entries.
///
/// Every entry key is a declared field, fields are unique, and every
/// namespaced field uses a declared prefix. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    profile: Profile,
    entries: Vec<Entry>,
}

/// Serializer-facing view of a [`Manifest`].
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ManifestDocument<'a> {
    pub conformance: &'a str,
    pub profile: &'a Url,
    pub prefixes: &'a BTreeMap<String, String>,
    pub fields: &'a [String],
    pub entries: &'a [Entry],
}

impl Manifest {
    pub fn new(
        conformance: impl Into<String>,
        profile: Url,
        prefixes: BTreeMap<String, String>,
        fields: Vec<String>,
        entries: Vec<Entry>,
    ) -> Result<Self, ManifestError> {
        Self::from_profile(
            Profile {
                conformance: conformance.into(),
                uri: profile,
                prefixes,
                fields,
            },
            entries,
        )
    }

    pub fn from_profile(profile: Profile, entries: Vec<Entry>) -> Result<Self, ManifestError> {
        validate_fields(&profile)?;
        validate_entries(&profile.fields, &entries)?;

        debug!(
            "assembled {} manifest: {} fields, {} entries",
            profile.conformance,
            profile.fields.len(),
            entries.len()
        );

        Ok(Self { profile, entries })
    }

    pub fn conformance(&self) -> &str {
        &self.profile.conformance
    }

    pub fn profile(&self) -> &Url {
        &self.profile.uri
    }

    pub fn prefixes(&self) -> &BTreeMap<String, String> {
        &self.profile.prefixes
    }

    pub fn fields(&self) -> &[String] {
        &self.profile.fields
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }

    pub fn to_document(&self) -> ManifestDocument<'_> {
        ManifestDocument {
            conformance: self.conformance(),
            profile: self.profile(),
            prefixes: self.prefixes(),
            fields: self.fields(),
            entries: self.entries(),
        }
    }

    /// Entries projected onto field order; absent cells are `None`.
    pub fn rows(&self) -> Vec<Vec<Option<&Value>>> {
        self.entries
            .iter()
            .map(|entry| self.fields().iter().map(|f| entry.get(f)).collect())
            .collect()
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<(), ManifestError> {
        checkm::write_checkm(&self.to_document(), out)
    }

    pub fn to_checkm_string(&self) -> Result<String, ManifestError> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        Ok(String::from_utf8(buf)?)
    }

    pub fn to_json(&self) -> Result<String, ManifestError> {
        Ok(serde_json::to_string_pretty(&self.to_document())?)
    }
}

fn validate_fields(profile: &Profile) -> Result<(), ManifestError> {
    if profile.fields.is_empty() {
        return Err(ManifestError::EmptyFields);
    }

    let mut seen = BTreeSet::new();
    for field in &profile.fields {
        if !seen.insert(field.as_str()) {
            return Err(ManifestError::DuplicateField(field.clone()));
        }
        if let Some((prefix, _)) = field.split_once(':') {
            if !profile.prefixes.contains_key(prefix) {
                return Err(ManifestError::UndeclaredPrefix {
                    field: field.clone(),
                    prefix: prefix.to_owned(),
                });
            }
        }
    }
    Ok(())
}

fn validate_entries(fields: &[String], entries: &[Entry]) -> Result<(), ManifestError> {
    let declared: BTreeSet<&str> = fields.iter().map(String::as_str).collect();
    for (index, entry) in entries.iter().enumerate() {
        if let Some(key) = entry.keys().find(|k| !declared.contains(k.as_str())) {
            return Err(ManifestError::UndeclaredField {
                index,
                key: key.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn prefixes() -> BTreeMap<String, String> {
        BTreeMap::from([("ex".to_owned(), "http://example.org/ns#".to_owned())])
    }

    fn fields() -> Vec<String> {
        vec!["ex:name".to_owned(), "ex:size".to_owned()]
    }

    fn profile_uri() -> Url {
        Url::parse("http://example.org/profile").unwrap()
    }

    fn entry(pairs: &[(&str, Value)]) -> Entry {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect()
    }

    #[test]
    fn accessors_return_constructor_inputs() {
        let entries = vec![entry(&[("ex:name", "a.txt".into()), ("ex:size", 3_u64.into())])];
        let manifest =
            Manifest::new("checkm_0.7", profile_uri(), prefixes(), fields(), entries.clone())
                .unwrap();
        assert_eq!(manifest.conformance(), "checkm_0.7");
        assert_eq!(manifest.profile(), &profile_uri());
        assert_eq!(manifest.prefixes(), &prefixes());
        assert_eq!(manifest.fields(), fields().as_slice());
        assert_eq!(manifest.entries(), entries.as_slice());
    }

    #[test]
    fn rejects_undeclared_entry_key() {
        let entries = vec![
            entry(&[("ex:name", "a.txt".into())]),
            entry(&[("ex:colour", "blue".into())]),
        ];
        let err = Manifest::new("checkm_0.7", profile_uri(), prefixes(), fields(), entries)
            .unwrap_err();
        assert!(matches!(
            err,
            ManifestError::UndeclaredField { index: 1, ref key } if key == "ex:colour"
        ));
        assert_eq!(err.kind(), ErrorKind::Schema);
    }

    #[test]
    fn rejects_duplicate_and_empty_fields() {
        let dup = vec!["ex:name".to_owned(), "ex:name".to_owned()];
        assert!(matches!(
            Manifest::new("c", profile_uri(), prefixes(), dup, Vec::new()),
            Err(ManifestError::DuplicateField(ref f)) if f == "ex:name"
        ));
        assert!(matches!(
            Manifest::new("c", profile_uri(), prefixes(), Vec::new(), Vec::new()),
            Err(ManifestError::EmptyFields)
        ));
    }

    #[test]
    fn rejects_undeclared_prefix() {
        let fields = vec!["nfo:fileUrl".to_owned()];
        let err = Manifest::new("c", profile_uri(), prefixes(), fields, Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            ManifestError::UndeclaredPrefix { ref prefix, .. } if prefix == "nfo"
        ));
    }

    #[test]
    fn unprefixed_fields_need_no_namespace() {
        let fields = vec!["fileUrl".to_owned()];
        assert!(Manifest::new("c", profile_uri(), BTreeMap::new(), fields, Vec::new()).is_ok());
    }

    #[test]
    fn rows_follow_field_order() {
        let entries = vec![entry(&[("ex:size", 3_u64.into())])];
        let manifest = Manifest::new("c", profile_uri(), prefixes(), fields(), entries).unwrap();
        let rows = manifest.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], vec![None, Some(&Value::Integer(3))]);
    }

    #[test]
    fn checkm_string_matches_written_bytes() {
        let entries = vec![entry(&[("ex:name", "données.csv".into())])];
        let manifest = Manifest::new("c", profile_uri(), prefixes(), fields(), entries).unwrap();
        let mut buf = Vec::new();
        manifest.write_to(&mut buf).unwrap();
        let text = manifest.to_checkm_string().unwrap();
        assert_eq!(text.as_bytes(), buf.as_slice());
        assert!(text.contains("données.csv | \n"));
    }

    #[test]
    fn json_document_shape() {
        let entries = vec![entry(&[("ex:name", "a.txt".into()), ("ex:size", 3_u64.into())])];
        let manifest = Manifest::new("c", profile_uri(), prefixes(), fields(), entries).unwrap();
        let json: serde_json::Value = serde_json::from_str(&manifest.to_json().unwrap()).unwrap();
        assert_eq!(json["conformance"], "c");
        assert_eq!(json["profile"], "http://example.org/profile");
        assert_eq!(json["prefixes"]["ex"], "http://example.org/ns#");
        assert_eq!(json["fields"][1], "ex:size");
        assert_eq!(json["entries"][0]["ex:size"], 3);
    }
}
