//! checkm text rendering.
//!
//! ```text
//! #%dataonem_0.1
//! #%profile | http://uc3.cdlib.org/registry/ingest/manifest/mrt-dataone-manifest
//! #%prefix | dom: | http://uc3.cdlib.org/ontology/dataonem
//! #%prefix | mrt: | http://uc3.cdlib.org/ontology/mom
//! #%fields | dom:scienceMetadataFile | dom:scienceMetadataFormat | dom:scienceDataFile | mrt:mimeType
//! mrt-datacite.xml | http://datacite.org/schema/kernel-3.1 | data.csv | text/csv
//! #%eof
//! ```

use crate::manifest::ManifestDocument;
use crate::ManifestError;
use std::io::Write;

pub const SEPARATOR: &str = " | ";

pub fn write_checkm<W: Write>(
    document: &ManifestDocument<'_>,
    out: &mut W,
) -> Result<(), ManifestError> {
    write_directive(out, document.conformance, &[])?;
    write_directive(out, "profile", &[document.profile.as_str()])?;
    for (prefix, namespace) in document.prefixes {
        write_directive(out, "prefix", &[format!("{prefix}:").as_str(), namespace.as_str()])?;
    }
    let fields: Vec<&str> = document.fields.iter().map(String::as_str).collect();
    write_directive(out, "fields", &fields)?;

    for entry in document.entries {
        let mut cells = Vec::with_capacity(document.fields.len());
        for field in document.fields {
            let cell = entry.get(field).map(ToString::to_string).unwrap_or_default();
            if cell.contains(['\n', '\r']) || cell.contains(SEPARATOR) {
                return Err(ManifestError::UnrenderableValue {
                    field: field.clone(),
                    value: cell,
                });
            }
            cells.push(cell);
        }
        writeln!(out, "{}", cells.join(SEPARATOR))?;
    }

    write_directive(out, "eof", &[])
}

fn write_directive<W: Write>(out: &mut W, name: &str, columns: &[&str]) -> Result<(), ManifestError> {
    write!(out, "#%{name}")?;
    if !columns.is_empty() {
        write!(out, "{SEPARATOR}{}", columns.join(SEPARATOR))?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::manifest::{Entry, Manifest};
    use crate::{ErrorKind, ManifestError, Value};
    use std::collections::BTreeMap;
    use url::Url;

    fn manifest(entries: Vec<Entry>) -> Manifest {
        Manifest::new(
            "checkm_0.7",
            Url::parse("http://example.org/profile").unwrap(),
            BTreeMap::from([
                ("nfo".to_owned(), "http://example.org/nfo#".to_owned()),
                ("mrt".to_owned(), "http://example.org/mrt#".to_owned()),
            ]),
            vec!["nfo:fileName".to_owned(), "nfo:fileSize".to_owned()],
            entries,
        )
        .unwrap()
    }

    #[test]
    fn renders_header_rows_and_eof() {
        let mut first = Entry::new();
        first.insert("nfo:fileName".to_owned(), Value::from("a.txt"));
        first.insert("nfo:fileSize".to_owned(), Value::from(12_u64));
        let mut second = Entry::new();
        second.insert("nfo:fileName".to_owned(), Value::from("b.txt"));

        let text = manifest(vec![first, second]).to_checkm_string().unwrap();
        assert_eq!(
            text,
            "#%checkm_0.7\n\
             #%profile | http://example.org/profile\n\
             #%prefix | mrt: | http://example.org/mrt#\n\
             #%prefix | nfo: | http://example.org/nfo#\n\
             #%fields | nfo:fileName | nfo:fileSize\n\
             a.txt | 12\n\
             b.txt | \n\
             #%eof\n"
        );
    }

    #[test]
    fn empty_manifest_has_header_and_eof_only() {
        let text = manifest(Vec::new()).to_checkm_string().unwrap();
        assert!(text.starts_with("#%checkm_0.7\n"));
        assert!(text.ends_with("#%fields | nfo:fileName | nfo:fileSize\n#%eof\n"));
    }

    #[test]
    fn rejects_values_that_break_the_line_format() {
        for bad in ["two\nlines", "a | b"] {
            let mut entry = Entry::new();
            entry.insert("nfo:fileName".to_owned(), Value::from(bad));
            let err = manifest(vec![entry]).to_checkm_string().unwrap_err();
            assert!(matches!(err, ManifestError::UnrenderableValue { .. }));
            assert_eq!(err.kind(), ErrorKind::Validation);
        }
    }
}
