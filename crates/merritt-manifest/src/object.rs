use crate::manifest::{Entry, Manifest};
use crate::profile::{builtin_profile, Profile, OBJECT};
use crate::ManifestError;
use merritt_fields::{FieldError, ObjectFile, OBJECT_FIELDS};
use tracing::{debug, trace};

/// A field that failed extraction on the object at `index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectFailure {
    pub index: usize,
    pub error: FieldError,
}

/// Build a Merritt ingest manifest, one entry per object.
pub fn object_manifest<O: ObjectFile + 'static>(objects: &[O]) -> Result<Manifest, ManifestError> {
    object_manifest_with(builtin_profile(OBJECT)?, objects)
}

/// Build an object manifest against a custom profile.
///
/// Every profile field must target a descriptor of the Object registry; only
/// those descriptors are extracted. Fails on the first field error.
pub fn object_manifest_with<O: ObjectFile + 'static>(
    profile: Profile,
    objects: &[O],
) -> Result<Manifest, ManifestError> {
    let fields = profile
        .fields
        .iter()
        .map(|target| OBJECT_FIELDS.by_target(target))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        "extracting {} fields from {} objects",
        fields.len(),
        objects.len()
    );

    let mut entries = Vec::with_capacity(objects.len());
    for (index, object) in objects.iter().enumerate() {
        let mut entry = Entry::new();
        for field in &fields {
            let value = field
                .value_from(object)
                .map_err(|source| ManifestError::ObjectField { index, source })?;
            if let Some(value) = value {
                entry.insert(field.target().to_owned(), value);
            }
        }
        entries.push(entry);
    }

    Manifest::from_profile(profile, entries)
}

/// Every field failure across `objects`, in object then registry order.
pub fn validate_objects<O: ObjectFile + 'static>(objects: &[O]) -> Vec<ObjectFailure> {
    let mut failures = Vec::new();
    for (index, object) in objects.iter().enumerate() {
        let (_, errors) = OBJECT_FIELDS.extract_all(object);
        for error in errors {
            trace!("object {index}: {error}");
            failures.push(ObjectFailure { index, error });
        }
    }
    failures
}
