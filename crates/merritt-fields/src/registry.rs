use crate::field::Field;
use crate::value::Value;
use crate::{FieldError, RegistryError};
use std::fmt;

/// An ordered, immutable set of field descriptors for one source type.
///
/// Registry order is the column order of manifests built from it.
pub struct FieldRegistry<S: ?Sized + 'static> {
    name: &'static str,
    fields: &'static [&'static Field<S>],
}

impl<S: ?Sized + 'static> FieldRegistry<S> {
    pub const fn new(name: &'static str, fields: &'static [&'static Field<S>]) -> Self {
        Self { name, fields }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Field<S>> {
        let fields: &'static [&'static Field<S>] = self.fields;
        fields.iter().copied()
    }

    /// Target keys in registry order.
    pub fn targets(&self) -> Vec<&'static str> {
        self.iter().map(Field::target).collect()
    }

    /// Look up a descriptor by its symbolic name (e.g. `FILE_URL`).
    pub fn get(&self, name: &str) -> Result<&'static Field<S>, RegistryError> {
        self.iter()
            .find(|field| field.name() == name)
            .ok_or_else(|| RegistryError::UnknownField {
                registry: self.name,
                name: name.to_owned(),
            })
    }

    /// Look up a descriptor by the entry key it writes (e.g. `nfo:fileUrl`).
    pub fn by_target(&self, target: &str) -> Result<&'static Field<S>, RegistryError> {
        self.iter()
            .find(|field| field.target() == target)
            .ok_or_else(|| RegistryError::UnknownTarget {
                registry: self.name,
                target: target.to_owned(),
            })
    }

    /// Extract every field from `source`, stopping at the first failure.
    ///
    /// Absent optional values are omitted from the result.
    pub fn extract(&self, source: &S) -> Result<Vec<(&'static str, Value)>, FieldError> {
        let mut values = Vec::with_capacity(self.fields.len());
        for field in self.iter() {
            if let Some(value) = field.value_from(source)? {
                values.push((field.target(), value));
            }
        }
        Ok(values)
    }

    /// Extract every field from `source`, collecting all failures.
    pub fn extract_all(&self, source: &S) -> (Vec<(&'static str, Value)>, Vec<FieldError>) {
        let mut values = Vec::with_capacity(self.fields.len());
        let mut errors = Vec::new();
        for field in self.iter() {
            match field.value_from(source) {
                Ok(Some(value)) => values.push((field.target(), value)),
                Ok(None) => {}
                Err(e) => errors.push(e),
            }
        }
        (values, errors)
    }
}

impl<S: ?Sized + 'static> fmt::Debug for FieldRegistry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRegistry")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .finish()
    }
}
