//! Explicit mapping from property paths to typed fields.
//!
//! A [`PropertyTable`] lists every property path that a typed record is populated
//! from, together with a setter that decodes the delivered JSON value into the
//! record. The table is validated when it is built, and requests for paths that
//! the table does not know are rejected before anything is retrieved.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::collector::ObjectContent;
use crate::error::VmError;
use crate::path::PropertyPath;

pub type PropertySetter<T> = fn(&mut T, &Value) -> crate::Result<()>;

struct PropertyEntry<T> {
    path: PropertyPath,
    setter: PropertySetter<T>,
}

pub struct PropertyTable<T> {
    entries: Vec<PropertyEntry<T>>,
}

pub struct PropertyTableBuilder<T> {
    entries: Vec<(String, PropertySetter<T>)>,
}

impl<T> PropertyTableBuilder<T> {
    pub fn property(mut self, path: &str, setter: PropertySetter<T>) -> Self {
        self.entries.push((path.to_string(), setter));
        self
    }

    pub fn build(self) -> crate::Result<PropertyTable<T>> {
        let mut entries: Vec<PropertyEntry<T>> = Vec::with_capacity(self.entries.len());
        for (path, setter) in self.entries {
            let path = PropertyPath::new(path)?;
            if let Some(existing) = entries
                .iter()
                .find(|e| e.path.is_prefix_of(&path) || path.is_prefix_of(&e.path))
            {
                return Err(VmError::InvalidPath {
                    path: path.to_string(),
                    reason: format!("overlaps with mapped property `{}`", existing.path),
                });
            }
            entries.push(PropertyEntry { path, setter });
        }
        Ok(PropertyTable { entries })
    }
}

impl<T> PropertyTable<T> {
    pub fn builder() -> PropertyTableBuilder<T> {
        PropertyTableBuilder {
            entries: Vec::new(),
        }
    }

    pub fn paths(&self) -> impl Iterator<Item = &PropertyPath> {
        self.entries.iter().map(|e| &e.path)
    }

    /// Checks that every requested path is mapped, either directly or as an
    /// ancestor of a mapped path.
    pub fn check_request(&self, paths: &[PropertyPath]) -> crate::Result<()> {
        match paths
            .iter()
            .find(|p| !self.entries.iter().any(|e| p.is_prefix_of(&e.path)))
        {
            Some(path) => Err(VmError::UnknownProperty(path.to_string())),
            None => Ok(()),
        }
    }

    /// Populates `target` from `content` and returns the mapped paths that were not delivered.
    pub fn apply(&self, target: &mut T, content: &ObjectContent) -> crate::Result<Vec<PropertyPath>> {
        let mut missing = Vec::new();
        for entry in &self.entries {
            match content.lookup(&entry.path) {
                Some(value) => {
                    (entry.setter)(target, value).map_err(|e| VmError::DecodeError {
                        path: entry.path.to_string(),
                        message: match e {
                            VmError::DecodeError { message, .. } => message,
                            e => e.to_string(),
                        },
                    })?
                }
                None => missing.push(entry.path.clone()),
            }
        }
        Ok(missing)
    }
}

/// Decodes a delivered property value into a typed field.
pub fn decode<V: DeserializeOwned>(value: &Value) -> crate::Result<V> {
    V::deserialize(value).map_err(|e| VmError::DecodeError {
        path: String::new(),
        message: e.to_string(),
    })
}
