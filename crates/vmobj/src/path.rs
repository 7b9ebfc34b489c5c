use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::VmError;

/// Dotted address of a (possibly nested) property of a managed object,
/// e.g. `config.cpuAllocation`.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PropertyPath(String);

impl PropertyPath {
    pub fn new(path: impl Into<String>) -> crate::Result<Self> {
        let path = path.into();
        validate(&path)?;
        Ok(PropertyPath(path))
    }

    /// Builds a path from a constant that is known to be valid.
    pub(crate) fn from_static(path: &'static str) -> Self {
        debug_assert!(validate(path).is_ok());
        PropertyPath(path.to_string())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Returns true if `self` is equal to `other` or names one of its ancestors.
    /// The comparison is done per segment, so `config.cpu` is not a prefix of `config.cpuAllocation`.
    pub fn is_prefix_of(&self, other: &PropertyPath) -> bool {
        self.strip_from(other).is_some()
    }

    /// Segments of `other` that remain after removing `self` from its front.
    pub fn strip_from<'a>(&self, other: &'a PropertyPath) -> Option<Vec<&'a str>> {
        let mut rest = other.segments();
        for segment in self.segments() {
            if rest.next() != Some(segment) {
                return None;
            }
        }
        Some(rest.collect())
    }
}

fn validate(path: &str) -> crate::Result<()> {
    let invalid = |reason: &str| VmError::InvalidPath {
        path: path.to_string(),
        reason: reason.to_string(),
    };
    if path.is_empty() {
        return Err(invalid("path is empty"));
    }
    for segment in path.split('.') {
        if segment.is_empty() {
            return Err(invalid("empty segment"));
        }
        if let Some(c) = segment
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
        {
            return Err(invalid(&format!("unexpected character `{c}`")));
        }
    }
    Ok(())
}

impl Display for PropertyPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PropertyPath {
    type Err = VmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PropertyPath::new(s)
    }
}

impl TryFrom<String> for PropertyPath {
    type Error = VmError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        PropertyPath::new(value)
    }
}

impl From<PropertyPath> for String {
    fn from(path: PropertyPath) -> Self {
        path.0
    }
}

#[cfg(test)]
mod tests {
    use super::PropertyPath;

    fn path(s: &str) -> PropertyPath {
        PropertyPath::new(s).unwrap()
    }

    #[test]
    fn test_valid_paths() {
        assert_eq!(path("name").segments().collect::<Vec<_>>(), vec!["name"]);
        assert_eq!(
            path("config.cpuAllocation").segments().collect::<Vec<_>>(),
            vec!["config", "cpuAllocation"]
        );
        assert!(PropertyPath::new("runtime.memory_2").is_ok());
    }

    #[test]
    fn test_invalid_paths() {
        assert!(PropertyPath::new("").is_err());
        assert!(PropertyPath::new("config.").is_err());
        assert!(PropertyPath::new(".config").is_err());
        assert!(PropertyPath::new("config..cpu").is_err());
        assert!(PropertyPath::new("config cpu").is_err());
        assert!(PropertyPath::new("config/cpu").is_err());
    }

    #[test]
    fn test_prefix() {
        assert!(path("config").is_prefix_of(&path("config.cpuAllocation")));
        assert!(path("config.cpuAllocation").is_prefix_of(&path("config.cpuAllocation")));
        assert!(!path("config.cpu").is_prefix_of(&path("config.cpuAllocation")));
        assert!(!path("config.cpuAllocation").is_prefix_of(&path("config")));
        assert!(!path("runtime").is_prefix_of(&path("config.cpuAllocation")));
    }

    #[test]
    fn test_strip_from() {
        assert_eq!(
            path("config").strip_from(&path("config.cpuAllocation.shares")),
            Some(vec!["cpuAllocation", "shares"])
        );
        assert_eq!(path("name").strip_from(&path("name")), Some(vec![]));
        assert_eq!(path("name").strip_from(&path("runtime")), None);
    }

    #[test]
    fn test_deserialize_validates() {
        assert!(serde_json::from_str::<PropertyPath>("\"runtime.cpu\"").is_ok());
        assert!(serde_json::from_str::<PropertyPath>("\"runtime..cpu\"").is_err());
    }
}
