//! Shell-style matching of inventory paths.
//!
//! Patterns are matched component by component, a wildcard never crosses a `/`.
//! Each component is compiled with `globset`, so `*`, `?`, `[a-z]`, `[!a-z]`,
//! `{a,b}` and `\` escapes are supported.

use globset::{GlobBuilder, GlobMatcher};

use crate::error::VmError;

/// Compiled inventory path pattern.
#[derive(Debug, Clone)]
pub struct PathPattern {
    components: Vec<GlobMatcher>,
}

impl PathPattern {
    pub fn new(pattern: &str) -> crate::Result<Self> {
        let components = split_components(pattern)
            .map(|component| compile_component(pattern, component))
            .collect::<crate::Result<Vec<_>>>()?;
        Ok(Self { components })
    }

    /// Matches a full inventory path with the same number of components.
    pub fn matches(&self, path: &str) -> bool {
        let mut names = split_components(path);
        self.components
            .iter()
            .all(|matcher| names.next().is_some_and(|name| matcher.is_match(name)))
            && names.next().is_none()
    }
}

/// Pattern for a single path component, such as a datacenter name.
pub fn component_pattern(pattern: &str) -> crate::Result<GlobMatcher> {
    compile_component(pattern, pattern)
}

fn compile_component(pattern: &str, component: &str) -> crate::Result<GlobMatcher> {
    GlobBuilder::new(component)
        .literal_separator(true)
        .backslash_escape(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| VmError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

pub fn split_components(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|c| !c.is_empty())
}

pub fn has_wildcards(pattern: &str) -> bool {
    pattern.contains(['*', '?', '[', '{', '\\'])
}
