use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::VmFuture;
use crate::path::PropertyPath;
use crate::reference::ObjectReference;

/// A single named property delivered by a retrieval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicProperty {
    pub name: PropertyPath,
    pub val: Value,
}

/// Properties of one managed object, as delivered by a [`PropertyCollector`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectContent {
    pub obj: ObjectReference,
    #[serde(default)]
    pub prop_set: Vec<DynamicProperty>,
}

impl ObjectContent {
    pub fn new(obj: ObjectReference, prop_set: Vec<DynamicProperty>) -> Self {
        Self { obj, prop_set }
    }

    /// Finds the value addressed by `path`.
    ///
    /// The value is either delivered directly under `path`, or it is nested inside
    /// a delivered ancestor property (e.g. `config.cpuAllocation` inside a delivered
    /// `config`), in which case the remaining segments are followed through JSON objects.
    pub fn lookup(&self, path: &PropertyPath) -> Option<&Value> {
        self.prop_set.iter().find_map(|prop| {
            let rest = prop.name.strip_from(path)?;
            descend(&prop.val, &rest)
        })
    }
}

pub(crate) fn descend<'a>(value: &'a Value, segments: &[&str]) -> Option<&'a Value> {
    segments
        .iter()
        .try_fold(value, |value, segment| value.as_object()?.get(*segment))
        .filter(|value| !value.is_null())
}

/// Batched remote property retrieval.
pub trait PropertyCollector {
    /// Retrieve `paths` of all `refs` in a single call.
    ///
    /// An empty `paths` list requests the default (full) property set of each object.
    /// The order of the returned contents does not have to follow the order of `refs`.
    fn retrieve_properties<'a>(
        &'a self,
        refs: &'a [ObjectReference],
        paths: &'a [PropertyPath],
    ) -> VmFuture<'a, Vec<ObjectContent>>;
}
