//! In-memory inventory loaded from a JSON snapshot.
//!
//! The snapshot is a flat list of managed objects, each with its reference,
//! parent reference, name and a free-form property tree. It serves both name
//! resolution ([`Finder`]) and property retrieval ([`PropertyCollector`]).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Read;
use std::path::Path;

use crate::collector::{DynamicProperty, ObjectContent, PropertyCollector, descend};
use crate::error::VmError;
use crate::glob::{PathPattern, component_pattern, has_wildcards};
use crate::inventory::{Finder, InventoryScope};
use crate::kinds;
use crate::path::PropertyPath;
use crate::reference::ObjectReference;
use crate::{Map, Set, VmFuture};

const NAME_PROPERTY: &str = "name";
const PARENT_PROPERTY: &str = "parent";
const HOST_FOLDER: &str = "host";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotObject {
    #[serde(rename = "self")]
    pub reference: ObjectReference,
    #[serde(default)]
    pub parent: Option<ObjectReference>,
    pub name: String,
    #[serde(default)]
    pub properties: serde_json::Map<String, Value>,
}

#[derive(Deserialize)]
struct SnapshotDocument {
    objects: Vec<SnapshotObject>,
}

pub struct SnapshotInventory {
    objects: Vec<SnapshotObject>,
    index: Map<ObjectReference, usize>,
    paths: Vec<String>,
}

impl SnapshotInventory {
    pub fn from_objects(objects: Vec<SnapshotObject>) -> crate::Result<Self> {
        let mut index = Map::with_capacity_and_hasher(objects.len(), Default::default());
        for (i, object) in objects.iter().enumerate() {
            if index.insert(object.reference.clone(), i).is_some() {
                return Err(VmError::GenericError(format!(
                    "Duplicate managed object {} in snapshot",
                    object.reference
                )));
            }
        }
        let paths = objects
            .iter()
            .map(|object| compute_path(&objects, &index, object))
            .collect::<crate::Result<Vec<_>>>()?;
        Ok(SnapshotInventory {
            objects,
            index,
            paths,
        })
    }

    pub fn from_value(value: Value) -> crate::Result<Self> {
        let document: SnapshotDocument = serde_json::from_value(value)?;
        Self::from_objects(document.objects)
    }

    pub fn from_reader<R: Read>(reader: R) -> crate::Result<Self> {
        let document: SnapshotDocument = serde_json::from_reader(reader)?;
        Self::from_objects(document.objects)
    }

    pub fn from_file(path: &Path) -> crate::Result<Self> {
        log::debug!("Loading inventory snapshot from {}", path.display());
        let file = std::fs::File::open(path)?;
        let inventory = Self::from_reader(std::io::BufReader::new(file))?;
        log::debug!("Inventory snapshot contains {} objects", inventory.len());
        Ok(inventory)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, reference: &ObjectReference) -> Option<&SnapshotObject> {
        self.index.get(reference).map(|i| &self.objects[*i])
    }

    pub fn inventory_path(&self, reference: &ObjectReference) -> Option<&str> {
        self.index.get(reference).map(|i| self.paths[*i].as_str())
    }

    fn objects_with_paths(&self) -> impl Iterator<Item = (&SnapshotObject, &str)> {
        self.objects
            .iter()
            .zip(self.paths.iter().map(|p| p.as_str()))
    }

    fn datacenter_path(&self, scope: &InventoryScope) -> crate::Result<&str> {
        let datacenters = self
            .objects_with_paths()
            .filter(|(object, _)| object.reference.is_kind(kinds::DATACENTER));
        let found: Vec<&str> = match &scope.datacenter {
            Some(name) if name.contains('/') => {
                let pattern = PathPattern::new(name)?;
                datacenters
                    .filter(|(_, path)| pattern.matches(path))
                    .map(|(_, path)| path)
                    .collect()
            }
            Some(name) => {
                let pattern = component_pattern(name)?;
                datacenters
                    .filter(|(object, _)| pattern.is_match(&object.name))
                    .map(|(_, path)| path)
                    .collect()
            }
            None => datacenters.map(|(_, path)| path).collect(),
        };
        match (found.as_slice(), &scope.datacenter) {
            ([path], _) => Ok(*path),
            ([], Some(name)) => Err(VmError::NotFound(format!(
                "datacenter '{name}' not found"
            ))),
            ([], None) => Err(VmError::NotFound("no datacenter found".to_string())),
            (_, Some(name)) => Err(VmError::GenericError(format!(
                "path '{name}' resolves to multiple datacenters"
            ))),
            (_, None) => Err(VmError::GenericError(
                "default datacenter resolves to multiple instances, please specify".to_string(),
            )),
        }
    }

    fn root_pool_of(&self, compute: &ObjectReference) -> Option<&ObjectReference> {
        self.objects
            .iter()
            .find(|o| {
                o.parent.as_ref() == Some(compute) && o.reference.is_kind(kinds::RESOURCE_POOL)
            })
            .map(|o| &o.reference)
    }

    fn find_pools(
        &self,
        scope: &InventoryScope,
        pattern: &str,
    ) -> crate::Result<Vec<ObjectReference>> {
        let full_pattern = if pattern.starts_with('/') {
            pattern.to_string()
        } else {
            format!("{}/{HOST_FOLDER}/{pattern}", self.datacenter_path(scope)?)
        };

        let matcher = PathPattern::new(&full_pattern)?;
        let mut pools = Vec::new();
        for (object, path) in self.objects_with_paths() {
            if !matcher.matches(path) {
                continue;
            }
            let reference = &object.reference;
            match reference.kind() {
                kinds::RESOURCE_POOL => pools.push(reference.clone()),
                kinds::COMPUTE_RESOURCE | kinds::CLUSTER_COMPUTE_RESOURCE => {
                    match self.root_pool_of(reference) {
                        Some(pool) => pools.push(pool.clone()),
                        None => log::warn!("Compute resource {path} has no root resource pool"),
                    }
                }
                _ => log::debug!("Ignoring {reference} ({path}), it is not a resource pool"),
            }
        }

        if pools.is_empty() && !has_wildcards(pattern) {
            log::debug!("No resource pool found at {full_pattern}");
        }
        Ok(pools)
    }

    fn retrieve(
        &self,
        refs: &[ObjectReference],
        paths: &[PropertyPath],
    ) -> crate::Result<Vec<ObjectContent>> {
        let mut seen: Set<&ObjectReference> = Set::default();
        let mut contents = Vec::with_capacity(refs.len());
        for reference in refs {
            if !seen.insert(reference) {
                continue;
            }
            let object = self
                .get(reference)
                .ok_or_else(|| VmError::ManagedObjectNotFound(reference.clone()))?;
            let prop_set = if paths.is_empty() {
                default_properties(object)
            } else {
                paths
                    .iter()
                    .filter_map(|path| {
                        lookup_property(object, path).map(|val| DynamicProperty {
                            name: path.clone(),
                            val,
                        })
                    })
                    .collect()
            };
            contents.push(ObjectContent::new(reference.clone(), prop_set));
        }
        Ok(contents)
    }
}

impl Finder for SnapshotInventory {
    fn resource_pool_list<'a>(
        &'a self,
        scope: &'a InventoryScope,
        pattern: &'a str,
    ) -> VmFuture<'a, Vec<ObjectReference>> {
        log::debug!("Resolving resource pools matching `{pattern}`");
        Box::pin(futures::future::ready(self.find_pools(scope, pattern)))
    }
}

impl PropertyCollector for SnapshotInventory {
    fn retrieve_properties<'a>(
        &'a self,
        refs: &'a [ObjectReference],
        paths: &'a [PropertyPath],
    ) -> VmFuture<'a, Vec<ObjectContent>> {
        log::debug!(
            "Retrieving {} properties of {} objects",
            if paths.is_empty() {
                "all".to_string()
            } else {
                paths.len().to_string()
            },
            refs.len()
        );
        Box::pin(futures::future::ready(self.retrieve(refs, paths)))
    }
}

fn compute_path(
    objects: &[SnapshotObject],
    index: &Map<ObjectReference, usize>,
    object: &SnapshotObject,
) -> crate::Result<String> {
    let mut names = Vec::new();
    let mut current = object;
    loop {
        if names.len() > objects.len() {
            return Err(VmError::GenericError(format!(
                "Parent cycle detected at {}",
                object.reference
            )));
        }
        match &current.parent {
            Some(parent) => {
                names.push(current.name.as_str());
                let i = index.get(parent).ok_or_else(|| {
                    VmError::GenericError(format!(
                        "Parent {parent} of {} is missing in snapshot",
                        current.reference
                    ))
                })?;
                current = &objects[*i];
            }
            None => {
                // The service root folder is not a part of inventory paths
                if !current.reference.is_kind(kinds::FOLDER) {
                    names.push(current.name.as_str());
                }
                break;
            }
        }
    }
    names.reverse();
    Ok(format!("/{}", names.join("/")))
}

fn default_properties(object: &SnapshotObject) -> Vec<DynamicProperty> {
    let mut props = Vec::with_capacity(object.properties.len() + 2);
    props.push(DynamicProperty {
        name: PropertyPath::from_static(NAME_PROPERTY),
        val: Value::String(object.name.clone()),
    });
    if let Some(parent) = parent_value(object) {
        props.push(DynamicProperty {
            name: PropertyPath::from_static(PARENT_PROPERTY),
            val: parent,
        });
    }
    for (key, val) in &object.properties {
        match PropertyPath::new(key.as_str()) {
            Ok(name) => props.push(DynamicProperty {
                name,
                val: val.clone(),
            }),
            Err(e) => log::warn!("Skipping property of {}: {e}", object.reference),
        }
    }
    props
}

fn parent_value(object: &SnapshotObject) -> Option<Value> {
    object
        .parent
        .as_ref()
        .and_then(|parent| serde_json::to_value(parent).ok())
}

fn lookup_property(object: &SnapshotObject, path: &PropertyPath) -> Option<Value> {
    let mut segments = path.segments();
    let first = segments.next()?;
    let rest: Vec<&str> = segments.collect();
    match first {
        NAME_PROPERTY if rest.is_empty() => Some(Value::String(object.name.clone())),
        PARENT_PROPERTY => descend(&parent_value(object)?, &rest).cloned(),
        _ => descend(object.properties.get(first)?, &rest).cloned(),
    }
}
