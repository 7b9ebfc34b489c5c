pub mod collector;
pub mod error;
pub mod glob;
pub mod inventory;
pub mod mapping;
pub mod path;
pub mod reference;
pub mod snapshot;

pub use crate::collector::{DynamicProperty, ObjectContent, PropertyCollector};
pub use crate::inventory::{Finder, InventoryScope};
pub use crate::mapping::{PropertySetter, PropertyTable, PropertyTableBuilder};
pub use crate::path::PropertyPath;
pub use crate::reference::ObjectReference;
pub use crate::snapshot::SnapshotInventory;

use std::future::Future;
use std::pin::Pin;

pub type Error = crate::error::VmError;
pub type Result<T> = std::result::Result<T, Error>;

pub type Map<K, V> = hashbrown::HashMap<K, V, fxhash::FxBuildHasher>;
pub type Set<T> = hashbrown::HashSet<T, fxhash::FxBuildHasher>;

/// Future returned by the collaborator traits of this crate.
pub type VmFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a>>;

/// Managed object kinds that the inventory layer knows about.
pub mod kinds {
    pub const DATACENTER: &str = "Datacenter";
    pub const FOLDER: &str = "Folder";
    pub const COMPUTE_RESOURCE: &str = "ComputeResource";
    pub const CLUSTER_COMPUTE_RESOURCE: &str = "ClusterComputeResource";
    pub const RESOURCE_POOL: &str = "ResourcePool";
}
