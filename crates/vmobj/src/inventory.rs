use serde::{Deserialize, Serialize};

use crate::VmFuture;
use crate::reference::ObjectReference;

/// Scope in which relative inventory paths are resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryScope {
    /// Name (or absolute path) of the datacenter. When it is not set, the inventory
    /// has to contain exactly one datacenter.
    pub datacenter: Option<String>,
}

impl InventoryScope {
    pub fn new(datacenter: Option<String>) -> Self {
        Self { datacenter }
    }
}

/// Name to reference resolution over a hierarchical inventory.
pub trait Finder {
    /// Resolves `pattern` to the resource pools it names.
    ///
    /// A relative pattern is resolved against the `host` folder of the scoped datacenter.
    /// A pattern that names a compute resource yields its root resource pool.
    /// A pattern without matches resolves to an empty list.
    fn resource_pool_list<'a>(
        &'a self,
        scope: &'a InventoryScope,
        pattern: &'a str,
    ) -> VmFuture<'a, Vec<ObjectReference>>;
}
