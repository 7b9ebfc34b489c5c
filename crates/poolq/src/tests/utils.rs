use std::cell::{Cell, RefCell};

use serde_json::{Value, json};
use vmobj::error::VmError;
use vmobj::{
    DynamicProperty, Finder, InventoryScope, Map, ObjectContent, ObjectReference,
    PropertyCollector, PropertyPath, Set, SnapshotInventory, VmFuture,
};

use crate::client::output::outputs::Output;
use crate::pool::fetch::PathSelection;
use crate::pool::record::ResourcePoolRecord;
use crate::pool::render::{render_structured, render_tabular};

pub fn pool_ref(id: &str) -> ObjectReference {
    ObjectReference::new("ResourcePool", id)
}

fn allocation_properties() -> Value {
    json!({
        "cpuAllocation": {
            "reservation": 0,
            "expandableReservation": true,
            "limit": -1,
            "shares": {"shares": 2000, "level": "custom"}
        },
        "memoryAllocation": {
            "reservation": 0,
            "expandableReservation": true,
            "limit": -1,
            "shares": {"shares": 163840, "level": "normal"}
        }
    })
}

fn runtime_properties() -> Value {
    json!({
        "cpu": {"overallUsage": 100, "maxUsage": 1000},
        "memory": {"overallUsage": 256, "maxUsage": 1024},
        "overallStatus": "green"
    })
}

/// Content of a pool as delivered for the default property set.
pub fn pool_content(id: &str, name: &str) -> ObjectContent {
    let property = |name: &str, val: Value| DynamicProperty {
        name: PropertyPath::new(name).unwrap(),
        val,
    };
    ObjectContent::new(
        pool_ref(id),
        vec![
            property("name", json!(name)),
            property("config", allocation_properties()),
            property("runtime", runtime_properties()),
        ],
    )
}

/// Inventory snapshot with one datacenter `DC0` that contains a cluster `DC0_C0`
/// (root pool `Resources` with children `pool-a` and `pool-b`) and a standalone host `DC0_H0`.
pub fn snapshot_document() -> Value {
    fn obj(kind: &str, id: &str, parent: Option<(&str, &str)>, name: &str) -> Value {
        json!({
            "self": {"type": kind, "value": id},
            "parent": parent.map(|(kind, id)| json!({"type": kind, "value": id})),
            "name": name,
            "properties": {}
        })
    }

    let mut objects = vec![
        obj("Folder", "group-d1", None, "Datacenters"),
        obj("Datacenter", "datacenter-2", Some(("Folder", "group-d1")), "DC0"),
        obj("Folder", "group-h4", Some(("Datacenter", "datacenter-2")), "host"),
        obj(
            "ClusterComputeResource",
            "domain-c7",
            Some(("Folder", "group-h4")),
            "DC0_C0",
        ),
        obj(
            "ResourcePool",
            "resgroup-8",
            Some(("ClusterComputeResource", "domain-c7")),
            "Resources",
        ),
        obj(
            "ResourcePool",
            "resgroup-20",
            Some(("ResourcePool", "resgroup-8")),
            "pool-a",
        ),
        obj(
            "ResourcePool",
            "resgroup-21",
            Some(("ResourcePool", "resgroup-8")),
            "pool-b",
        ),
        obj(
            "ComputeResource",
            "domain-s30",
            Some(("Folder", "group-h4")),
            "DC0_H0",
        ),
        obj(
            "ResourcePool",
            "resgroup-31",
            Some(("ComputeResource", "domain-s30")),
            "Resources",
        ),
    ];
    for pool in [4, 5, 6, 8] {
        objects[pool]["properties"] = json!({
            "config": allocation_properties(),
            "runtime": runtime_properties(),
        });
    }
    // pool-b has no usage ceiling and a finite memory limit
    objects[6]["properties"]["runtime"]["cpu"] = json!({"overallUsage": 0, "maxUsage": 0});
    objects[6]["properties"]["config"]["memoryAllocation"] = json!({
        "reservation": 512,
        "expandableReservation": false,
        "limit": 2048,
        "shares": {"shares": 1000, "level": "low"}
    });
    json!({ "objects": objects })
}

pub fn snapshot_inventory() -> SnapshotInventory {
    SnapshotInventory::from_value(snapshot_document()).unwrap()
}

/// Finder with canned answers that counts how many times it was asked.
#[derive(Default)]
pub struct StubFinder {
    answers: Map<String, Vec<ObjectReference>>,
    failing: Set<String>,
    calls: Cell<usize>,
}

impl StubFinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, pattern: &str, ids: &[&str]) -> Self {
        self.answers
            .insert(pattern.to_string(), ids.iter().map(|id| pool_ref(id)).collect());
        self
    }

    pub fn failing_on(mut self, pattern: &str) -> Self {
        self.failing.insert(pattern.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl Finder for StubFinder {
    fn resource_pool_list<'a>(
        &'a self,
        _scope: &'a InventoryScope,
        pattern: &'a str,
    ) -> VmFuture<'a, Vec<ObjectReference>> {
        self.calls.set(self.calls.get() + 1);
        let result = if self.failing.contains(pattern) {
            Err(VmError::GenericError("connection reset".to_string()))
        } else {
            Ok(self.answers.get(pattern).cloned().unwrap_or_default())
        };
        Box::pin(futures::future::ready(result))
    }
}

type Request = (Vec<ObjectReference>, Vec<PropertyPath>);

/// Collector that answers from a fixed set of contents and records every request.
pub struct CountingCollector {
    contents: Vec<ObjectContent>,
    failure: Option<String>,
    requests: RefCell<Vec<Request>>,
}

impl CountingCollector {
    pub fn new(contents: Vec<ObjectContent>) -> Self {
        Self {
            contents,
            failure: None,
            requests: Default::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            contents: Vec::new(),
            failure: Some(message.to_string()),
            requests: Default::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.borrow().clone()
    }
}

impl PropertyCollector for CountingCollector {
    fn retrieve_properties<'a>(
        &'a self,
        refs: &'a [ObjectReference],
        paths: &'a [PropertyPath],
    ) -> VmFuture<'a, Vec<ObjectContent>> {
        self.requests
            .borrow_mut()
            .push((refs.to_vec(), paths.to_vec()));
        let result = match &self.failure {
            Some(message) => Err(VmError::GenericError(message.clone())),
            None => Ok(self
                .contents
                .iter()
                .filter(|content| refs.contains(&content.obj))
                .cloned()
                .collect()),
        };
        Box::pin(futures::future::ready(result))
    }
}

/// Printer that keeps what it was asked to print.
pub struct RecordingOutput {
    selection: PathSelection,
    failure: Option<String>,
    printed: RefCell<Vec<Vec<ResourcePoolRecord>>>,
    text: RefCell<String>,
}

impl RecordingOutput {
    pub fn new(selection: PathSelection) -> Self {
        Self {
            selection,
            failure: None,
            printed: Default::default(),
            text: Default::default(),
        }
    }

    /// Printer whose output stream fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new(PathSelection::Narrow)
        }
    }

    pub fn printed(&self) -> Vec<Vec<ResourcePoolRecord>> {
        self.printed.borrow().clone()
    }

    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }
}

impl Output for RecordingOutput {
    fn path_selection(&self) -> PathSelection {
        self.selection
    }

    fn print_pool_info(&self, records: Vec<ResourcePoolRecord>) -> crate::Result<()> {
        if let Some(message) = &self.failure {
            let error = std::io::Error::new(std::io::ErrorKind::BrokenPipe, message.clone());
            return Err(error.into());
        }
        let text = match self.selection {
            PathSelection::Narrow => render_tabular(&records)?,
            PathSelection::Full => render_structured(&records)?,
        };
        self.text.borrow_mut().push_str(&text);
        self.printed.borrow_mut().push(records);
        Ok(())
    }

    fn print_error(&self, error: anyhow::Error) {
        panic!("unexpected error {error:?}");
    }
}
