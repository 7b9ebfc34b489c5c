use crate::client::output::outputs::Output;
use std::path::{Path, PathBuf};
use vmobj::InventoryScope;

pub struct GlobalSettings {
    inventory: Option<PathBuf>,
    scope: InventoryScope,
    printer: Box<dyn Output>,
}

impl GlobalSettings {
    pub fn new(inventory: Option<PathBuf>, scope: InventoryScope, printer: Box<dyn Output>) -> Self {
        GlobalSettings {
            inventory,
            scope,
            printer,
        }
    }

    pub fn inventory_path(&self) -> anyhow::Result<&Path> {
        self.inventory.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "No inventory was specified. Use `--inventory`, the `POOLQ_INVENTORY` environment variable or the config file"
            )
        })
    }

    pub fn scope(&self) -> &InventoryScope {
        &self.scope
    }

    pub fn printer(&self) -> &dyn Output {
        self.printer.as_ref()
    }
}
