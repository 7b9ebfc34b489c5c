use crate::pool::fetch::PathSelection;
use crate::pool::record::ResourcePoolRecord;

#[derive(clap::ValueEnum, Clone)]
pub enum Outputs {
    CLI,
    JSON,
    Quiet,
}

pub trait Output {
    /// Properties that have to be fetched for this printer.
    fn path_selection(&self) -> PathSelection;

    // Pools
    fn print_pool_info(&self, records: Vec<ResourcePoolRecord>) -> crate::Result<()>;

    // Errors
    fn print_error(&self, error: anyhow::Error);
}
