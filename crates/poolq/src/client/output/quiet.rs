use crate::client::output::outputs::Output;
use crate::pool::fetch::PathSelection;
use crate::pool::record::ResourcePoolRecord;

/// Prints only the references of the resolved pools, one per line.
#[derive(Default)]
pub struct Quiet;

impl Output for Quiet {
    fn path_selection(&self) -> PathSelection {
        PathSelection::Narrow
    }

    fn print_pool_info(&self, records: Vec<ResourcePoolRecord>) -> crate::Result<()> {
        for record in records {
            println!("{}", record.reference);
        }
        Ok(())
    }

    fn print_error(&self, error: anyhow::Error) {
        eprintln!("{error:?}");
    }
}
