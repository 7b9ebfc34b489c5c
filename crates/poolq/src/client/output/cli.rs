use crate::client::output::outputs::Output;
use crate::pool::fetch::PathSelection;
use crate::pool::record::ResourcePoolRecord;
use crate::pool::render::render_tabular;

#[derive(Default)]
pub struct CliOutput;

impl Output for CliOutput {
    fn path_selection(&self) -> PathSelection {
        PathSelection::Narrow
    }

    fn print_pool_info(&self, records: Vec<ResourcePoolRecord>) -> crate::Result<()> {
        print!("{}", render_tabular(&records)?);
        Ok(())
    }

    fn print_error(&self, error: anyhow::Error) {
        eprintln!("{error:?}");
    }
}
