use crate::client::output::outputs::Output;
use crate::pool::fetch::PathSelection;
use crate::pool::record::ResourcePoolRecord;
use crate::pool::render::render_structured;

#[derive(Default)]
pub struct JsonOutput;

impl JsonOutput {
    fn print(&self, data: String) {
        println!("{data}");
    }
}

impl Output for JsonOutput {
    fn path_selection(&self) -> PathSelection {
        PathSelection::Full
    }

    fn print_pool_info(&self, records: Vec<ResourcePoolRecord>) -> crate::Result<()> {
        self.print(render_structured(&records)?);
        Ok(())
    }

    fn print_error(&self, error: anyhow::Error) {
        eprintln!("{error:?}");
    }
}
