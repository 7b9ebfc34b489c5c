use anyhow::Context;
use vmobj::SnapshotInventory;

use crate::client::globalsettings::GlobalSettings;
use crate::common::cli::PoolInfoOpts;
use crate::pool::report::{ReportError, run_report};

pub async fn command_pool_info(
    gsettings: &GlobalSettings,
    opts: PoolInfoOpts,
) -> anyhow::Result<()> {
    if opts.pools.is_empty() {
        return Err(ReportError::Usage.into());
    }

    let path = gsettings.inventory_path()?;
    let inventory = SnapshotInventory::from_file(path)
        .with_context(|| format!("Cannot load inventory snapshot {}", path.display()))?;

    run_report(
        &inventory,
        &inventory,
        gsettings.scope(),
        &opts.pools,
        gsettings.printer(),
    )
    .await?;
    Ok(())
}

/// Exit code of a failed command; usage errors are distinguished from failures.
pub fn exit_code(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<ReportError>() {
        Some(error) if error.is_usage() => 2,
        _ => 1,
    }
}
