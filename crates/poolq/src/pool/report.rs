use thiserror::Error;
use vmobj::{Finder, InventoryScope, PropertyCollector};

use crate::client::output::outputs::Output;
use crate::common::error::PoolqError;
use crate::pool::fetch::PoolFetcher;
use crate::pool::resolve::resolve_references;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("No resource pool was specified")]
    Usage,
    #[error("Cannot resolve `{pattern}`: {source}")]
    Resolution {
        pattern: String,
        #[source]
        source: vmobj::Error,
    },
    #[error("Cannot retrieve resource pool properties: {0}")]
    Retrieval(#[source] vmobj::Error),
    #[error("Cannot print resource pools: {0}")]
    Output(#[source] PoolqError),
}

impl ReportError {
    pub fn is_usage(&self) -> bool {
        matches!(self, ReportError::Usage)
    }
}

/// Resolves `patterns`, fetches all matched pools with one batched retrieval and prints them.
///
/// Nothing is printed unless every stage succeeds.
pub async fn run_report<F, C>(
    finder: &F,
    collector: &C,
    scope: &InventoryScope,
    patterns: &[String],
    printer: &dyn Output,
) -> Result<(), ReportError>
where
    F: Finder + ?Sized,
    C: PropertyCollector + ?Sized,
{
    if patterns.is_empty() {
        return Err(ReportError::Usage);
    }

    let refs = resolve_references(finder, scope, patterns).await?;
    log::debug!(
        "Resolved {} pattern(s) to {} resource pool(s)",
        patterns.len(),
        refs.len()
    );

    let fetcher = PoolFetcher::new().map_err(ReportError::Retrieval)?;
    let records = fetcher
        .fetch(collector, &refs, printer.path_selection())
        .await
        .map_err(ReportError::Retrieval)?;

    printer
        .print_pool_info(records)
        .map_err(ReportError::Output)
}
