use futures::future::try_join_all;
use vmobj::{Finder, InventoryScope, ObjectReference};

use crate::pool::report::ReportError;

/// Resolves every pattern and concatenates the matches in the order of `patterns`.
///
/// Patterns are resolved concurrently. Matches are not deduplicated, a pool named by two
/// patterns is reported twice.
pub async fn resolve_references<F: Finder + ?Sized>(
    finder: &F,
    scope: &InventoryScope,
    patterns: &[String],
) -> Result<Vec<ObjectReference>, ReportError> {
    let resolved = try_join_all(patterns.iter().map(|pattern| async move {
        let refs = finder
            .resource_pool_list(scope, pattern)
            .await
            .map_err(|source| ReportError::Resolution {
                pattern: pattern.clone(),
                source,
            })?;
        if refs.is_empty() {
            log::debug!("Pattern `{pattern}` did not match any resource pool");
        }
        Ok::<_, ReportError>(refs)
    }))
    .await?;
    Ok(resolved.into_iter().flatten().collect())
}
