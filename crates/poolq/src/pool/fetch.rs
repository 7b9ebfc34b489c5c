use vmobj::error::VmError;
use vmobj::mapping::decode;
use vmobj::{Map, ObjectContent, ObjectReference, PropertyCollector, PropertyPath, PropertyTable};

use crate::pool::record::ResourcePoolRecord;

/// Which properties are requested from the collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSelection {
    /// Only the properties needed for the formatted report.
    Narrow,
    /// The complete default property set of each pool.
    Full,
}

/// Retrieves resource pool records with a single batched call.
pub struct PoolFetcher {
    table: PropertyTable<ResourcePoolRecord>,
}

impl PoolFetcher {
    pub fn new() -> vmobj::Result<Self> {
        let table = PropertyTable::<ResourcePoolRecord>::builder()
            .property("name", |pool: &mut ResourcePoolRecord, value| {
                pool.name = decode(value)?;
                Ok(())
            })
            .property("config.cpuAllocation", |pool: &mut ResourcePoolRecord, value| {
                pool.cpu_allocation = decode(value)?;
                Ok(())
            })
            .property(
                "config.memoryAllocation",
                |pool: &mut ResourcePoolRecord, value| {
                    pool.memory_allocation = decode(value)?;
                    Ok(())
                },
            )
            .property("runtime.cpu", |pool: &mut ResourcePoolRecord, value| {
                pool.cpu_usage = decode(value)?;
                Ok(())
            })
            .property("runtime.memory", |pool: &mut ResourcePoolRecord, value| {
                pool.memory_usage = decode(value)?;
                Ok(())
            })
            .build()?;
        Ok(Self { table })
    }

    pub fn paths(&self, selection: PathSelection) -> Vec<PropertyPath> {
        match selection {
            PathSelection::Narrow => self.table.paths().cloned().collect(),
            PathSelection::Full => Vec::new(),
        }
    }

    pub async fn fetch<C: PropertyCollector + ?Sized>(
        &self,
        collector: &C,
        refs: &[ObjectReference],
        selection: PathSelection,
    ) -> vmobj::Result<Vec<ResourcePoolRecord>> {
        let paths = self.paths(selection);
        self.fetch_paths(collector, refs, &paths).await
    }

    /// Fetches `paths` of all `refs` and returns one record per reference, in the order of `refs`.
    ///
    /// An empty `paths` list fetches the full property set and keeps it on the records.
    pub async fn fetch_paths<C: PropertyCollector + ?Sized>(
        &self,
        collector: &C,
        refs: &[ObjectReference],
        paths: &[PropertyPath],
    ) -> vmobj::Result<Vec<ResourcePoolRecord>> {
        if refs.is_empty() {
            return Ok(Vec::new());
        }
        self.table.check_request(paths)?;

        let contents = collector.retrieve_properties(refs, paths).await?;
        log::debug!(
            "Retrieved properties of {} objects for {} references",
            contents.len(),
            refs.len()
        );

        let by_reference: Map<&ObjectReference, &ObjectContent> =
            contents.iter().map(|content| (&content.obj, content)).collect();
        refs.iter()
            .map(|reference| {
                let content = by_reference
                    .get(reference)
                    .ok_or_else(|| VmError::ManagedObjectNotFound(reference.clone()))?;
                self.build_record(content, paths.is_empty())
            })
            .collect()
    }

    fn build_record(
        &self,
        content: &ObjectContent,
        keep_properties: bool,
    ) -> vmobj::Result<ResourcePoolRecord> {
        let mut record = ResourcePoolRecord::new(content.obj.clone());
        let missing = self.table.apply(&mut record, content)?;
        if !missing.is_empty() {
            log::debug!(
                "Properties {} of {} were not delivered",
                missing
                    .iter()
                    .map(|p| p.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
                content.obj
            );
        }
        if keep_properties {
            record.properties = content
                .prop_set
                .iter()
                .map(|prop| (prop.name.to_string(), prop.val.clone()))
                .collect();
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::{PathSelection, PoolFetcher};
    use crate::pool::record::{Shares, SharesLevel};
    use crate::tests::utils::{CountingCollector, pool_content, pool_ref};
    use vmobj::PropertyPath;
    use vmobj::error::VmError;

    #[test]
    fn test_narrow_paths() {
        let fetcher = PoolFetcher::new().unwrap();
        let paths: Vec<_> = fetcher
            .paths(PathSelection::Narrow)
            .into_iter()
            .map(|p| p.to_string())
            .collect();
        assert_eq!(
            paths,
            vec![
                "name",
                "config.cpuAllocation",
                "config.memoryAllocation",
                "runtime.cpu",
                "runtime.memory"
            ]
        );
        assert!(fetcher.paths(PathSelection::Full).is_empty());
    }

    #[tokio::test]
    async fn test_empty_references_skip_remote_call() {
        let collector = CountingCollector::new(vec![]);
        let fetcher = PoolFetcher::new().unwrap();
        let records = fetcher
            .fetch(&collector, &[], PathSelection::Narrow)
            .await
            .unwrap();
        assert!(records.is_empty());
        assert_eq!(collector.calls(), 0);
    }

    #[tokio::test]
    async fn test_single_batched_call() {
        let collector = CountingCollector::new(vec![
            pool_content("resgroup-1", "a"),
            pool_content("resgroup-2", "b"),
        ]);
        let fetcher = PoolFetcher::new().unwrap();
        let records = fetcher
            .fetch(
                &collector,
                &[pool_ref("resgroup-1"), pool_ref("resgroup-2")],
                PathSelection::Narrow,
            )
            .await
            .unwrap();
        assert_eq!(collector.calls(), 1);
        assert_eq!(collector.requests()[0].0.len(), 2);
        assert_eq!(collector.requests()[0].1.len(), 5);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].cpu_allocation.shares, Shares::Custom(2000));
        assert_eq!(
            records[0].memory_allocation.shares,
            Shares::Level(SharesLevel::Normal)
        );
        assert!(records[0].properties.is_empty());
    }

    #[tokio::test]
    async fn test_records_follow_reference_order() {
        // The collector answers in its own order
        let collector = CountingCollector::new(vec![
            pool_content("resgroup-2", "b"),
            pool_content("resgroup-1", "a"),
        ]);
        let fetcher = PoolFetcher::new().unwrap();
        let records = fetcher
            .fetch(
                &collector,
                &[
                    pool_ref("resgroup-1"),
                    pool_ref("resgroup-2"),
                    pool_ref("resgroup-1"),
                ],
                PathSelection::Narrow,
            )
            .await
            .unwrap();
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "a"]);
        assert_eq!(records[2].reference, pool_ref("resgroup-1"));
    }

    #[tokio::test]
    async fn test_full_selection_keeps_properties() {
        let collector = CountingCollector::new(vec![pool_content("resgroup-1", "a")]);
        let fetcher = PoolFetcher::new().unwrap();
        let records = fetcher
            .fetch(&collector, &[pool_ref("resgroup-1")], PathSelection::Full)
            .await
            .unwrap();
        assert!(collector.requests()[0].1.is_empty());
        let record = &records[0];
        assert_eq!(record.name, "a");
        assert_eq!(record.cpu_usage.max_usage, 1000);
        assert!(record.properties.contains_key("config"));
        assert!(record.properties.contains_key("runtime"));
    }

    #[tokio::test]
    async fn test_unknown_path_fails_before_remote_call() {
        let collector = CountingCollector::new(vec![pool_content("resgroup-1", "a")]);
        let fetcher = PoolFetcher::new().unwrap();
        let result = fetcher
            .fetch_paths(
                &collector,
                &[pool_ref("resgroup-1")],
                &[PropertyPath::new("summary.quickStats").unwrap()],
            )
            .await;
        assert!(matches!(result, Err(VmError::UnknownProperty(_))));
        assert_eq!(collector.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_object_in_response() {
        let collector = CountingCollector::new(vec![pool_content("resgroup-1", "a")]);
        let fetcher = PoolFetcher::new().unwrap();
        let result = fetcher
            .fetch(
                &collector,
                &[pool_ref("resgroup-1"), pool_ref("resgroup-9")],
                PathSelection::Narrow,
            )
            .await;
        assert!(matches!(result, Err(VmError::ManagedObjectNotFound(_))));
    }

    #[tokio::test]
    async fn test_absent_optional_fields() {
        let mut content = pool_content("resgroup-1", "a");
        content.prop_set.retain(|p| p.name.as_str() != "runtime");
        if let Some(config) = content.prop_set.iter_mut().find(|p| p.name.as_str() == "config") {
            config.val["cpuAllocation"]
                .as_object_mut()
                .unwrap()
                .remove("expandableReservation");
        }
        let collector = CountingCollector::new(vec![content]);
        let fetcher = PoolFetcher::new().unwrap();
        let records = fetcher
            .fetch(&collector, &[pool_ref("resgroup-1")], PathSelection::Narrow)
            .await
            .unwrap();
        assert_eq!(records[0].cpu_allocation.expandable_reservation, None);
        assert!(!records[0].cpu_allocation.expandable());
        assert_eq!(records[0].cpu_usage.max_usage, 0);
    }

    #[tokio::test]
    async fn test_retrieval_failure() {
        let collector = CountingCollector::failing("connection reset");
        let fetcher = PoolFetcher::new().unwrap();
        let result = fetcher
            .fetch(&collector, &[pool_ref("resgroup-1")], PathSelection::Narrow)
            .await;
        assert!(matches!(result, Err(VmError::GenericError(_))));
        assert_eq!(collector.calls(), 1);
    }
}
