use std::io::Write;

use tabwriter::TabWriter;

use crate::common::error::PoolqError;
use crate::pool::record::{AllocationInfo, ResourceDimension, ResourcePoolRecord, UsageSnapshot};

const MIN_COLUMN_WIDTH: usize = 2;
const COLUMN_PADDING: usize = 2;

/// Renders one aligned block per record, in the order of `records`.
pub fn render_tabular(records: &[ResourcePoolRecord]) -> crate::Result<String> {
    let mut buffer = Vec::new();
    let mut writer = TabWriter::new(&mut buffer)
        .minwidth(MIN_COLUMN_WIDTH)
        .padding(COLUMN_PADDING);
    for record in records {
        writeln!(writer, "Name:\t{}", record.name)?;
        for dimension in ResourceDimension::ALL {
            write_dimension(
                &mut writer,
                dimension,
                record.usage(dimension),
                record.allocation(dimension),
            )?;
        }
    }
    writer.flush()?;
    drop(writer);
    String::from_utf8(buffer).map_err(|error| PoolqError::GenericError(error.to_string()))
}

fn write_dimension(
    writer: &mut impl Write,
    dimension: ResourceDimension,
    usage: &UsageSnapshot,
    allocation: &AllocationInfo,
) -> std::io::Result<()> {
    let label = dimension.label();
    let unit = dimension.unit();
    writeln!(
        writer,
        "  {label} Usage:\t{}{unit} ({:.1}%)",
        usage.overall_usage,
        usage.utilization()
    )?;
    writeln!(writer, "  {label} Shares:\t{}", allocation.shares)?;
    writeln!(
        writer,
        "  {label} Reservation:\t{}{unit} (expandable={})",
        allocation.reservation,
        allocation.expandable()
    )?;
    writeln!(
        writer,
        "  {label} Limit:\t{}",
        format_limit(allocation, unit)
    )
}

fn format_limit(allocation: &AllocationInfo, unit: &str) -> String {
    if allocation.is_unlimited() {
        "unlimited".to_string()
    } else {
        format!("{}{unit}", allocation.limit)
    }
}

/// Serializes the records as they are, without any derived values.
pub fn render_structured(records: &[ResourcePoolRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}
