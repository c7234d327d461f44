//! CSV output for extracted tile records.

use anyhow::{Context, Result};
use std::path::Path;

use super::record::TileRecord;

/// Result file columns, in order.
pub const RESULT_COLUMNS: [&str; 7] = [
    "Design Name",
    "Type",
    "Tile Design Image Path",
    "Design Preview Image Path",
    "Size",
    "Tile Class",
    "Characteristics",
];

/// Writes all records at once, replacing any existing file.
///
/// The header is written even when there are no records.
pub fn write_results(records: &[TileRecord], path: &Path) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to create results file: {}", path.display()))?;

    writer
        .write_record(RESULT_COLUMNS)
        .context("Failed to write results header")?;

    for record in records {
        writer
            .serialize(record.to_row())
            .with_context(|| format!("Failed to write row for {}", record.design_name))?;
    }

    writer.flush().context("Failed to flush results file")?;
    Ok(())
}
