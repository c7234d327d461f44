//! CSV persistence for the symbol catalog.
//!
//! The file has exactly two columns, `Symbol` (path of the persisted canonical
//! image) and `Meaning`. It is the hand-off between the build and classify
//! phases, so reloading regenerates canonical images from the stored PNGs
//! instead of trusting any in-memory state.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::{CatalogEntry, SymbolCatalog};
use crate::error::ExtractError;
use crate::imaging::normalize_for_comparison;

/// One row of the catalog file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SymbolRow {
    #[serde(rename = "Symbol")]
    pub symbol: PathBuf,
    #[serde(rename = "Meaning")]
    pub meaning: String,
}

/// Writes the catalog, replacing any existing file.
pub fn save_catalog(catalog: &SymbolCatalog, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create symbol catalog: {}", path.display()))?;

    // Header is written explicitly so an empty catalog still has both columns
    writer
        .write_record(["Symbol", "Meaning"])
        .context("Failed to write catalog header")?;

    for entry in catalog.entries() {
        writer
            .write_record([&*entry.path.to_string_lossy(), entry.meaning.as_str()])
            .context("Failed to write catalog row")?;
    }

    writer.flush().context("Failed to flush symbol catalog")?;
    Ok(())
}

/// Reads catalog rows without loading any images.
pub fn read_rows(path: &Path) -> Result<Vec<SymbolRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open symbol catalog: {}", path.display()))?;

    let headers = reader.headers().context("Failed to read catalog header")?;
    if headers.len() != 2 || &headers[0] != "Symbol" || &headers[1] != "Meaning" {
        return Err(ExtractError::CatalogFormat(format!(
            "expected columns Symbol,Meaning in {}",
            path.display()
        ))
        .into());
    }

    let mut rows = Vec::new();
    for (line_num, result) in reader.deserialize::<SymbolRow>().enumerate() {
        let row = result.with_context(|| {
            format!("Malformed catalog row {} in {}", line_num + 2, path.display())
        })?;
        rows.push(row);
    }

    Ok(rows)
}

/// Reloads a catalog, regenerating each canonical image from its stored PNG.
///
/// Rows whose image cannot be opened are skipped with a warning, the same
/// way a missing anchor is tolerated during construction.
pub fn load_catalog(path: &Path, canonical_size: u32) -> Result<SymbolCatalog> {
    let rows = read_rows(path)?;
    let mut catalog = SymbolCatalog::new();

    for (index, row) in rows.into_iter().enumerate() {
        let stored = match image::open(&row.symbol) {
            Ok(img) => img,
            Err(e) => {
                tracing::warn!(
                    "Skipping symbol {} ({}): {}",
                    row.symbol.display(),
                    row.meaning,
                    e
                );
                continue;
            }
        };

        catalog.push(CatalogEntry {
            id: format!("symbol_{}", index + 1),
            meaning: row.meaning,
            image: normalize_for_comparison(&stored, canonical_size),
            path: row.symbol,
        });
    }

    tracing::info!("Loaded {} symbols from {}", catalog.len(), path.display());
    Ok(catalog)
}
