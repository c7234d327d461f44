//! Reference symbol catalog and pictogram classification.
//!
//! This module provides:
//! - The catalog type handed from the build phase to the classify phase
//! - Catalog construction from anchor pages (`builder`)
//! - Persistence as a `Symbol,Meaning` CSV (`catalog_file`)
//! - Threshold-based classification (`classify`)

pub mod builder;
pub mod catalog_file;
pub mod classify;

pub use builder::CatalogBuilder;
pub use classify::{classify, UNKNOWN_LABEL};

use image::GrayImage;
use std::path::PathBuf;

/// One reference symbol.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    /// Stable identifier, e.g. `symbol_3`
    pub id: String,
    /// Characteristic this symbol stands for
    pub meaning: String,
    /// Canonical reference image
    pub image: GrayImage,
    /// Where the canonical image was persisted
    pub path: PathBuf,
}

/// Reference symbols in discovery order.
///
/// Built once, then only read; classification iterates entries in order.
#[derive(Debug, Clone, Default)]
pub struct SymbolCatalog {
    entries: Vec<CatalogEntry>,
}

impl SymbolCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn push(&mut self, entry: CatalogEntry) {
        self.entries.push(entry);
    }
}
