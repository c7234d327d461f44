//! Layout configuration for catalog brochures.
//!
//! Loads the region tables from a JSON file when one is given. Every field
//! falls back to the built-in layout of the reference brochures, so a partial
//! file only needs to list what differs.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::region::Region;
use crate::error::{ExtractError, ExtractResult};
use crate::imaging::similarity::WINDOW;

/// Symbol anchors on one reference page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnchorPage {
    /// Zero-based page index
    pub page: usize,
    /// One entry per reference symbol. Each group lists alternate positions,
    /// tried in order until one is non-blank, to absorb small per-document drift.
    pub groups: Vec<Vec<Region>>,
}

/// Text and image fields read from each product page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldRegions {
    pub design_name: Region,
    pub tile_type: Region,
    /// Holds "size / class" text
    pub size_class: Region,
    pub tile_design: Region,
    pub design_preview: Region,
}

impl Default for FieldRegions {
    fn default() -> Self {
        Self {
            design_name: Region::new(56, 54, 300, 91),
            tile_type: Region::new(57, 91, 232, 112),
            size_class: Region::new(53, 484, 296, 520),
            tile_design: Region::new(66, 138, 409, 478),
            design_preview: Region::new(441, 70, 1195, 796),
        }
    }
}

/// Complete layout configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Reference pages scanned while building the symbol catalog
    #[serde(default = "default_symbol_anchors")]
    pub symbol_anchors: Vec<AnchorPage>,
    /// Meanings assigned to discovered symbols, in discovery order
    #[serde(default = "default_meanings")]
    pub meanings: Vec<String>,
    #[serde(default)]
    pub fields: FieldRegions,
    /// Pictogram slots on each product page, left to right
    #[serde(default = "default_logo_slots")]
    pub logo_slots: Vec<Region>,
    /// Similarity must be strictly above this to count as a match
    #[serde(default = "default_match_threshold")]
    pub match_threshold: f64,
    /// Side length of canonical comparison images
    #[serde(default = "default_canonical_size")]
    pub canonical_size: u32,
    /// Front-matter pages skipped at the start of every document
    #[serde(default = "default_leading_pages_skipped")]
    pub leading_pages_skipped: usize,
    /// Back-matter pages skipped at the end of every document
    #[serde(default = "default_trailing_pages_skipped")]
    pub trailing_pages_skipped: usize,
}

fn default_symbol_anchors() -> Vec<AnchorPage> {
    let single = |r: Region| vec![r];
    vec![
        AnchorPage {
            page: 2,
            groups: vec![
                single(Region::new(572, 386, 614, 422)),
                single(Region::new(674, 429, 716, 465)),
                single(Region::new(606, 471, 648, 507)),
                single(Region::new(708, 513, 750, 549)),
            ],
        },
        AnchorPage {
            page: 4,
            groups: default_logo_slots()[..5].iter().copied().map(single).collect(),
        },
        AnchorPage {
            page: 5,
            groups: default_logo_slots()[5..].iter().copied().map(single).collect(),
        },
    ]
}

fn default_meanings() -> Vec<String> {
    [
        "Anti Slip Surface",
        "Easy Installation",
        "Water Resistance",
        "High Durability",
        "Wall Tiles / Floor Tiles",
        "Random Design",
        "Fire Resistance",
        "Easy Maintenance",
        "Residential / Commercial Area",
    ]
    .iter()
    .map(|m| m.to_string())
    .collect()
}

fn default_logo_slots() -> Vec<Region> {
    vec![
        Region::new(301, 89, 318, 103),
        Region::new(324, 89, 340, 104),
        Region::new(347, 89, 363, 104),
        Region::new(369, 88, 385, 103),
        Region::new(392, 89, 409, 103),
        Region::new(1014, 819, 1037, 842),
        Region::new(1047, 819, 1070, 842),
        Region::new(1078, 819, 1101, 842),
        Region::new(1110, 820, 1133, 843),
        Region::new(1142, 820, 1165, 843),
    ]
}

fn default_match_threshold() -> f64 {
    0.7
}

fn default_canonical_size() -> u32 {
    100
}

fn default_leading_pages_skipped() -> usize {
    3
}

fn default_trailing_pages_skipped() -> usize {
    2
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            symbol_anchors: default_symbol_anchors(),
            meanings: default_meanings(),
            fields: FieldRegions::default(),
            logo_slots: default_logo_slots(),
            match_threshold: default_match_threshold(),
            canonical_size: default_canonical_size(),
            leading_pages_skipped: default_leading_pages_skipped(),
            trailing_pages_skipped: default_trailing_pages_skipped(),
        }
    }
}

impl LayoutConfig {
    /// Reads a layout file, returning parse and validation errors to the caller.
    pub fn load_strict(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read layout file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse layout file: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Rejected layout file: {}", path.display()))?;
        Ok(config)
    }

    /// Rejects layouts that could never classify a pictogram.
    pub fn validate(&self) -> ExtractResult<()> {
        if self.canonical_size < WINDOW {
            return Err(ExtractError::InvalidLayout(format!(
                "canonical_size {} is smaller than the {}x{} comparison window",
                self.canonical_size, WINDOW, WINDOW
            )));
        }
        if self.meanings.is_empty() {
            return Err(ExtractError::InvalidLayout(
                "meanings must list at least one characteristic".to_string(),
            ));
        }
        Ok(())
    }

    /// Loads the layout from `path`, or the built-in layout when the file is
    /// missing or unreadable.
    pub fn load(path: &Path) -> Self {
        tracing::info!("Looking for layout at: {}", path.display());

        if !path.exists() {
            tracing::info!("{} not found. Using built-in layout.", path.display());
            return Self::default();
        }

        match Self::load_strict(path) {
            Ok(config) => {
                tracing::info!("Layout loaded from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{:#}. Using built-in layout.", e);
                Self::default()
            }
        }
    }

    /// Page indices that may carry a product, in order.
    pub fn eligible_pages(&self, page_count: usize) -> std::ops::Range<usize> {
        let end = page_count.saturating_sub(self.trailing_pages_skipped);
        let start = self.leading_pages_skipped.min(end);
        start..end
    }
}
