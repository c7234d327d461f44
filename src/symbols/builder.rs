//! Symbol catalog construction from reference anchor pages.
//!
//! For every anchor group the first alternate position that crops cleanly and
//! is not blank becomes a reference symbol. Meanings are handed out in order
//! from the configured list, and the counter is shared across all reference
//! documents: once every meaning is assigned, later anchors are ignored.

use anyhow::{Context, Result};
use image::{DynamicImage, RgbImage};
use std::path::Path;

use super::{CatalogEntry, SymbolCatalog};
use crate::imaging::{is_blank, normalize_for_comparison};
use crate::layout::{crop, AnchorPage, LayoutConfig, Region};
use crate::paths::{document_stem, OutputLayout};
use crate::render::PageRenderer;

/// Accumulates reference symbols until `finish` hands over the catalog.
pub struct CatalogBuilder<'a> {
    layout: &'a LayoutConfig,
    output: &'a OutputLayout,
    catalog: SymbolCatalog,
    next_meaning: usize,
}

impl<'a> CatalogBuilder<'a> {
    pub fn new(layout: &'a LayoutConfig, output: &'a OutputLayout) -> Self {
        Self {
            layout,
            output,
            catalog: SymbolCatalog::new(),
            next_meaning: 0,
        }
    }

    /// True once every configured meaning has been assigned.
    pub fn is_full(&self) -> bool {
        self.next_meaning >= self.layout.meanings.len()
    }

    /// Scans the anchor pages of one reference document.
    ///
    /// Returns the number of symbols added. Anchor pages past the end of the
    /// document are skipped; a page that fails to render is logged and
    /// skipped without affecting the others.
    pub fn add_document(&mut self, renderer: &dyn PageRenderer, document: &Path) -> Result<usize> {
        let page_count = renderer.page_count(document)?;
        let stem = document_stem(document);
        let before = self.catalog.len();
        let layout = self.layout;

        for anchor in &layout.symbol_anchors {
            if self.is_full() {
                break;
            }
            if anchor.page >= page_count {
                tracing::debug!(
                    "{}: anchor page {} beyond {} pages, skipped",
                    stem,
                    anchor.page,
                    page_count
                );
                continue;
            }

            let raster = match renderer.render_page(document, anchor.page) {
                Ok(raster) => raster,
                Err(e) => {
                    tracing::warn!(
                        "Error rendering anchor page {} in {}: {:#}",
                        anchor.page + 1,
                        document.display(),
                        e
                    );
                    continue;
                }
            };

            self.add_page(&stem, &raster, anchor)?;
        }

        let added = self.catalog.len() - before;
        tracing::info!("{}: {} reference symbols extracted", stem, added);
        Ok(added)
    }

    /// Adds the symbols found on one rendered anchor page.
    pub fn add_page(&mut self, stem: &str, raster: &RgbImage, anchor: &AnchorPage) -> Result<()> {
        for group in &anchor.groups {
            if self.is_full() {
                return Ok(());
            }
            let Some(symbol) = first_non_blank(raster, group) else {
                continue;
            };

            let canonical = normalize_for_comparison(
                &DynamicImage::ImageRgb8(symbol),
                self.layout.canonical_size,
            );

            let number = self.next_meaning + 1;
            let meaning = self.layout.meanings[self.next_meaning].clone();
            let path = self.output.symbol_path(stem, number);
            canonical
                .save(&path)
                .with_context(|| format!("Failed to save symbol image {}", path.display()))?;

            tracing::info!("symbol_{} -> {} ({})", number, meaning, path.display());
            self.catalog.push(CatalogEntry {
                id: format!("symbol_{}", number),
                meaning,
                image: canonical,
                path,
            });
            self.next_meaning += 1;
        }

        Ok(())
    }

    pub fn finish(self) -> SymbolCatalog {
        if !self.is_full() {
            tracing::warn!(
                "Only {} of {} meanings were found on the reference pages",
                self.next_meaning,
                self.layout.meanings.len()
            );
        }
        self.catalog
    }
}

/// Returns the first alternate region that crops successfully and has content.
pub fn first_non_blank(raster: &RgbImage, alternates: &[Region]) -> Option<RgbImage> {
    alternates
        .iter()
        .filter_map(|region| crop(raster, region))
        .find(|img| !is_blank(img))
}
