//! Per-page record assembly.
//!
//! For each eligible page: OCR the text fields, save the two large assets
//! verbatim, and classify every non-blank pictogram slot against the catalog.

use anyhow::{Context, Result};
use image::{DynamicImage, RgbImage};
use std::path::{Path, PathBuf};

use super::record::{split_size_class, TileRecord};
use crate::imaging::{is_blank, normalize_for_comparison, remove_background};
use crate::layout::{crop, LayoutConfig, Region};
use crate::ocr::TextRecognizer;
use crate::paths::{document_stem, OutputLayout};
use crate::render::PageRenderer;
use crate::symbols::{classify, SymbolCatalog};

/// Extracts tile records using a fully built catalog.
pub struct PageExtractor<'a> {
    pub layout: &'a LayoutConfig,
    pub output: &'a OutputLayout,
    pub catalog: &'a SymbolCatalog,
    pub ocr: &'a dyn TextRecognizer,
}

impl<'a> PageExtractor<'a> {
    /// Processes every eligible page of one document.
    ///
    /// A failing page is logged with its document and page number and
    /// contributes no record; the remaining pages are still processed.
    pub fn extract_document(
        &self,
        renderer: &dyn PageRenderer,
        document: &Path,
    ) -> Result<Vec<TileRecord>> {
        let page_count = renderer.page_count(document)?;
        let stem = document_stem(document);
        self.output
            .ensure_document_dir(&stem)
            .context("Failed to create document output directory")?;

        let mut records = Vec::new();
        for page_index in self.layout.eligible_pages(page_count) {
            let result = renderer
                .render_page(document, page_index)
                .and_then(|raster| self.extract_page(&stem, page_index, &raster));

            match result {
                Ok(Some(record)) => {
                    tracing::info!(
                        "{} page {}: {} [{}]",
                        stem,
                        page_index + 1,
                        record.design_name,
                        record.characteristics_text()
                    );
                    records.push(record);
                }
                Ok(None) => {
                    tracing::debug!("{} page {}: no design name, skipped", stem, page_index + 1);
                }
                Err(e) => {
                    tracing::warn!(
                        "Error processing page {} in {}: {:#}",
                        page_index + 1,
                        document.display(),
                        e
                    );
                }
            }
        }

        Ok(records)
    }

    /// Builds the record for one rendered page.
    ///
    /// Returns `Ok(None)` when the design name is empty after trimming, which
    /// marks a page without a product.
    pub fn extract_page(
        &self,
        stem: &str,
        page_index: usize,
        raster: &RgbImage,
    ) -> Result<Option<TileRecord>> {
        let fields = &self.layout.fields;

        let design_name = self.read_text(raster, &fields.design_name)?;
        let tile_type = self.read_text(raster, &fields.tile_type)?;
        let size_class = self.read_text(raster, &fields.size_class)?;

        if design_name.is_empty() {
            return Ok(None);
        }

        let (size, tile_class) = split_size_class(&size_class);

        let tile_design_path =
            self.save_asset(raster, &fields.tile_design, stem, &design_name, "tile_design")?;
        let design_preview_path = self.save_asset(
            raster,
            &fields.design_preview,
            stem,
            &design_name,
            "design_preview",
        )?;

        let characteristics = self.classify_slots(raster, stem, page_index)?;

        Ok(Some(TileRecord {
            design_name,
            tile_type,
            tile_design_path,
            design_preview_path,
            size,
            tile_class,
            characteristics,
        }))
    }

    /// Labels for every non-blank pictogram slot, flattened in slot order.
    fn classify_slots(&self, raster: &RgbImage, stem: &str, page_index: usize) -> Result<Vec<String>> {
        let mut labels = Vec::new();

        for (slot, region) in self.layout.logo_slots.iter().enumerate() {
            let Some(logo) = crop(raster, region) else {
                continue;
            };
            if is_blank(&logo) {
                continue;
            }

            let cleaned = remove_background(&logo);
            let canonical = normalize_for_comparison(
                &DynamicImage::ImageRgb8(cleaned),
                self.layout.canonical_size,
            );

            let path = self.output.logo_path(stem, page_index + 1, slot + 1);
            canonical
                .save(&path)
                .with_context(|| format!("Failed to save logo image {}", path.display()))?;

            labels.extend(classify(&canonical, self.catalog, self.layout.match_threshold));
        }

        Ok(labels)
    }

    /// OCR text of a region, trimmed. An uncroppable region reads as empty.
    fn read_text(&self, raster: &RgbImage, region: &Region) -> Result<String> {
        match crop(raster, region) {
            Some(img) => Ok(self.ocr.recognize_text(&img)?.trim().to_string()),
            None => Ok(String::new()),
        }
    }

    /// Saves a presentation asset verbatim. Returns `None` if it cannot be cropped.
    fn save_asset(
        &self,
        raster: &RgbImage,
        region: &Region,
        stem: &str,
        design_name: &str,
        suffix: &str,
    ) -> Result<Option<PathBuf>> {
        let Some(asset) = crop(raster, region) else {
            return Ok(None);
        };

        let path = self.output.asset_path(stem, design_name, suffix);
        asset
            .save(&path)
            .with_context(|| format!("Failed to save {}", path.display()))?;
        Ok(Some(path))
    }
}
