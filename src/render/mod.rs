//! Page rasterization for PDF brochures.
//!
//! This module provides:
//! - The `PageRenderer` seam used by the pipeline
//! - A poppler-based implementation (`PdftoppmRenderer`)

pub mod pdftoppm;

pub use pdftoppm::{PdftoppmRenderer, DEFAULT_DPI};

use anyhow::Result;
use image::RgbImage;
use std::path::Path;

/// Produces one raster per document page.
///
/// Rasters must keep a fixed pixel scale across documents, since every region
/// in the layout is an absolute pixel rectangle.
pub trait PageRenderer {
    fn page_count(&self, document: &Path) -> Result<usize>;

    /// Renders the zero-based page `page_index` as RGB.
    fn render_page(&self, document: &Path, page_index: usize) -> Result<RgbImage>;
}
