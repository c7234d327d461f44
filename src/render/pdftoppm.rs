//! Rendering through poppler's `pdftoppm`.

use anyhow::{anyhow, Context, Result};
use image::RgbImage;
use std::path::Path;
use std::process::Command;

use super::PageRenderer;

/// Resolution at which one PDF point maps to one pixel.
pub const DEFAULT_DPI: u32 = 72;

/// Renders single pages with `pdftoppm` and counts pages with `lopdf`.
#[derive(Clone, Debug)]
pub struct PdftoppmRenderer {
    dpi: u32,
}

impl PdftoppmRenderer {
    pub fn new(dpi: u32) -> Self {
        Self { dpi }
    }
}

impl Default for PdftoppmRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_DPI)
    }
}

impl PageRenderer for PdftoppmRenderer {
    fn page_count(&self, document: &Path) -> Result<usize> {
        let doc = lopdf::Document::load(document)
            .with_context(|| format!("Failed to open PDF: {}", document.display()))?;
        Ok(doc.get_pages().len())
    }

    fn render_page(&self, document: &Path, page_index: usize) -> Result<RgbImage> {
        let temp_dir = tempfile::tempdir()?;
        let output_base = temp_dir.path().join("page");
        // pdftoppm numbers pages from 1
        let page = (page_index + 1).to_string();

        let output = Command::new("pdftoppm")
            .arg("-png")
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg("-f")
            .arg(&page)
            .arg("-l")
            .arg(&page)
            .arg("-singlefile")
            .arg(document)
            .arg(&output_base)
            .output()
            .context("Failed to execute pdftoppm (install poppler-utils)")?;

        if !output.status.success() {
            return Err(anyhow!(
                "pdftoppm failed on page {} of {}: {}",
                page,
                document.display(),
                String::from_utf8_lossy(&output.stderr)
            ));
        }

        let png_path = output_base.with_extension("png");
        let raster = image::open(&png_path)
            .with_context(|| format!("Failed to read rendered page {}", png_path.display()))?;

        Ok(raster.to_rgb8())
    }
}
