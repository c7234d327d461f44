//! Two-phase batch pipeline.
//!
//! Phase 1 builds the symbol catalog from the anchor pages of every document.
//! Phase 2 extracts tile records from every document against that catalog.
//! Each phase returns its accumulated output; the catalog CSV written between
//! them lets phase 2 run later from a previous phase 1.

use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

use crate::extract::{write_results, PageExtractor, TileRecord};
use crate::layout::LayoutConfig;
use crate::ocr::TextRecognizer;
use crate::paths::OutputLayout;
use crate::render::PageRenderer;
use crate::symbols::catalog_file::{load_catalog, save_catalog};
use crate::symbols::{CatalogBuilder, SymbolCatalog};

/// Paths and switches for one batch run.
#[derive(Clone, Debug)]
pub struct BatchSettings {
    /// Folder scanned for `*.pdf` documents
    pub pdf_dir: PathBuf,
    pub output: OutputLayout,
    /// Catalog hand-off file between the two phases
    pub symbols_csv: PathBuf,
    pub results_csv: PathBuf,
    /// Skip phase 1 and load `symbols_csv` from an earlier run
    pub reuse_catalog: bool,
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub documents: usize,
    pub symbols: usize,
    pub records: usize,
}

/// Lists the PDF files directly inside `dir`, sorted by path.
pub fn discover_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read document folder: {}", dir.display()))?;

    let mut documents = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if is_pdf && path.is_file() {
            documents.push(path);
        }
    }

    documents.sort();
    Ok(documents)
}

/// Phase 1: builds the catalog across all documents.
///
/// A document that cannot be opened is logged and skipped.
pub fn build_catalog(
    renderer: &dyn PageRenderer,
    documents: &[PathBuf],
    layout: &LayoutConfig,
    output: &OutputLayout,
) -> SymbolCatalog {
    let mut builder = CatalogBuilder::new(layout, output);

    for document in documents {
        if builder.is_full() {
            tracing::info!(
                "All {} meanings assigned, skipping remaining documents",
                layout.meanings.len()
            );
            break;
        }
        if let Err(e) = builder.add_document(renderer, document) {
            tracing::warn!("Error extracting symbols from {}: {:#}", document.display(), e);
        }
    }

    builder.finish()
}

/// Phase 2: extracts tile records from all documents.
///
/// A document that cannot be opened is logged and skipped.
pub fn extract_records(
    renderer: &dyn PageRenderer,
    ocr: &dyn TextRecognizer,
    documents: &[PathBuf],
    layout: &LayoutConfig,
    output: &OutputLayout,
    catalog: &SymbolCatalog,
) -> Vec<TileRecord> {
    let extractor = PageExtractor {
        layout,
        output,
        catalog,
        ocr,
    };

    let mut records = Vec::new();
    for document in documents {
        tracing::info!("Processing {}", document.display());
        match extractor.extract_document(renderer, document) {
            Ok(found) => records.extend(found),
            Err(e) => tracing::warn!("Error processing {}: {:#}", document.display(), e),
        }
    }

    records
}

/// Runs both phases over a folder and writes the catalog and result files.
pub fn run_batch(
    settings: &BatchSettings,
    layout: &LayoutConfig,
    renderer: &dyn PageRenderer,
    ocr: &dyn TextRecognizer,
) -> Result<BatchSummary> {
    settings
        .output
        .ensure_directories()
        .context("Failed to create output directory")?;

    let documents = discover_documents(&settings.pdf_dir)?;
    tracing::info!(
        "Found {} documents in {}",
        documents.len(),
        settings.pdf_dir.display()
    );

    if settings.reuse_catalog {
        if !settings.symbols_csv.exists() {
            return Err(anyhow!(
                "No symbol catalog at {} to reuse",
                settings.symbols_csv.display()
            ));
        }
        tracing::info!("Reusing symbol catalog {}", settings.symbols_csv.display());
    } else {
        let built = build_catalog(renderer, &documents, layout, &settings.output);
        save_catalog(&built, &settings.symbols_csv)?;
        tracing::info!(
            "Saved {} symbols to {}",
            built.len(),
            settings.symbols_csv.display()
        );
    }

    let catalog = load_catalog(&settings.symbols_csv, layout.canonical_size)?;

    let records = extract_records(
        renderer,
        ocr,
        &documents,
        layout,
        &settings.output,
        &catalog,
    );
    write_results(&records, &settings.results_csv)?;
    tracing::info!(
        "Wrote {} tile records to {}",
        records.len(),
        settings.results_csv.display()
    );

    Ok(BatchSummary {
        documents: documents.len(),
        symbols: catalog.len(),
        records: records.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{AnchorPage, Region};
    use crate::testing::{MemoryRenderer, ScriptedOcr};
    use image::{Rgb, RgbImage};
    use tempfile::{tempdir, TempDir};

    const PAGE_WIDTH: u32 = 1224;
    const PAGE_HEIGHT: u32 = 864;

    fn white_page() -> RgbImage {
        RgbImage::from_pixel(PAGE_WIDTH, PAGE_HEIGHT, Rgb([255, 255, 255]))
    }

    /// Draws a small asymmetric glyph filling most of `region`.
    fn draw_pictogram(page: &mut RgbImage, region: &Region) {
        for x in region.left + 2..region.right - 2 {
            page.put_pixel(x, region.top + 3, Rgb([0, 0, 0]));
        }
        for y in region.top + 3..region.bottom - 2 {
            page.put_pixel(region.left + 4, y, Rgb([0, 0, 0]));
        }
        page.put_pixel(region.right - 4, region.bottom - 4, Rgb([90, 90, 90]));
    }

    /// Default brochure layout, except pages 2.. are eligible and the only
    /// anchor is the first pictogram slot of page 2.
    fn three_page_layout() -> LayoutConfig {
        let defaults = LayoutConfig::default();
        LayoutConfig {
            symbol_anchors: vec![AnchorPage {
                page: 2,
                groups: vec![vec![defaults.logo_slots[0]]],
            }],
            leading_pages_skipped: 2,
            trailing_pages_skipped: 0,
            ..defaults
        }
    }

    fn settings(pdf_dir: &Path, out: &TempDir) -> BatchSettings {
        BatchSettings {
            pdf_dir: pdf_dir.to_path_buf(),
            output: OutputLayout::new(out.path().join("extracted_images")),
            symbols_csv: out.path().join("extracted_symbols.csv"),
            results_csv: out.path().join("extracted_tile_details.csv"),
            reuse_catalog: false,
        }
    }

    #[test]
    fn test_discover_documents_filters_and_sorts() {
        let dir = tempdir().unwrap();
        for name in ["b.pdf", "a.PDF", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::create_dir(dir.path().join("dir.pdf")).unwrap();

        let docs = discover_documents(dir.path()).unwrap();
        let names: Vec<String> = docs
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.PDF", "b.pdf"]);
    }

    #[test]
    fn test_pictogram_at_anchor_resolves_to_its_meaning() {
        let pdfs = tempdir().unwrap();
        let out = tempdir().unwrap();
        std::fs::write(pdfs.path().join("brochure.pdf"), b"").unwrap();

        let layout = three_page_layout();
        let mut product_page = white_page();
        draw_pictogram(&mut product_page, &layout.logo_slots[0]);
        let renderer = MemoryRenderer::default().with_document(
            "brochure.pdf",
            vec![white_page(), white_page(), product_page],
        );
        let ocr = ScriptedOcr::new(&["Statuario Gold", "Glazed Vitrified", "60x60 / Glossy"]);

        let settings = settings(pdfs.path(), &out);
        let summary = run_batch(&settings, &layout, &renderer, &ocr).unwrap();

        assert_eq!(
            summary,
            BatchSummary {
                documents: 1,
                symbols: 1,
                records: 1
            }
        );

        let mut reader = csv::Reader::from_path(&settings.results_csv).unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "Statuario Gold");
        assert_eq!(&rows[0][4], "60x60");
        assert_eq!(&rows[0][5], "Glossy");
        assert!(rows[0][6].contains("Anti Slip Surface"));

        let symbols = std::fs::read_to_string(&settings.symbols_csv).unwrap();
        assert!(symbols.contains("brochure_symbol_1.png,Anti Slip Surface"));
        let asset = settings
            .output
            .document_dir("brochure")
            .join("Statuario Gold_tile_design.png");
        assert!(asset.exists());
    }

    #[test]
    fn test_empty_design_name_produces_no_record() {
        let pdfs = tempdir().unwrap();
        let out = tempdir().unwrap();
        std::fs::write(pdfs.path().join("brochure.pdf"), b"").unwrap();

        let layout = LayoutConfig::default();
        let renderer =
            MemoryRenderer::default().with_document("brochure.pdf", vec![white_page(); 7]);
        let ocr = ScriptedOcr::new(&[]);

        let summary = run_batch(&settings(pdfs.path(), &out), &layout, &renderer, &ocr).unwrap();

        assert_eq!(summary.records, 0);
        assert_eq!(summary.symbols, 0);
    }

    #[test]
    fn test_unreadable_document_does_not_stop_the_batch() {
        let pdfs = tempdir().unwrap();
        let out = tempdir().unwrap();
        std::fs::write(pdfs.path().join("a_broken.pdf"), b"").unwrap();
        std::fs::write(pdfs.path().join("b_brochure.pdf"), b"").unwrap();

        let layout = three_page_layout();
        let renderer = MemoryRenderer::default()
            .with_document("b_brochure.pdf", vec![white_page(), white_page(), white_page()]);
        let ocr = ScriptedOcr::new(&["Onyx", "Floor Tile", "60x60"]);

        let summary = run_batch(&settings(pdfs.path(), &out), &layout, &renderer, &ocr).unwrap();

        assert_eq!(summary.documents, 2);
        assert_eq!(summary.records, 1);
    }

    #[test]
    fn test_reuse_catalog_requires_existing_file() {
        let pdfs = tempdir().unwrap();
        let out = tempdir().unwrap();
        let mut settings = settings(pdfs.path(), &out);
        settings.reuse_catalog = true;

        let err = run_batch(
            &settings,
            &LayoutConfig::default(),
            &MemoryRenderer::default(),
            &ScriptedOcr::new(&[]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("No symbol catalog"));
    }

    #[test]
    fn test_catalog_and_records_phases_chain_in_memory() {
        let out = tempdir().unwrap();
        let output = OutputLayout::new(out.path());
        output.ensure_directories().unwrap();

        let layout = three_page_layout();
        let mut product_page = white_page();
        draw_pictogram(&mut product_page, &layout.logo_slots[0]);
        let renderer = MemoryRenderer::default().with_document(
            "brochure.pdf",
            vec![white_page(), white_page(), product_page],
        );
        let documents = vec![PathBuf::from("brochure.pdf")];

        let catalog = build_catalog(&renderer, &documents, &layout, &output);
        assert_eq!(catalog.len(), 1);

        let ocr = ScriptedOcr::new(&["Marquina", "Wall Tile", "30x60"]);
        let records = extract_records(&renderer, &ocr, &documents, &layout, &output, &catalog);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].characteristics, vec!["Anti Slip Surface".to_string()]);
        assert_eq!(records[0].tile_class, "Unknown");
    }
}
