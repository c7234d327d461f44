//! Tile Catalog Extractor
//!
//! Batch entry point: builds the pictogram catalog from every brochure in a
//! folder, then extracts one record per product page into a CSV file.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use tile_extract::layout::LayoutConfig;
use tile_extract::ocr::{OcrSettings, TesseractOcr};
use tile_extract::paths::OutputLayout;
use tile_extract::render::{PdftoppmRenderer, DEFAULT_DPI};
use tile_extract::{run_batch, BatchSettings};

const LOG_FILE_NAME: &str = "tile_extract.log";
const TIMESTAMP_FORMAT: &str = "%H:%M:%S%.3f";

#[derive(Parser, Debug)]
#[command(name = "tile-extract")]
#[command(about = "Extract tile records and pictogram characteristics from PDF catalogs")]
struct Cli {
    /// Folder containing the PDF catalogs
    pdf_dir: PathBuf,

    /// Folder for symbols, logos, assets and logs
    #[arg(short, long, default_value = "extracted_images")]
    output_dir: PathBuf,

    /// Symbol catalog CSV
    #[arg(long, default_value = "extracted_symbols.csv")]
    symbols_csv: PathBuf,

    /// Tile details CSV
    #[arg(long, default_value = "extracted_tile_details.csv")]
    results_csv: PathBuf,

    /// Layout JSON overriding the built-in page geometry
    #[arg(short, long)]
    layout: Option<PathBuf>,

    /// Rasterization resolution in pixels per inch
    #[arg(long, default_value_t = DEFAULT_DPI)]
    dpi: u32,

    /// Path to the tesseract executable
    #[arg(long)]
    tesseract: Option<PathBuf>,

    /// Tesseract language
    #[arg(long, default_value = "eng")]
    lang: String,

    /// Tesseract page segmentation mode
    #[arg(long, default_value_t = 3)]
    psm: u8,

    /// Skip catalog building and reuse an existing symbols CSV
    #[arg(long)]
    reuse_catalog: bool,
}

/// Console plus an appended log file under the output folder.
///
/// Falls back to console-only logging when the file cannot be opened.
fn init_logging(logs_dir: &Path) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let console = fmt::layer().with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()));

    let file = std::fs::create_dir_all(logs_dir).and_then(|_| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(logs_dir.join(LOG_FILE_NAME))
    });

    match file {
        Ok(file) => {
            let file_layer = fmt::layer()
                .with_ansi(false)
                .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()))
                .with_writer(Mutex::new(file));
            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .with(file_layer)
                .init();
        }
        Err(e) => {
            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .init();
            tracing::warn!("Could not open log file in {}: {}", logs_dir.display(), e);
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = OutputLayout::new(&cli.output_dir);

    init_logging(&output.logs_dir());

    // Route panics through the log file as well
    std::panic::set_hook(Box::new(|panic_info| {
        tracing::error!("[PANIC] {}", panic_info);
    }));

    let layout = match &cli.layout {
        Some(path) => LayoutConfig::load(path),
        None => LayoutConfig::default(),
    };

    let ocr = TesseractOcr::new(OcrSettings {
        executable: cli.tesseract.clone(),
        language: cli.lang.clone(),
        psm: cli.psm,
    })
    .context("Tesseract is required for text extraction")?;
    let renderer = PdftoppmRenderer::new(cli.dpi);

    let settings = BatchSettings {
        pdf_dir: cli.pdf_dir,
        output,
        symbols_csv: cli.symbols_csv,
        results_csv: cli.results_csv,
        reuse_catalog: cli.reuse_catalog,
    };

    let summary = run_batch(&settings, &layout, &renderer, &ocr)?;
    tracing::info!(
        "Done: {} documents, {} symbols, {} tile records",
        summary.documents,
        summary.symbols,
        summary.records
    );

    Ok(())
}
