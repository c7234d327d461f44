//! Text recognition for the fixed text fields of a catalog page.

pub mod engine;
pub mod preprocess;
pub mod setup;

pub use engine::{OcrSettings, TesseractOcr};
pub use preprocess::binarize_for_ocr;

use anyhow::Result;
use image::RgbImage;

/// Turns a cropped text region into plain text.
///
/// The pipeline only consumes the raw string; no confidence or layout data.
pub trait TextRecognizer {
    fn recognize_text(&self, image: &RgbImage) -> Result<String>;
}
