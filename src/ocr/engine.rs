use anyhow::{anyhow, Context, Result};
use image::RgbImage;
use std::path::PathBuf;
use std::process::Command;
use tempfile::NamedTempFile;

use super::preprocess::binarize_for_ocr;
use super::setup::{locate_tesseract, TesseractPaths};
use super::TextRecognizer;

/// Tesseract invocation settings.
#[derive(Clone, Debug)]
pub struct OcrSettings {
    /// Explicit path to the tesseract executable
    pub executable: Option<PathBuf>,
    pub language: String,
    /// Page segmentation mode (3 = fully automatic)
    pub psm: u8,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            executable: None,
            language: "eng".to_string(),
            psm: 3,
        }
    }
}

/// Runs the Tesseract command-line tool on binarized crops.
pub struct TesseractOcr {
    paths: TesseractPaths,
    settings: OcrSettings,
}

impl TesseractOcr {
    /// Locates Tesseract once so each page does not repeat the lookup.
    pub fn new(settings: OcrSettings) -> Result<Self> {
        let paths = locate_tesseract(settings.executable.as_deref(), &settings.language)?;
        Ok(Self { paths, settings })
    }
}

impl TextRecognizer for TesseractOcr {
    fn recognize_text(&self, image: &RgbImage) -> Result<String> {
        let preprocessed = binarize_for_ocr(image);

        // Save image to temporary file
        let temp_input = NamedTempFile::with_suffix(".png")?;
        preprocessed
            .save(temp_input.path())
            .context("Failed to write OCR input image")?;

        let mut command = Command::new(&self.paths.executable);
        command
            .arg(temp_input.path())
            .arg("stdout")
            .arg("-l")
            .arg(&self.settings.language)
            .arg("--psm")
            .arg(self.settings.psm.to_string());
        if let Some(tessdata) = &self.paths.tessdata {
            command.arg("--tessdata-dir").arg(tessdata);
        }

        let output = command
            .output()
            .with_context(|| format!("Failed to run {}", self.paths.executable.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("Tesseract failed: {}", stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
