//! Tile Catalog Extractor
//!
//! Extracts product records from fixed-layout PDF tile brochures: OCR of the
//! text fields, the two large product images, and characteristics resolved
//! from the pictograms printed on each page.

pub mod error;
pub mod extract;
pub mod imaging;
pub mod layout;
pub mod ocr;
pub mod paths;
pub mod pipeline;
pub mod render;
pub mod symbols;

#[cfg(test)]
mod testing;

pub use error::{ExtractError, ExtractResult};
pub use pipeline::{run_batch, BatchSettings, BatchSummary};
