//! Error types for the extraction library.
//!
//! Application-level code (CLI, pipeline I/O) uses `anyhow`; these typed errors
//! cover the failure modes callers may want to match on.

use thiserror::Error;

use crate::layout::Region;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// The region is empty, inverted, or extends past the raster.
    #[error("region {region} is invalid for a {width}x{height} raster")]
    InvalidRegion {
        region: Region,
        width: u32,
        height: u32,
    },

    #[error("image dimensions differ: {a_width}x{a_height} vs {b_width}x{b_height}")]
    DimensionMismatch {
        a_width: u32,
        a_height: u32,
        b_width: u32,
        b_height: u32,
    },

    /// Structural similarity needs at least one full window.
    #[error("image {width}x{height} is smaller than the {window}x{window} comparison window")]
    ImageTooSmall { width: u32, height: u32, window: u32 },

    #[error("malformed symbol catalog: {0}")]
    CatalogFormat(String),

    #[error("invalid layout: {0}")]
    InvalidLayout(String),
}

pub type ExtractResult<T> = std::result::Result<T, ExtractError>;
