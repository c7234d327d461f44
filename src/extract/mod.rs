//! Tile record extraction from product pages.
//!
//! This module provides:
//! - The tile record type and size/class parsing (`record`)
//! - Per-page assembly against a built symbol catalog (`page`)
//! - CSV output of the accumulated records (`results`)

pub mod page;
pub mod record;
pub mod results;

pub use page::PageExtractor;
pub use record::{split_size_class, TileRecord};
pub use results::write_results;
