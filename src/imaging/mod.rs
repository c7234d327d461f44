//! Image helpers for pictogram comparison.
//!
//! Candidate pictograms pass through these steps in order:
//! blank check, background removal, canonical normalization, similarity scoring.

pub mod background;
pub mod blank;
pub mod normalize;
pub mod similarity;

pub use background::remove_background;
pub use blank::is_blank;
pub use normalize::{normalize_for_comparison, CANONICAL_SIZE};
pub use similarity::similarity;
