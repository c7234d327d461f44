pub mod config;
pub mod region;

pub use config::{AnchorPage, FieldRegions, LayoutConfig};
pub use region::{crop, Region};
