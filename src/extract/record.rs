use serde::Serialize;
use std::path::PathBuf;

use crate::symbols::UNKNOWN_LABEL;

/// One product extracted from a catalog page.
#[derive(Debug, Clone, PartialEq)]
pub struct TileRecord {
    pub design_name: String,
    pub tile_type: String,
    /// `None` when the tile design region could not be cropped
    pub tile_design_path: Option<PathBuf>,
    pub design_preview_path: Option<PathBuf>,
    pub size: String,
    pub tile_class: String,
    /// Matched characteristic labels, in slot order
    pub characteristics: Vec<String>,
}

/// Flat CSV row for a [`TileRecord`].
#[derive(Debug, Serialize)]
pub struct TileRow<'a> {
    #[serde(rename = "Design Name")]
    pub design_name: &'a str,
    #[serde(rename = "Type")]
    pub tile_type: &'a str,
    #[serde(rename = "Tile Design Image Path")]
    pub tile_design_path: String,
    #[serde(rename = "Design Preview Image Path")]
    pub design_preview_path: String,
    #[serde(rename = "Size")]
    pub size: &'a str,
    #[serde(rename = "Tile Class")]
    pub tile_class: &'a str,
    #[serde(rename = "Characteristics")]
    pub characteristics: String,
}

impl TileRecord {
    /// Characteristics as a single comma-separated string.
    pub fn characteristics_text(&self) -> String {
        self.characteristics.join(", ")
    }

    pub fn to_row(&self) -> TileRow<'_> {
        let path_text = |p: &Option<PathBuf>| {
            p.as_ref()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default()
        };

        TileRow {
            design_name: &self.design_name,
            tile_type: &self.tile_type,
            tile_design_path: path_text(&self.tile_design_path),
            design_preview_path: path_text(&self.design_preview_path),
            size: &self.size,
            tile_class: &self.tile_class,
            characteristics: self.characteristics_text(),
        }
    }
}

/// Splits OCR text like `"60x60 / Glossy"` into size and tile class.
///
/// Splits on the first `/` only; each side is trimmed and a missing side
/// becomes `"Unknown"`.
pub fn split_size_class(text: &str) -> (String, String) {
    let (size, class) = match text.split_once('/') {
        Some((size, class)) => (size.trim(), Some(class.trim())),
        None => (text.trim(), None),
    };

    (
        size.to_string(),
        class.unwrap_or(UNKNOWN_LABEL).to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_size_and_class() {
        assert_eq!(
            split_size_class("60x60 / Glossy"),
            ("60x60".to_string(), "Glossy".to_string())
        );
    }

    #[test]
    fn test_split_without_slash_defaults_class() {
        assert_eq!(
            split_size_class("60x60"),
            ("60x60".to_string(), "Unknown".to_string())
        );
    }

    #[test]
    fn test_split_on_first_slash_only() {
        assert_eq!(
            split_size_class("30x60 / Matt / Rustic"),
            ("30x60".to_string(), "Matt / Rustic".to_string())
        );
    }

    #[test]
    fn test_row_joins_characteristics() {
        let record = TileRecord {
            design_name: "Statuario".to_string(),
            tile_type: "Porcelain".to_string(),
            tile_design_path: Some(PathBuf::from("out/doc/Statuario_tile_design.png")),
            design_preview_path: None,
            size: "60x120".to_string(),
            tile_class: "Glossy".to_string(),
            characteristics: vec!["Water Resistance".to_string(), "Unknown".to_string()],
        };

        let row = record.to_row();
        assert_eq!(row.characteristics, "Water Resistance, Unknown");
        assert_eq!(row.design_preview_path, "");
        assert!(row.tile_design_path.ends_with("Statuario_tile_design.png"));
    }
}
