use image::GrayImage;

use super::SymbolCatalog;
use crate::imaging::similarity;

/// Label emitted when no reference symbol matches.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Default similarity a match must strictly exceed.
pub const DEFAULT_THRESHOLD: f64 = 0.7;

/// Resolves a canonical pictogram to characteristic labels.
///
/// Every catalog entry scoring strictly above `threshold` contributes its
/// meaning, in catalog order, so a pictogram close to several references
/// yields several labels. If nothing qualifies the result is `["Unknown"]`.
pub fn classify(candidate: &GrayImage, catalog: &SymbolCatalog, threshold: f64) -> Vec<String> {
    let mut labels = Vec::new();

    for entry in catalog.entries() {
        match similarity(candidate, &entry.image) {
            Ok(score) => {
                tracing::debug!("{} ({}): similarity {:.4}", entry.id, entry.meaning, score);
                if score > threshold {
                    labels.push(entry.meaning.clone());
                }
            }
            Err(e) => {
                tracing::warn!("Skipping {} during classification: {}", entry.id, e);
            }
        }
    }

    if labels.is_empty() {
        labels.push(UNKNOWN_LABEL.to_string());
    }

    labels
}
