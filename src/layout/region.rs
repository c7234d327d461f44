//! Fixed page regions and cropping.
//!
//! Brochure layouts never move, so every region is an absolute pixel rectangle
//! taken from the layout table rather than something detected from content.

use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ExtractError, ExtractResult};

/// An axis-aligned rectangle in page-raster pixels.
///
/// `right` and `bottom` are exclusive, so the region covers
/// `right - left` columns and `bottom - top` rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Region {
    pub const fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    /// Checks that the region is non-empty and lies entirely inside a
    /// `width` x `height` raster.
    pub fn validate(&self, width: u32, height: u32) -> ExtractResult<()> {
        let inside = self.left < self.right
            && self.top < self.bottom
            && self.right <= width
            && self.bottom <= height;

        if inside {
            Ok(())
        } else {
            Err(ExtractError::InvalidRegion {
                region: *self,
                width,
                height,
            })
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// Crops `region` out of a page raster.
///
/// Returns `None` when the region is invalid for this raster. The failure is
/// logged here so callers only need to skip the slot.
pub fn crop(image: &RgbImage, region: &Region) -> Option<RgbImage> {
    let (w, h) = image.dimensions();

    if let Err(e) = region.validate(w, h) {
        tracing::warn!("Error cropping region: {}", e);
        return None;
    }

    Some(
        image::imageops::crop_imm(image, region.left, region.top, region.width(), region.height())
            .to_image(),
    )
}
