//! Structural similarity between canonical images.
//!
//! Mean SSIM over a 7x7 uniform window with the usual constants
//! (K1 = 0.01, K2 = 0.03, dynamic range 255) and sample covariance. Only
//! windows that lie fully inside the image contribute to the mean.

use image::GrayImage;

use crate::error::{ExtractError, ExtractResult};

/// Side length of the sliding window.
pub const WINDOW: u32 = 7;

const K1: f64 = 0.01;
const K2: f64 = 0.03;
const DATA_RANGE: f64 = 255.0;

/// Computes the mean structural similarity index of two equally sized images.
///
/// Returns a score in [-1, 1]; identical images score exactly 1.0 and the
/// result does not depend on argument order.
pub fn similarity(a: &GrayImage, b: &GrayImage) -> ExtractResult<f64> {
    if a.dimensions() != b.dimensions() {
        return Err(ExtractError::DimensionMismatch {
            a_width: a.width(),
            a_height: a.height(),
            b_width: b.width(),
            b_height: b.height(),
        });
    }

    let (width, height) = a.dimensions();
    if width < WINDOW || height < WINDOW {
        return Err(ExtractError::ImageTooSmall {
            width,
            height,
            window: WINDOW,
        });
    }

    let c1 = (K1 * DATA_RANGE).powi(2);
    let c2 = (K2 * DATA_RANGE).powi(2);
    let n = (WINDOW * WINDOW) as f64;
    let cov_norm = n / (n - 1.0);

    let mut total = 0.0;
    let mut windows = 0usize;

    for top in 0..=(height - WINDOW) {
        for left in 0..=(width - WINDOW) {
            let mut sum_a = 0.0;
            let mut sum_b = 0.0;
            let mut sum_aa = 0.0;
            let mut sum_bb = 0.0;
            let mut sum_ab = 0.0;

            for y in top..top + WINDOW {
                for x in left..left + WINDOW {
                    let va = f64::from(a.get_pixel(x, y)[0]);
                    let vb = f64::from(b.get_pixel(x, y)[0]);
                    sum_a += va;
                    sum_b += vb;
                    sum_aa += va * va;
                    sum_bb += vb * vb;
                    sum_ab += va * vb;
                }
            }

            let mean_a = sum_a / n;
            let mean_b = sum_b / n;
            let var_a = cov_norm * (sum_aa / n - mean_a * mean_a);
            let var_b = cov_norm * (sum_bb / n - mean_b * mean_b);
            let cov_ab = cov_norm * (sum_ab / n - mean_a * mean_b);

            let numerator = (2.0 * mean_a * mean_b + c1) * (2.0 * cov_ab + c2);
            let denominator = (mean_a * mean_a + mean_b * mean_b + c1) * (var_a + var_b + c2);

            total += numerator / denominator;
            windows += 1;
        }
    }

    Ok(total / windows as f64)
}
