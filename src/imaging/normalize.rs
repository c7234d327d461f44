use image::imageops::FilterType;
use image::{DynamicImage, GrayImage};
use imageproc::contrast::equalize_histogram;

/// Default side length of a canonical comparison image.
pub const CANONICAL_SIZE: u32 = 100;

/// Produces the canonical form used for similarity scoring.
///
/// Resizes to `size` x `size` without keeping the aspect ratio, converts to
/// grayscale and equalizes the histogram. References and candidates go through
/// the same transform, so the stretch affects both alike. An image that already
/// has the target size is not resampled, which keeps reloaded canonical images
/// stable.
pub fn normalize_for_comparison(image: &DynamicImage, size: u32) -> GrayImage {
    let resized = if image.width() == size && image.height() == size {
        image.clone()
    } else {
        image.resize_exact(size, size, FilterType::CatmullRom)
    };

    let gray = resized.to_luma8();
    equalize_histogram(&gray)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_output_is_always_canonical_size() {
        for (w, h) in [(1, 1), (17, 14), (343, 340), (754, 726)] {
            let img = DynamicImage::ImageRgb8(RgbImage::from_fn(w, h, |x, y| {
                Rgb([(x % 256) as u8, (y % 256) as u8, 90])
            }));
            let canonical = normalize_for_comparison(&img, CANONICAL_SIZE);
            assert_eq!(canonical.dimensions(), (100, 100), "input {}x{}", w, h);
        }
    }

    #[test]
    fn test_output_is_single_channel() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(10, 10));
        let canonical = normalize_for_comparison(&img, CANONICAL_SIZE);
        // GrayImage has one channel per pixel
        assert_eq!(canonical.as_raw().len(), 100 * 100);
    }

    #[test]
    fn test_deterministic() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_fn(23, 23, |x, y| {
            Rgb([(x * 11) as u8, (y * 7) as u8, ((x + y) * 3) as u8])
        }));
        assert_eq!(
            normalize_for_comparison(&img, CANONICAL_SIZE),
            normalize_for_comparison(&img, CANONICAL_SIZE)
        );
    }

    #[test]
    fn test_renormalizing_canonical_image_is_stable() {
        let mut img = RgbImage::from_pixel(42, 36, Rgb([255, 255, 255]));
        for x in 10..30 {
            for y in 8..28 {
                img.put_pixel(x, y, Rgb([0, 0, 0]));
            }
        }
        let once = normalize_for_comparison(&DynamicImage::ImageRgb8(img), CANONICAL_SIZE);
        let twice =
            normalize_for_comparison(&DynamicImage::ImageLuma8(once.clone()), CANONICAL_SIZE);
        assert_eq!(once, twice);
    }
}
