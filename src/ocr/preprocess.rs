use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, Luma, RgbImage};
use imageproc::contrast::otsu_level;

/// Upscale factor applied before OCR. Brochure text is small at 72 dpi.
pub const UPSCALE_FACTOR: u32 = 2;

/// Prepares a cropped text region for Tesseract.
///
/// Upscales 2x with bilinear filtering, converts to grayscale and binarizes
/// at Otsu's threshold: pixels above the level become white, the rest black.
pub fn binarize_for_ocr(img: &RgbImage) -> GrayImage {
    let (width, height) = img.dimensions();
    let upscaled = image::imageops::resize(
        img,
        width * UPSCALE_FACTOR,
        height * UPSCALE_FACTOR,
        FilterType::Triangle,
    );

    let gray = DynamicImage::ImageRgb8(upscaled).to_luma8();
    let level = otsu_level(&gray);

    let mut output = GrayImage::new(gray.width(), gray.height());
    for (x, y, pixel) in gray.enumerate_pixels() {
        let value = if pixel[0] > level { 255u8 } else { 0u8 };
        output.put_pixel(x, y, Luma([value]));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_binarize_doubles_size() {
        let img = RgbImage::new(244, 37);
        let result = binarize_for_ocr(&img);
        assert_eq!(result.dimensions(), (488, 74));
    }

    #[test]
    fn test_binarize_separates_text_from_background() {
        // Dark "text" block on a light background
        let mut img = RgbImage::from_pixel(20, 10, Rgb([235, 235, 235]));
        for x in 5..15 {
            for y in 3..7 {
                img.put_pixel(x, y, Rgb([30, 30, 30]));
            }
        }

        let result = binarize_for_ocr(&img);

        assert_eq!(result.get_pixel(0, 0)[0], 255, "Background should become white");
        assert_eq!(result.get_pixel(20, 10)[0], 0, "Text should become black");
        assert!(result.pixels().all(|p| p[0] == 0 || p[0] == 255));
    }
}
