use image::{DynamicImage, RgbImage};

/// Returns true if the image carries no visual content.
///
/// The image is converted to luminance and every pixel must equal the first
/// one exactly. Slots a design does not use are rendered as a flat fill, so
/// near-equality is not needed.
pub fn is_blank(image: &RgbImage) -> bool {
    let gray = DynamicImage::ImageRgb8(image.clone()).to_luma8();

    let mut pixels = gray.pixels();
    match pixels.next() {
        Some(first) => pixels.all(|p| p == first),
        None => true,
    }
}
