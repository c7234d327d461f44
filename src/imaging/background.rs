use image::{DynamicImage, Rgba, RgbImage, RgbaImage};

/// Channel value above which a pixel counts as background.
pub const BACKGROUND_THRESHOLD: u8 = 200;

/// Replaces near-white background with pure white.
///
/// Pixels where R > 200 AND G > 200 AND B > 200 become fully transparent.
/// The result is composited over an opaque white canvas and returned as RGB,
/// so faint scan artifacts around a pictogram vanish while strokes (any
/// channel <= 200, including anti-aliased greys) are kept as they are.
pub fn remove_background(image: &RgbImage) -> RgbImage {
    let mut foreground: RgbaImage = DynamicImage::ImageRgb8(image.clone()).to_rgba8();

    for pixel in foreground.pixels_mut() {
        let [r, g, b, _] = pixel.0;
        if r > BACKGROUND_THRESHOLD && g > BACKGROUND_THRESHOLD && b > BACKGROUND_THRESHOLD {
            *pixel = Rgba([255, 255, 255, 0]);
        }
    }

    let (width, height) = foreground.dimensions();
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
    image::imageops::overlay(&mut canvas, &foreground, 0, 0);

    DynamicImage::ImageRgba8(canvas).to_rgb8()
}
