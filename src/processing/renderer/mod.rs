//! Placeholder rendering.
//!
//! [`render_placeholder`] is pure: the same dimensions always produce the same
//! PNG bytes. The drawing happens on a [`Canvas`] in four passes: gradient
//! background, diagonal stripes, the dimension label and the caption below it.

mod canvas;
mod text;

use std::io::Cursor;
use image::{DynamicImage, ImageFormat, Rgb, RgbaImage};
use tracing::debug;

use crate::core::Dimensions;
use crate::utils::{PlaceholderError, PlaceholderResult};

pub use canvas::{hex, Canvas};
use text::{draw_text_centered, TextStyle};

const GRADIENT_START: Rgb<u8> = hex(0xe0e7ff);
const GRADIENT_END: Rgb<u8> = hex(0xc7d2fe);
const STRIPE_COLOR: Rgb<u8> = hex(0x6366f1);
const STRIPE_ALPHA: f64 = 0.1;
const STRIPE_SPACING: u32 = 40;
const STRIPE_WIDTH: f64 = 2.0;
const LABEL_COLOR: Rgb<u8> = hex(0x4f46e5);
const CAPTION_COLOR: Rgb<u8> = hex(0x6366f1);
const CAPTION: &str = "Placeholder Image";
const MIN_FONT_SIZE: f32 = 16.0;

/// Font size of the dimension label: `max(16, min(width, height) / 15)`.
pub fn font_size(width: u32, height: u32) -> f32 {
    (width.min(height) as f32 / 15.0).max(MIN_FONT_SIZE)
}

/// Draws the placeholder for `width × height` without encoding it.
pub fn draw_placeholder(width: u32, height: u32) -> PlaceholderResult<RgbaImage> {
    if width == 0 || height == 0 {
        return Err(PlaceholderError::InvalidDimensions { width, height });
    }

    let mut canvas = Canvas::new(width, height);
    canvas.fill_linear_gradient(GRADIENT_START, GRADIENT_END);
    canvas.stroke_diagonal_stripes(STRIPE_SPACING, STRIPE_WIDTH, STRIPE_COLOR, STRIPE_ALPHA);

    let size = font_size(width, height);
    let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
    let label = Dimensions::new(width, height).to_string();

    draw_text_centered(&mut canvas, &label, cx, cy, TextStyle {
        size,
        color: LABEL_COLOR,
        bold: true,
    });
    draw_text_centered(&mut canvas, CAPTION, cx, cy + size * 0.8, TextStyle {
        size: size * 0.5,
        color: CAPTION_COLOR,
        bold: false,
    });

    Ok(canvas.into_image())
}

/// Renders the placeholder for `width × height` and encodes it as PNG.
///
/// Fails with [`PlaceholderError::InvalidDimensions`] when either side is zero.
pub fn render_placeholder(width: u32, height: u32) -> PlaceholderResult<Vec<u8>> {
    let image = draw_placeholder(width, height)?;
    let png = encode_png(image)?;
    debug!("Rendered {}×{} placeholder ({} bytes)", width, height, png.len());
    Ok(png)
}

fn encode_png(image: RgbaImage) -> PlaceholderResult<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(image)
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| PlaceholderError::export(format!("Failed to encode placeholder: {}", e)))?;
    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;

    #[test]
    fn rendering_is_deterministic() {
        for (w, h) in [(200, 100), (1, 1), (37, 411), (640, 480)] {
            let first = render_placeholder(w, h).unwrap();
            let second = render_placeholder(w, h).unwrap();
            assert_eq!(first, second, "{w}x{h}");
        }
    }

    #[test]
    fn output_is_a_png_of_the_requested_size() {
        let png = render_placeholder(200, 100).unwrap();
        assert_eq!(image::guess_format(&png).unwrap(), ImageFormat::Png);
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.dimensions(), (200, 100));
    }

    #[test]
    fn zero_sides_are_rejected() {
        for (w, h) in [(0, 10), (10, 0), (0, 0)] {
            assert_eq!(
                render_placeholder(w, h).unwrap_err(),
                PlaceholderError::InvalidDimensions { width: w, height: h }
            );
        }
    }

    #[test]
    fn font_size_has_a_floor() {
        assert_eq!(font_size(200, 100), 16.0);
        assert_eq!(font_size(1500, 3000), 100.0);
    }

    #[test]
    fn label_is_drawn_in_the_centre() {
        let image = draw_placeholder(300, 300).unwrap();
        let background = draw_background_only(300, 300);
        let centre_changed = (140..160)
            .flat_map(|y| (100..200).map(move |x| (x, y)))
            .any(|(x, y)| image.get_pixel(x, y) != background.get_pixel(x, y));
        assert!(centre_changed);
        // Corners stay background
        assert_eq!(image.get_pixel(0, 299), background.get_pixel(0, 299));
    }

    #[test]
    fn encoded_output_uses_the_palette() {
        let png = render_placeholder(300, 300).unwrap();
        let image = image::load_from_memory(&png).unwrap().to_rgba8();
        let near = |pixel: &image::Rgba<u8>, color: Rgb<u8>, tolerance: u8| {
            (0..3).all(|c| pixel.0[c].abs_diff(color.0[c]) <= tolerance)
        };

        // Stripe centres on rows 0 and 299 sit 20px away from these corners
        assert!(near(image.get_pixel(0, 0), GRADIENT_START, 2), "{:?}", image.get_pixel(0, 0));
        assert!(near(image.get_pixel(299, 299), GRADIENT_END, 2), "{:?}", image.get_pixel(299, 299));

        // Fully covered label cells carry the label colour
        let label_hit = (142..158)
            .flat_map(|y| (80..220).map(move |x| (x, y)))
            .any(|(x, y)| near(image.get_pixel(x, y), LABEL_COLOR, 1));
        assert!(label_hit);
    }

    fn draw_background_only(width: u32, height: u32) -> RgbaImage {
        let mut canvas = Canvas::new(width, height);
        canvas.fill_linear_gradient(GRADIENT_START, GRADIENT_END);
        canvas.stroke_diagonal_stripes(STRIPE_SPACING, STRIPE_WIDTH, STRIPE_COLOR, STRIPE_ALPHA);
        canvas.into_image()
    }
}
