use image::{Rgb, Rgba, RgbaImage};

/// Builds an opaque colour from a `0xRRGGBB` literal.
pub const fn hex(rgb: u32) -> Rgb<u8> {
    Rgb([(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8])
}

/// Opaque RGBA drawing surface with source-over compositing.
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Allocates a surface. Callers guarantee both sides are non-zero.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255])),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Fills the surface with a linear gradient running from the top-left
    /// corner (`from`) to the bottom-right corner (`to`).
    pub fn fill_linear_gradient(&mut self, from: Rgb<u8>, to: Rgb<u8>) {
        let (w, h) = (self.width() as f64, self.height() as f64);
        let length_sq = w * w + h * h;

        for (x, y, pixel) in self.image.enumerate_pixels_mut() {
            // Project the pixel centre onto the (0,0) → (w,h) axis
            let t = (((x as f64 + 0.5) * w + (y as f64 + 0.5) * h) / length_sq).clamp(0.0, 1.0);
            let mut out = [0u8; 4];
            for c in 0..3 {
                let (a, b) = (from.0[c] as f64, to.0[c] as f64);
                out[c] = (a + (b - a) * t).round() as u8;
            }
            out[3] = 255;
            *pixel = Rgba(out);
        }
    }

    /// Strokes parallel lines from `(i, 0)` to `(i + height, height)` for every
    /// `i` in `[-height, width)` stepping by `spacing`.
    ///
    /// Edges are anti-aliased by the distance of each pixel centre to the line.
    pub fn stroke_diagonal_stripes(&mut self, spacing: u32, line_width: f64, color: Rgb<u8>, alpha: f64) {
        let (w, h) = (self.width() as i64, self.height() as i64);
        let half_width = line_width / 2.0;
        // Horizontal reach of the stroke on one row (the lines run at 45°)
        let reach = ((half_width + 0.5) * std::f64::consts::SQRT_2).ceil() as i64;

        for i in (-h..w).step_by(spacing.max(1) as usize) {
            for y in 0..h {
                let centre = i + y;
                for x in (centre - reach)..=(centre + reach) {
                    if x < 0 || x >= w {
                        continue;
                    }
                    let distance = (x - centre).abs() as f64 / std::f64::consts::SQRT_2;
                    let coverage = (half_width + 0.5 - distance).clamp(0.0, 1.0);
                    if coverage > 0.0 {
                        self.blend(x as u32, y as u32, color, alpha * coverage);
                    }
                }
            }
        }
    }

    /// Composites `color` at `alpha` over the pixel at `(x, y)`.
    pub fn blend(&mut self, x: u32, y: u32, color: Rgb<u8>, alpha: f64) {
        let alpha = alpha.clamp(0.0, 1.0);
        let pixel = self.image.get_pixel_mut(x, y);
        for c in 0..3 {
            let dst = pixel.0[c] as f64;
            let src = color.0[c] as f64;
            pixel.0[c] = (dst * (1.0 - alpha) + src * alpha).round() as u8;
        }
    }
}
