//! Scaled bitmap text on a [`Canvas`].

use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use image::Rgb;
use super::canvas::Canvas;

/// Glyph cells per side in the 8×8 font.
const GLYPH_CELLS: usize = 8;

/// Cells per em: the glyph box spans 0.8 of the font size.
const CELLS_PER_EM: f32 = 10.0;

#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    /// Font size in pixels
    pub size: f32,
    pub color: Rgb<u8>,
    pub bold: bool,
}

/// Rows of the glyph for `c`, bit 0 being the leftmost column.
///
/// Characters missing from the font render as blanks.
fn glyph_rows(c: char, bold: bool) -> [u8; 8] {
    let mut rows = BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .unwrap_or([0; 8]);
    if bold {
        for row in rows.iter_mut() {
            *row |= *row << 1;
        }
    }
    rows
}

/// Pixel-aligned clip rectangle, half-open.
struct Bounds {
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
}

impl Bounds {
    fn width(&self) -> usize {
        (self.x1 - self.x0) as usize
    }
}

/// Adds the area of the square cell at `(left, top)` covering each pixel.
fn accumulate(coverage: &mut [f32], bounds: &Bounds, left: f32, top: f32, cell: f32) {
    let (right, bottom) = (left + cell, top + cell);
    let px0 = (left.floor() as i64).max(bounds.x0);
    let px1 = (right.ceil() as i64).min(bounds.x1);
    let py0 = (top.floor() as i64).max(bounds.y0);
    let py1 = (bottom.ceil() as i64).min(bounds.y1);

    for py in py0..py1 {
        let overlap_y = bottom.min(py as f32 + 1.0) - top.max(py as f32);
        if overlap_y <= 0.0 {
            continue;
        }
        for px in px0..px1 {
            let overlap_x = right.min(px as f32 + 1.0) - left.max(px as f32);
            if overlap_x <= 0.0 {
                continue;
            }
            let index = (py - bounds.y0) as usize * bounds.width() + (px - bounds.x0) as usize;
            coverage[index] += overlap_x * overlap_y;
        }
    }
}

/// Draws `text` centred on `(cx, cy)`, horizontally and vertically.
///
/// Glyph cells are rasterised by area coverage so small sizes stay smooth.
/// Anything falling outside the canvas is clipped.
pub fn draw_text_centered(canvas: &mut Canvas, text: &str, cx: f32, cy: f32, style: TextStyle) {
    let glyphs: Vec<[u8; 8]> = text.chars().map(|c| glyph_rows(c, style.bold)).collect();
    let cell = style.size / CELLS_PER_EM;
    if glyphs.is_empty() || cell <= 0.0 {
        return;
    }

    let text_width = (glyphs.len() * GLYPH_CELLS) as f32 * cell;
    let text_height = GLYPH_CELLS as f32 * cell;
    let left = cx - text_width / 2.0;
    let top = cy - text_height / 2.0;

    let bounds = Bounds {
        x0: (left.floor() as i64).max(0),
        y0: (top.floor() as i64).max(0),
        x1: ((left + text_width).ceil() as i64).min(canvas.width() as i64),
        y1: ((top + text_height).ceil() as i64).min(canvas.height() as i64),
    };
    if bounds.x0 >= bounds.x1 || bounds.y0 >= bounds.y1 {
        return;
    }

    let mut coverage = vec![0f32; bounds.width() * (bounds.y1 - bounds.y0) as usize];
    for (index, rows) in glyphs.iter().enumerate() {
        let glyph_left = left + (index * GLYPH_CELLS) as f32 * cell;
        for (gy, row) in rows.iter().enumerate() {
            if *row == 0 {
                continue;
            }
            let cell_top = top + gy as f32 * cell;
            for gx in 0..GLYPH_CELLS {
                if row & (1 << gx) != 0 {
                    accumulate(&mut coverage, &bounds, glyph_left + gx as f32 * cell, cell_top, cell);
                }
            }
        }
    }

    let width = bounds.width();
    for (i, amount) in coverage.into_iter().enumerate() {
        if amount > 0.0 {
            let x = bounds.x0 + (i % width) as i64;
            let y = bounds.y0 + (i / width) as i64;
            canvas.blend(x as u32, y as u32, style.color, amount.min(1.0) as f64);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::renderer::canvas::hex;

    fn blank(width: u32, height: u32) -> Canvas {
        let mut canvas = Canvas::new(width, height);
        canvas.fill_linear_gradient(hex(0xffffff), hex(0xffffff));
        canvas
    }

    fn inked(canvas: &Canvas) -> Vec<(u32, u32)> {
        let mut out = Vec::new();
        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                if canvas.pixel(x, y).0[0] != 255 {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn multiplication_sign_has_a_glyph() {
        assert_ne!(glyph_rows('×', false), [0; 8]);
        assert_ne!(glyph_rows('8', false), [0; 8]);
        assert_eq!(glyph_rows(' ', true), [0; 8]);
    }

    #[test]
    fn bold_widens_every_row() {
        let regular = glyph_rows('I', false);
        let bold = glyph_rows('I', true);
        for (r, b) in regular.iter().zip(bold.iter()) {
            assert_eq!(r & b, *r);
            assert!(b.count_ones() >= r.count_ones());
        }
        assert_ne!(regular, bold);
    }

    #[test]
    fn text_is_centred() {
        let mut canvas = blank(100, 60);
        let style = TextStyle { size: 20.0, color: hex(0x000000), bold: false };
        draw_text_centered(&mut canvas, "HH", 50.0, 30.0, style);

        let ink = inked(&canvas);
        assert!(!ink.is_empty());
        let min_x = ink.iter().map(|p| p.0).min().unwrap();
        let max_x = ink.iter().map(|p| p.0).max().unwrap();
        // Two 16px glyph boxes centred on x = 50 span [34, 66)
        assert!(min_x >= 34 && max_x < 66, "{min_x}..{max_x}");
        let min_y = ink.iter().map(|p| p.1).min().unwrap();
        let max_y = ink.iter().map(|p| p.1).max().unwrap();
        assert!(min_y >= 22 && max_y < 38, "{min_y}..{max_y}");
    }

    #[test]
    fn text_wider_than_canvas_is_clipped() {
        let mut canvas = blank(4, 4);
        let style = TextStyle { size: 40.0, color: hex(0x000000), bold: true };
        draw_text_centered(&mut canvas, "1 × 1", 2.0, 2.0, style);
        assert_eq!(canvas.width(), 4);
    }
}
