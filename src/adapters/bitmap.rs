//! Built-in bitmap font used when no outline font can be loaded.

use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{Rgb, RgbImage};

use crate::ports::LabelFont;

/// Glyph cell edge in font units.
const CELL: u32 = 8;

/// 8x8 bitmap glyphs scaled up by an integer factor.
#[derive(Debug, Clone, Copy)]
pub struct BitmapFont {
    scale: u32,
}

impl BitmapFont {
    /// Create a bitmap font approximating a `px` pixel size.
    #[must_use]
    pub fn new(px: u32) -> Self {
        Self { scale: (px / CELL).max(1) }
    }

    fn glyph(ch: char) -> [u8; 8] {
        BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?')).unwrap_or([0; 8])
    }
}

impl LabelFont for BitmapFont {
    fn describe(&self) -> String {
        format!("built-in 8x8 bitmap (x{})", self.scale)
    }

    fn text_width(&self, line: &str) -> u32 {
        let chars = u32::try_from(line.chars().count()).unwrap_or(u32::MAX);
        chars.saturating_mul(CELL * self.scale)
    }

    fn line_height(&self) -> u32 {
        CELL * self.scale
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn draw_line(&self, canvas: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>, line: &str) {
        let (width, height) = (i64::from(canvas.width()), i64::from(canvas.height()));
        let scale = i64::from(self.scale);
        let advance = i64::from(CELL) * scale;

        for (index, ch) in (0i64..).zip(line.chars()) {
            let origin_x = i64::from(x) + advance * index;
            if origin_x >= width {
                break;
            }
            for (row, bits) in (0i64..).zip(Self::glyph(ch)) {
                for col in 0..i64::from(CELL) {
                    if bits & (1u8 << col) == 0 {
                        continue;
                    }
                    let px = origin_x + col * scale;
                    let py = i64::from(y) + row * scale;
                    for dy in 0..scale {
                        for dx in 0..scale {
                            let (cx, cy) = (px + dx, py + dy);
                            if (0..width).contains(&cx) && (0..height).contains(&cy) {
                                canvas.put_pixel(cx as u32, cy as u32, color);
                            }
                        }
                    }
                }
            }
        }
    }
}
