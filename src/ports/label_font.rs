//! Label font port for measuring and drawing caption lines.

use image::{Rgb, RgbImage};

/// Measures and rasterizes single lines of label text.
///
/// Multi-line layout lives in [`crate::render`]; implementations only deal
/// with one line at a time.
pub trait LabelFont {
    /// Human-readable description of where the glyphs come from.
    fn describe(&self) -> String;

    /// Advance width of `line` in pixels.
    fn text_width(&self, line: &str) -> u32;

    /// Height of one line in pixels, excluding inter-line spacing.
    fn line_height(&self) -> u32;

    /// Draw `line` with its top-left corner at `(x, y)`.
    ///
    /// Coordinates may be negative or past the canvas edge; glyphs are
    /// clipped to the canvas.
    fn draw_line(&self, canvas: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>, line: &str);
}
