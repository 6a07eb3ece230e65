//! Outline fonts loaded from TrueType/OpenType files.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};

use crate::ports::LabelFont;

/// A parsed font file rendered at a fixed pixel size.
pub struct OutlineFont {
    font: Arc<FontVec>,
    origin: PathBuf,
    scale: PxScale,
}

impl OutlineFont {
    /// Read and parse a font file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid font.
    pub fn load(path: &Path) -> Result<Arc<FontVec>, String> {
        let data = std::fs::read(path).map_err(|e| format!("{}: {e}", path.display()))?;
        FontVec::try_from_vec(data)
            .map(Arc::new)
            .map_err(|e| format!("{}: {e}", path.display()))
    }

    /// Wrap an already parsed font at the given pixel size.
    #[must_use]
    pub fn new(font: Arc<FontVec>, origin: PathBuf, px: u32) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let scale = PxScale::from(px as f32);
        Self { font, origin, scale }
    }
}

impl LabelFont for OutlineFont {
    fn describe(&self) -> String {
        format!("{} at {}px", self.origin.display(), self.scale.y)
    }

    fn text_width(&self, line: &str) -> u32 {
        text_size(self.scale, self.font.as_ref(), line).0
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn line_height(&self) -> u32 {
        self.font.as_scaled(self.scale).height().ceil().max(0.0) as u32
    }

    fn draw_line(&self, canvas: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>, line: &str) {
        draw_text_mut(canvas, color, x, y, self.scale, self.font.as_ref(), line);
    }
}
