//! Font resolution: try candidate files in order, fall back to the built-in font.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use ab_glyph::FontVec;

use crate::adapters::bitmap::BitmapFont;
use crate::adapters::outline::OutlineFont;
use crate::ports::LabelFont;

/// System font files tried when nothing else is configured.
pub const DEFAULT_CANDIDATES: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Helvetica.ttf",
    "/System/Library/Fonts/Supplemental/AppleGothic.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
];

/// Where label glyphs come from.
pub enum FontSource {
    /// A font file that parsed successfully.
    Outline {
        /// Parsed font data, shared across sizes.
        font: Arc<FontVec>,
        /// File it was loaded from.
        path: PathBuf,
    },
    /// The built-in bitmap font.
    Builtin,
}

impl FontSource {
    /// Use the first candidate that loads, or the built-in font.
    ///
    /// Failures are logged and skipped; this never fails.
    #[must_use]
    pub fn resolve<P: AsRef<Path>>(candidates: &[P]) -> Self {
        for candidate in candidates {
            let path = candidate.as_ref();
            match OutlineFont::load(path) {
                Ok(font) => {
                    let source = Self::Outline { font, path: path.to_path_buf() };
                    tracing::info!("Using font {}", source.at_size(18).describe());
                    return source;
                }
                Err(e) => tracing::debug!("Skipping font candidate {e}"),
            }
        }
        tracing::info!("No font candidate loaded, using built-in bitmap font");
        Self::Builtin
    }

    /// Resolve `preferred` first, then [`DEFAULT_CANDIDATES`].
    #[must_use]
    pub fn with_defaults(preferred: &[PathBuf]) -> Self {
        let candidates: Vec<PathBuf> = preferred
            .iter()
            .cloned()
            .chain(DEFAULT_CANDIDATES.iter().map(PathBuf::from))
            .collect();
        Self::resolve(&candidates)
    }

    /// A label font at `px` pixels.
    #[must_use]
    pub fn at_size(&self, px: u32) -> Box<dyn LabelFont> {
        match self {
            Self::Outline { font, path } => {
                Box::new(OutlineFont::new(Arc::clone(font), path.clone(), px))
            }
            Self::Builtin => Box::new(BitmapFont::new(px)),
        }
    }

    /// True when the built-in fallback is in use.
    #[must_use]
    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Builtin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_candidates_uses_builtin() {
        let source = FontSource::resolve::<PathBuf>(&[]);
        assert!(source.is_builtin());
    }

    #[test]
    fn unloadable_candidates_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let garbage = dir.path().join("garbage.ttf");
        std::fs::write(&garbage, b"\x00\x01\x02").unwrap();

        let source =
            FontSource::resolve(&[PathBuf::from("/nonexistent/a.ttf"), garbage.clone()]);
        assert!(source.is_builtin());
    }

    #[test]
    fn builtin_font_describes_itself() {
        let font = FontSource::Builtin.at_size(66);
        assert!(font.describe().contains("bitmap"));
        assert_eq!(font.line_height(), 64);
    }
}
