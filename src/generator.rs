//! Placeholder generation: render every missing catalog entry.

use std::fmt;

use serde::Serialize;

use crate::catalog::Placeholder;
use crate::error::SiteError;
use crate::fonts::FontSource;
use crate::output::{save_jpeg, JpegSettings};
use crate::render::{font_px, render};

/// Outcome of one generator run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenerateSummary {
    /// Images written (or that would be written in a dry run).
    pub created: usize,
    /// Targets that already existed.
    pub skipped: usize,
}

impl fmt::Display for GenerateSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Placeholder images: created={} skipped={}", self.created, self.skipped)
    }
}

/// Renders missing placeholders; existing files are never touched.
pub struct PlaceholderGenerator {
    fonts: FontSource,
    jpeg: JpegSettings,
    dry_run: bool,
}

impl PlaceholderGenerator {
    /// Create a generator.
    #[must_use]
    pub fn new(fonts: FontSource, jpeg: JpegSettings) -> Self {
        Self { fonts, jpeg, dry_run: false }
    }

    /// Count what would be created without writing anything.
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Generate every entry of `catalog` whose target does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns the first encoding or I/O error; files written before it stay.
    pub fn generate(&self, catalog: &[Placeholder]) -> Result<GenerateSummary, SiteError> {
        let mut summary = GenerateSummary::default();

        for placeholder in catalog {
            if placeholder.path.exists() {
                tracing::debug!("Skipped (exists): {}", placeholder.path.display());
                summary.skipped += 1;
                continue;
            }

            if self.dry_run {
                tracing::debug!("Would create: {}", placeholder.path.display());
            } else {
                let font = self.write(placeholder)?;
                tracing::debug!(
                    "Created: {} ({}x{}, {font})",
                    placeholder.path.display(),
                    placeholder.width,
                    placeholder.height
                );
            }
            summary.created += 1;
        }

        Ok(summary)
    }

    /// Render and save one placeholder, returning the font description.
    fn write(&self, placeholder: &Placeholder) -> Result<String, SiteError> {
        if placeholder.width == 0 || placeholder.height == 0 {
            return Err(SiteError::InvalidArgument(format!(
                "{} has an empty size {}x{}",
                placeholder.path.display(),
                placeholder.width,
                placeholder.height
            )));
        }
        let font = self.fonts.at_size(font_px(placeholder.width));
        let image = render(placeholder, font.as_ref());
        save_jpeg(&image, &placeholder.path, self.jpeg)?;
        Ok(font.describe())
    }

    /// True when labels fall back to the built-in bitmap font.
    #[must_use]
    pub fn uses_builtin_font(&self) -> bool {
        self.fonts.is_builtin()
    }
}
