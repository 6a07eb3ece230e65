//! Configuration file loading with environment variable overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Name of the config file looked up at the site root.
pub const CONFIG_FILE_NAME: &str = "sitekit.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Placeholder generator settings.
    #[serde(default)]
    pub placeholders: PlaceholdersConfig,

    /// HTML normalizer settings.
    #[serde(default)]
    pub normalize: NormalizeConfig,

    /// Content index settings.
    #[serde(default)]
    pub content: ContentConfig,
}

/// Placeholder generator settings.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlaceholdersConfig {
    /// JPEG quality (1-100).
    #[serde(default = "default_quality")]
    pub quality: u8,
    /// Extra font files tried before the built-in candidate list.
    #[serde(default)]
    pub fonts: Vec<PathBuf>,
}

/// HTML normalizer settings.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NormalizeConfig {
    /// Top-level directories skipped in addition to `.git` and `admin`.
    #[serde(default)]
    pub extra_exclude: Vec<String>,
}

/// Content index settings.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContentConfig {
    /// Markdown content directory, relative to the site root.
    #[serde(default = "default_content_dir")]
    pub dir: PathBuf,
    /// Language subdirectories indexed per collection.
    #[serde(default = "default_langs")]
    pub langs: Vec<String>,
}

fn default_quality() -> u8 {
    82
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}

fn default_langs() -> Vec<String> {
    ["en", "es", "ko", "ja"].map(String::from).to_vec()
}

impl Default for PlaceholdersConfig {
    fn default() -> Self {
        Self { quality: default_quality(), fonts: Vec::new() }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self { dir: default_content_dir(), langs: default_langs() }
    }
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed, or
    /// holds out-of-range values.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
        config.validate().map_err(|e| format!("Invalid config {}: {e}", path.display()))?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid value.
    pub fn validate(&self) -> Result<(), String> {
        validate_quality(self.placeholders.quality)
    }

    /// Font candidates to try before the built-in list, preferring the
    /// `SITEKIT_FONT` environment variable.
    #[must_use]
    pub fn font_candidates(&self) -> Vec<PathBuf> {
        std::env::var_os("SITEKIT_FONT")
            .map(PathBuf::from)
            .into_iter()
            .chain(self.placeholders.fonts.iter().cloned())
            .collect()
    }
}

/// Validate a JPEG quality value.
///
/// # Errors
///
/// Returns an error if the quality is outside 1..=100.
pub fn validate_quality(quality: u8) -> Result<(), String> {
    if (1..=100).contains(&quality) {
        Ok(())
    } else {
        Err(format!("Unsupported quality '{quality}'. Valid: 1-100"))
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `SITEKIT_CONFIG` environment variable
/// 3. `<root>/sitekit.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&Path>, root: &Path) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    if let Some(p) = std::env::var_os("SITEKIT_CONFIG") {
        return PathBuf::from(p);
    }

    root.join(CONFIG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.placeholders.quality, 82);
        assert!(config.placeholders.fonts.is_empty());
        assert!(config.normalize.extra_exclude.is_empty());
        assert_eq!(config.content.dir, PathBuf::from("content"));
        assert_eq!(config.content.langs, vec!["en", "es", "ko", "ja"]);
    }

    #[test]
    fn load_nonexistent_returns_defaults() {
        let config = Config::load(Path::new("/nonexistent/path/sitekit.toml")).unwrap();
        assert_eq!(config.placeholders.quality, 82);
    }

    #[test]
    fn load_valid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sitekit.toml");
        std::fs::write(
            &path,
            r#"
[placeholders]
quality = 90
fonts = ["/opt/fonts/Inter.ttf"]

[normalize]
extra_exclude = ["drafts"]

[content]
dir = "site-content"
langs = ["en"]
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.placeholders.quality, 90);
        assert_eq!(config.placeholders.fonts, vec![PathBuf::from("/opt/fonts/Inter.ttf")]);
        assert_eq!(config.normalize.extra_exclude, vec!["drafts"]);
        assert_eq!(config.content.dir, PathBuf::from("site-content"));
        assert_eq!(config.content.langs, vec!["en"]);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sitekit.toml");
        std::fs::write(&path, "[placeholders]\nquality = 70\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.placeholders.quality, 70);
        assert!(config.placeholders.fonts.is_empty());
        assert!(config.normalize.extra_exclude.is_empty());
    }

    #[test]
    fn legacy_exclude_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sitekit.toml");
        std::fs::write(&path, "[normalize]\nexclude = [\"drafts\"]\n").unwrap();

        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "this is not valid toml {{{").unwrap();

        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn load_rejects_zero_quality() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sitekit.toml");
        std::fs::write(&path, "[placeholders]\nquality = 0\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.contains("Unsupported quality"));
    }

    #[test]
    fn validate_quality_bounds() {
        assert!(validate_quality(1).is_ok());
        assert!(validate_quality(100).is_ok());
        assert!(validate_quality(0).is_err());
        assert!(validate_quality(101).is_err());
    }

    #[test]
    fn discover_explicit_path() {
        let path = discover_config_path(Some(Path::new("/tmp/my.toml")), Path::new("/site"));
        assert_eq!(path, PathBuf::from("/tmp/my.toml"));
    }
}
