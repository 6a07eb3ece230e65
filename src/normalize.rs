//! HTML asset path normalization.
//!
//! Relative stylesheet, script, and image references are rewritten so they
//! climb from the page's directory back to the site root:
//!
//! ```text
//! blog/post/index.html:  src="assets/js/app.js"  ->  src="../../assets/js/app.js"
//! ```
//!
//! Whatever relative prefix was there before is replaced, so running the
//! rewrite again is a no-op. Absolute `http://` and `https://` URLs are never
//! touched.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;
use walkdir::{DirEntry, WalkDir};

use crate::error::SiteError;

static STYLESHEET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"href="([^"]*)css/main\.css""#).expect("valid regex"));

static SCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"src="([^"]*)assets/js/([a-zA-Z0-9_.-]+\.js)""#).expect("valid regex")
});

static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"src="([^"]*)assets/img/([^"]+)""#).expect("valid regex"));

/// Top-level directories that are never scanned.
pub const DEFAULT_EXCLUDE: &[&str] = &[".git", "admin"];

/// Outcome of one normalizer run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NormalizeSummary {
    /// Files whose content changed.
    pub changed: usize,
    /// HTML files examined.
    pub scanned: usize,
}

impl fmt::Display for NormalizeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Normalized HTML asset paths: changed={} scanned={}", self.changed, self.scanned)
    }
}

fn is_absolute_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// `../` repeated once per directory between `relative` and the root.
#[must_use]
pub fn depth_prefix(relative: &Path) -> String {
    let depth = relative.components().count().saturating_sub(1);
    "../".repeat(depth)
}

/// Rewrite relative asset references in `content` to start with `prefix`.
#[must_use]
pub fn normalize_content(content: &str, prefix: &str) -> String {
    let output = STYLESHEET.replace_all(content, |caps: &Captures<'_>| {
        if is_absolute_url(&caps[1]) {
            caps[0].to_string()
        } else {
            format!(r#"href="{prefix}css/main.css""#)
        }
    });

    let output = SCRIPT.replace_all(&output, |caps: &Captures<'_>| {
        if is_absolute_url(&caps[1]) {
            caps[0].to_string()
        } else {
            format!(r#"src="{prefix}assets/js/{}""#, &caps[2])
        }
    });

    let output = IMAGE.replace_all(&output, |caps: &Captures<'_>| {
        if is_absolute_url(&caps[1]) {
            caps[0].to_string()
        } else {
            format!(r#"src="{prefix}assets/img/{}""#, &caps[2])
        }
    });

    output.into_owned()
}

/// Decode UTF-8, silently dropping malformed byte sequences.
#[must_use]
pub fn decode_lossy_dropping(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

fn is_excluded(entry: &DirEntry, extra: &[String]) -> bool {
    if entry.depth() != 1 || !entry.file_type().is_dir() {
        return false;
    }
    entry.file_name().to_str().is_some_and(|name| {
        DEFAULT_EXCLUDE.contains(&name) || extra.iter().any(|e| e == name)
    })
}

/// Every `.html` file under `root`.
///
/// Top-level `.git` and `admin` directories are always skipped, along with
/// any top-level directory named in `extra`. Unreadable entries are logged
/// and skipped; symlinked files are followed.
#[must_use]
pub fn html_files(root: &Path, extra: &[String]) -> Vec<PathBuf> {
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_excluded(entry, extra));

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {e}");
                continue;
            }
        };
        if entry.path().extension().is_some_and(|ext| ext == "html") && entry.path().is_file() {
            files.push(entry.into_path());
        }
    }
    files
}

/// Rewrites asset paths in every HTML file under a site root.
#[derive(Debug, Default)]
pub struct HtmlNormalizer {
    extra_exclude: Vec<String>,
    dry_run: bool,
}

impl HtmlNormalizer {
    /// Create a normalizer that also skips the given top-level directories.
    ///
    /// [`DEFAULT_EXCLUDE`] is always skipped.
    #[must_use]
    pub fn new(extra_exclude: Vec<String>) -> Self {
        Self { extra_exclude, dry_run: false }
    }

    /// Count changes without writing files.
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Normalize every HTML file under `root`.
    ///
    /// # Errors
    ///
    /// Returns the first read or write error; files rewritten before it
    /// stay rewritten.
    pub fn normalize(&self, root: &Path) -> Result<NormalizeSummary, SiteError> {
        let mut summary = NormalizeSummary::default();

        for path in html_files(root, &self.extra_exclude) {
            summary.scanned += 1;
            let relative = path.strip_prefix(root).unwrap_or(&path);
            let prefix = depth_prefix(relative);

            let before = decode_lossy_dropping(&std::fs::read(&path)?);
            let after = normalize_content(&before, &prefix);
            if after == before {
                continue;
            }

            if !self.dry_run {
                std::fs::write(&path, after)?;
            }
            tracing::debug!("Normalized: {}", relative.display());
            summary.changed += 1;
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, relative: &str, content: &str) -> PathBuf {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn prefix_for_root_file_is_empty() {
        assert_eq!(depth_prefix(Path::new("index.html")), "");
    }

    #[test]
    fn prefix_climbs_each_directory() {
        assert_eq!(depth_prefix(Path::new("blog/index.html")), "../");
        assert_eq!(depth_prefix(Path::new("a/b/c/page.html")), "../../../");
    }

    #[test]
    fn stylesheet_prefix_is_replaced() {
        let html = r#"<link rel="stylesheet" href="../../../css/main.css">"#;
        assert_eq!(
            normalize_content(html, "../"),
            r#"<link rel="stylesheet" href="../css/main.css">"#
        );
        assert_eq!(
            normalize_content(r#"<link href="/css/main.css">"#, ""),
            r#"<link href="css/main.css">"#
        );
    }

    #[test]
    fn script_filename_is_preserved() {
        let html = r#"<script src="assets/js/content-loader.v2_min.js"></script>"#;
        assert_eq!(
            normalize_content(html, "../../"),
            r#"<script src="../../assets/js/content-loader.v2_min.js"></script>"#
        );
    }

    #[test]
    fn image_remainder_is_preserved() {
        let html = r#"<img src="../assets/img/gallery/hope-day/01.jpg" alt="">"#;
        assert_eq!(
            normalize_content(html, ""),
            r#"<img src="assets/img/gallery/hope-day/01.jpg" alt="">"#
        );
    }

    #[test]
    fn absolute_urls_are_untouched() {
        let cases = [
            r#"<link href="https://cdn.example.com/css/main.css">"#,
            r#"<script src="http://cdn.example.com/assets/js/app.js"></script>"#,
            r#"<img src="https://cdn.example.com/assets/img/hero/home-01.jpg">"#,
        ];
        for html in cases {
            assert_eq!(normalize_content(html, "../../"), html);
        }
    }

    #[test]
    fn absolute_and_relative_on_one_line() {
        let html = r#"<img src="https://x.test/assets/img/a.jpg"><img src="assets/img/b.jpg">"#;
        assert_eq!(
            normalize_content(html, "../"),
            r#"<img src="https://x.test/assets/img/a.jpg"><img src="../assets/img/b.jpg">"#
        );
    }

    #[test]
    fn unrelated_attributes_are_untouched() {
        let html = r#"<a href="about.html"><script src="vendor/lib.js"></script>"#;
        assert_eq!(normalize_content(html, "../"), html);
    }

    #[test]
    fn normalizing_twice_is_stable() {
        let html = r#"<link href="css/main.css"><script src="assets/js/app.js"></script>"#;
        let once = normalize_content(html, "../../");
        assert_eq!(normalize_content(&once, "../../"), once);
    }

    #[test]
    fn decoding_drops_malformed_bytes() {
        assert_eq!(decode_lossy_dropping(b"caf\xC3\xA9 \xFF\xFEok"), "café ok");
    }

    #[test]
    fn excluded_directories_are_not_scanned() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "index.html", "");
        write(root, "admin/page.html", "");
        write(root, ".git/hooks/x.html", "");
        write(root, "blog/admin/nested.html", "");
        write(root, "notes.txt", "");

        let files = html_files(root, &[]);
        let relative: Vec<_> =
            files.iter().map(|p| p.strip_prefix(root).unwrap().to_path_buf()).collect();
        assert_eq!(
            relative,
            vec![PathBuf::from("blog/admin/nested.html"), PathBuf::from("index.html")]
        );
    }

    #[test]
    fn extra_exclusions_add_to_the_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let admin = write(dir.path(), "admin/page.html", r#"<link href="css/main.css">"#);
        write(dir.path(), ".git/hooks/x.html", r#"<link href="css/main.css">"#);
        write(dir.path(), "drafts/wip.html", r#"<link href="css/main.css">"#);
        write(dir.path(), "news/index.html", r#"<link href="css/main.css">"#);

        let summary = HtmlNormalizer::new(vec!["drafts".into()]).normalize(dir.path()).unwrap();
        assert_eq!(summary, NormalizeSummary { changed: 1, scanned: 1 });
        assert_eq!(std::fs::read_to_string(admin).unwrap(), r#"<link href="css/main.css">"#);
    }

    #[test]
    fn missing_root_scans_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let summary = HtmlNormalizer::default().normalize(&dir.path().join("missing")).unwrap();
        assert_eq!(summary, NormalizeSummary::default());
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_pages_are_scanned() {
        let dir = tempfile::tempdir().unwrap();
        let outside = tempfile::tempdir().unwrap();
        let target = write(outside.path(), "shared.html", r#"<link href="css/main.css">"#);
        std::fs::create_dir_all(dir.path().join("en")).unwrap();
        std::os::unix::fs::symlink(&target, dir.path().join("en/shared.html")).unwrap();

        let files = html_files(dir.path(), &[]);
        assert_eq!(files, vec![dir.path().join("en/shared.html")]);
    }

    #[test]
    fn nested_page_gets_depth_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let page = write(
            dir.path(),
            "blog/post/index.html",
            r#"<script src="assets/js/app.js"></script>"#,
        );

        let summary = HtmlNormalizer::default().normalize(dir.path()).unwrap();
        assert_eq!(summary, NormalizeSummary { changed: 1, scanned: 1 });
        assert!(std::fs::read_to_string(&page)
            .unwrap()
            .contains(r#"<script src="../../assets/js/app.js"></script>"#));
    }

    #[test]
    fn second_run_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "index.html", r#"<link href="../css/main.css">"#);
        write(dir.path(), "en/about/index.html", r#"<img src="assets/img/cards/news.jpg">"#);
        write(dir.path(), "admin/index.html", r#"<link href="css/main.css">"#);

        let first = HtmlNormalizer::default().normalize(dir.path()).unwrap();
        assert_eq!(first, NormalizeSummary { changed: 2, scanned: 2 });
        let snapshot = std::fs::read(dir.path().join("en/about/index.html")).unwrap();

        let second = HtmlNormalizer::default().normalize(dir.path()).unwrap();
        assert_eq!(second, NormalizeSummary { changed: 0, scanned: 2 });
        assert_eq!(std::fs::read(dir.path().join("en/about/index.html")).unwrap(), snapshot);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("admin/index.html")).unwrap(),
            r#"<link href="css/main.css">"#
        );
    }

    #[test]
    fn dry_run_leaves_files_alone() {
        let dir = tempfile::tempdir().unwrap();
        let page = write(dir.path(), "news/index.html", r#"<link href="css/main.css">"#);

        let summary = HtmlNormalizer::default().dry_run(true).normalize(dir.path()).unwrap();
        assert_eq!(summary.changed, 1);
        assert_eq!(std::fs::read_to_string(page).unwrap(), r#"<link href="css/main.css">"#);
    }

    #[test]
    fn summary_line_format() {
        let summary = NormalizeSummary { changed: 2, scanned: 9 };
        assert_eq!(summary.to_string(), "Normalized HTML asset paths: changed=2 scanned=9");
    }
}
