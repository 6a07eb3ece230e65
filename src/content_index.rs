//! Content indexes: one `index.json` per collection and language.
//!
//! Markdown files under `content/<collection>/<lang>/` carry YAML front
//! matter. Each file becomes an entry; published entries must be complete,
//! drafts may not be. Entries are written newest first:
//!
//! ```text
//! content/blog/en/*.md  ->  content/blog/en/index.json   {"posts": [...]}
//! content/gallery/ko/*.md -> content/gallery/ko/index.json {"albums": [...]}
//! ```

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use walkdir::{DirEntry, WalkDir};

use crate::error::SiteError;

/// Shape of the entries in a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Blog posts and news articles.
    Posts,
    /// Photo albums.
    Albums,
}

impl Kind {
    /// Top-level key of the written index.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Posts => "posts",
            Self::Albums => "albums",
        }
    }
}

/// A content collection directory.
#[derive(Debug, Clone, Copy)]
pub struct Collection {
    /// Directory name under the content root.
    pub name: &'static str,
    /// Entry shape.
    pub kind: Kind,
}

/// Collections indexed on every run.
pub const COLLECTIONS: &[Collection] = &[
    Collection { name: "blog", kind: Kind::Posts },
    Collection { name: "news", kind: Kind::Posts },
    Collection { name: "gallery", kind: Kind::Albums },
];

/// One indexed markdown file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Stable identifier, defaulting to the file name.
    pub id: String,
    /// Display title.
    pub title: String,
    /// `YYYY-MM-DD` when the date parses, otherwise the raw value.
    pub date: String,
    /// Language directory the file was found in.
    pub lang: String,
    /// `draft` unless the front matter says otherwise.
    pub status: String,
    /// URL slug, defaulting to the file name.
    pub slug: String,
    /// Collection-specific fields.
    #[serde(flatten)]
    pub detail: Detail,
}

/// Fields that differ between posts and albums.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Detail {
    /// Blog or news post.
    Post {
        /// Card image.
        cover_image: String,
        /// Teaser text.
        excerpt: String,
        /// Markdown body.
        body_markdown: String,
    },
    /// Gallery album.
    Album {
        /// Album cover.
        cover_image: String,
        /// Album description.
        description: String,
        /// Photo paths or URLs.
        images: Vec<String>,
    },
}

impl Entry {
    /// True when the entry is visible on the site.
    #[must_use]
    pub fn is_published(&self) -> bool {
        self.status == "published"
    }
}

/// Split `raw` into YAML front matter and body.
///
/// Without an opening `---` line the whole text is body. An unterminated
/// block is all front matter.
#[must_use]
pub fn split_front_matter(raw: &str) -> (&str, &str) {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let mut lines = raw.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return ("", raw);
    };
    if first.trim_end() != "---" {
        return ("", raw);
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if line.trim_end() == "---" {
            return (&raw[start..offset], &raw[offset + line.len()..]);
        }
        offset += line.len();
    }
    (&raw[start..], "")
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn field<'a>(data: &'a Mapping, key: &str) -> Option<&'a Value> {
    data.get(key).filter(|v| !v.is_null())
}

fn text(data: &Mapping, key: &str) -> String {
    field(data, key).map(scalar_text).unwrap_or_default().trim().to_string()
}

/// Parse a date in the formats front matter commonly uses.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|d| d.with_timezone(&Utc).date_naive()))
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").ok().map(|d| d.date()))
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").ok().map(|d| d.date()))
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y/%m/%d").ok())
}

/// `YYYY-MM-DD` for parseable dates; anything else is kept trimmed.
#[must_use]
pub fn normalize_date(raw: &str) -> String {
    let raw = raw.trim();
    parse_date(raw).map_or_else(|| raw.to_string(), |d| d.format("%Y-%m-%d").to_string())
}

fn normalize_images(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Sequence(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .map(|item| match item {
            Value::String(s) => s.clone(),
            Value::Mapping(m) => ["image", "url"]
                .iter()
                .find_map(|key| match m.get(*key) {
                    Some(Value::String(s)) => Some(s.clone()),
                    _ => None,
                })
                .unwrap_or_default(),
            _ => String::new(),
        })
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Build an entry from a markdown file's text.
///
/// # Errors
///
/// Returns the YAML error message if the front matter does not parse.
pub fn parse_entry(raw: &str, file_slug: &str, lang: &str, kind: Kind) -> Result<Entry, String> {
    let (matter, body) = split_front_matter(raw);
    let data = match serde_yaml::from_str::<Value>(matter).map_err(|e| e.to_string())? {
        Value::Mapping(m) => m,
        _ => Mapping::new(),
    };

    let id = ["id", "content_id", "translation_id"]
        .iter()
        .find_map(|key| field(&data, key))
        .map(|v| scalar_text(v).trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| file_slug.to_string());
    let slug = Some(text(&data, "slug")).filter(|s| !s.is_empty()).unwrap_or_else(|| file_slug.to_string());
    let status = Some(text(&data, "status")).filter(|s| !s.is_empty()).unwrap_or_else(|| "draft".to_string());

    let detail = match kind {
        Kind::Albums => Detail::Album {
            cover_image: text(&data, "cover_image"),
            description: text(&data, "description"),
            images: normalize_images(field(&data, "images")),
        },
        Kind::Posts => {
            let body = body.trim();
            let body_markdown = if body.is_empty() {
                [text(&data, "body_markdown"), text(&data, "body")]
                    .into_iter()
                    .find(|s| !s.is_empty())
                    .unwrap_or_default()
            } else {
                body.to_string()
            };
            Detail::Post {
                cover_image: text(&data, "cover_image"),
                excerpt: text(&data, "excerpt"),
                body_markdown,
            }
        }
    };

    Ok(Entry {
        id,
        title: text(&data, "title"),
        date: normalize_date(&text(&data, "date")),
        lang: lang.to_string(),
        status,
        slug,
        detail,
    })
}

/// Problems that keep a published entry off the site.
#[must_use]
pub fn validate(entry: &Entry) -> Vec<&'static str> {
    let mut errors = Vec::new();
    if entry.title.is_empty() {
        errors.push("missing title");
    }
    if entry.date.is_empty() {
        errors.push("missing date");
    }
    if entry.slug.is_empty() {
        errors.push("missing slug");
    }

    match &entry.detail {
        Detail::Album { cover_image, description, images } => {
            if cover_image.is_empty() {
                errors.push("missing cover_image");
            }
            if description.is_empty() {
                errors.push("missing description");
            }
            if images.is_empty() {
                errors.push("missing images");
            }
        }
        Detail::Post { cover_image, excerpt, body_markdown } => {
            if cover_image.is_empty() {
                errors.push("missing cover_image");
            }
            if excerpt.is_empty() {
                errors.push("missing excerpt");
            }
            if body_markdown.is_empty() {
                errors.push("missing body_markdown");
            }
        }
    }
    errors
}

/// Newest first; undated entries keep their order after dated ones.
pub fn sort_newest_first(entries: &mut [Entry]) {
    entries.sort_by(|a, b| match (parse_date(&a.date), parse_date(&b.date)) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Markdown files directly inside `dir`, sorted by name. A missing
/// directory has none.
#[must_use]
pub fn markdown_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().to_lowercase().ends_with(".md"))
        .filter(|e| e.path().is_file())
        .map(DirEntry::into_path)
        .collect()
}

fn load_entry(path: &Path, lang: &str, kind: Kind) -> Result<Entry, String> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let slug = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    parse_entry(&raw, &slug, lang, kind)
        .map_err(|e| format!("Frontmatter parse failed for {}: {e}", path.display()))
}

/// One written (or, in a dry run, computed) index file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexFile {
    /// Location of `index.json`.
    pub path: PathBuf,
    /// Entries it lists.
    pub items: usize,
}

/// Everything one indexer run produced.
#[derive(Debug, Default)]
pub struct IndexReport {
    /// Index files, in collection then language order.
    pub indexes: Vec<IndexFile>,
    /// `<file>: <problems>` lines for entries left out.
    pub failures: Vec<String>,
}

/// Counts printed after a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexSummary {
    /// Index files written.
    pub written: usize,
    /// Entries across all indexes.
    pub entries: usize,
    /// Files rejected.
    pub failed: usize,
}

impl fmt::Display for IndexSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Content indexes: written={} entries={} failed={}",
            self.written, self.entries, self.failed
        )
    }
}

impl IndexReport {
    /// Totals for the summary line.
    #[must_use]
    pub fn summary(&self) -> IndexSummary {
        IndexSummary {
            written: self.indexes.len(),
            entries: self.indexes.iter().map(|i| i.items).sum(),
            failed: self.failures.len(),
        }
    }
}

/// Builds `index.json` files for every collection and language.
pub struct ContentIndexer {
    langs: Vec<String>,
    dry_run: bool,
}

impl ContentIndexer {
    /// Create an indexer for the given language directories.
    #[must_use]
    pub fn new(langs: Vec<String>) -> Self {
        Self { langs, dry_run: false }
    }

    /// Compute indexes without writing them.
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Index every collection under `content_dir`.
    ///
    /// Unreadable or invalid entries are collected in
    /// [`IndexReport::failures`] and left out of their index.
    ///
    /// # Errors
    ///
    /// Returns an error if an index file cannot be written.
    pub fn build(&self, content_dir: &Path) -> Result<IndexReport, SiteError> {
        let mut report = IndexReport::default();

        for collection in COLLECTIONS {
            for lang in &self.langs {
                let dir = content_dir.join(collection.name).join(lang);
                let mut entries = Vec::new();

                for path in markdown_files(&dir) {
                    match load_entry(&path, lang, collection.kind) {
                        Ok(entry) => {
                            let errors =
                                if entry.is_published() { validate(&entry) } else { Vec::new() };
                            if errors.is_empty() {
                                entries.push(entry);
                            } else {
                                report
                                    .failures
                                    .push(format!("{}: {}", path.display(), errors.join(", ")));
                            }
                        }
                        Err(e) => report.failures.push(e),
                    }
                }

                sort_newest_first(&mut entries);
                let path = dir.join("index.json");
                if !self.dry_run {
                    write_index(&path, collection.kind, &entries)?;
                }
                tracing::info!("Generated {} ({} items)", path.display(), entries.len());
                report.indexes.push(IndexFile { path, items: entries.len() });
            }
        }

        Ok(report)
    }
}

fn write_index(path: &Path, kind: Kind, entries: &[Entry]) -> Result<(), SiteError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let document = BTreeMap::from([(kind.key(), entries)]);
    let mut json = serde_json::to_string_pretty(&document)?;
    json.push('\n');
    std::fs::write(path, json)?;
    Ok(())
}
