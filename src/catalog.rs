//! The fixed list of placeholder images the site expects.

use std::path::{Path, PathBuf};

use image::Rgb;

/// A placeholder image to synthesize when the real asset is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Destination file.
    pub path: PathBuf,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Caption; may contain `\n` for a two-line label.
    pub label: String,
    /// Fill color.
    pub background: Rgb<u8>,
}

impl Placeholder {
    /// Create a placeholder descriptor.
    #[must_use]
    pub fn new(
        path: impl Into<PathBuf>,
        (width, height): (u32, u32),
        label: impl Into<String>,
        background: [u8; 3],
    ) -> Self {
        Self { path: path.into(), width, height, label: label.into(), background: Rgb(background) }
    }
}

const HERO: (u32, u32) = (1600, 900);
const CARD: (u32, u32) = (1200, 675);
const PORTRAIT: (u32, u32) = (900, 900);
const GALLERY: (u32, u32) = (1200, 900);

const CARD_BG: [u8; 3] = [33, 33, 33];
const PEOPLE_BG: [u8; 3] = [50, 50, 60];

/// Single assets: `(relative path, size, label, background)`.
const SINGLES: &[(&str, (u32, u32), &str, [u8; 3])] = &[
    ("assets/img/hero/home-01.jpg", HERO, "Hero 01", [28, 99, 140]),
    ("assets/img/hero/home-02.jpg", HERO, "Hero 02", [44, 120, 115]),
    ("assets/img/hero/home-03.jpg", HERO, "Hero 03", [90, 60, 130]),
    ("assets/img/hero/home-04.jpg", HERO, "Hero 04", [160, 90, 40]),
    ("assets/img/cards/services.jpg", CARD, "Services", CARD_BG),
    ("assets/img/cards/news.jpg", CARD, "News", CARD_BG),
    ("assets/img/cards/blog.jpg", CARD, "Blog", CARD_BG),
    ("assets/img/cards/gallery.jpg", CARD, "Gallery", CARD_BG),
    ("assets/img/pastor/pastor-portrait.jpg", PORTRAIT, "Pastor Portrait", PEOPLE_BG),
    ("assets/img/staffs/staff-01.jpg", PORTRAIT, "Staff 01", PEOPLE_BG),
];

/// A gallery album: a cover plus numbered photos.
struct Album {
    slug: &'static str,
    title: &'static str,
    photos: u32,
    background: [u8; 3],
}

const ALBUMS: &[Album] = &[
    Album { slug: "hope-day", title: "Hope Day", photos: 5, background: [56, 95, 160] },
    Album {
        slug: "community-night",
        title: "Community Night",
        photos: 4,
        background: [120, 70, 90],
    },
];

impl Album {
    fn placeholders(&self, root: &Path) -> impl Iterator<Item = Placeholder> + '_ {
        let dir = root.join("assets/img/gallery").join(self.slug);
        let cover = Placeholder::new(
            dir.join("cover.jpg"),
            GALLERY,
            format!("{}\nCover", self.title),
            self.background,
        );
        let photos = (1..=self.photos).map(move |i| {
            Placeholder::new(
                dir.join(format!("{i:02}.jpg")),
                GALLERY,
                format!("{}\n{i:02}", self.title),
                self.background,
            )
        });
        std::iter::once(cover).chain(photos)
    }
}

/// Build the full placeholder list with paths joined onto `root`.
#[must_use]
pub fn catalog(root: &Path) -> Vec<Placeholder> {
    let singles = SINGLES
        .iter()
        .map(|&(path, size, label, bg)| Placeholder::new(root.join(path), size, label, bg));
    let albums = ALBUMS.iter().flat_map(|album| album.placeholders(root));
    singles.chain(albums).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn catalog_has_every_expected_asset() {
        let entries = catalog(Path::new("/site"));
        assert_eq!(entries.len(), 21);
    }

    #[test]
    fn paths_are_unique() {
        let entries = catalog(Path::new("/site"));
        let unique: HashSet<_> = entries.iter().map(|p| &p.path).collect();
        assert_eq!(unique.len(), entries.len());
    }

    #[test]
    fn news_card_matches_table() {
        let entries = catalog(Path::new("/site"));
        let news = entries
            .iter()
            .find(|p| p.path == Path::new("/site/assets/img/cards/news.jpg"))
            .unwrap();
        assert_eq!((news.width, news.height), (1200, 675));
        assert_eq!(news.label, "News");
        assert_eq!(news.background, Rgb([33, 33, 33]));
    }

    #[test]
    fn album_entries_use_two_line_labels() {
        let entries = catalog(Path::new("/site"));
        let cover = entries
            .iter()
            .find(|p| p.path == Path::new("/site/assets/img/gallery/hope-day/cover.jpg"))
            .unwrap();
        assert_eq!(cover.label, "Hope Day\nCover");

        let last = entries
            .iter()
            .find(|p| p.path == Path::new("/site/assets/img/gallery/community-night/04.jpg"))
            .unwrap();
        assert_eq!(last.label, "Community Night\n04");
        assert_eq!((last.width, last.height), (1200, 900));
        assert_eq!(last.background, Rgb([120, 70, 90]));
    }

    #[test]
    fn album_photo_count() {
        let entries = catalog(Path::new("/site"));
        let hope_day = entries
            .iter()
            .filter(|p| p.path.starts_with("/site/assets/img/gallery/hope-day"))
            .count();
        assert_eq!(hope_day, 6);
        assert!(!entries.iter().any(|p| p.path.ends_with("community-night/05.jpg")));
    }
}
