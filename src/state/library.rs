use serde::Deserialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::data::{Card, Visibility};
use crate::error::{GalleryError, Result};

/// Category given to images that sit directly in a scanned folder
pub const UNCATEGORIZED: &str = "uncategorized";

/// Supported image file extensions for folder scans
const IMAGE_EXTENSIONS: [&str; 8] = ["jpg", "jpeg", "png", "gif", "webp", "bmp", "tif", "tiff"];

/// The card list a gallery is built from.
///
/// Produced once per load; the gallery never adds or removes cards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub title: Option<String>,
    /// Filter buttons after "all", in display order
    pub categories: Vec<String>,
    pub cards: Vec<Card>,
}

/// On-disk manifest layout
#[derive(Deserialize, Debug)]
struct Manifest {
    title: Option<String>,
    #[serde(default)]
    categories: Option<Vec<String>>,
    #[serde(default)]
    cards: Vec<ManifestCard>,
}

#[derive(Deserialize, Debug)]
struct ManifestCard {
    title: String,
    #[serde(default)]
    caption: String,
    image: String,
    category: String,
    alt: Option<String>,
}

impl Catalog {
    /// Build a catalog from manifest JSON.
    ///
    /// Relative image paths are resolved against `base_dir`; URLs are kept
    /// as they are.
    pub fn from_manifest_str(json: &str, base_dir: &Path, source: &Path) -> Result<Self> {
        let manifest: Manifest =
            serde_json::from_str(json).map_err(|source_err| GalleryError::Parse {
                path: source.to_path_buf(),
                source: source_err,
            })?;

        let cards: Vec<Card> = manifest
            .cards
            .into_iter()
            .enumerate()
            .map(|(index, entry)| Card {
                index,
                category: entry.category,
                title: entry.title,
                caption: entry.caption,
                image_source: resolve_source(&entry.image, base_dir),
                alt: entry.alt,
                visibility: Visibility::Visible,
            })
            .collect();

        let categories = manifest
            .categories
            .unwrap_or_else(|| distinct_categories(&cards));

        Ok(Catalog {
            title: manifest.title,
            categories,
            cards,
        })
    }

    /// Build a catalog from an image folder.
    ///
    /// Each sub-folder directly below `root` is a category; images deeper
    /// down belong to the sub-folder they sit in. Cards are ordered by
    /// relative path so repeated scans give the same indexes.
    pub fn scan_folder_blocking(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(GalleryError::NotFound(root.to_path_buf()));
        }

        tracing::info!(root = %root.display(), "Scanning folder");

        let mut found: Vec<(PathBuf, PathBuf)> = Vec::new();

        // Walk the directory tree recursively
        for entry in WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if !path.is_file() || !is_image(path) {
                continue;
            }

            if let Ok(relative) = path.strip_prefix(root) {
                found.push((relative.to_path_buf(), path.to_path_buf()));
            }
        }

        found.sort();

        let cards: Vec<Card> = found
            .into_iter()
            .enumerate()
            .map(|(index, (relative, absolute))| {
                let mut components = relative.components();
                let first = components.next();
                let category = match (first, components.next()) {
                    (Some(dir), Some(_)) => dir.as_os_str().to_string_lossy().to_string(),
                    _ => UNCATEGORIZED.to_string(),
                };
                let title = absolute
                    .file_stem()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .to_string();

                Card {
                    index,
                    category,
                    title,
                    caption: String::new(),
                    image_source: absolute.to_string_lossy().to_string(),
                    alt: None,
                    visibility: Visibility::Visible,
                }
            })
            .collect();

        tracing::info!(count = cards.len(), "Folder scan complete");

        let title = root
            .file_name()
            .map(|name| name.to_string_lossy().to_string());

        Ok(Catalog {
            title,
            categories: distinct_categories(&cards),
            cards,
        })
    }
}

/// Load a gallery from a manifest file or a folder, off the UI thread
pub async fn load_gallery(path: PathBuf) -> Result<Catalog> {
    if path.is_dir() {
        return tokio::task::spawn_blocking(move || Catalog::scan_folder_blocking(&path))
            .await
            .map_err(|e| GalleryError::Task(e.to_string()))?;
    }

    let json = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| GalleryError::io(&path, e))?;
    Catalog::from_manifest_str(&json, manifest_dir(&path), &path)
}

fn manifest_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new("."))
}

/// Categories in first-seen order, without duplicates
fn distinct_categories(cards: &[Card]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for card in cards {
        if !categories.contains(&card.category) {
            categories.push(card.category.clone());
        }
    }
    categories
}

/// Whether the source names something outside the local file system
pub fn is_remote(source: &str) -> bool {
    ["http://", "https://", "data:"]
        .iter()
        .any(|scheme| source.starts_with(scheme))
}

fn resolve_source(image: &str, base_dir: &Path) -> String {
    let path = Path::new(image);
    if is_remote(image) || path.is_absolute() {
        image.to_string()
    } else {
        base_dir.join(path).to_string_lossy().to_string()
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MANIFEST: &str = r#"{
        "title": "Travels",
        "cards": [
            { "title": "Lake", "caption": "Morning", "image": "img/lake.jpg", "category": "nature" },
            { "title": "Tower", "image": "/abs/tower.jpg", "category": "city", "alt": "Radio tower" },
            { "title": "Forest", "image": "https://example.com/forest.jpg", "category": "nature" }
        ]
    }"#;

    #[test]
    fn test_manifest_cards_and_categories() {
        let base = Path::new("/gallery");
        let catalog =
            Catalog::from_manifest_str(MANIFEST, base, &base.join("gallery.json")).unwrap();

        assert_eq!(catalog.title.as_deref(), Some("Travels"));
        assert_eq!(catalog.categories, vec!["nature", "city"]);

        let indexes: Vec<usize> = catalog.cards.iter().map(|c| c.index).collect();
        assert_eq!(indexes, vec![0, 1, 2]);

        let lake = &catalog.cards[0];
        assert_eq!(
            PathBuf::from(&lake.image_source),
            Path::new("/gallery").join("img/lake.jpg")
        );
        assert_eq!(lake.caption, "Morning");
        assert_eq!(catalog.cards[1].image_source, "/abs/tower.jpg");
        assert_eq!(catalog.cards[1].alt.as_deref(), Some("Radio tower"));
        assert_eq!(catalog.cards[1].caption, "");
        assert_eq!(catalog.cards[2].image_source, "https://example.com/forest.jpg");
    }

    #[test]
    fn test_explicit_categories_win() {
        let json = r#"{ "categories": ["city", "nature", "people"], "cards": [] }"#;
        let catalog = Catalog::from_manifest_str(json, Path::new("."), Path::new("g.json")).unwrap();

        assert_eq!(catalog.categories, vec!["city", "nature", "people"]);
        assert!(catalog.cards.is_empty());
    }

    #[test]
    fn test_bad_manifest_is_parse_error() {
        let result = Catalog::from_manifest_str("{ \"cards\": 3 }", Path::new("."), Path::new("g.json"));
        assert!(matches!(result, Err(GalleryError::Parse { .. })));
    }

    #[test]
    fn test_manifest_paths_resolve_next_to_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gallery.json");
        std::fs::write(&path, MANIFEST).unwrap();

        let json = std::fs::read_to_string(&path).unwrap();
        let catalog = Catalog::from_manifest_str(&json, manifest_dir(&path), &path).unwrap();

        assert_eq!(catalog.cards.len(), 3);
        assert_eq!(
            PathBuf::from(&catalog.cards[0].image_source),
            dir.path().join("img/lake.jpg")
        );
    }

    #[test]
    fn test_scan_folder_uses_subfolders_as_categories() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("nature/lakes")).unwrap();
        std::fs::create_dir_all(root.join("city")).unwrap();
        for file in [
            "nature/b.jpg",
            "nature/lakes/a.PNG",
            "city/tower.jpeg",
            "loose.gif",
            "notes.txt",
        ] {
            std::fs::write(root.join(file), b"").unwrap();
        }

        let catalog = Catalog::scan_folder_blocking(root).unwrap();

        let summary: Vec<(usize, &str, &str)> = catalog
            .cards
            .iter()
            .map(|c| (c.index, c.category.as_str(), c.title.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (0, "city", "tower"),
                (1, UNCATEGORIZED, "loose"),
                (2, "nature", "b"),
                (3, "nature", "a"),
            ]
        );
        assert_eq!(catalog.categories, vec!["city", UNCATEGORIZED, "nature"]);
    }

    #[test]
    fn test_scan_missing_folder() {
        let dir = tempfile::tempdir().unwrap();
        let result = Catalog::scan_folder_blocking(&dir.path().join("missing"));
        assert!(matches!(result, Err(GalleryError::NotFound(_))));
    }

    #[test]
    fn test_remote_sources() {
        assert!(is_remote("https://example.com/a.jpg"));
        assert!(is_remote("data:image/png;base64,AAAA"));
        assert!(!is_remote("/photos/a.jpg"));
        assert!(!is_remote("photos/http.jpg"));
    }
}
