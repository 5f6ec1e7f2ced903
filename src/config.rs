/// User settings
///
/// Stored as JSON in the platform config directory:
/// - Linux: ~/.config/lumen-gallery/settings.json
/// - macOS: ~/Library/Application Support/lumen-gallery/settings.json
/// - Windows: %APPDATA%\lumen-gallery\settings.json
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{GalleryError, Result};

const APP_DIR: &str = "lumen-gallery";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Manifest file or image folder opened at start-up
    pub gallery_path: Option<PathBuf>,
    /// Below this window width the gallery step buttons are hidden
    pub compact_width: f32,
    /// Extra distance around the viewport at which tiles start loading
    pub reveal_margin: f32,
    /// Edge length of a grid tile in logical pixels
    pub tile_size: f32,
    /// Gap between tiles, both axes
    pub tile_gap: f32,
    /// Padding around the grid
    pub grid_padding: f32,
    /// Longest side of generated thumbnails
    pub thumbnail_size: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gallery_path: None,
            compact_width: 760.0,
            reveal_margin: 200.0,
            tile_size: 240.0,
            tile_gap: 16.0,
            grid_padding: 24.0,
            thumbnail_size: 320,
        }
    }
}

impl Settings {
    /// Load settings from the default location.
    ///
    /// A missing or malformed file yields the defaults; the app must
    /// always be able to start.
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            tracing::warn!("No config directory available, using default settings");
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(GalleryError::NotFound(_)) => {
                tracing::debug!(path = %path.display(), "No settings file, using defaults");
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Ignoring settings file: {}", e);
                Self::default()
            }
        }
    }

    /// Load settings from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(GalleryError::NotFound(path.to_path_buf()));
        }

        let json = std::fs::read_to_string(path).map_err(|e| GalleryError::io(path, e))?;
        serde_json::from_str(&json).map_err(|source| GalleryError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Where the settings file lives, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push(APP_DIR);
        path.push(SETTINGS_FILE);
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = Settings::load_from(&dir.path().join("settings.json"));
        assert!(matches!(result, Err(GalleryError::NotFound(_))));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, r#"{{ "compact_width": 600.0, "gallery_path": "/photos" }}"#).unwrap();

        let settings = Settings::load_from(&path).unwrap();

        assert_eq!(settings.compact_width, 600.0);
        assert_eq!(settings.gallery_path, Some(PathBuf::from("/photos")));
        assert_eq!(settings.reveal_margin, 200.0);
        assert_eq!(settings.thumbnail_size, 320);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            Settings::load_from(&path),
            Err(GalleryError::Parse { .. })
        ));
    }
}
