/// Image loading for cards
///
/// This module handles:
/// - Generating and caching grid thumbnails
/// - Reading full-size images for the lightbox
///
/// Only local files are loaded. Remote sources stay as placeholders.

pub mod preview;
pub mod thumbnail;

use std::path::PathBuf;

use crate::error::{GalleryError, Result};
use crate::state::library::is_remote;

/// Turn a card's image source into a local path
pub fn local_path(source: &str) -> Result<PathBuf> {
    if is_remote(source) {
        return Err(GalleryError::UnsupportedSource(source.to_string()));
    }

    let path = PathBuf::from(source);
    if !path.is_file() {
        return Err(GalleryError::NotFound(path));
    }
    Ok(path)
}
