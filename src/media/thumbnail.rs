use image::imageops::FilterType;
use image::ImageFormat;
use std::fs;
use std::path::{Path, PathBuf};

use super::local_path;
use crate::error::{GalleryError, Result};

/// Get the thumbnail cache directory
/// Returns ~/.cache/lumen-gallery/thumbnails on Linux
pub fn get_thumbnail_cache_dir() -> Result<PathBuf> {
    let mut path = dirs::cache_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| GalleryError::NotFound(PathBuf::from("cache directory")))?;

    path.push("lumen-gallery");
    path.push("thumbnails");

    // Ensure the directory exists
    fs::create_dir_all(&path).map_err(|e| GalleryError::io(&path, e))?;

    Ok(path)
}

/// Load (or generate) the thumbnail for a card image, off the UI thread.
/// Returns the path of the cached JPEG.
pub async fn load_thumbnail(source: String, size: u32) -> Result<PathBuf> {
    tokio::task::spawn_blocking(move || {
        let cache_dir = get_thumbnail_cache_dir()?;
        generate_thumbnail(&source, size, &cache_dir)
    })
    .await
    .map_err(|e| GalleryError::Task(e.to_string()))?
}

/// Generate a thumbnail into `cache_dir`, reusing an existing one
pub fn generate_thumbnail(source: &str, size: u32, cache_dir: &Path) -> Result<PathBuf> {
    let thumbnail_path = get_thumbnail_path(source, size, cache_dir);
    if thumbnail_path.exists() {
        return Ok(thumbnail_path);
    }

    let image_path = local_path(source)?;

    let img = image::open(&image_path).map_err(|source| GalleryError::Image {
        path: image_path.clone(),
        source,
    })?;

    // Resize to thumbnail size; JPEG has no alpha channel
    let thumbnail = img.resize(size, size, FilterType::Lanczos3).to_rgb8();

    // Only a complete JPEG may exist under the cache name
    let partial_path = thumbnail_path.with_extension("jpg.part");
    if let Err(source) = thumbnail.save_with_format(&partial_path, ImageFormat::Jpeg) {
        let _ = fs::remove_file(&partial_path);
        return Err(GalleryError::Image {
            path: thumbnail_path,
            source,
        });
    }
    if let Err(e) = fs::rename(&partial_path, &thumbnail_path) {
        let _ = fs::remove_file(&partial_path);
        return Err(GalleryError::io(&thumbnail_path, e));
    }

    tracing::debug!(thumbnail = %thumbnail_path.display(), "Generated thumbnail");
    Ok(thumbnail_path)
}

/// Get the thumbnail path for a source (doesn't generate, just returns the expected path)
/// The name is a BLAKE3 digest of the source, stable across builds and toolchains.
pub fn get_thumbnail_path(source: &str, size: u32, cache_dir: &Path) -> PathBuf {
    let hex = blake3::hash(source.as_bytes()).to_hex();
    cache_dir.join(format!("{}_{}.jpg", &hex[..32], size))
}
