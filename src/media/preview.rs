/// Full-size image loading for the lightbox
/// Reads the original file without resizing; iced decodes it.
use super::local_path;
use crate::error::{GalleryError, Result};

/// Read the full-size image bytes for a card source
pub async fn load_full_image(source: String) -> Result<Vec<u8>> {
    let path = local_path(&source)?;

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| GalleryError::io(&path, e))?;

    tracing::debug!(
        path = %path.display(),
        "Loaded full image ({:.1}MB)",
        bytes.len() as f64 / 1024.0 / 1024.0
    );
    Ok(bytes)
}
