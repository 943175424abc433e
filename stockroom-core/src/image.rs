//! Image payload resolution.

use std::io;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;
use tracing::debug;

use crate::item::PLACEHOLDER_IMAGE;

#[derive(Debug, Error)]
#[error("could not read image {path}: {source}")]
pub struct ImageError {
    pub path: String,
    #[source]
    pub source: io::Error,
}

/// Resolves the image payload for a form submission.
///
/// With no file this returns the placeholder without suspending; otherwise
/// the file is read once and returned as a base64 data URL.
pub async fn resolve_image(path: Option<&Path>) -> Result<String, ImageError> {
    let Some(path) = path else {
        return Ok(PLACEHOLDER_IMAGE.to_string());
    };

    let bytes = tokio::fs::read(path).await.map_err(|source| ImageError {
        path: path.display().to_string(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "image read");

    Ok(data_url(mime_type(path), &bytes))
}

/// Like [`resolve_image`], but with no new file an existing image is kept.
pub async fn resolve_or_keep(
    path: Option<PathBuf>,
    current: Option<String>,
) -> Result<String, ImageError> {
    match (path, current) {
        (None, Some(current)) => Ok(current),
        (path, _) => resolve_image(path.as_deref()).await,
    }
}

pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

pub fn mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}
