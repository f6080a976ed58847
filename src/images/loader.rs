use image::{imageops::FilterType, RgbaImage};
use iced::widget::image::Handle;
use std::path::PathBuf;
use thiserror::Error;

use crate::ui::grid::TILE_SIZE;

/// Edge length of decoded tiles (square)
const THUMBNAIL_SIZE: u32 = TILE_SIZE as u32;

/// Why a tile picture could not be loaded.
///
/// Carries strings rather than source errors so it can ride inside a UI message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("request for {uri} failed: {reason}")]
    Http { uri: String, reason: String },
    #[error("failed to read {path}: {reason}")]
    Io { path: PathBuf, reason: String },
    #[error("failed to decode image: {0}")]
    Decode(String),
}

/// Where a catalog URI points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Remote(String),
    Local(PathBuf),
}

impl Source {
    pub fn parse(uri: &str) -> Self {
        if uri.starts_with("http://") || uri.starts_with("https://") {
            Source::Remote(uri.to_string())
        } else if let Some(path) = uri.strip_prefix("file://") {
            Source::Local(PathBuf::from(path))
        } else {
            Source::Local(PathBuf::from(uri))
        }
    }
}

/// Load one catalog picture and turn it into a square tile handle
pub async fn load_tile(uri: String) -> Result<Handle, LoadError> {
    let bytes = match Source::parse(&uri) {
        Source::Remote(url) => fetch(&url).await?,
        Source::Local(path) => tokio::fs::read(&path)
            .await
            .map_err(|e| LoadError::Io {
                path: path.clone(),
                reason: e.to_string(),
            })?,
    };

    let thumbnail = decode_thumbnail(&bytes)?;
    let (width, height) = thumbnail.dimensions();
    Ok(Handle::from_rgba(width, height, thumbnail.into_raw()))
}

async fn fetch(url: &str) -> Result<Vec<u8>, LoadError> {
    let http = |e: reqwest::Error| LoadError::Http {
        uri: url.to_string(),
        reason: e.to_string(),
    };

    let response = reqwest::get(url)
        .await
        .and_then(|r| r.error_for_status())
        .map_err(http)?;
    let bytes = response.bytes().await.map_err(http)?;

    Ok(bytes.to_vec())
}

/// Decode any supported format and crop-resize it to a square thumbnail
pub fn decode_thumbnail(bytes: &[u8]) -> Result<RgbaImage, LoadError> {
    let img = image::load_from_memory(bytes).map_err(|e| LoadError::Decode(e.to_string()))?;

    Ok(img
        .resize_to_fill(THUMBNAIL_SIZE, THUMBNAIL_SIZE, FilterType::Lanczos3)
        .to_rgba8())
}
