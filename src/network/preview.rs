//! Page images - download and decode into downscaled RGB previews

use image::imageops::FilterType;

use crate::constants::{PREVIEW_MAX_HEIGHT, PREVIEW_MAX_WIDTH};
use crate::error::Result;
use crate::models::Preview;
use crate::network::client::download_bytes;

/// Decode encoded image bytes and shrink them to fit the preview box
pub fn decode_preview(bytes: &[u8]) -> Result<Preview> {
    let img = image::load_from_memory(bytes)?;
    let img = if img.width() > PREVIEW_MAX_WIDTH || img.height() > PREVIEW_MAX_HEIGHT {
        img.resize(PREVIEW_MAX_WIDTH, PREVIEW_MAX_HEIGHT, FilterType::Triangle)
    } else {
        img
    };
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    let pixels = rgb.pixels().map(|p| p.0).collect();
    Ok(Preview { width, height, pixels })
}

/// Fetch the display resolution of a record and decode it off the runtime
pub async fn fetch_preview(client: &reqwest::Client, url: &str) -> Result<Preview> {
    let bytes = download_bytes(client, url).await?;
    tokio::task::spawn_blocking(move || decode_preview(&bytes))
        .await?
}
