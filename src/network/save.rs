//! Save pipeline - permission, staged download, media-library write

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{BrowserError, Result};
use crate::models::ImageRecord;
use crate::network::client::download_to_file;
use crate::platform::{MediaLibrary, Permission};

/// Ensure write access, asking once if it has not been granted yet
pub fn ensure_permission(media: &dyn MediaLibrary) -> Result<()> {
    let permission = match media.permission() {
        Permission::Granted => Permission::Granted,
        _ => media.request_permission(),
    };
    match permission {
        Permission::Granted => Ok(()),
        _ => Err(BrowserError::PermissionDenied),
    }
}

/// File name used while staging a download. Distinct per request, so two
/// saves of the same record never share a staged file.
pub fn staged_file_name(image: &ImageRecord, request_id: u64) -> String {
    let id: String = image
        .id
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    format!("wallpaper-{}-{}-{}.jpg", id, stamp, request_id)
}

/// Save the display resolution of `image` into the media library.
///
/// Nothing is downloaded unless permission is granted.
pub async fn save_image(
    request_id: u64,
    client: &reqwest::Client,
    media: Arc<dyn MediaLibrary>,
    staging_dir: &Path,
    image: &ImageRecord,
) -> Result<PathBuf> {
    let check = media.clone();
    tokio::task::spawn_blocking(move || ensure_permission(check.as_ref()))
        .await??;

    let staged = staging_dir.join(staged_file_name(image, request_id));
    let bytes = download_to_file(client, &image.urls.regular, &staged).await?;
    tracing::debug!(path = %staged.display(), bytes, "staged download");

    let to_persist = staged.clone();
    let saved = tokio::task::spawn_blocking(move || media.persist(&to_persist)).await?;
    let _ = tokio::fs::remove_file(&staged).await;
    saved
}
