//! HTTP client wrapper - batch fetch and file downloads

use std::path::Path;
use std::time::Instant;

use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;

use crate::config::Config;
use crate::error::{BrowserError, Result};
use crate::models::{parse_batch, ImageRecord};

/// Where and how to ask for a batch
#[derive(Clone, Debug, PartialEq)]
pub struct BatchEndpoint {
    pub api_url: String,
    pub access_key: String,
    pub count: u32,
}

impl BatchEndpoint {
    pub fn from_config(config: &Config) -> Self {
        BatchEndpoint {
            api_url: config.api_url.clone(),
            access_key: config.access_key.clone(),
            count: config.batch_size,
        }
    }

    pub fn url(&self) -> String {
        format!("{}/photos/random", self.api_url.trim_end_matches('/'))
    }
}

/// Fetch one batch of random records, in server order
pub async fn fetch_batch(client: &reqwest::Client, endpoint: &BatchEndpoint) -> Result<Vec<ImageRecord>> {
    let start = Instant::now();
    let count = endpoint.count.to_string();
    let resp = client
        .get(endpoint.url())
        .query(&[("count", count.as_str()), ("client_id", endpoint.access_key.as_str())])
        .header("Accept-Version", "v1")
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        return Err(BrowserError::Status(status.as_u16()));
    }

    let body = resp.text().await?;
    let images = parse_batch(&body)?;
    tracing::info!(
        count = images.len(),
        time_ms = start.elapsed().as_millis() as u64,
        "fetched batch"
    );
    Ok(images)
}

/// Download a resource fully into memory
pub async fn download_bytes(client: &reqwest::Client, url: &str) -> Result<Vec<u8>> {
    let resp = client.get(url).send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(BrowserError::Status(status.as_u16()));
    }
    Ok(resp.bytes().await?.to_vec())
}

/// Stream a resource into a file, creating parent directories.
///
/// A partially written file is removed on failure.
pub async fn download_to_file(client: &reqwest::Client, url: &str, path: &Path) -> Result<u64> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let result = stream_to_file(client, url, path).await;
    if result.is_err() {
        let _ = tokio::fs::remove_file(path).await;
    }
    result
}

async fn stream_to_file(client: &reqwest::Client, url: &str, path: &Path) -> Result<u64> {
    let resp = client.get(url).send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(BrowserError::Status(status.as_u16()));
    }

    let mut file = tokio::fs::File::create(path).await?;
    let mut stream = resp.bytes_stream();
    let mut total_bytes = 0u64;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes += bytes.len() as u64;
        file.write_all(&bytes).await?;
    }
    file.flush().await?;
    Ok(total_bytes)
}

/// Create an HTTP client with default configuration.
///
/// No request timeout is set; a hung request is only ended by cancellation.
pub fn create_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(concat!("wallpaper-browser/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
