use serde::{Deserialize, Serialize};

/// Resolution-specific URLs of one photo
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageUrls {
    /// Display resolution, used for the carousel and for saving
    pub regular: String,
    /// Full resolution, used for sharing
    pub full: String,
    #[serde(default)]
    pub raw: Option<String>,
    #[serde(default)]
    pub small: Option<String>,
    #[serde(default)]
    pub thumb: Option<String>,
}

/// Photographer credit
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Photographer {
    pub name: String,
    #[serde(default)]
    pub username: Option<String>,
}

/// One element of a fetched batch
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: String,
    pub urls: ImageUrls,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub alt_description: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    /// Dominant color as `#rrggbb`
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub user: Option<Photographer>,
}

impl ImageRecord {
    /// Short caption for the carousel
    pub fn caption(&self) -> String {
        let text = self
            .description
            .as_deref()
            .or(self.alt_description.as_deref())
            .unwrap_or("Untitled");
        match &self.user {
            Some(user) => format!("{} · Photo by {}", text, user.name),
            None => text.to_string(),
        }
    }

    /// Parse the dominant color into RGB, if present and well-formed
    pub fn color_rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.color.as_deref()?.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some((r, g, b))
    }

    /// Message handed to the share collaborator
    pub fn share_message(&self) -> String {
        format!("Check out this wallpaper: {}", self.urls.full)
    }
}

/// Parse a batch response body into records, preserving server order
pub fn parse_batch(body: &str) -> Result<Vec<ImageRecord>, serde_json::Error> {
    serde_json::from_str(body)
}

/// Decoded, downscaled RGB pixels of one record
#[derive(Clone, Debug, PartialEq)]
pub struct Preview {
    pub width: u32,
    pub height: u32,
    /// Row-major pixels, `width * height` entries
    pub pixels: Vec<[u8; 3]>,
}

impl Preview {
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let x = x.min(self.width.saturating_sub(1));
        let y = y.min(self.height.saturating_sub(1));
        self.pixels
            .get((y * self.width + x) as usize)
            .copied()
            .unwrap_or([0, 0, 0])
    }

    /// Sample the pixel under normalized target coordinates when the preview
    /// covers a `target_w` x `target_h` box, cropping the overflow evenly.
    pub fn sample_cover(&self, target_w: u32, target_h: u32, tx: u32, ty: u32) -> [u8; 3] {
        if self.width == 0 || self.height == 0 || target_w == 0 || target_h == 0 {
            return [0, 0, 0];
        }
        let scale = (target_w as f64 / self.width as f64).max(target_h as f64 / self.height as f64);
        let scaled_w = self.width as f64 * scale;
        let scaled_h = self.height as f64 * scale;
        let offset_x = (scaled_w - target_w as f64) / 2.0;
        let offset_y = (scaled_h - target_h as f64) / 2.0;
        let sx = ((tx as f64 + 0.5 + offset_x) / scale) as u32;
        let sy = ((ty as f64 + 0.5 + offset_y) / scale) as u32;
        self.pixel(sx, sy)
    }
}

/// User-visible notice severity
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
}

/// A message shown to the user until dismissed
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub shown_at: chrono::DateTime<chrono::Local>,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Info,
            message: message.into(),
            shown_at: chrono::Local::now(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Warning,
            message: message.into(),
            shown_at: chrono::Local::now(),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn record(id: &str) -> ImageRecord {
        ImageRecord {
            id: id.to_string(),
            urls: ImageUrls {
                regular: format!("https://images.example.com/{}?w=1080", id),
                full: format!("https://images.example.com/{}?q=100", id),
                raw: None,
                small: None,
                thumb: None,
            },
            description: None,
            alt_description: Some(format!("photo {}", id)),
            width: Some(4000),
            height: Some(6000),
            color: Some("#0c2640".to_string()),
            user: None,
        }
    }

    pub fn records(count: usize) -> Vec<ImageRecord> {
        (0..count).map(|i| record(&format!("img{}", i))).collect()
    }
}
