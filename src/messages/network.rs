//! Network messages - communication between App and Network layers

use std::path::PathBuf;
use std::sync::Arc;

use crate::models::{ImageRecord, Preview};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Fetch one batch of random image records
    FetchBatch { id: u64 },
    /// Download and decode the display image of one record
    FetchPreview {
        id: u64,
        image_id: String,
        url: String,
    },
    /// Hand a message to the share collaborator
    Share { id: u64, message: String },
    /// Permission check, download and media-library write for one record
    SaveImage { id: u64, image: ImageRecord },
    /// Cancel a pending task
    Cancel(u64),
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    BatchLoaded {
        id: u64,
        images: Vec<ImageRecord>,
    },
    BatchFailed {
        id: u64,
        error: String,
    },
    PreviewReady {
        id: u64,
        image_id: String,
        preview: Arc<Preview>,
    },
    PreviewFailed {
        id: u64,
        image_id: String,
        error: String,
    },
    Shared {
        id: u64,
    },
    ShareFailed {
        id: u64,
        error: String,
    },
    Saved {
        id: u64,
        path: PathBuf,
    },
    /// Media-library permission refused; nothing was downloaded
    SaveDenied {
        id: u64,
    },
    SaveFailed {
        id: u64,
        error: String,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::BatchLoaded { id, .. } => *id,
            NetworkResponse::BatchFailed { id, .. } => *id,
            NetworkResponse::PreviewReady { id, .. } => *id,
            NetworkResponse::PreviewFailed { id, .. } => *id,
            NetworkResponse::Shared { id } => *id,
            NetworkResponse::ShareFailed { id, .. } => *id,
            NetworkResponse::Saved { id, .. } => *id,
            NetworkResponse::SaveDenied { id } => *id,
            NetworkResponse::SaveFailed { id, .. } => *id,
        }
    }
}
