//! Error types for collaborator calls

use thiserror::Error;

/// Failure of one asynchronous collaborator call.
///
/// Every variant is terminal for the operation that produced it. Callers
/// decide between logging and a user notice based on [`BrowserError::kind`].
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server responded with status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("media library access was denied")]
    PermissionDenied,

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("share failed: {0}")]
    Share(String),

    #[error("operation cancelled")]
    Cancelled,
}

/// Coarse error taxonomy used for reporting
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    PermissionDenied,
    Io,
    Share,
    Cancelled,
}

impl BrowserError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BrowserError::Network(_) | BrowserError::Status(_) | BrowserError::Payload(_) => {
                ErrorKind::Network
            }
            BrowserError::PermissionDenied => ErrorKind::PermissionDenied,
            BrowserError::Io(_) | BrowserError::Decode(_) => ErrorKind::Io,
            BrowserError::Share(_) => ErrorKind::Share,
            BrowserError::Cancelled => ErrorKind::Cancelled,
        }
    }
}

impl From<tokio::task::JoinError> for BrowserError {
    fn from(e: tokio::task::JoinError) -> Self {
        if e.is_cancelled() {
            BrowserError::Cancelled
        } else {
            BrowserError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
        }
    }
}

pub type Result<T> = std::result::Result<T, BrowserError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_groups_load_failures_as_network() {
        assert_eq!(BrowserError::Status(503).kind(), ErrorKind::Network);
        let payload = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(BrowserError::from(payload).kind(), ErrorKind::Network);
    }

    #[test]
    fn test_kind_groups_file_failures_as_io() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        assert_eq!(BrowserError::from(io).kind(), ErrorKind::Io);
        assert_eq!(BrowserError::PermissionDenied.kind(), ErrorKind::PermissionDenied);
    }

    #[tokio::test]
    async fn test_aborted_blocking_task_is_cancelled() {
        let handle = tokio::spawn(std::future::pending::<()>());
        handle.abort();
        let err = BrowserError::from(handle.await.unwrap_err());
        assert_eq!(err.kind(), ErrorKind::Cancelled);
    }
}
