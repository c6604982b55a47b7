//! # Wallpaper Browser
//!
//! A terminal wallpaper browser for random Unsplash photos.
//!
//! ## Features
//! - Fetches a batch of random photos and pages through them full-screen
//! - Images drawn with half-block pixels, placeholder spinner while loading
//! - Tap (Space/Enter or click) to focus: the image springs down to 90% with
//!   rounded corners and an action bar slides in
//! - Refresh, share (terminal clipboard) and save (pictures directory)
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (reducer + focus animation)
//! - Network Layer (Tokio runtime, cancellable tasks)

pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod messages;
pub mod models;
pub mod network;
pub mod platform;
pub mod ui;

// Re-export commonly used types
pub use models::{ImageRecord, ImageUrls, Notice, Preview};
pub use config::Config;
pub use error::{BrowserError, ErrorKind};
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor, FocusController, FocusState, LoadState, ScreenState};
pub use network::{BatchEndpoint, Collaborators, NetworkActor};
pub use platform::{ClipboardShare, MediaLibrary, PicturesLibrary, ShareSheet};
