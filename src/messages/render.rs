//! Render state - data structure sent from App layer to UI for rendering

use crate::app::focus::{FocusState, FocusTransform};
use crate::app::state::{LoadState, PreviewSlot};
use crate::models::{ImageRecord, Notice};

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    pub load: LoadState,
    /// A load is in flight (initial or refresh)
    pub is_loading: bool,

    // Carousel
    pub page: usize,
    pub page_count: usize,
    pub image: Option<ImageRecord>,
    pub preview: PreviewSlot,

    // Focus
    pub focus: FocusState,
    pub transform: FocusTransform,
    pub can_page: bool,

    pub spinner_frame: usize,

    // Popups
    pub notice: Option<Notice>,
    pub last_error: Option<String>,
}
