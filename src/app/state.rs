//! App state - pure data structures with no I/O logic
//!
//! [`ScreenState`] is advanced only through [`ScreenState::reduce`]; the
//! animation, preview slots and request bookkeeping live beside it in
//! [`AppState`].

use std::collections::HashMap;
use std::sync::Arc;

use crate::app::focus::{FocusController, FocusState};
use crate::messages::RenderState;
use crate::models::{ImageRecord, Notice, Preview};

/// Whether the first batch has arrived
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
    /// Initial load failed; the list was never assigned
    Failed,
}

/// Paging direction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageDirection {
    Next,
    Prev,
}

/// Events accepted by [`ScreenState::reduce`]
#[derive(Clone, Debug, PartialEq)]
pub enum ScreenEvent {
    LoadStarted { id: u64 },
    LoadSucceeded { id: u64, images: Vec<ImageRecord> },
    LoadFailed { id: u64, error: String },
    FocusToggled,
    PageChanged(PageDirection),
    NoticeShown(Notice),
    NoticeDismissed,
}

/// The screen's explicit state value
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScreenState {
    pub load: LoadState,
    pub images: Vec<ImageRecord>,
    pub focus: FocusState,
    pub page: usize,
    /// Id of the load whose completion will be accepted
    pub pending_load: Option<u64>,
    pub notice: Option<Notice>,
    pub last_error: Option<String>,
}

impl ScreenState {
    pub fn reduce(self, event: ScreenEvent) -> ScreenState {
        match event {
            ScreenEvent::LoadStarted { id } => ScreenState {
                pending_load: Some(id),
                load: match self.load {
                    LoadState::Failed => LoadState::Loading,
                    other => other,
                },
                ..self
            },
            ScreenEvent::LoadSucceeded { id, images } => {
                if self.pending_load != Some(id) {
                    tracing::debug!(id, "ignoring superseded load");
                    return self;
                }
                ScreenState {
                    load: LoadState::Ready,
                    images,
                    page: 0,
                    pending_load: None,
                    last_error: None,
                    ..self
                }
            }
            ScreenEvent::LoadFailed { id, error } => {
                if self.pending_load != Some(id) {
                    return self;
                }
                ScreenState {
                    load: match self.load {
                        LoadState::Ready => LoadState::Ready,
                        _ => LoadState::Failed,
                    },
                    pending_load: None,
                    last_error: Some(error),
                    ..self
                }
            }
            ScreenEvent::FocusToggled => ScreenState {
                focus: self.focus.toggled(),
                ..self
            },
            ScreenEvent::PageChanged(direction) => {
                if !self.can_page() || self.images.is_empty() {
                    return self;
                }
                let last = self.images.len() - 1;
                let page = match direction {
                    PageDirection::Next => (self.page + 1).min(last),
                    PageDirection::Prev => self.page.saturating_sub(1),
                };
                ScreenState { page, ..self }
            }
            ScreenEvent::NoticeShown(notice) => ScreenState {
                notice: Some(notice),
                ..self
            },
            ScreenEvent::NoticeDismissed => ScreenState {
                notice: None,
                ..self
            },
        }
    }

    pub fn can_page(&self) -> bool {
        self.focus == FocusState::Normal
    }

    pub fn is_loading(&self) -> bool {
        self.pending_load.is_some()
    }

    pub fn current_image(&self) -> Option<&ImageRecord> {
        self.images.get(self.page)
    }

    pub fn contains(&self, image_id: &str) -> bool {
        self.images.iter().any(|image| image.id == image_id)
    }
}

/// Decoded image of one page, keyed by record id
#[derive(Clone, Debug, Default, PartialEq)]
pub enum PreviewSlot {
    #[default]
    Pending,
    Ready(Arc<Preview>),
    Failed,
}

/// Main application state
pub struct AppState {
    pub screen: ScreenState,
    pub focus: FocusController,
    pub previews: HashMap<String, PreviewSlot>,
    pub spinner_frame: usize,
    pub next_request_id: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            screen: ScreenState::default(),
            focus: FocusController::new(),
            previews: HashMap::new(),
            spinner_frame: 0,
            next_request_id: 1,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Apply a screen event, keeping the animation in step with the focus
    pub fn dispatch(&mut self, event: ScreenEvent) {
        let screen = std::mem::take(&mut self.screen);
        self.screen = screen.reduce(event);
        if self.focus.state() != self.screen.focus {
            self.focus.set_state(self.screen.focus);
        }
    }

    pub fn current_preview(&self) -> PreviewSlot {
        self.screen
            .current_image()
            .and_then(|image| self.previews.get(&image.id))
            .cloned()
            .unwrap_or_default()
    }

    /// True while any spinner is on screen
    pub fn spinner_visible(&self) -> bool {
        match self.screen.load {
            LoadState::Loading => true,
            LoadState::Failed => false,
            LoadState::Ready => {
                self.screen.current_image().is_some()
                    && self.current_preview() == PreviewSlot::Pending
            }
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            load: self.screen.load,
            is_loading: self.screen.is_loading(),
            page: self.screen.page,
            page_count: self.screen.images.len(),
            image: self.screen.current_image().cloned(),
            preview: self.current_preview(),
            focus: self.screen.focus,
            transform: self.focus.transform(),
            can_page: self.screen.can_page(),
            spinner_frame: self.spinner_frame,
            notice: self.screen.notice.clone(),
            last_error: self.screen.last_error.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::records;

    fn loaded(count: usize) -> ScreenState {
        ScreenState::default()
            .reduce(ScreenEvent::LoadStarted { id: 1 })
            .reduce(ScreenEvent::LoadSucceeded { id: 1, images: records(count) })
    }

    #[test]
    fn test_successful_load_assigns_whole_batch() {
        let state = ScreenState::default();
        assert_eq!(state.load, LoadState::Loading);

        let state = loaded(30);
        assert_eq!(state.load, LoadState::Ready);
        assert_eq!(state.images.len(), 30);
        assert_eq!(state.images[0].id, "img0");
        assert!(!state.is_loading());
    }

    #[test]
    fn test_empty_batch_is_ready_with_no_pages() {
        let state = loaded(0);
        assert_eq!(state.load, LoadState::Ready);
        assert!(state.current_image().is_none());
        let state = state.reduce(ScreenEvent::PageChanged(PageDirection::Next));
        assert_eq!(state.page, 0);
    }

    #[test]
    fn test_initial_failure_moves_to_failed() {
        let state = ScreenState::default()
            .reduce(ScreenEvent::LoadStarted { id: 1 })
            .reduce(ScreenEvent::LoadFailed { id: 1, error: "boom".into() });
        assert_eq!(state.load, LoadState::Failed);
        assert!(state.images.is_empty());
        assert_eq!(state.last_error.as_deref(), Some("boom"));

        // Retrying goes back to the loading indicator
        let state = state.reduce(ScreenEvent::LoadStarted { id: 2 });
        assert_eq!(state.load, LoadState::Loading);
    }

    #[test]
    fn test_refresh_failure_keeps_current_list() {
        let state = loaded(3)
            .reduce(ScreenEvent::LoadStarted { id: 2 })
            .reduce(ScreenEvent::LoadFailed { id: 2, error: "offline".into() });
        assert_eq!(state.load, LoadState::Ready);
        assert_eq!(state.images.len(), 3);
    }

    #[test]
    fn test_superseded_load_is_ignored() {
        let state = loaded(3)
            .reduce(ScreenEvent::LoadStarted { id: 2 })
            .reduce(ScreenEvent::LoadStarted { id: 3 })
            .reduce(ScreenEvent::LoadSucceeded { id: 3, images: records(5) })
            .reduce(ScreenEvent::LoadSucceeded { id: 2, images: records(1) });
        assert_eq!(state.images.len(), 5);
    }

    #[test]
    fn test_new_batch_replaces_list_and_resets_page() {
        let state = loaded(3)
            .reduce(ScreenEvent::PageChanged(PageDirection::Next))
            .reduce(ScreenEvent::PageChanged(PageDirection::Next));
        assert_eq!(state.page, 2);

        let state = state
            .reduce(ScreenEvent::LoadStarted { id: 7 })
            .reduce(ScreenEvent::LoadSucceeded { id: 7, images: records(2) });
        assert_eq!(state.page, 0);
        assert_eq!(state.images.len(), 2);
    }

    #[test]
    fn test_paging_only_when_normal() {
        let state = loaded(3);
        assert!(state.can_page());

        let focused = state.reduce(ScreenEvent::FocusToggled);
        assert_eq!(focused.focus, FocusState::Focused);
        assert!(!focused.can_page());
        let focused = focused.reduce(ScreenEvent::PageChanged(PageDirection::Next));
        assert_eq!(focused.page, 0);

        let normal = focused.reduce(ScreenEvent::FocusToggled);
        assert!(normal.can_page());
        let normal = normal.reduce(ScreenEvent::PageChanged(PageDirection::Next));
        assert_eq!(normal.page, 1);
    }

    #[test]
    fn test_paging_clamps_at_ends() {
        let state = loaded(2).reduce(ScreenEvent::PageChanged(PageDirection::Prev));
        assert_eq!(state.page, 0);
        let state = state
            .reduce(ScreenEvent::PageChanged(PageDirection::Next))
            .reduce(ScreenEvent::PageChanged(PageDirection::Next));
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_dispatch_drives_animation_target() {
        let mut app = AppState::new();
        app.dispatch(ScreenEvent::FocusToggled);
        assert_eq!(app.focus.state(), FocusState::Focused);
        assert!(app.focus.is_animating());
        app.dispatch(ScreenEvent::FocusToggled);
        assert_eq!(app.focus.state(), FocusState::Normal);
    }

    #[test]
    fn test_notice_lifecycle() {
        let state = loaded(1).reduce(ScreenEvent::NoticeShown(Notice::info("Saved")));
        assert_eq!(state.notice.as_ref().map(|n| n.message.as_str()), Some("Saved"));
        let state = state.reduce(ScreenEvent::NoticeDismissed);
        assert!(state.notice.is_none());
    }
}
