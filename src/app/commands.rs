//! Command handlers - business logic for processing UI events

use std::time::Duration;

use crate::app::focus::FocusState;
use crate::app::state::{AppState, LoadState, PageDirection, PreviewSlot, ScreenEvent};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::Notice;

impl AppState {
    // ========================
    // Loader
    // ========================

    /// Issue a new batch load, superseding any pending one
    pub fn start_load(&mut self) -> Vec<NetworkCommand> {
        let mut commands = Vec::new();
        if let Some(previous) = self.screen.pending_load {
            tracing::info!(id = previous, "superseding pending load");
            commands.push(NetworkCommand::Cancel(previous));
        }

        let id = self.next_id();
        self.dispatch(ScreenEvent::LoadStarted { id });
        commands.push(NetworkCommand::FetchBatch { id });
        commands
    }

    // ========================
    // Focus & paging
    // ========================

    pub fn toggle_focus(&mut self) {
        if self.screen.load != LoadState::Ready || self.screen.current_image().is_none() {
            return;
        }
        self.dispatch(ScreenEvent::FocusToggled);
        tracing::debug!(focus = ?self.screen.focus, "focus toggled");
    }

    pub fn change_page(&mut self, direction: PageDirection) -> Option<NetworkCommand> {
        let before = self.screen.page;
        self.dispatch(ScreenEvent::PageChanged(direction));
        if self.screen.page == before {
            return None;
        }
        self.ensure_preview()
    }

    /// Request the visible page's image if nothing is known about it yet
    pub fn ensure_preview(&mut self) -> Option<NetworkCommand> {
        let image = self.screen.current_image()?.clone();
        if self.previews.contains_key(&image.id) {
            return None;
        }
        self.previews.insert(image.id.clone(), PreviewSlot::Pending);
        let id = self.next_id();
        Some(NetworkCommand::FetchPreview {
            id,
            image_id: image.id,
            url: image.urls.regular,
        })
    }

    // ========================
    // Action bar
    // ========================

    fn bar_visible(&self) -> bool {
        self.screen.focus == FocusState::Focused
    }

    /// Return to Normal and load a new batch together. Also retries a failed
    /// initial load.
    pub fn refresh(&mut self) -> Vec<NetworkCommand> {
        if self.bar_visible() {
            self.dispatch(ScreenEvent::FocusToggled);
            return self.start_load();
        }
        if self.screen.load == LoadState::Failed {
            return self.start_load();
        }
        Vec::new()
    }

    pub fn share(&mut self) -> Option<NetworkCommand> {
        if !self.bar_visible() {
            return None;
        }
        let message = self.screen.current_image()?.share_message();
        let id = self.next_id();
        Some(NetworkCommand::Share { id, message })
    }

    pub fn save(&mut self) -> Option<NetworkCommand> {
        if !self.bar_visible() {
            return None;
        }
        let image = self.screen.current_image()?.clone();
        let id = self.next_id();
        tracing::info!(id, image_id = %image.id, "saving wallpaper");
        Some(NetworkCommand::SaveImage { id, image })
    }

    pub fn dismiss_notice(&mut self) {
        self.dispatch(ScreenEvent::NoticeDismissed);
    }

    // ========================
    // Animation tick
    // ========================

    /// Advance the spring and spinner. Returns true when a redraw is needed.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        let animating = self.focus.is_animating();
        if animating {
            self.focus.tick(elapsed);
        }
        let spinning = self.spinner_visible();
        if spinning {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
        animating || spinning
    }

    // ========================
    // Response handling
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) -> Option<NetworkCommand> {
        match response {
            NetworkResponse::BatchLoaded { id, images } => {
                tracing::info!(id, count = images.len(), "batch loaded");
                self.dispatch(ScreenEvent::LoadSucceeded { id, images });
                let screen = &self.screen;
                self.previews.retain(|image_id, _| screen.contains(image_id));
                self.ensure_preview()
            }
            NetworkResponse::BatchFailed { id, error } => {
                tracing::warn!(id, %error, "batch load failed");
                self.dispatch(ScreenEvent::LoadFailed { id, error });
                None
            }
            NetworkResponse::PreviewReady { image_id, preview, .. } => {
                if self.screen.contains(&image_id) {
                    self.previews.insert(image_id, PreviewSlot::Ready(preview));
                }
                None
            }
            NetworkResponse::PreviewFailed { id, image_id, error } => {
                tracing::warn!(id, %image_id, %error, "preview failed");
                if self.screen.contains(&image_id) {
                    self.previews.insert(image_id, PreviewSlot::Failed);
                }
                None
            }
            NetworkResponse::Shared { id } => {
                tracing::debug!(id, "shared");
                None
            }
            NetworkResponse::ShareFailed { id, error } => {
                tracing::warn!(id, %error, "share failed");
                None
            }
            NetworkResponse::Saved { id, path } => {
                tracing::info!(id, path = %path.display(), "wallpaper saved");
                self.dispatch(ScreenEvent::NoticeShown(Notice::info(format!(
                    "Saved to {}",
                    path.display()
                ))));
                None
            }
            NetworkResponse::SaveDenied { id } => {
                tracing::info!(id, "media library permission denied");
                self.dispatch(ScreenEvent::NoticeShown(Notice::warning(
                    "Permission to save wallpapers was denied",
                )));
                None
            }
            NetworkResponse::SaveFailed { id, error } => {
                tracing::warn!(id, %error, "save failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::models::fixtures::records;
    use crate::models::{NoticeKind, Preview};

    fn ready_app(count: usize) -> AppState {
        let mut app = AppState::new();
        let commands = app.start_load();
        let id = match commands.as_slice() {
            [NetworkCommand::FetchBatch { id }] => *id,
            other => panic!("unexpected commands {:?}", other),
        };
        app.handle_response(NetworkResponse::BatchLoaded { id, images: records(count) });
        app
    }

    fn preview() -> Arc<Preview> {
        Arc::new(Preview { width: 1, height: 1, pixels: vec![[1, 2, 3]] })
    }

    #[test]
    fn test_first_batch_requests_visible_preview() {
        let mut app = AppState::new();
        let id = app.next_id();
        app.dispatch(ScreenEvent::LoadStarted { id });
        let cmd = app.handle_response(NetworkResponse::BatchLoaded { id, images: records(3) });
        match cmd {
            Some(NetworkCommand::FetchPreview { image_id, url, .. }) => {
                assert_eq!(image_id, "img0");
                assert_eq!(url, records(1)[0].urls.regular);
            }
            other => panic!("expected preview fetch, got {:?}", other),
        }
        assert!(app.spinner_visible());
    }

    #[test]
    fn test_zero_records_requests_nothing() {
        let mut app = ready_app(0);
        assert_eq!(app.screen.load, LoadState::Ready);
        assert!(app.ensure_preview().is_none());
        app.toggle_focus();
        assert_eq!(app.screen.focus, FocusState::Normal);
        let render = app.to_render_state();
        assert_eq!(render.page_count, 0);
        assert!(render.image.is_none());
    }

    #[test]
    fn test_tap_focuses_and_second_tap_reverses() {
        let mut app = ready_app(2);
        app.toggle_focus();
        assert_eq!(app.screen.focus, FocusState::Focused);
        assert!(!app.screen.can_page());
        assert!(app.change_page(PageDirection::Next).is_none());
        assert_eq!(app.screen.page, 0);

        app.toggle_focus();
        assert_eq!(app.screen.focus, FocusState::Normal);
        assert!(app.screen.can_page());
    }

    #[test]
    fn test_refresh_while_focused_unfocuses_and_loads() {
        let mut app = ready_app(2);
        app.toggle_focus();
        let commands = app.refresh();
        assert_eq!(app.screen.focus, FocusState::Normal);
        assert!(commands.iter().any(|c| matches!(c, NetworkCommand::FetchBatch { .. })));
        assert!(app.screen.is_loading());
    }

    #[test]
    fn test_refresh_ignored_when_bar_hidden() {
        let mut app = ready_app(2);
        assert!(app.refresh().is_empty());
        assert!(app.share().is_none());
        assert!(app.save().is_none());
    }

    #[test]
    fn test_second_refresh_cancels_first() {
        let mut app = ready_app(2);
        app.toggle_focus();
        let first = app.refresh();
        let first_id = match first.as_slice() {
            [NetworkCommand::FetchBatch { id }] => *id,
            other => panic!("unexpected commands {:?}", other),
        };
        app.toggle_focus();
        let second = app.refresh();
        assert!(matches!(second[0], NetworkCommand::Cancel(id) if id == first_id));

        // A late completion of the superseded load changes nothing
        app.handle_response(NetworkResponse::BatchLoaded { id: first_id, images: records(9) });
        assert_eq!(app.screen.images.len(), 2);
    }

    #[test]
    fn test_refresh_completion_order_does_not_matter() {
        let mut app = ready_app(2);
        app.toggle_focus();
        let id = match app.refresh().as_slice() {
            [NetworkCommand::FetchBatch { id }] => *id,
            other => panic!("unexpected commands {:?}", other),
        };
        app.handle_response(NetworkResponse::BatchLoaded { id, images: records(4) });
        assert_eq!(app.screen.focus, FocusState::Normal);
        assert_eq!(app.screen.images.len(), 4);
    }

    #[test]
    fn test_share_uses_full_url_of_visible_page() {
        let mut app = ready_app(3);
        app.change_page(PageDirection::Next);
        app.toggle_focus();
        match app.share() {
            Some(NetworkCommand::Share { message, .. }) => {
                assert!(message.contains(&records(3)[1].urls.full));
            }
            other => panic!("expected share, got {:?}", other),
        }
    }

    #[test]
    fn test_save_denied_shows_warning_and_keeps_list() {
        let mut app = ready_app(3);
        app.toggle_focus();
        let id = match app.save() {
            Some(NetworkCommand::SaveImage { id, image }) => {
                assert_eq!(image.id, "img0");
                id
            }
            other => panic!("expected save, got {:?}", other),
        };
        app.handle_response(NetworkResponse::SaveDenied { id });
        let notice = app.screen.notice.clone().unwrap();
        assert_eq!(notice.kind, NoticeKind::Warning);
        assert_eq!(app.screen.images, records(3));

        app.dismiss_notice();
        assert!(app.screen.notice.is_none());
    }

    #[test]
    fn test_saved_shows_info_and_failures_stay_silent() {
        let mut app = ready_app(1);
        app.handle_response(NetworkResponse::SaveFailed { id: 9, error: "disk".into() });
        app.handle_response(NetworkResponse::ShareFailed { id: 10, error: "nope".into() });
        assert!(app.screen.notice.is_none());

        app.handle_response(NetworkResponse::Saved { id: 11, path: "/tmp/a.jpg".into() });
        assert_eq!(app.screen.notice.as_ref().map(|n| n.kind), Some(NoticeKind::Info));
    }

    #[test]
    fn test_previews_keyed_by_id() {
        let mut app = ready_app(2);
        app.handle_response(NetworkResponse::PreviewReady {
            id: 50,
            image_id: "img0".into(),
            preview: preview(),
        });
        assert!(matches!(app.current_preview(), PreviewSlot::Ready(_)));

        // Unknown ids are dropped
        app.handle_response(NetworkResponse::PreviewReady {
            id: 51,
            image_id: "gone".into(),
            preview: preview(),
        });
        assert!(!app.previews.contains_key("gone"));

        // Page 2 has its own slot
        let cmd = app.change_page(PageDirection::Next);
        assert!(matches!(cmd, Some(NetworkCommand::FetchPreview { ref image_id, .. }) if image_id == "img1"));
        assert_eq!(app.current_preview(), PreviewSlot::Pending);
    }

    #[test]
    fn test_new_batch_drops_stale_previews() {
        let mut app = ready_app(2);
        app.handle_response(NetworkResponse::PreviewReady {
            id: 50,
            image_id: "img1".into(),
            preview: preview(),
        });
        app.toggle_focus();
        let id = match app.refresh().as_slice() {
            [NetworkCommand::FetchBatch { id }] => *id,
            other => panic!("unexpected commands {:?}", other),
        };
        app.handle_response(NetworkResponse::BatchLoaded { id, images: records(1) });
        assert!(!app.previews.contains_key("img1"));
        assert!(app.previews.contains_key("img0"));
    }

    #[test]
    fn test_tick_settles_focus_animation() {
        let mut app = ready_app(1);
        app.handle_response(NetworkResponse::PreviewReady {
            id: 50,
            image_id: "img0".into(),
            preview: preview(),
        });
        app.toggle_focus();
        let mut frames = 0;
        while app.tick(Duration::from_millis(16)) {
            frames += 1;
            assert!(frames < 1000, "animation never settled");
        }
        let render = app.to_render_state();
        assert_eq!(render.transform.scale, 0.9);
        assert_eq!(render.transform.corner_radius, 30.0);
        assert_eq!(render.transform.bar_offset, 0.0);
    }
}
