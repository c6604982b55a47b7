//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::focus::FocusState;
use crate::app::state::LoadState;

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// Tap on the visible image
    Tap,

    // Paging
    NextPage,
    PrevPage,

    // Action bar
    Refresh,
    Share,
    Save,

    // Popups
    DismissNotice,

    // System
    Quit,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    focus: FocusState,
    load: LoadState,
    show_notice: bool,
) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    if show_notice {
        return Some(UiEvent::DismissNotice);
    }

    match key.code {
        KeyCode::Char('q') => return Some(UiEvent::Quit),
        KeyCode::Char('r') if load == LoadState::Failed => return Some(UiEvent::Refresh),
        _ => {}
    }

    if load != LoadState::Ready {
        return None;
    }

    match focus {
        FocusState::Normal => match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => Some(UiEvent::Tap),
            KeyCode::Right | KeyCode::Char('l') => Some(UiEvent::NextPage),
            KeyCode::Left | KeyCode::Char('h') => Some(UiEvent::PrevPage),
            _ => None,
        },
        FocusState::Focused => match key.code {
            KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Esc => Some(UiEvent::Tap),
            KeyCode::Char('r') => Some(UiEvent::Refresh),
            KeyCode::Char('s') => Some(UiEvent::Share),
            KeyCode::Char('d') => Some(UiEvent::Save),
            _ => None,
        },
    }
}
