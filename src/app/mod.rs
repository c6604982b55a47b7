//! App layer - central state management and command processing
//!
//! The App actor receives UI events and network responses,
//! updates state, and emits network commands and render state.

pub mod focus;
pub mod state;
pub mod actor;
pub mod commands;

pub use focus::{FocusController, FocusState, FocusTransform};
pub use state::{AppState, LoadState, ScreenEvent, ScreenState};
pub use actor::AppActor;
