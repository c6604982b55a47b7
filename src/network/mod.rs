//! Network layer - batch fetch, page images, share and save
//!
//! The Network actor receives commands and sends back responses.

pub mod actor;
pub mod client;
pub mod preview;
pub mod save;

pub use actor::{Collaborators, NetworkActor};
pub use client::BatchEndpoint;

#[cfg(test)]
pub(crate) mod test_server;
