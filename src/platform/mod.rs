//! Platform collaborators - the share surface and the media library
//!
//! Both are traits so the network layer can be driven by the terminal
//! implementations at runtime and by fakes in tests.

pub mod share;
pub mod media;

pub use share::{ClipboardShare, ShareSheet};
pub use media::{MediaLibrary, Permission, PicturesLibrary};
