//! Storage regime handling
//!
//! Decides which storage authorization steps a session still needs
//! (capability gate), derives the session's output location (locator),
//! and hands completed files to the platform media index.

pub mod capability;
pub mod locator;
pub mod media_index;

pub use capability::{CapabilityGate, ScopedStorageAuthority, StorageAuthority};
pub use locator::{OutputLocator, OutputTarget};
pub use media_index::{LoggingMediaIndex, MediaIndex, VIDEO_MIME};
