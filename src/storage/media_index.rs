//! Media index registration
//!
//! On the legacy storage path, completed recordings must be announced to
//! the platform media index so galleries pick them up. The index itself
//! is an external collaborator; only the hand-off lives here.

use std::path::Path;

/// MIME type registered for completed recordings
pub const VIDEO_MIME: &str = "video/mp4";

/// Registers completed output files with the platform media index.
/// Best-effort: registration failures never affect the session outcome.
pub trait MediaIndex: Send + Sync {
    fn register_video(&self, path: &Path, mime: &str);
}

/// Desktop fallback: there is no shared media database to notify, so the
/// hand-off is recorded in the log and the file is left in place.
pub struct LoggingMediaIndex;

impl MediaIndex for LoggingMediaIndex {
    fn register_video(&self, path: &Path, mime: &str) {
        tracing::info!("Recording available at {:?} ({})", path, mime);
    }
}
