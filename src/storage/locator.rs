//! Output target derivation
//!
//! Computes where a session's recording lands: a timestamped file name in
//! either the app's public movies subfolder (legacy storage) or a scoped
//! app directory (modern storage).

use chrono::{DateTime, Local};
use std::fs;
use std::path::PathBuf;

/// Subfolder of the public movies directory that holds our recordings
pub const RECORDINGS_SUBDIR: &str = "Quickcast";

/// A session's resolved output location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub directory: PathBuf,
    pub file_name: String,
}

impl OutputTarget {
    /// Full path of the output file
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}

/// Derives output targets for recording sessions
#[derive(Debug, Clone)]
pub struct OutputLocator {
    directory: PathBuf,
}

impl OutputLocator {
    /// Locator rooted at the app-namespaced subfolder of the public
    /// movies directory (legacy storage path).
    pub fn public_movies(movies_dir: impl Into<PathBuf>) -> Self {
        Self {
            directory: movies_dir.into().join(RECORDINGS_SUBDIR),
        }
    }

    /// Locator writing directly into a scoped app directory.
    pub fn scoped(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Compute the output target for a session started at `now`.
    ///
    /// Deterministic for a fixed timestamp. Creates the target directory
    /// as a side effect; an already-existing directory is not an error,
    /// and any other creation failure is logged and tolerated so the
    /// recorder itself can surface the real write error later.
    pub fn compute_output_target(&self, now: DateTime<Local>) -> OutputTarget {
        let file_name = format!("recording_{}.mp4", now.format("%Y%m%d_%H%M%S"));

        if let Err(e) = fs::create_dir_all(&self.directory) {
            tracing::warn!("Failed to create output directory {:?}: {}", self.directory, e);
        }

        OutputTarget {
            directory: self.directory.clone(),
            file_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn fixed_timestamp() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 14, 30, 5).unwrap()
    }

    #[test]
    fn test_file_name_pattern() {
        let dir = tempdir().unwrap();
        let locator = OutputLocator::public_movies(dir.path());

        let target = locator.compute_output_target(fixed_timestamp());

        assert_eq!(target.file_name, "recording_20240309_143005.mp4");
        assert_eq!(target.directory, dir.path().join(RECORDINGS_SUBDIR));
    }

    #[test]
    fn test_deterministic_for_fixed_timestamp() {
        let dir = tempdir().unwrap();
        let locator = OutputLocator::public_movies(dir.path());

        let first = locator.compute_output_target(fixed_timestamp());
        let second = locator.compute_output_target(fixed_timestamp());

        assert_eq!(first, second);
    }

    #[test]
    fn test_existing_directory_is_tolerated() {
        let dir = tempdir().unwrap();
        let locator = OutputLocator::public_movies(dir.path());

        // First call creates the directory, second finds it in place
        locator.compute_output_target(fixed_timestamp());
        let target = locator.compute_output_target(fixed_timestamp());

        assert!(target.directory.is_dir());
    }

    #[test]
    fn test_scoped_locator_uses_directory_as_is() {
        let dir = tempdir().unwrap();
        let locator = OutputLocator::scoped(dir.path().join("recordings"));

        let target = locator.compute_output_target(fixed_timestamp());

        assert_eq!(target.directory, dir.path().join("recordings"));
        assert!(target.directory.is_dir());
    }
}
