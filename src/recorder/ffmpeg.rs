//! FFmpeg-based display capture engine
//!
//! Default recording backend: one ffmpeg subprocess grabbing the primary
//! display to an MP4 file. Stop is graceful (ffmpeg's `q` command) so the
//! container is finalized; the exit status is watched on a monitor thread
//! that reports completion or faults through the session mailbox.

use crate::capture::CaptureGrant;
use crate::recorder::engine::{EngineError, EngineEvent, RecordingEngine};
use crate::recorder::state::Mailbox;
use crate::storage::{OutputLocator, OutputTarget};
use async_trait::async_trait;
use chrono::Local;
use parking_lot::Mutex;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::Duration;

const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Display capture via an ffmpeg subprocess
pub struct FfmpegEngine {
    /// Fallback locator for the modern storage path
    scoped_locator: OutputLocator,

    /// Explicit target from the legacy storage path, consumed on start
    pending_output: Mutex<Option<OutputTarget>>,

    /// Running capture process; busy iff present
    child: Arc<Mutex<Option<Child>>>,
}

impl FfmpegEngine {
    /// Engine writing to `scoped_dir` unless an output target is
    /// configured before start
    pub fn new(scoped_dir: impl Into<PathBuf>) -> Self {
        Self {
            scoped_locator: OutputLocator::scoped(scoped_dir),
            pending_output: Mutex::new(None),
            child: Arc::new(Mutex::new(None)),
        }
    }

    /// Watch for process exit and report the terminal event
    fn monitor(child: Arc<Mutex<Option<Child>>>, mailbox: Mailbox) {
        std::thread::spawn(move || loop {
            std::thread::sleep(EXIT_POLL_INTERVAL);

            let mut guard = child.lock();
            let Some(process) = guard.as_mut() else {
                break;
            };

            match process.try_wait() {
                Ok(None) => {}
                Ok(Some(status)) => {
                    guard.take();
                    if status.success() {
                        mailbox.engine_event(EngineEvent::Completed);
                    } else {
                        mailbox.engine_event(EngineEvent::Error {
                            code: status.code().unwrap_or(-3),
                            message: format!("ffmpeg exited with {}", status),
                        });
                    }
                    break;
                }
                Err(e) => {
                    guard.take();
                    mailbox.engine_event(EngineEvent::Error {
                        code: -3,
                        message: format!("Failed to poll capture process: {}", e),
                    });
                    break;
                }
            }
        });
    }
}

#[async_trait]
impl RecordingEngine for FfmpegEngine {
    fn is_busy(&self) -> bool {
        self.child.lock().is_some()
    }

    fn configure_output(&self, target: &OutputTarget) {
        *self.pending_output.lock() = Some(target.clone());
    }

    async fn start(&self, grant: CaptureGrant, mailbox: Mailbox) -> Result<(), EngineError> {
        let target = self
            .pending_output
            .lock()
            .take()
            .unwrap_or_else(|| self.scoped_locator.compute_output_target(Local::now()));
        let output = target.path();

        tracing::info!("Starting display capture to {:?}", output);
        tracing::debug!("Capture grant payload: {}", grant.payload());

        let process = Command::new("ffmpeg")
            .args(capture_args(&output))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        *self.child.lock() = Some(process);
        mailbox.engine_event(EngineEvent::Started);

        Self::monitor(Arc::clone(&self.child), mailbox);
        Ok(())
    }

    async fn stop(&self) -> Result<(), EngineError> {
        let mut guard = self.child.lock();
        let Some(process) = guard.as_mut() else {
            return Err(EngineError::Fault {
                code: -1,
                message: "No capture process to stop".to_string(),
            });
        };

        // Ask ffmpeg to finalize the container; fall back to kill if its
        // stdin is already gone.
        let graceful = process
            .stdin
            .as_mut()
            .and_then(|stdin| stdin.write_all(b"q\n").and_then(|_| stdin.flush()).ok())
            .is_some();

        if !graceful {
            tracing::warn!("Graceful stop failed, killing capture process");
            process.kill()?;
        }

        // The monitor thread observes the exit and reports Completed.
        Ok(())
    }
}

/// Platform-specific ffmpeg arguments for grabbing the primary display
fn capture_args(output: &Path) -> Vec<String> {
    let mut args: Vec<String> = vec!["-y".to_string()];

    #[cfg(target_os = "macos")]
    args.extend(
        ["-f", "avfoundation", "-framerate", "30", "-i", "1:none"]
            .iter()
            .map(|s| s.to_string()),
    );

    #[cfg(target_os = "windows")]
    args.extend(
        ["-f", "gdigrab", "-framerate", "30", "-i", "desktop"]
            .iter()
            .map(|s| s.to_string()),
    );

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    args.extend(
        ["-f", "x11grab", "-framerate", "30", "-i", ":0.0"]
            .iter()
            .map(|s| s.to_string()),
    );

    args.extend([
        "-pix_fmt".to_string(),
        "yuv420p".to_string(),
        output.to_string_lossy().to_string(),
    ]);
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_args_target_the_output_file() {
        let args = capture_args(Path::new("/tmp/out/recording_x.mp4"));

        assert_eq!(args.first().map(String::as_str), Some("-y"));
        assert!(args.iter().any(|a| a == "-i"));
        assert_eq!(
            args.last().map(String::as_str),
            Some("/tmp/out/recording_x.mp4")
        );
    }
}
