//! Recording engine boundary
//!
//! The actual capture/encoding backend sits behind this trait. The
//! session controller drives it with a consent grant and listens for its
//! lifecycle events through the session mailbox.

use crate::capture::CaptureGrant;
use crate::recorder::state::Mailbox;
use crate::storage::OutputTarget;
use async_trait::async_trait;
use thiserror::Error;

/// Lifecycle events reported by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Capture is running
    Started,
    /// Capture paused
    Paused,
    /// Capture resumed
    Resumed,
    /// Recording finished and the output file is final
    Completed,
    /// Engine fault; terminal for the session
    Error { code: i32, message: String },
}

/// Engine-internal faults surfaced on start/stop calls
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Engine fault {code}: {message}")]
    Fault { code: i32, message: String },
}

impl EngineError {
    pub fn code(&self) -> i32 {
        match self {
            EngineError::Io(_) => -3,
            EngineError::Fault { code, .. } => *code,
        }
    }
}

/// Capture/encoding backend
///
/// `is_busy` is the authoritative busy flag for the whole system and is
/// always queried live, never cached. `start` consumes the consent grant;
/// subsequent lifecycle events flow through the mailbox given to it.
#[async_trait]
pub trait RecordingEngine: Send + Sync {
    fn is_busy(&self) -> bool;

    /// Point the engine at an explicit output target (legacy storage
    /// path). Without this the engine picks its own scoped location.
    fn configure_output(&self, target: &OutputTarget);

    async fn start(&self, grant: CaptureGrant, mailbox: Mailbox) -> Result<(), EngineError>;

    async fn stop(&self) -> Result<(), EngineError>;
}
