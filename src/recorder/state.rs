//! Session state and the inbound command channel
//!
//! Every caller operation and every OS callback enters the session
//! controller as a [`SessionCommand`] on one ordered channel, so shared
//! session state is only ever touched from the controller task.

use crate::capture::ConsentDecision;
use crate::recorder::engine::EngineEvent;
use crate::storage::OutputTarget;
use crate::utils::error::{StartError, StopError};
use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

/// Phase of the single in-flight session
///
/// The pending start reply lives inside `AwaitingStorageAuthorization`,
/// so leaving that phase consumes the continuation exactly once whatever
/// the authorization outcome.
#[derive(Debug)]
pub enum SessionPhase {
    /// No session in flight
    Idle,
    /// Start suspended on the storage permission round trip
    AwaitingStorageAuthorization {
        reply: oneshot::Sender<Result<(), StartError>>,
    },
    /// Start acknowledged, capture consent round trip outstanding
    AwaitingCaptureConsent,
    /// Engine started with a consent grant
    Recording,
}

impl SessionPhase {
    pub fn name(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "idle",
            SessionPhase::AwaitingStorageAuthorization { .. } => "awaiting-storage-authorization",
            SessionPhase::AwaitingCaptureConsent => "awaiting-capture-consent",
            SessionPhase::Recording => "recording",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, SessionPhase::Idle)
    }
}

/// The single logical recording in flight
///
/// `output` is set iff the legacy storage path is active; on the modern
/// path the engine picks its own scoped location. Busy-ness is never
/// stored here: the engine's busy flag is authoritative and queried live.
#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    pub phase: SessionPhase,
    pub output: Option<OutputTarget>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            phase: SessionPhase::Idle,
            output: None,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Inbound message for the session controller
#[derive(Debug)]
pub enum SessionCommand {
    /// Caller start request; replied to synchronously or after the
    /// storage authorization round trip
    Start {
        reply: oneshot::Sender<Result<(), StartError>>,
    },
    /// Caller stop request
    Stop {
        reply: oneshot::Sender<Result<bool, StopError>>,
    },
    /// Storage permission round trip resolved
    StorageAuthorization { granted: bool },
    /// Capture consent round trip resolved
    CaptureConsent(ConsentDecision),
    /// Recorder lifecycle event
    Engine(EngineEvent),
    /// Phase introspection for the UI shell
    Phase {
        reply: oneshot::Sender<&'static str>,
    },
}

/// Cloneable post-box for OS callbacks
///
/// Handed to the storage authority, consent broker and recording engine
/// so their results are marshaled onto the controller's ordered channel
/// instead of touching session state from foreign threads. Posting is
/// best-effort: a closed or saturated channel is logged and dropped.
#[derive(Debug, Clone)]
pub struct Mailbox {
    tx: mpsc::Sender<SessionCommand>,
}

impl Mailbox {
    pub(crate) fn new(tx: mpsc::Sender<SessionCommand>) -> Self {
        Self { tx }
    }

    pub fn storage_authorization(&self, granted: bool) {
        self.post(SessionCommand::StorageAuthorization { granted });
    }

    pub fn capture_consent(&self, decision: ConsentDecision) {
        self.post(SessionCommand::CaptureConsent(decision));
    }

    pub fn engine_event(&self, event: EngineEvent) {
        self.post(SessionCommand::Engine(event));
    }

    fn post(&self, command: SessionCommand) {
        if let Err(e) = self.tx.try_send(command) {
            tracing::warn!("Dropping session message: {}", e);
        }
    }
}
