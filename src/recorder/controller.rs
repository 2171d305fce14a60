//! Session controller
//!
//! Orchestrates the single recording session: capability gate, storage
//! authorization, output target, capture consent, engine start, and the
//! relay of engine lifecycle events to the notification sink. All of it
//! runs on one task consuming one ordered command channel, so there is no
//! window in which a second start request can interleave with an
//! in-flight chain: any non-idle phase rejects it, even before the engine
//! reports busy.
//!
//! Start acknowledgment is two-phase by design: a successful reply means
//! "request accepted and consent round trip issued"; actual capture is
//! announced by the `OnStart` notification.

use crate::capture::{ConsentBroker, ConsentDecision};
use crate::recorder::engine::{EngineEvent, RecordingEngine};
use crate::recorder::events::{
    Notification, NotificationSink, CAPTURE_DENIED_CODE, CAPTURE_DENIED_MESSAGE, STOP_FAILED_CODE,
};
use crate::recorder::state::{Mailbox, Session, SessionCommand, SessionPhase};
use crate::storage::{CapabilityGate, MediaIndex, OutputLocator, StorageAuthority, VIDEO_MIME};
use crate::utils::error::{StartError, StopError};
use chrono::Local;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

const COMMAND_CHANNEL_CAPACITY: usize = 64;

/// Collaborators of the session controller
pub struct SessionDeps {
    pub gate: CapabilityGate,
    pub authority: Arc<dyn StorageAuthority>,
    pub locator: OutputLocator,
    pub broker: Arc<dyn ConsentBroker>,
    pub engine: Arc<dyn RecordingEngine>,
    pub media_index: Arc<dyn MediaIndex>,
    pub sink: Arc<dyn NotificationSink>,
}

/// Caller-facing handle to the controller task
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<SessionCommand>,
}

impl SessionHandle {
    /// Post-box for OS callbacks and engine events
    pub fn mailbox(&self) -> Mailbox {
        Mailbox::new(self.tx.clone())
    }

    /// Begin a recording session.
    ///
    /// Resolves once the request is accepted (consent round trip issued)
    /// or rejected; the session outcome itself arrives on the
    /// notification channel.
    pub async fn start(&self) -> Result<(), StartError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(SessionCommand::Start { reply: reply_tx })
            .await
            .map_err(|_| StartError::Unavailable)?;
        reply_rx.await.map_err(|_| StartError::Unavailable)?
    }

    /// End the in-flight recording session.
    ///
    /// `Ok(true)` means the engine stopped cleanly; `Ok(false)` means the
    /// stop faulted (an `OnError` notification carries the fault).
    pub async fn stop(&self) -> Result<bool, StopError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(SessionCommand::Stop { reply: reply_tx })
            .await
            .map_err(|_| StopError::Unavailable)?;
        reply_rx.await.map_err(|_| StopError::Unavailable)?
    }

    /// Current phase name, or `None` if the controller is gone
    pub async fn phase(&self) -> Option<&'static str> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(SessionCommand::Phase { reply: reply_tx })
            .await
            .ok()?;
        reply_rx.await.ok()
    }
}

/// Owns the single session and sequences its asynchronous approval chain
pub struct SessionController {
    rx: mpsc::Receiver<SessionCommand>,
    mailbox: Mailbox,
    session: Session,
    deps: SessionDeps,
}

impl SessionController {
    pub fn new(deps: SessionDeps) -> (Self, SessionHandle) {
        let (tx, rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let controller = Self {
            rx,
            mailbox: Mailbox::new(tx.clone()),
            session: Session::new(),
            deps,
        };
        (controller, SessionHandle { tx })
    }

    /// Main control loop; runs until every handle and mailbox is dropped
    pub async fn run(mut self) {
        while let Some(command) = self.rx.recv().await {
            self.handle(command).await;
        }
        tracing::debug!("Session command channel closed");
    }

    async fn handle(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::Start { reply } => self.handle_start(reply),
            SessionCommand::Stop { reply } => self.handle_stop(reply).await,
            SessionCommand::StorageAuthorization { granted } => {
                self.handle_storage_authorization(granted)
            }
            SessionCommand::CaptureConsent(decision) => {
                self.handle_capture_consent(decision).await
            }
            SessionCommand::Engine(event) => self.handle_engine_event(event),
            SessionCommand::Phase { reply } => {
                let _ = reply.send(self.session.phase.name());
            }
        }
    }

    fn handle_start(&mut self, reply: oneshot::Sender<Result<(), StartError>>) {
        // Busy flag plus phase guard: the phase also covers the window in
        // which an authorization or consent round trip is outstanding but
        // the engine is not busy yet.
        if self.deps.engine.is_busy() || !self.session.phase.is_idle() {
            let _ = reply.send(Err(StartError::AlreadyRecording));
            return;
        }

        self.session.id = Uuid::new_v4();
        tracing::info!("Start requested (session {})", self.session.id);

        if self.deps.gate.authorization_required() && !self.deps.authority.has_write_permission() {
            tracing::debug!("Storage authorization outstanding, suspending start");
            self.session.phase = SessionPhase::AwaitingStorageAuthorization { reply };
            self.deps.authority.request_write_permission(self.mailbox.clone());
            return;
        }

        if self.deps.gate.authorization_required() {
            self.configure_legacy_output();
        }

        self.request_consent();
        let _ = reply.send(Ok(()));
    }

    fn handle_storage_authorization(&mut self, granted: bool) {
        // Consume the pending continuation on first delivery, whatever
        // the outcome; stale results have nothing to resume.
        let phase = std::mem::replace(&mut self.session.phase, SessionPhase::Idle);
        let reply = match phase {
            SessionPhase::AwaitingStorageAuthorization { reply } => reply,
            other => {
                tracing::warn!(
                    "Storage authorization result in phase {:?}, dropping",
                    other.name()
                );
                self.session.phase = other;
                return;
            }
        };

        if granted {
            tracing::debug!("Storage authorization granted");
            self.configure_legacy_output();
            self.request_consent();
            let _ = reply.send(Ok(()));
        } else {
            tracing::info!("Storage authorization denied (session {})", self.session.id);
            let _ = reply.send(Err(StartError::StorageDenied));
        }
    }

    async fn handle_capture_consent(&mut self, decision: ConsentDecision) {
        if !matches!(self.session.phase, SessionPhase::AwaitingCaptureConsent) {
            tracing::warn!(
                "Capture consent result in phase {:?}, dropping",
                self.session.phase.name()
            );
            return;
        }

        match decision {
            ConsentDecision::Granted(grant) => {
                match self.deps.engine.start(grant, self.mailbox.clone()).await {
                    Ok(()) => {
                        tracing::info!("Capture consent granted, engine starting");
                        self.session.phase = SessionPhase::Recording;
                    }
                    Err(e) => {
                        tracing::error!("Engine start failed: {}", e);
                        self.deps
                            .sink
                            .emit(&Notification::error(e.code(), e.to_string()));
                        self.reset();
                    }
                }
            }
            ConsentDecision::Denied => {
                tracing::info!("Capture consent denied (session {})", self.session.id);
                self.deps
                    .sink
                    .emit(&Notification::error(CAPTURE_DENIED_CODE, CAPTURE_DENIED_MESSAGE));
                self.reset();
            }
        }
    }

    async fn handle_stop(&mut self, reply: oneshot::Sender<Result<bool, StopError>>) {
        if !self.deps.engine.is_busy() {
            let _ = reply.send(Err(StopError::NotRecording));
            return;
        }

        tracing::info!("Stop requested (session {})", self.session.id);
        match self.deps.engine.stop().await {
            Ok(()) => {
                // Completion is announced by the engine's Completed event.
                let _ = reply.send(Ok(true));
            }
            Err(e) => {
                tracing::error!("Engine stop failed: {}", e);
                self.deps
                    .sink
                    .emit(&Notification::error(STOP_FAILED_CODE, e.to_string()));
                self.reset();
                let _ = reply.send(Ok(false));
            }
        }
    }

    fn handle_engine_event(&mut self, event: EngineEvent) {
        // Engine events belong to the recording phase only. A late
        // terminal event (e.g. the capture process exiting after a stop
        // fault already reset the session) must not produce a second
        // terminal notification.
        if !matches!(self.session.phase, SessionPhase::Recording) {
            tracing::warn!(
                "Engine event {:?} in phase {:?}, dropping",
                event,
                self.session.phase.name()
            );
            return;
        }

        match event {
            EngineEvent::Started => self.deps.sink.emit(&Notification::Start),
            EngineEvent::Paused => self.deps.sink.emit(&Notification::Pause),
            EngineEvent::Resumed => self.deps.sink.emit(&Notification::Resume),
            EngineEvent::Completed => {
                tracing::info!("Recording complete (session {})", self.session.id);
                self.deps.sink.emit(&Notification::Complete);

                // Legacy storage only: hand the finished file to the
                // platform media index (the output target is set iff the
                // legacy path was taken).
                if let Some(target) = self.session.output.take() {
                    self.deps.media_index.register_video(&target.path(), VIDEO_MIME);
                }
                self.reset();
            }
            EngineEvent::Error { code, message } => {
                tracing::error!("Engine error {}: {}", code, message);
                self.deps.sink.emit(&Notification::error(code, message));
                self.reset();
            }
        }
    }

    /// Compute and pin the public output target (legacy storage path)
    fn configure_legacy_output(&mut self) {
        let target = self.deps.locator.compute_output_target(Local::now());
        tracing::debug!(
            "Output target {:?}/{}",
            target.directory,
            target.file_name
        );
        self.deps.engine.configure_output(&target);
        self.session.output = Some(target);
    }

    fn request_consent(&mut self) {
        self.session.phase = SessionPhase::AwaitingCaptureConsent;
        self.deps.broker.request_capture_consent(self.mailbox.clone());
    }

    /// Terminal state: back to idle, stale output is never reread
    fn reset(&mut self) {
        self.session.phase = SessionPhase::Idle;
        self.session.output = None;
    }
}
