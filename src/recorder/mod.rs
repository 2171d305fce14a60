//! Recording session system
//!
//! This module implements the session-bridging architecture:
//! - SessionController owning the single in-flight session
//! - A single ordered inbound channel for caller commands and OS callbacks
//! - RecordingEngine trait for the capture/encoding backend
//! - Lifecycle notifications relayed to the UI shell

pub mod controller;
pub mod engine;
pub mod events;
pub mod ffmpeg;
pub mod state;

pub use controller::{SessionController, SessionDeps, SessionHandle};
pub use engine::{EngineError, EngineEvent, RecordingEngine};
pub use events::{Notification, NotificationSink};
pub use ffmpeg::FfmpegEngine;
pub use state::{Mailbox, Session, SessionCommand, SessionPhase};
