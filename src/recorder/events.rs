//! Outbound lifecycle notifications
//!
//! The uniform event channel back to the UI shell. Delivery is
//! fire-and-forget in the order the controller emits; failures are
//! swallowed so they can never propagate into the recorder.

use serde::Serialize;

/// Fixed error code for a denied capture consent
pub const CAPTURE_DENIED_CODE: i32 = -2;

/// Fixed error code for an engine fault while stopping
pub const STOP_FAILED_CODE: i32 = -1;

pub const CAPTURE_DENIED_MESSAGE: &str = "Screen capture consent denied";

/// Lifecycle event relayed to the caller
///
/// `Complete` and `Error` are mutually exclusive terminal events for a
/// session; `Pause`/`Resume` may repeat between `Start` and a terminal
/// event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Start,
    Complete,
    Pause,
    Resume,
    Error { code: i32, message: String },
}

impl Notification {
    pub fn error(code: i32, message: impl Into<String>) -> Self {
        Notification::Error {
            code,
            message: message.into(),
        }
    }

    /// Wire name on the notification channel
    pub fn name(&self) -> &'static str {
        match self {
            Notification::Start => "OnStart",
            Notification::Complete => "OnComplete",
            Notification::Pause => "OnPause",
            Notification::Resume => "OnResume",
            Notification::Error { .. } => "OnError",
        }
    }
}

/// Payload of an `OnError` notification
#[derive(Debug, Clone, Serialize)]
pub struct ErrorPayload {
    pub code: i32,
    pub message: String,
}

/// Outward-facing event channel
pub trait NotificationSink: Send + Sync {
    fn emit(&self, notification: &Notification);
}

/// Forwards notifications to the UI shell over the Tauri event channel.
///
/// Tauri marshals emission onto its event loop, so calls made in order
/// from the controller task arrive in order.
pub struct TauriNotificationSink {
    app: tauri::AppHandle,
}

impl TauriNotificationSink {
    pub fn new(app: tauri::AppHandle) -> Self {
        Self { app }
    }
}

impl NotificationSink for TauriNotificationSink {
    fn emit(&self, notification: &Notification) {
        use tauri::Emitter;

        let result = match notification {
            Notification::Error { code, message } => self.app.emit(
                notification.name(),
                ErrorPayload {
                    code: *code,
                    message: message.clone(),
                },
            ),
            _ => self.app.emit(notification.name(), ()),
        };

        if let Err(e) = result {
            tracing::warn!("Failed to deliver {}: {}", notification.name(), e);
        }
    }
}
