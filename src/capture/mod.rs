//! Screen-capture consent brokering
//!
//! Drives the OS consent flow for on-screen capture and produces the
//! grant the recording engine consumes. The consent round trip is
//! asynchronous: the decision comes back through the session mailbox, on
//! whatever thread the platform answers from.

#[cfg(target_os = "macos")]
pub mod macos;

use crate::recorder::state::Mailbox;

/// OS-issued token authorizing capture.
///
/// Deliberately not `Clone`: the grant moves into the recording engine's
/// start operation, so a second consumption is impossible by construction.
#[derive(Debug)]
pub struct CaptureGrant {
    payload: serde_json::Value,
}

impl CaptureGrant {
    pub fn new(payload: serde_json::Value) -> Self {
        Self { payload }
    }

    pub fn payload(&self) -> &serde_json::Value {
        &self.payload
    }
}

/// Outcome of a single consent round trip
#[derive(Debug)]
pub enum ConsentDecision {
    Granted(CaptureGrant),
    Denied,
}

/// Issues exactly one OS consent round trip per call; the result lands
/// in the session mailbox as a capture-consent message.
pub trait ConsentBroker: Send + Sync {
    fn request_capture_consent(&self, mailbox: Mailbox);
}

/// Consent via the operating system's screen-capture access prompt.
///
/// The prompt may block until the user answers, so the round trip runs on
/// its own thread and only the decision crosses back into the session.
pub struct SystemConsentBroker;

impl ConsentBroker for SystemConsentBroker {
    fn request_capture_consent(&self, mailbox: Mailbox) {
        std::thread::spawn(move || {
            let decision = if request_capture_access() {
                ConsentDecision::Granted(CaptureGrant::new(serde_json::json!({
                    "source": "system-prompt",
                })))
            } else {
                ConsentDecision::Denied
            };
            mailbox.capture_consent(decision);
        });
    }
}

/// Check whether screen-capture access is currently granted
pub fn has_capture_access() -> bool {
    #[cfg(target_os = "macos")]
    {
        macos::has_screen_capture_access()
    }

    #[cfg(not(target_os = "macos"))]
    {
        // No consent gate outside macOS
        true
    }
}

/// Request screen-capture access, prompting the user if needed
pub fn request_capture_access() -> bool {
    #[cfg(target_os = "macos")]
    {
        macos::request_screen_capture_access()
    }

    #[cfg(not(target_os = "macos"))]
    {
        true
    }
}

/// Open the system settings pane where the user can grant capture access
pub fn open_capture_settings() {
    #[cfg(target_os = "macos")]
    {
        macos::open_capture_settings()
    }

    #[cfg(not(target_os = "macos"))]
    {
        // No settings pane to point at
        tracing::debug!("No capture settings pane on this platform");
    }
}
