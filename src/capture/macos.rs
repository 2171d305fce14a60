//! macOS screen-capture access
//!
//! Preflight and request of the system screen-recording permission.

use core_graphics::access::ScreenCaptureAccess;

/// Check if screen-capture access is granted without prompting
pub fn has_screen_capture_access() -> bool {
    ScreenCaptureAccess.preflight()
}

/// Request screen-capture access
///
/// Shows the system consent dialog on first call; later calls report the
/// stored decision. Returns true if access is granted.
pub fn request_screen_capture_access() -> bool {
    ScreenCaptureAccess.request()
}

/// Open System Settings at the Screen Recording pane
pub fn open_capture_settings() {
    let url = "x-apple.systempreferences:com.apple.preference.security?Privacy_ScreenCapture";
    if let Ok(output) = std::process::Command::new("open").arg(url).output() {
        if !output.status.success() {
            tracing::warn!("Failed to open Screen Recording settings");
        }
    }
}
