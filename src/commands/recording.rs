//! Recording-related Tauri commands
//!
//! Thin adapters from the invoke bridge onto the session controller. A
//! successful `start_recording` acknowledges acceptance of the request;
//! the actual session outcome arrives on the `OnStart`/`OnError`
//! notification channel.

use crate::recorder::SessionHandle;
use crate::utils::error::ErrorResponse;
use tauri::State;

/// Application state for recording
pub struct RecorderState {
    pub handle: SessionHandle,
}

/// Begin a recording session
///
/// Errors synchronously with `ALREADY_RECORDING` while a session is in
/// flight and `STORAGE_DENIED` when the legacy storage permission is
/// refused.
#[tauri::command]
pub async fn start_recording(state: State<'_, RecorderState>) -> Result<(), ErrorResponse> {
    state.handle.start().await.map_err(ErrorResponse::from)
}

/// End the in-flight recording session
///
/// Returns whether the engine stopped cleanly; errors with
/// `NOT_RECORDING` when no session is in flight.
#[tauri::command]
pub async fn stop_recording(state: State<'_, RecorderState>) -> Result<bool, ErrorResponse> {
    state.handle.stop().await.map_err(ErrorResponse::from)
}

/// Current session phase, for UI introspection
#[tauri::command]
pub async fn get_recorder_state(state: State<'_, RecorderState>) -> Result<String, ErrorResponse> {
    state
        .handle
        .phase()
        .await
        .map(str::to_string)
        .ok_or_else(ErrorResponse::unavailable)
}

/// Check whether screen-capture access is already granted, without
/// prompting the user
#[tauri::command]
pub async fn check_capture_access() -> Result<bool, ErrorResponse> {
    Ok(crate::capture::has_capture_access())
}

/// Open the system settings pane for capture access, for the UI to offer
/// when the preflight check comes back false
#[tauri::command]
pub async fn open_capture_settings() -> Result<(), ErrorResponse> {
    crate::capture::open_capture_settings();
    Ok(())
}
