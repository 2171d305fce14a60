//! Error types and handling
//!
//! Synchronous command errors and the serialized error shape sent to the
//! frontend. Asynchronous faults travel over the notification channel
//! instead (see `recorder::events`).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Synchronous failures of the `start_recording` command
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartError {
    #[error("Already recording")]
    AlreadyRecording,

    #[error("Storage permission denied")]
    StorageDenied,

    #[error("Recorder unavailable")]
    Unavailable,
}

impl StartError {
    pub fn code(&self) -> &'static str {
        match self {
            StartError::AlreadyRecording => "ALREADY_RECORDING",
            StartError::StorageDenied => "STORAGE_DENIED",
            StartError::Unavailable => "RECORDER_UNAVAILABLE",
        }
    }
}

/// Synchronous failures of the `stop_recording` command
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopError {
    #[error("No recording in progress")]
    NotRecording,

    #[error("Recorder unavailable")]
    Unavailable,
}

impl StopError {
    pub fn code(&self) -> &'static str {
        match self {
            StopError::NotRecording => "NOT_RECORDING",
            StopError::Unavailable => "RECORDER_UNAVAILABLE",
        }
    }
}

/// Error response for frontend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn unavailable() -> Self {
        ErrorResponse {
            code: "RECORDER_UNAVAILABLE".to_string(),
            message: "Recorder unavailable".to_string(),
        }
    }
}

impl From<StartError> for ErrorResponse {
    fn from(error: StartError) -> Self {
        ErrorResponse {
            code: error.code().to_string(),
            message: error.to_string(),
        }
    }
}

impl From<StopError> for ErrorResponse {
    fn from(error: StopError) -> Self {
        ErrorResponse {
            code: error.code().to_string(),
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(StartError::AlreadyRecording.code(), "ALREADY_RECORDING");
        assert_eq!(StartError::StorageDenied.code(), "STORAGE_DENIED");
        assert_eq!(StopError::NotRecording.code(), "NOT_RECORDING");
    }

    #[test]
    fn test_error_response_carries_message() {
        let response = ErrorResponse::from(StartError::StorageDenied);
        assert_eq!(response.code, "STORAGE_DENIED");
        assert_eq!(response.message, "Storage permission denied");
    }
}
