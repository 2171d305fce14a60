//! Tauri command handlers
//!
//! The request/response side of the message bridge, invoked from the UI
//! shell via Tauri's invoke system.

pub mod recording;
