//! Quickcast - screen-recording sessions bridged to the UI shell.
//!
//! This is the main library crate for the Quickcast application. It
//! mediates start/stop requests from the frontend into the OS capture
//! subsystem and relays recorder lifecycle events back out.

pub mod capture;
pub mod commands;
pub mod recorder;
pub mod storage;
pub mod utils;

use commands::recording::RecorderState;
use recorder::controller::{SessionController, SessionDeps};
use recorder::events::TauriNotificationSink;
use recorder::FfmpegEngine;
use std::sync::Arc;
use storage::{CapabilityGate, LoggingMediaIndex, OutputLocator, ScopedStorageAuthority};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the application
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quickcast=debug,tauri=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Quickcast v{}", env!("CARGO_PKG_VERSION"));

    tauri::Builder::default()
        .plugin(tauri_plugin_shell::init())
        .setup(|app| {
            use tauri::Manager;

            let movies_dir = app
                .path()
                .video_dir()
                .unwrap_or_else(|_| std::env::temp_dir());
            let scoped_dir = app
                .path()
                .app_data_dir()
                .map(|dir| dir.join("recordings"))
                .unwrap_or_else(|_| std::env::temp_dir());

            let deps = SessionDeps {
                // Desktop gets scoped storage implicitly; the legacy
                // authorization chain stays dormant here.
                gate: CapabilityGate::modern(),
                authority: Arc::new(ScopedStorageAuthority),
                locator: OutputLocator::public_movies(movies_dir),
                broker: Arc::new(capture::SystemConsentBroker),
                engine: Arc::new(FfmpegEngine::new(scoped_dir)),
                media_index: Arc::new(LoggingMediaIndex),
                sink: Arc::new(TauriNotificationSink::new(app.handle().clone())),
            };
            let (controller, handle) = SessionController::new(deps);
            tauri::async_runtime::spawn(controller.run());
            app.manage(RecorderState { handle });

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::recording::start_recording,
            commands::recording::stop_recording,
            commands::recording::get_recorder_state,
            commands::recording::check_capture_access,
            commands::recording::open_capture_settings,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
