//! Native host shell for the M3U Generator web app.
//!
//! The web layer talks to the host through three bridge commands:
//! - `plugin:file-system|save_file` writes a text file to Downloads or the
//!   app-private files directory
//! - `plugin:back-button|exit_app` closes the foreground activity/window
//! - `generate_playlist` builds an M3U playlist and optionally saves it

use tauri::RunEvent;
use tracing::info;

/// Android JNI helpers (directories, Activity.finish)
#[cfg(target_os = "android")]
mod android;

/// Back-button plugin (`exit_app`)
pub mod back_button;

/// Error type returned by every command
pub mod error;
pub use error::ShellError;

/// `file-system` plugin (`save_file`)
pub mod file_system;

/// tracing subscriber setup
pub mod logging;

/// M3U playlist generation
pub mod playlist;

/// Directory resolution and the text file writer
pub mod storage;
pub use storage::{save_text_file, StorageDirs};

/// Core data types
pub mod types;
pub use types::{
    ExitAppResponse, FileSystemConfig, MediaFile, PlaylistRequest, PlaylistResult,
    SaveFileRequest, SaveFileResponse, StorageLocation,
};

/// Label of the window declared in tauri.conf.json
pub const MAIN_WINDOW_LABEL: &str = "main";

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    logging::init();
    info!(version = env!("CARGO_PKG_VERSION"), "Starting M3U Generator host");

    tauri::Builder::default()
        .plugin(file_system::init())
        .plugin(back_button::init())
        .invoke_handler(tauri::generate_handler![playlist::generate_playlist])
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|_app, event| match event {
            RunEvent::Ready => info!("Host ready"),
            RunEvent::Exit => info!("Host exiting"),
            _ => {}
        });
}
