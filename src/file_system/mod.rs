// File-system plugin for the web layer.
// Saves text files to the public downloads directory or the app's private
// files directory.

use tauri::{
    plugin::{Builder, TauriPlugin},
    Manager, Runtime, State,
};
use tracing::error;

use crate::error::Result;
use crate::storage::{self, StorageDirs};
use crate::types::{FileSystemConfig, SaveFileRequest, SaveFileResponse};

pub const PLUGIN_NAME: &str = "file-system";

/// Plugin state: the directories resolved at setup
pub struct FileSystemState {
    dirs: StorageDirs,
}

impl FileSystemState {
    pub fn new(dirs: StorageDirs) -> Self {
        Self { dirs }
    }

    pub fn save(&self, request: &SaveFileRequest) -> Result<SaveFileResponse> {
        storage::save_text_file(&self.dirs, request)
            .map(SaveFileResponse::saved)
            .inspect_err(|e| error!("{}", e))
    }
}

/// Tauri command to save a text file.
/// `directory` is "Downloads" (default) or anything else for app-private files.
#[tauri::command]
pub fn save_file(
    state: State<'_, FileSystemState>,
    content: Option<String>,
    file_name: Option<String>,
    directory: Option<String>,
) -> Result<SaveFileResponse> {
    state.save(&SaveFileRequest {
        content,
        file_name,
        directory,
    })
}

/// Initialize the file-system plugin.
/// Reads `plugins.file-system` from tauri.conf.json for directory overrides.
pub fn init<R: Runtime>() -> TauriPlugin<R, FileSystemConfig> {
    Builder::<R, FileSystemConfig>::new(PLUGIN_NAME)
        .invoke_handler(tauri::generate_handler![save_file])
        .setup(|app, api| {
            let dirs = StorageDirs::for_app(app, api.config());
            app.manage(FileSystemState::new(dirs));
            Ok(())
        })
        .build()
}

/// Extension trait for easy access to the file-system plugin state
pub trait FileSystemExt<R: Runtime> {
    fn file_system(&self) -> &FileSystemState;
}

impl<R: Runtime, T: Manager<R>> FileSystemExt<R> for T {
    fn file_system(&self) -> &FileSystemState {
        self.state::<FileSystemState>().inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_state_save_reports_path() {
        let root = TempDir::new().unwrap();
        let state = FileSystemState::new(StorageDirs::new(
            root.path().join("Download"),
            root.path().join("files"),
        ));

        let response = state
            .save(&SaveFileRequest {
                content: Some("hello".to_string()),
                file_name: Some("hello.txt".to_string()),
                directory: Some("Cache".to_string()),
            })
            .unwrap();

        assert!(response.success);
        assert_eq!(response.path, root.path().join("files").join("hello.txt").to_string_lossy());
        assert_eq!(std::fs::read_to_string(&response.path).unwrap(), "hello");
    }

    #[test]
    fn test_state_save_rejects_missing_content() {
        let root = TempDir::new().unwrap();
        let state = FileSystemState::new(StorageDirs::new(
            root.path().join("Download"),
            root.path().join("files"),
        ));

        let err = state
            .save(&SaveFileRequest {
                content: None,
                file_name: Some("hello.txt".to_string()),
                directory: None,
            })
            .unwrap_err();
        assert_eq!(serde_json::to_string(&err).unwrap(), r#""Content and fileName are required""#);
    }
}
