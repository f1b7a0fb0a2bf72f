// Back-button plugin: lets the web layer close the app when its own
// navigation stack is empty.

use tauri::{
    plugin::{Builder, TauriPlugin},
    AppHandle, Runtime,
};
use tracing::{error, info};

use crate::error::{Result, ShellError};
use crate::types::ExitAppResponse;

pub const PLUGIN_NAME: &str = "back-button";

const NO_ACTIVITY: &str = "Activity not available";

/// Something that can be finished the way an Android activity is.
pub trait ForegroundActivity {
    fn describe(&self) -> String;
    fn finish(&self) -> std::result::Result<(), String>;
}

/// Finish the foreground activity, or report that there is none.
pub fn exit_foreground<A: ForegroundActivity>(activity: Option<A>) -> Result<ExitAppResponse> {
    let Some(activity) = activity else {
        error!("Activity is null");
        return Err(ShellError::Unavailable(NO_ACTIVITY.to_string()));
    };

    info!(activity = %activity.describe(), "Finishing foreground activity");
    activity.finish().map_err(|e| {
        error!("Error exiting app: {}", e);
        ShellError::Platform(format!("Error exiting app: {}", e))
    })?;

    Ok(ExitAppResponse { success: true })
}

// ============================================================================
// Desktop: the foreground "activity" is a webview window
// ============================================================================

#[cfg(not(target_os = "android"))]
impl<R: Runtime> ForegroundActivity for tauri::WebviewWindow<R> {
    fn describe(&self) -> String {
        format!("window '{}'", self.label())
    }

    fn finish(&self) -> std::result::Result<(), String> {
        self.close().map_err(|e| e.to_string())
    }
}

/// The focused window, or the main window if nothing has focus
#[cfg(not(target_os = "android"))]
fn foreground_activity<R: Runtime>(app: &AppHandle<R>) -> Option<tauri::WebviewWindow<R>> {
    use tauri::Manager;

    let windows = app.webview_windows();
    windows
        .values()
        .find(|window| window.is_focused().unwrap_or(false))
        .cloned()
        .or_else(|| windows.get(crate::MAIN_WINDOW_LABEL).cloned())
}

#[cfg(target_os = "android")]
fn foreground_activity<R: Runtime>(_app: &AppHandle<R>) -> Option<crate::android::CurrentActivity> {
    crate::android::current_activity()
}

/// Tauri command: close the current foreground activity
#[tauri::command]
pub fn exit_app<R: Runtime>(app: AppHandle<R>) -> Result<ExitAppResponse> {
    exit_foreground(foreground_activity(&app))
}

/// Initialize the back-button plugin
pub fn init<R: Runtime>() -> TauriPlugin<R> {
    Builder::new(PLUGIN_NAME)
        .invoke_handler(tauri::generate_handler![exit_app])
        .build()
}
