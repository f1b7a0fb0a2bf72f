//! Android-specific implementations for the M3U Generator host.
//!
//! This module is only compiled on Android builds (`target_os = "android"`).
//! It provides the JNI calls the bridge plugins need:
//!
//! - **Public downloads directory** - `Environment.getExternalStoragePublicDirectory`
//! - **Private files directory** - `Context.getFilesDir`
//! - **Foreground activity** - `Activity.finish()` for the back-button plugin
//!
//! The JavaVM and the activity come from `ndk_context`, which the Tauri
//! runtime initializes with the hosting activity before `run()` executes.

#![cfg(target_os = "android")]

use std::path::PathBuf;

use jni::objects::{JObject, JString};
use jni::{JNIEnv, JavaVM};
use tracing::warn;

use crate::back_button::ForegroundActivity;
use crate::error::{Result, ShellError};

/// Run `f` with an attached JNIEnv and the hosting Android context.
/// A pending Java exception is cleared before the error is returned.
fn with_context<T, F>(f: F) -> std::result::Result<T, String>
where
    F: for<'local> FnOnce(&mut JNIEnv<'local>, &JObject<'local>) -> jni::errors::Result<T>,
{
    let ctx = ndk_context::android_context();
    let vm = unsafe { JavaVM::from_raw(ctx.vm().cast()) }
        .map_err(|e| format!("Failed to get JavaVM: {}", e))?;
    let mut env = vm
        .attach_current_thread()
        .map_err(|e| format!("Failed to attach thread: {}", e))?;
    let context = unsafe { JObject::from_raw(ctx.context().cast()) };

    let result = f(&mut *env, &context);
    if result.is_err() && env.exception_check().unwrap_or(false) {
        let _ = env.exception_describe();
        let _ = env.exception_clear();
    }
    result.map_err(|e| e.to_string())
}

/// `File.getAbsolutePath()` as a PathBuf
fn absolute_path_of(env: &mut JNIEnv<'_>, file: &JObject<'_>) -> jni::errors::Result<PathBuf> {
    let path = env
        .call_method(file, "getAbsolutePath", "()Ljava/lang/String;", &[])?
        .l()?;
    let path = JString::from(path);
    let path: String = env.get_string(&path)?.into();
    Ok(PathBuf::from(path))
}

/// `Environment.getExternalStoragePublicDirectory(Environment.DIRECTORY_DOWNLOADS)`
pub fn public_downloads_dir() -> Result<PathBuf> {
    with_context(|env, _context| {
        let dir_type = env
            .get_static_field("android/os/Environment", "DIRECTORY_DOWNLOADS", "Ljava/lang/String;")?
            .l()?;
        let dir = env
            .call_static_method(
                "android/os/Environment",
                "getExternalStoragePublicDirectory",
                "(Ljava/lang/String;)Ljava/io/File;",
                &[(&dir_type).into()],
            )?
            .l()?;
        absolute_path_of(env, &dir)
    })
    .map_err(|e| ShellError::Platform(format!("Failed to resolve downloads directory: {}", e)))
}

/// `Context.getFilesDir()`
pub fn app_files_dir() -> Result<PathBuf> {
    with_context(|env, context| {
        let dir = env
            .call_method(context, "getFilesDir", "()Ljava/io/File;", &[])?
            .l()?;
        absolute_path_of(env, &dir)
    })
    .map_err(|e| ShellError::Platform(format!("Failed to resolve files directory: {}", e)))
}

/// The activity hosting the webview
pub struct CurrentActivity;

/// Returns `None` when the NDK context holds no activity (released during
/// teardown, or an application context rather than an activity).
pub fn current_activity() -> Option<CurrentActivity> {
    let is_activity = with_context(|env, context| {
        if context.is_null() {
            return Ok(false);
        }
        env.is_instance_of(context, "android/app/Activity")
    });

    match is_activity {
        Ok(true) => Some(CurrentActivity),
        Ok(false) => None,
        Err(e) => {
            warn!("Could not inspect Android context: {}", e);
            None
        }
    }
}

impl ForegroundActivity for CurrentActivity {
    fn describe(&self) -> String {
        "android activity".to_string()
    }

    fn finish(&self) -> std::result::Result<(), String> {
        with_context(|env, context| {
            env.call_method(context, "finish", "()V", &[])?;
            Ok(())
        })
    }
}
