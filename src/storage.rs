//! File writer for the `saveFile` bridge command.
//!
//! Two concrete directories are resolved once per app run:
//! - Desktop (Linux/Windows/macOS): Tauri's path resolver
//! - Android: `Environment.getExternalStoragePublicDirectory` and
//!   `Context.getFilesDir` via JNI (see `crate::android`)
//!
//! Environment variables and `plugins.file-system` in tauri.conf.json can
//! override either directory.

use std::ffi::OsString;
use std::fs::File;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use tauri::{AppHandle, Runtime};
use tracing::{debug, info, warn};

use crate::error::{Result, ShellError};
use crate::types::{FileSystemConfig, SaveFileRequest, StorageLocation};

pub const DOWNLOADS_DIR_ENV: &str = "M3UGEN_DOWNLOADS_DIR";
pub const FILES_DIR_ENV: &str = "M3UGEN_FILES_DIR";

const SAVE_ERROR: &str = "Error saving file";
const MISSING_ARGS: &str = "Content and fileName are required";

/// The two directories a save can land in. Either may be missing when
/// the platform has no such folder; only saves that select it fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageDirs {
    pub downloads: Option<PathBuf>,
    pub app_files: Option<PathBuf>,
}

impl StorageDirs {
    pub fn new(downloads: impl Into<PathBuf>, app_files: impl Into<PathBuf>) -> Self {
        Self {
            downloads: Some(downloads.into()),
            app_files: Some(app_files.into()),
        }
    }

    /// Resolve both directories for the running platform, then apply
    /// overrides from the environment and plugin config.
    pub fn for_app<R: Runtime>(app: &AppHandle<R>, config: &FileSystemConfig) -> Self {
        let dirs = platform_dirs(app).with_overrides(config, |key| std::env::var_os(key));
        info!(
            downloads = ?dirs.downloads,
            app_files = ?dirs.app_files,
            "Resolved storage directories"
        );
        dirs
    }

    /// Environment wins over config, config wins over the platform default.
    pub fn with_overrides<F>(self, config: &FileSystemConfig, env: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let pick = |key: &str, configured: &Option<PathBuf>, default: Option<PathBuf>| {
            env(key)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
                .or_else(|| configured.clone())
                .or(default)
        };

        StorageDirs {
            downloads: pick(DOWNLOADS_DIR_ENV, &config.downloads_dir, self.downloads),
            app_files: pick(FILES_DIR_ENV, &config.files_dir, self.app_files),
        }
    }

    pub fn dir_for(&self, location: StorageLocation) -> Result<&Path> {
        let (dir, name) = match location {
            StorageLocation::Downloads => (&self.downloads, "downloads"),
            StorageLocation::AppFiles => (&self.app_files, "files"),
        };
        dir.as_deref().ok_or_else(|| {
            ShellError::io(
                SAVE_ERROR,
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("{} directory is not available", name),
                ),
            )
        })
    }
}

/// Write `request.content` to `request.file_name` under the directory the
/// request selects, replacing any existing file. Returns the absolute path.
pub fn save_text_file(dirs: &StorageDirs, request: &SaveFileRequest) -> Result<PathBuf> {
    let (content, file_name) = match (request.content.as_deref(), request.file_name.as_deref()) {
        (Some(content), Some(file_name)) => (content, file_name),
        _ => return Err(ShellError::Validation(MISSING_ARGS.to_string())),
    };

    let location = StorageLocation::from_label(request.directory.as_deref());
    let dir = dirs.dir_for(location)?;
    debug!(?location, dir = %dir.display(), file_name, "Saving file");

    check_file_name(file_name)?;

    std::fs::create_dir_all(dir).map_err(|e| ShellError::io(SAVE_ERROR, e))?;

    let path = dir.join(file_name);
    write_truncating(&path, content).map_err(|e| ShellError::io(SAVE_ERROR, e))?;

    let path = absolute_path(&path)?;
    info!(path = %path.display(), bytes = content.len(), ?location, "Saved file");
    Ok(path)
}

/// The file handle lives only inside this function, so it is closed on
/// both the success and the error path.
fn write_truncating(path: &Path, content: &str) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    file.flush()
}

/// File names are relative to the target directory. An absolute name or
/// one that climbs out with `..` would write somewhere else entirely.
fn check_file_name(file_name: &str) -> Result<()> {
    let escapes = Path::new(file_name).components().any(|c| {
        matches!(c, Component::RootDir | Component::Prefix(_) | Component::ParentDir)
    });
    if escapes {
        return Err(ShellError::io(
            SAVE_ERROR,
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid file name '{}'", file_name),
            ),
        ));
    }
    Ok(())
}

fn absolute_path(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path).map_err(|e| ShellError::io(SAVE_ERROR, e))?;
    Ok(dunce::simplified(&absolute).to_path_buf())
}

// ============================================================================
// Platform directory lookup
// ============================================================================

#[cfg(not(target_os = "android"))]
fn platform_dirs<R: Runtime>(app: &AppHandle<R>) -> StorageDirs {
    use tauri::Manager;

    let downloads = app
        .path()
        .download_dir()
        .inspect_err(|e| warn!("Could not resolve the downloads directory: {}", e))
        .ok();

    let app_files = app
        .path()
        .app_data_dir()
        .map(|dir| dir.join("files"))
        .inspect_err(|e| warn!("Could not resolve the app data directory: {}", e))
        .ok();

    StorageDirs { downloads, app_files }
}

#[cfg(target_os = "android")]
fn platform_dirs<R: Runtime>(_app: &AppHandle<R>) -> StorageDirs {
    StorageDirs {
        downloads: crate::android::public_downloads_dir()
            .inspect_err(|e| warn!("{}", e))
            .ok(),
        app_files: crate::android::app_files_dir()
            .inspect_err(|e| warn!("{}", e))
            .ok(),
    }
}
