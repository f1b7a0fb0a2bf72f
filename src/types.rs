//! Core data types for the M3U Generator host shell
//!
//! This module contains the values that cross the bridge:
//! - Save requests and their results
//! - The logical storage location selector
//! - Playlist generation requests and results
//! - Plugin configuration read from tauri.conf.json

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Label the web layer sends for the public downloads directory.
/// Also the default when no directory is given.
pub const DOWNLOADS_LABEL: &str = "Downloads";

/// Where a saved file ends up
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageLocation {
    /// Platform public downloads directory (user visible)
    Downloads,
    /// Application-private files directory
    AppFiles,
}

impl StorageLocation {
    /// Map the bridge `directory` argument to a location.
    ///
    /// Only the exact label "Downloads" is recognized. Any other value,
    /// including typos or different casing, selects the private files
    /// directory. An absent value means "Downloads".
    pub fn from_label(label: Option<&str>) -> Self {
        match label.unwrap_or(DOWNLOADS_LABEL) {
            DOWNLOADS_LABEL => StorageLocation::Downloads,
            _ => StorageLocation::AppFiles,
        }
    }
}

/// Arguments of a single save call. Both `content` and `file_name` are
/// optional here because the bridge may omit them; the writer rejects
/// the request before touching the filesystem in that case.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveFileRequest {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub directory: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SaveFileResponse {
    pub success: bool,
    pub path: String,
}

impl SaveFileResponse {
    pub fn saved(path: PathBuf) -> Self {
        Self {
            success: true,
            path: path.to_string_lossy().to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ExitAppResponse {
    pub success: bool,
}

/// Directory overrides under `plugins.file-system` in tauri.conf.json
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSystemConfig {
    #[serde(default)]
    pub downloads_dir: Option<PathBuf>,
    #[serde(default)]
    pub files_dir: Option<PathBuf>,
}

/// A media file found on a server, as listed by the web layer
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaFile {
    pub url: String,
    pub name: String,
    #[serde(default)]
    pub season: Option<u32>,
    #[serde(default)]
    pub episode: Option<u32>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub quality: Option<String>,
    #[serde(default = "default_true")]
    pub selected: bool,
}

fn default_true() -> bool {
    true
}

/// Parameters for building (and optionally saving) an M3U playlist
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub group_title: String,
    #[serde(default = "default_true")]
    pub organize_by_seasons: bool,
    #[serde(default = "default_true")]
    pub sort_numerically: bool,
    #[serde(default = "default_true")]
    pub save_to_device: bool,
    #[serde(default)]
    pub directory: Option<String>,
    #[serde(default)]
    pub files: Vec<MediaFile>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistResult {
    pub name: String,
    pub description: String,
    pub group_title: String,
    pub content: String,
    pub created_at: String,
    /// Absolute path of the saved `.m3u`, when saved to the device
    pub path: Option<String>,
}
