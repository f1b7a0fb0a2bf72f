//! M3U playlist generation
//!
//! Builds `#EXTM3U` text from media files listed by the web layer and,
//! when asked, saves it as `<name>.m3u` through the file-system plugin.

use std::cmp::Ordering;
use std::sync::OnceLock;

use chrono::{SecondsFormat, Utc};
use regex::Regex;
use tauri::{AppHandle, Runtime};
use tracing::info;

use crate::error::{Result, ShellError};
use crate::file_system::{FileSystemExt, FileSystemState};
use crate::types::{MediaFile, PlaylistRequest, PlaylistResult, SaveFileRequest};

pub const M3U_HEADER: &str = "#EXTM3U\n";

#[derive(Clone, Debug)]
pub struct PlaylistOptions<'a> {
    pub group_title: &'a str,
    pub organize_by_seasons: bool,
    pub sort_numerically: bool,
}

impl<'a> From<&'a PlaylistRequest> for PlaylistOptions<'a> {
    fn from(request: &'a PlaylistRequest) -> Self {
        Self {
            group_title: &request.group_title,
            organize_by_seasons: request.organize_by_seasons,
            sort_numerically: request.sort_numerically,
        }
    }
}

/// `None` sorts after every known number
fn cmp_known_first(a: Option<u32>, b: Option<u32>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn cmp_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

/// Render the playlist. Unselected files are skipped.
pub fn generate_m3u(files: &[MediaFile], options: &PlaylistOptions<'_>) -> String {
    let mut files: Vec<&MediaFile> = files.iter().filter(|f| f.selected).collect();

    if options.sort_numerically {
        files.sort_by(|a, b| {
            cmp_known_first(a.season, b.season)
                .then_with(|| cmp_known_first(a.episode, b.episode))
                .then_with(|| cmp_names(&a.name, &b.name))
        });
    }

    let mut content = String::from(M3U_HEADER);

    if options.organize_by_seasons {
        // Seasons keep first-seen order internally, then sort with unknown last
        let mut seasons: Vec<(Option<u32>, Vec<&MediaFile>)> = Vec::new();
        for file in files {
            match seasons.iter_mut().find(|(season, _)| *season == file.season) {
                Some((_, group)) => group.push(file),
                None => seasons.push((file.season, vec![file])),
            }
        }
        seasons.sort_by(|(a, _), (b, _)| cmp_known_first(*a, *b));

        for (season, group) in seasons {
            let group_title = match season {
                Some(season) if !options.group_title.is_empty() => {
                    format!("{} S{:02}", options.group_title, season)
                }
                _ => options.group_title.to_string(),
            };
            for file in group {
                push_entry(&mut content, &group_title, file);
            }
        }
    } else {
        for file in files {
            push_entry(&mut content, options.group_title, file);
        }
    }

    content
}

fn push_entry(content: &mut String, group_title: &str, file: &MediaFile) {
    content.push_str("#EXTINF:-1");
    if !group_title.is_empty() {
        content.push_str(&format!(" group-title=\"{}\"", group_title));
    }
    content.push(',');
    content.push_str(&format_title(file));
    content.push('\n');
    content.push_str(&file.url);
    content.push('\n');
}

fn release_tags() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(?:720p|1080p|2160p|BluRay|WEB-DL|HDTV|x264|x265|AAC|HEVC)\b")
            .expect("release tag pattern is valid")
    })
}

fn bracketed() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[.*?\]|\(.*?\)").expect("bracket pattern is valid"))
}

fn whitespace_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

/// Human readable title for an `#EXTINF` line
pub fn format_title(file: &MediaFile) -> String {
    let mut title = file.name.as_str();

    // Drop the extension, but keep dotfiles intact
    if let Some(dot) = title.rfind('.') {
        if dot > 0 {
            title = &title[..dot];
        }
    }

    let title = release_tags().replace_all(title, "");
    let title = bracketed().replace_all(&title, "");
    let title = title.replace("._", " ").replace(['.', '_'], " ");
    let mut title = whitespace_runs().replace_all(&title, " ").trim().to_string();

    if let (Some(season), Some(episode)) = (file.season, file.episode) {
        let tag = format!("S{:02}E{:02}", season, episode);
        if !title.contains(&tag) {
            title = format!("{} - {}", title, tag);
        }
    }

    title
}

/// Generate a playlist and save it through `state` when requested
pub fn build_playlist(state: &FileSystemState, request: PlaylistRequest) -> Result<PlaylistResult> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(ShellError::Validation("Playlist name is required".to_string()));
    }

    let content = generate_m3u(&request.files, &PlaylistOptions::from(&request));

    let path = if request.save_to_device {
        let saved = state.save(&SaveFileRequest {
            content: Some(content.clone()),
            file_name: Some(format!("{}.m3u", name)),
            directory: request.directory.clone(),
        })?;
        Some(saved.path)
    } else {
        None
    };

    info!(
        name,
        entries = request.files.iter().filter(|f| f.selected).count(),
        saved = path.is_some(),
        "Generated playlist"
    );

    Ok(PlaylistResult {
        name: name.to_string(),
        description: request.description.unwrap_or_default(),
        group_title: request.group_title,
        content,
        created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        path,
    })
}

/// Tauri command: build an M3U playlist, optionally saving it to the device
#[tauri::command]
pub fn generate_playlist<R: Runtime>(
    app: AppHandle<R>,
    request: PlaylistRequest,
) -> Result<PlaylistResult> {
    build_playlist(app.file_system(), request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageDirs;
    use tempfile::TempDir;

    fn media(name: &str, season: Option<u32>, episode: Option<u32>) -> MediaFile {
        MediaFile {
            url: format!("ftp://nas/{}", name),
            name: name.to_string(),
            season,
            episode,
            size: None,
            duration: None,
            quality: None,
            selected: true,
        }
    }

    fn options(group_title: &str, organize_by_seasons: bool, sort_numerically: bool) -> PlaylistOptions<'_> {
        PlaylistOptions { group_title, organize_by_seasons, sort_numerically }
    }

    #[test]
    fn test_format_title() {
        assert_eq!(
            format_title(&media("Show.Name.S01E02.1080p.WEB-DL.x264.mkv", Some(1), Some(2))),
            "Show Name S01E02"
        );
        assert_eq!(
            format_title(&media("Show_Name_[Group]_(2019)_ep3.mp4", Some(2), Some(3))),
            "Show Name ep3 - S02E03"
        );
        assert_eq!(format_title(&media("Movie.2160p.HEVC.AAC.mkv", None, None)), "Movie");
        assert_eq!(format_title(&media(".hidden", None, None)), "hidden");
    }

    #[test]
    fn test_sorted_and_grouped_by_season() {
        let files = vec![
            media("b.mkv", Some(2), Some(1)),
            media("extra.mkv", None, None),
            media("a2.mkv", Some(1), Some(2)),
            media("a1.mkv", Some(1), Some(1)),
        ];
        let m3u = generate_m3u(&files, &options("Show", true, true));

        assert_eq!(
            m3u,
            "#EXTM3U\n\
             #EXTINF:-1 group-title=\"Show S01\",a1 - S01E01\nftp://nas/a1.mkv\n\
             #EXTINF:-1 group-title=\"Show S01\",a2 - S01E02\nftp://nas/a2.mkv\n\
             #EXTINF:-1 group-title=\"Show S02\",b - S02E01\nftp://nas/b.mkv\n\
             #EXTINF:-1 group-title=\"Show\",extra\nftp://nas/extra.mkv\n"
        );
    }

    #[test]
    fn test_flat_unsorted_without_group_title() {
        let files = vec![media("z.mp4", Some(3), None), media("a.mp4", Some(1), None)];
        let m3u = generate_m3u(&files, &options("", false, false));

        assert_eq!(m3u, "#EXTM3U\n#EXTINF:-1,z\nftp://nas/z.mp4\n#EXTINF:-1,a\nftp://nas/a.mp4\n");
    }

    #[test]
    fn test_unselected_files_skipped() {
        let mut skipped = media("skip.mkv", None, None);
        skipped.selected = false;
        let m3u = generate_m3u(&[skipped, media("keep.mkv", None, None)], &options("", true, true));

        assert!(!m3u.contains("skip"));
        assert!(m3u.contains("ftp://nas/keep.mkv"));
    }

    #[test]
    fn test_build_playlist_saves_m3u() {
        let root = TempDir::new().unwrap();
        let state = FileSystemState::new(StorageDirs::new(
            root.path().join("Download"),
            root.path().join("files"),
        ));
        let request: PlaylistRequest = serde_json::from_value(serde_json::json!({
            "name": "My Show",
            "groupTitle": "My Show",
            "files": [{"url": "ftp://nas/e1.mkv", "name": "e1.mkv", "season": 1, "episode": 1}]
        }))
        .unwrap();

        let result = build_playlist(&state, request).unwrap();
        let path = result.path.expect("saved to device");

        assert!(path.ends_with("My Show.m3u"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), result.content);
        assert!(result.content.starts_with(M3U_HEADER));
    }

    #[test]
    fn test_build_playlist_requires_name() {
        let root = TempDir::new().unwrap();
        let state = FileSystemState::new(StorageDirs::new(
            root.path().join("Download"),
            root.path().join("files"),
        ));
        let request: PlaylistRequest =
            serde_json::from_value(serde_json::json!({"name": "  ", "files": []})).unwrap();

        let err = build_playlist(&state, request).unwrap_err();
        assert!(matches!(err, ShellError::Validation(_)));
        assert!(!root.path().join("Download").exists());
    }
}
