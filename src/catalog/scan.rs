use std::path::Path;

use lofty::prelude::{Accessor, AudioFile, TaggedFileExt};
use tracing::debug;
use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::lyrics::parse_lrc;

use super::model::Track;

const COVER_NAMES: [&str; 4] = ["cover.jpg", "cover.png", "folder.jpg", "folder.png"];

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn non_blank(s: Option<std::borrow::Cow<'_, str>>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Cover art sitting next to the audio file, if any.
fn sidecar_cover(path: &Path) -> String {
    let Some(dir) = path.parent() else {
        return String::new();
    };
    COVER_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.is_file())
        .map(|p| p.display().to_string())
        .unwrap_or_default()
}

/// Build a catalog track list from the audio files under `dir`.
///
/// Tags are read with lofty; files without tags fall back to the file stem
/// as title. A `.lrc` file with the same stem provides synced lyrics.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<Track> {
    let mut tracks: Vec<Track> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !path.is_file() || !is_audio_file(path, settings) {
            continue;
        }

        let mut title = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN")
            .to_string();
        let mut artist = String::new();
        let mut album = String::new();
        let mut duration = 0u32;

        match lofty::read_from_path(path) {
            Ok(tagged) => {
                duration = tagged.properties().duration().as_secs().min(u32::MAX as u64) as u32;

                if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                    if let Some(v) = non_blank(tag.title()) {
                        title = v;
                    }
                    if let Some(v) = non_blank(tag.artist()) {
                        artist = v;
                    }
                    if let Some(v) = non_blank(tag.album()) {
                        album = v;
                    }
                }
            }
            Err(e) => debug!(path = %path.display(), error = %e, "no readable tags"),
        }

        let lyrics = std::fs::read_to_string(path.with_extension("lrc"))
            .map(|text| parse_lrc(&text))
            .unwrap_or_default();

        let source = path.display().to_string();
        tracks.push(Track {
            id: source.clone(),
            title,
            artist,
            album,
            cover: sidecar_cover(path),
            duration,
            audio_url: Some(source),
            lyrics,
        });
    }

    tracks.sort_by_key(|t| t.display().to_lowercase());
    tracks
}
