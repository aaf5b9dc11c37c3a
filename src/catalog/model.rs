use serde::Deserialize;

use crate::lyrics::LyricsLine;

/// A single catalog entry. Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub album: String,
    /// Cover image reference (URL or path). Informational only in a terminal.
    #[serde(default)]
    pub cover: String,
    /// Catalog duration in whole seconds.
    #[serde(default)]
    pub duration: u32,
    /// Playable source: `http(s)://` URL, `file://` URL or a filesystem path.
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub lyrics: Vec<LyricsLine>,
}

impl Track {
    /// `Artist - Title`, or just the title when the artist is blank.
    pub fn display(&self) -> String {
        let artist = self.artist.trim();
        if artist.is_empty() {
            self.title.clone()
        } else {
            format!("{} - {}", artist, self.title)
        }
    }

    pub fn has_audio(&self) -> bool {
        self.audio_url
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty())
    }
}

/// Static playlist card shown on the home and playlists pages.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub track_count: u32,
    #[serde(default)]
    pub cover: String,
}
