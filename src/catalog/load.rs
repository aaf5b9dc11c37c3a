use std::path::Path;

use serde::Deserialize;

use super::model::{Playlist, Track};
use super::{Catalog, CatalogError};

/// On-disk catalog layout.
///
/// ```toml
/// favorites = ["1"]
///
/// [[tracks]]
/// id = "1"
/// title = "Song"
/// artist = "Artist"
/// duration = 234
/// audio_url = "/music/song.mp3"
/// lyrics = [{ time = 0.0, text = "first line" }]
///
/// [[playlists]]
/// id = "1"
/// name = "Evening"
/// track_count = 12
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogFile {
    tracks: Vec<Track>,
    playlists: Vec<Playlist>,
    favorites: Vec<String>,
}

impl Catalog {
    /// Parse a catalog from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(text)?;
        Self::new(file.tracks, file.playlists, file.favorites)
    }

    /// Read and parse a catalog file.
    pub fn load_file(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
