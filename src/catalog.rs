//! Track catalog: the fixed, ordered list of tracks the shell browses.
//!
//! A catalog is built once at startup from one of three sources (a TOML
//! catalog file, a scanned music directory, or the built-in demo list) and
//! is read-only afterwards.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::config::LibrarySettings;

mod builtin;
mod load;
mod model;
mod scan;

pub use model::{Playlist, Track};
pub use scan::scan;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("duplicate track id: {0}")]
    DuplicateId(String),
}

#[derive(Debug, Clone)]
pub struct Catalog {
    tracks: Vec<Track>,
    playlists: Vec<Playlist>,
    favorites: Vec<String>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate track ids. Favorites naming
    /// unknown tracks are dropped and lyrics are put in time order.
    pub fn new(
        mut tracks: Vec<Track>,
        playlists: Vec<Playlist>,
        favorites: Vec<String>,
    ) -> Result<Self, CatalogError> {
        for t in &mut tracks {
            t.lyrics.sort_by(|a, b| a.time.total_cmp(&b.time));
        }

        let mut seen = HashSet::new();
        for t in &tracks {
            if !seen.insert(t.id.as_str()) {
                return Err(CatalogError::DuplicateId(t.id.clone()));
            }
        }
        let favorites = favorites
            .into_iter()
            .filter(|id| seen.contains(id.as_str()))
            .collect();

        Ok(Self {
            tracks,
            playlists,
            favorites,
        })
    }

    /// The demo catalog.
    pub fn builtin() -> Self {
        let tracks = builtin::tracks();
        let playlists = builtin::playlists(&tracks);
        Self {
            tracks,
            playlists,
            favorites: builtin::favorites(),
        }
    }

    /// Pick the catalog source for `path`: `.toml` files are parsed, directories
    /// are scanned, and anything unusable falls back to the demo catalog.
    pub fn open(path: Option<&Path>, settings: &LibrarySettings) -> Self {
        let Some(path) = path else {
            return Self::builtin();
        };

        if path.is_dir() {
            let tracks = scan(path, settings);
            info!(dir = %path.display(), count = tracks.len(), "scanned music directory");
            return Self {
                tracks,
                playlists: Vec::new(),
                favorites: Vec::new(),
            };
        }

        match Self::load_file(path) {
            Ok(catalog) => {
                info!(file = %path.display(), count = catalog.len(), "loaded catalog file");
                catalog
            }
            Err(e) => {
                warn!(error = %e, "falling back to the built-in catalog");
                Self::builtin()
            }
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    /// Favorites the catalog ships with.
    pub fn initial_favorites(&self) -> &[String] {
        &self.favorites
    }
}

#[cfg(test)]
mod tests;
