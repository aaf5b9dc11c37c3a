use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/musicstream/config.toml` or `~/.config/musicstream/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `MUSICSTREAM__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playback: PlaybackSettings,
    pub controls: ControlsSettings,
    pub visualizer: VisualizerSettings,
    pub ui: UiSettings,
    pub library: LibrarySettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Volume (0-100) the player bar starts with.
    pub initial_volume: u8,
    /// Start playing as soon as a track is selected.
    pub autoplay: bool,
    /// Interval between position updates from the audio thread (milliseconds).
    pub time_update_ms: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            initial_volume: 70,
            autoplay: false,
            time_update_ms: 250,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to seek when pressing `H` / `L`.
    pub scrub_seconds: u64,
    /// Volume change applied by `+` / `-`.
    pub volume_step: u8,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            scrub_seconds: 5,
            volume_step: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VisualizerSettings {
    /// Number of bars drawn across the visualizer surface.
    pub bar_count: usize,
    /// Animation frames per second.
    pub fps: u32,
}

impl Default for VisualizerSettings {
    fn default() -> Self {
        Self {
            bar_count: 40,
            fps: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Page shown at startup.
    pub start_page: StartPage,
    /// Title rendered at the top of the sidebar.
    pub app_title: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            start_page: StartPage::Home,
            app_title: "MusicStream".to_string(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StartPage {
    Home,
    #[serde(alias = "now-playing", alias = "now_playing")]
    Player,
    Playlists,
    #[serde(alias = "liked")]
    Favorites,
    #[serde(alias = "account")]
    Profile,
    Admin,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Catalog file or music directory used when none is given on the command line.
    pub catalog_path: Option<PathBuf>,
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            catalog_path: None,
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: false,
            recursive: true,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive; `RUST_LOG` wins when set.
    pub level: String,
    /// Log file path. Defaults to `$XDG_STATE_HOME/musicstream/musicstream.log`.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
