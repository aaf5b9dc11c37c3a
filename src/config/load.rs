use std::{env, path::PathBuf};

use super::schema::Settings;

/// Highest accepted visualizer frame rate.
pub const MAX_FPS: u32 = 240;

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then environment variables
/// (prefix `MUSICSTREAM__`) on top, and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("MUSICSTREAM")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.visualizer.bar_count == 0 {
            return Err("visualizer.bar_count must be >= 1".to_string());
        }
        if self.visualizer.fps == 0 {
            return Err("visualizer.fps must be >= 1".to_string());
        }
        if self.visualizer.fps > MAX_FPS {
            return Err(format!("visualizer.fps must be <= {MAX_FPS}"));
        }
        if self.playback.initial_volume > 100 {
            return Err("playback.initial_volume must be <= 100".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `MUSICSTREAM_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("MUSICSTREAM_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/musicstream/config.toml`
/// or `~/.config/musicstream/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config").map(|d| d.join("musicstream").join("config.toml"))
}

/// Default log file location: `$XDG_STATE_HOME/musicstream/musicstream.log`
/// or `~/.local/state/musicstream/musicstream.log`.
pub fn default_log_path() -> Option<PathBuf> {
    xdg_dir("XDG_STATE_HOME", ".local/state").map(|d| d.join("musicstream").join("musicstream.log"))
}

fn xdg_dir(var: &str, home_fallback: &str) -> Option<PathBuf> {
    if let Some(xdg) = env::var_os(var) {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(home_fallback))
    }
}
