use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::{self, LoggingSettings};

/// Send `tracing` output to the log file; the terminal belongs to the UI.
///
/// `RUST_LOG` takes precedence over `logging.level`. Returns the log path,
/// or `None` when no file could be opened (logging is then disabled).
pub fn init(settings: &LoggingSettings) -> Option<PathBuf> {
    let path = settings.file.clone().or_else(config::default_log_path)?;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("musicstream: cannot create log dir {}: {e}", parent.display());
            return None;
        }
    }

    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("musicstream: cannot open log file {}: {e}", path.display());
            return None;
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_env_filter(filter)
        .try_init();

    match installed {
        Ok(()) => Some(path),
        Err(e) => {
            eprintln!("musicstream: logging disabled: {e}");
            None
        }
    }
}
