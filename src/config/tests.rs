use super::load::{default_config_path, default_log_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_explicit_env_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("MUSICSTREAM_CONFIG_PATH", "/tmp/musicstream-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/musicstream-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("musicstream")
            .join("config.toml")
    );
}

#[test]
fn default_log_path_falls_back_to_home_local_state() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_STATE_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_log_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".local/state")
            .join("musicstream")
            .join("musicstream.log")
    );
}

#[test]
fn settings_load_from_config_file_and_parse_page_aliases() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
initial_volume = 40
autoplay = true
time_update_ms = 100

[controls]
scrub_seconds = 9
volume_step = 10

[visualizer]
bar_count = 24
fps = 60

[ui]
start_page = "now-playing"
app_title = "hello"

[library]
catalog_path = "/srv/music/catalog.toml"
extensions = ["mp3"]
recursive = false
include_hidden = true

[logging]
level = "debug"
file = "/tmp/musicstream.log"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("MUSICSTREAM_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("MUSICSTREAM__VISUALIZER__FPS");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.initial_volume, 40);
    assert!(s.playback.autoplay);
    assert_eq!(s.playback.time_update_ms, 100);
    assert_eq!(s.controls.scrub_seconds, 9);
    assert_eq!(s.controls.volume_step, 10);
    assert_eq!(s.visualizer.bar_count, 24);
    assert_eq!(s.visualizer.fps, 60);
    assert_eq!(s.ui.start_page, StartPage::Player);
    assert_eq!(s.ui.app_title, "hello");
    assert_eq!(
        s.library.catalog_path.as_deref(),
        Some(std::path::Path::new("/srv/music/catalog.toml"))
    );
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert!(!s.library.recursive);
    assert!(s.library.include_hidden);
    assert_eq!(s.logging.level, "debug");
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[visualizer]
fps = 30
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("MUSICSTREAM_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("MUSICSTREAM__VISUALIZER__FPS", "12");

    let s = Settings::load().unwrap();
    assert_eq!(s.visualizer.fps, 12);
}

#[test]
fn validate_rejects_degenerate_visualizer_and_loud_volume() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());

    s.visualizer.bar_count = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.visualizer.fps = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.visualizer.fps = 5000;
    assert!(s.validate().is_err());
    s.visualizer.fps = 240;
    assert!(s.validate().is_ok());

    let mut s = Settings::default();
    s.playback.initial_volume = 101;
    assert!(s.validate().is_err());
}
