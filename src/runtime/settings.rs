use crate::config::Settings;

/// Settings to run with, and the reason defaults replaced the config file
/// when they did. The reason is logged once tracing is up.
pub fn load_settings() -> (Settings, Option<String>) {
    settings_or_defaults(Settings::load())
}

fn settings_or_defaults(loaded: Result<Settings, ::config::ConfigError>) -> (Settings, Option<String>) {
    let checked = loaded
        .map_err(|e| format!("failed to load config: {e}"))
        .and_then(|s| match s.validate() {
            Ok(()) => Ok(s),
            Err(msg) => Err(format!("invalid config: {msg}")),
        });
    match checked {
        Ok(s) => (s, None),
        Err(reason) => (Settings::default(), Some(reason)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_settings_are_kept() {
        let mut s = Settings::default();
        s.visualizer.bar_count = 12;
        let (got, reason) = settings_or_defaults(Ok(s));
        assert_eq!(got.visualizer.bar_count, 12);
        assert!(reason.is_none());
    }

    #[test]
    fn invalid_settings_fall_back_with_reason() {
        let mut s = Settings::default();
        s.visualizer.fps = 0;
        let (got, reason) = settings_or_defaults(Ok(s));
        assert_eq!(got.visualizer.fps, Settings::default().visualizer.fps);
        assert!(reason.unwrap().starts_with("invalid config: visualizer.fps"));
    }

    #[test]
    fn load_errors_fall_back_with_reason() {
        let err = ::config::ConfigError::Message("bad toml".into());
        let (got, reason) = settings_or_defaults(Err(err));
        assert_eq!(got.visualizer.bar_count, Settings::default().visualizer.bar_count);
        assert!(reason.unwrap().contains("bad toml"));
    }
}
