//! Resolving a source reference into encoded audio bytes.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use super::error::PlaybackError;

/// Upper bound for a remote download; ureq's default cap is too small for full songs.
const MAX_REMOTE_BYTES: u64 = 128 * 1024 * 1024;

/// Whole-request budget for a remote download, body included.
const REMOTE_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum SourceKind<'a> {
    Remote(&'a str),
    Local(PathBuf),
}

pub(crate) fn classify(source: &str) -> SourceKind<'_> {
    let trimmed = source.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        SourceKind::Remote(trimmed)
    } else {
        let path = trimmed.strip_prefix("file://").unwrap_or(trimmed);
        SourceKind::Local(PathBuf::from(path))
    }
}

/// Read the whole source into memory.
pub(super) fn fetch(source: &str) -> Result<Arc<[u8]>, PlaybackError> {
    match classify(source) {
        SourceKind::Remote(url) => {
            debug!(%url, "downloading source");
            let agent: ureq::Agent = ureq::Agent::config_builder()
                .timeout_global(Some(REMOTE_TIMEOUT))
                .build()
                .into();
            let mut response = agent
                .get(url)
                .call()
                .map_err(|e| PlaybackError::Fetch(format!("{url}: {e}")))?;
            let bytes = response
                .body_mut()
                .with_config()
                .limit(MAX_REMOTE_BYTES)
                .read_to_vec()
                .map_err(|e| PlaybackError::Fetch(format!("{url}: {e}")))?;
            Ok(bytes.into())
        }
        SourceKind::Local(path) => std::fs::read(&path)
            .map(Arc::from)
            .map_err(|e| PlaybackError::Fetch(format!("{}: {e}", path.display()))),
    }
}
