use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("audio output device error: {0}")]
    Device(String),

    #[error("failed to fetch source: {0}")]
    Fetch(String),

    #[error("failed to decode source: {0}")]
    Decode(String),

    #[error("no source loaded")]
    NotLoaded,

    #[error("audio thread is gone")]
    Disconnected,
}
