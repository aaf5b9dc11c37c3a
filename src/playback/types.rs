//! Playback state and the events a playback device reports.

use super::error::PlaybackError;

/// Snapshot of what the player bar shows.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub is_playing: bool,
    /// Position in seconds, kept within `[0, duration]`.
    pub current_time: f64,
    /// Track length in seconds; `0.0` while unknown.
    pub duration: f64,
    /// User volume, 0-100.
    pub volume: u8,
    pub is_muted: bool,
}

impl PlaybackState {
    pub fn new(volume: u8) -> Self {
        Self {
            is_playing: false,
            current_time: 0.0,
            duration: 0.0,
            volume: volume.min(100),
            is_muted: false,
        }
    }

    /// Gain sent to the device: 0 while muted, otherwise `volume / 100`.
    pub fn effective_volume(&self) -> f32 {
        if self.is_muted {
            0.0
        } else {
            f32::from(self.volume) / 100.0
        }
    }

    /// Clamp a position into `[0, duration]`. Only the lower bound applies
    /// while the duration is still unknown.
    pub fn clamp_time(&self, t: f64) -> f64 {
        let t = t.max(0.0);
        if self.duration > 0.0 { t.min(self.duration) } else { t }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(70)
    }
}

/// Identifies one `play` request so its late resolution can be matched.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PlayToken(pub u64);

/// Identifies one `load` so events about an earlier source can be told apart.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct LoadId(pub u64);

/// Notifications from the playback device, applied in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Periodic position report, in seconds.
    TimeUpdate(f64),
    /// The source was decoded far enough to know its length, in seconds.
    MetadataReady(f64),
    /// The source played to its end.
    Ended,
    /// Outcome of a `play` request.
    PlayResolved {
        token: PlayToken,
        result: Result<(), PlaybackError>,
    },
}

/// A [`MediaEvent`] stamped with the load it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceEvent {
    pub load: LoadId,
    pub event: MediaEvent,
}

impl DeviceEvent {
    pub fn new(load: LoadId, event: MediaEvent) -> Self {
        Self { load, event }
    }
}
