use std::time::Duration;

use tracing::{debug, warn};

use crate::catalog::Track;

use super::device::PlaybackDevice;
use super::error::PlaybackError;
use super::types::{DeviceEvent, LoadId, MediaEvent, PlayToken, PlaybackState};

/// Owns one playback device and the state derived from it.
///
/// All methods run on the UI thread. `play` is the only asynchronous
/// operation: it records a pending token and the device answers later via
/// [`MediaEvent::PlayResolved`], which [`PlaybackController::tick`] applies.
pub struct PlaybackController<D: PlaybackDevice> {
    device: D,
    state: PlaybackState,
    source: Option<String>,
    load: LoadId,
    next_token: u64,
    pending_play: Option<PlayToken>,
    last_error: Option<PlaybackError>,
}

impl<D: PlaybackDevice> PlaybackController<D> {
    pub fn new(mut device: D, initial_volume: u8) -> Self {
        let state = PlaybackState::new(initial_volume);
        device.set_volume(state.effective_volume());
        Self {
            device,
            state,
            source: None,
            load: LoadId::default(),
            next_token: 0,
            pending_play: None,
            last_error: None,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    pub fn current_time(&self) -> f64 {
        self.state.current_time
    }

    pub fn duration(&self) -> f64 {
        self.state.duration
    }

    pub fn volume(&self) -> u8 {
        self.state.volume
    }

    pub fn is_muted(&self) -> bool {
        self.state.is_muted
    }

    pub fn effective_volume(&self) -> f32 {
        self.state.effective_volume()
    }

    /// Reason the most recent `play` request failed, cleared by the next
    /// successful start or a new `load`.
    pub fn last_error(&self) -> Option<&PlaybackError> {
        self.last_error.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.source.is_some()
    }

    pub fn is_play_pending(&self) -> bool {
        self.pending_play.is_some()
    }

    #[cfg(test)]
    pub(crate) fn device(&self) -> &D {
        &self.device
    }

    #[cfg(test)]
    pub(crate) fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Bind `track`'s audio source. Tracks without one are ignored and the
    /// controller keeps whatever it had.
    pub fn load(&mut self, track: &Track) {
        let Some(source) = track.audio_url.as_deref().filter(|s| !s.trim().is_empty()) else {
            debug!(id = %track.id, "track has no audio source; ignoring load");
            return;
        };

        self.load = LoadId(self.load.0 + 1);
        self.device.load(self.load, source);
        self.source = Some(source.to_string());
        self.pending_play = None;
        self.last_error = None;
        self.state.is_playing = false;
        self.state.current_time = 0.0;
        // Provisional until the device reports metadata.
        self.state.duration = f64::from(track.duration);
    }

    /// Ask the device to start. The outcome arrives asynchronously.
    pub fn play(&mut self) {
        if self.state.is_playing {
            return;
        }
        if self.source.is_none() {
            warn!("play requested with nothing loaded");
            self.last_error = Some(PlaybackError::NotLoaded);
            return;
        }

        self.next_token += 1;
        let token = PlayToken(self.next_token);
        self.pending_play = Some(token);
        self.device.play(token);
    }

    pub fn pause(&mut self) {
        self.pending_play = None;
        self.device.pause();
        self.state.is_playing = false;
    }

    pub fn toggle_play_pause(&mut self) {
        if self.state.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Jump to `t` seconds. The displayed position changes immediately,
    /// without waiting for the device.
    pub fn seek(&mut self, t: f64) {
        let t = self.state.clamp_time(t);
        self.device
            .seek(Duration::try_from_secs_f64(t).unwrap_or_default());
        self.state.current_time = t;
    }

    /// Relative seek used by the scrub keys.
    pub fn seek_by(&mut self, delta: f64) {
        self.seek(self.state.current_time + delta);
    }

    pub fn change_volume(&mut self, volume: u8) {
        self.state.volume = volume.min(100);
        if volume > 0 {
            self.state.is_muted = false;
        }
        self.device.set_volume(self.state.effective_volume());
    }

    pub fn toggle_mute(&mut self) {
        self.state.is_muted = !self.state.is_muted;
        self.device.set_volume(self.state.effective_volume());
    }

    /// Apply one device notification.
    pub fn handle_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::TimeUpdate(t) => {
                self.state.current_time = self.state.clamp_time(t);
            }
            MediaEvent::MetadataReady(d) => {
                if d.is_finite() && d > 0.0 {
                    self.state.duration = d;
                    self.state.current_time = self.state.clamp_time(self.state.current_time);
                }
            }
            MediaEvent::Ended => {
                self.pending_play = None;
                self.state.is_playing = false;
                self.state.current_time = 0.0;
            }
            MediaEvent::PlayResolved { token, result } => {
                if self.pending_play != Some(token) {
                    debug!(?token, "ignoring superseded play result");
                    return;
                }
                self.pending_play = None;
                match result {
                    Ok(()) => {
                        self.state.is_playing = true;
                        self.last_error = None;
                    }
                    Err(e) => {
                        warn!(error = %e, "playback failed to start");
                        self.last_error = Some(e);
                    }
                }
            }
        }
    }

    /// Drain and apply everything the device reported since the last call.
    /// Reports about an earlier load are dropped.
    pub fn tick(&mut self) {
        while let Some(DeviceEvent { load, event }) = self.device.poll_event() {
            if load != self.load {
                debug!(?load, current = ?self.load, ?event, "dropping event from previous load");
                continue;
            }
            self.handle_event(event);
        }
    }
}
