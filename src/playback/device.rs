use std::time::Duration;

use super::types::{DeviceEvent, LoadId, PlayToken};

/// The seam between the controller and whatever actually produces sound.
///
/// Commands are fire-and-forget. Their effects come back through
/// [`PlaybackDevice::poll_event`]; in particular every `play` call is
/// eventually answered with a [`MediaEvent::PlayResolved`] carrying the same
/// token. Every event carries the [`LoadId`] of the `load` it follows, so
/// reports still in flight from a previous source can be discarded.
pub trait PlaybackDevice {
    /// Bind a new source reference and stop whatever was playing.
    fn load(&mut self, id: LoadId, source: &str);
    fn play(&mut self, token: PlayToken);
    fn pause(&mut self);
    fn seek(&mut self, position: Duration);
    /// Output gain in `[0.0, 1.0]`.
    fn set_volume(&mut self, volume: f32);
    /// Next pending event, if any. Never blocks.
    fn poll_event(&mut self) -> Option<DeviceEvent>;
}
