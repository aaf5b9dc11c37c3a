//! Playback: the controller state machine and the devices it drives.
//!
//! `PlaybackController` holds the player-bar state and turns user actions
//! into device commands. Devices report back through `MediaEvent`s, which the
//! controller applies on the UI thread. `RodioDevice` is the real device; it
//! decodes sources with rodio on a dedicated audio thread.

mod controller;
mod device;
mod error;
mod player;
mod source;
mod thread;
mod types;

pub use controller::PlaybackController;
pub use device::PlaybackDevice;
pub use error::PlaybackError;
pub use player::RodioDevice;
pub use types::{DeviceEvent, LoadId, MediaEvent, PlayToken, PlaybackState};

#[cfg(test)]
mod tests;
