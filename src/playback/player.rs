use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use super::device::PlaybackDevice;
use super::error::PlaybackError;
use super::thread::{DeviceCmd, spawn_audio_thread};
use super::types::{DeviceEvent, LoadId, MediaEvent, PlayToken};

/// Playback device backed by `rodio`, running on its own audio thread.
///
/// Dropping the device stops the thread and waits for it, so no callbacks
/// outlive the player. Downloads run on detached fetch workers and never
/// delay shutdown.
pub struct RodioDevice {
    tx: Sender<DeviceCmd>,
    events: Receiver<DeviceEvent>,
    // Events synthesized locally when the audio thread is unreachable.
    backlog: VecDeque<DeviceEvent>,
    load: LoadId,
    join: Option<JoinHandle<()>>,
}

impl RodioDevice {
    /// Spawn the audio thread; `time_update` is the position report interval.
    pub fn spawn(time_update: Duration) -> Self {
        let (tx, rx) = mpsc::channel::<DeviceCmd>();
        let (event_tx, events) = mpsc::channel::<DeviceEvent>();
        let join = spawn_audio_thread(
            rx,
            tx.clone(),
            event_tx,
            time_update.max(Duration::from_millis(10)),
        );

        Self {
            tx,
            events,
            backlog: VecDeque::new(),
            load: LoadId::default(),
            join: Some(join),
        }
    }

    fn send(&self, cmd: DeviceCmd) -> Result<(), mpsc::SendError<DeviceCmd>> {
        self.tx.send(cmd)
    }
}

impl PlaybackDevice for RodioDevice {
    fn load(&mut self, id: LoadId, source: &str) {
        self.load = id;
        let _ = self.send(DeviceCmd::Load(id, source.to_string()));
    }

    fn play(&mut self, token: PlayToken) {
        if self.send(DeviceCmd::Play(token)).is_err() {
            self.backlog.push_back(DeviceEvent::new(
                self.load,
                MediaEvent::PlayResolved {
                    token,
                    result: Err(PlaybackError::Disconnected),
                },
            ));
        }
    }

    fn pause(&mut self) {
        let _ = self.send(DeviceCmd::Pause);
    }

    fn seek(&mut self, position: Duration) {
        let _ = self.send(DeviceCmd::Seek(position));
    }

    fn set_volume(&mut self, volume: f32) {
        let _ = self.send(DeviceCmd::SetVolume(volume));
    }

    fn poll_event(&mut self) -> Option<DeviceEvent> {
        self.backlog
            .pop_front()
            .or_else(|| self.events.try_recv().ok())
    }
}

impl Drop for RodioDevice {
    fn drop(&mut self) {
        let _ = self.send(DeviceCmd::Quit);
        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }
}

#[cfg(test)]
mod tests;
