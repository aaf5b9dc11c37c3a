use std::io::Cursor;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use tracing::{debug, info, warn};

use super::error::PlaybackError;
use super::source::fetch;
use super::types::{DeviceEvent, LoadId, MediaEvent, PlayToken};

#[derive(Debug)]
pub(super) enum DeviceCmd {
    Load(LoadId, String),
    /// Sent by a fetch worker once the bytes for a load are in memory.
    Fetched(LoadId, Result<Arc<[u8]>, PlaybackError>),
    Play(PlayToken),
    Pause,
    Seek(Duration),
    SetVolume(f32),
    Quit,
}

#[derive(Debug)]
enum Media {
    Fetching,
    Ready(Arc<[u8]>),
    Failed(PlaybackError),
}

struct AudioThread {
    stream: Result<OutputStream, PlaybackError>,
    // Handed to fetch workers so their results arrive as commands.
    cmds: Sender<DeviceCmd>,
    events: Sender<DeviceEvent>,
    load: LoadId,
    media: Option<Media>,
    // Play request waiting for the fetch to finish.
    deferred_play: Option<PlayToken>,
    sink: Option<Sink>,
    // Position the current sink started from; sink.get_pos() counts from here.
    offset: Duration,
    volume: f32,
    playing: bool,
}

/// Run the audio thread. `cmds` must feed `rx`; fetch workers use it to
/// report back. The thread only stops on [`DeviceCmd::Quit`].
pub(super) fn spawn_audio_thread(
    rx: Receiver<DeviceCmd>,
    cmds: Sender<DeviceCmd>,
    events: Sender<DeviceEvent>,
    time_update: Duration,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = OutputStreamBuilder::open_default_stream()
            .map(|mut s| {
                // rodio logs to stderr when the stream is dropped, which would
                // scribble over the TUI.
                s.log_on_drop(false);
                s
            })
            .map_err(|e| {
                warn!(error = %e, "no audio output device; playback will be rejected");
                PlaybackError::Device(e.to_string())
            });

        let mut audio = AudioThread {
            stream,
            cmds,
            events,
            load: LoadId::default(),
            media: None,
            deferred_play: None,
            sink: None,
            offset: Duration::ZERO,
            volume: 1.0,
            playing: false,
        };

        let mut last_report = Instant::now();
        loop {
            match rx.recv_timeout(time_update) {
                Ok(DeviceCmd::Quit) | Err(RecvTimeoutError::Disconnected) => break,
                Ok(cmd) => audio.handle(cmd),
                Err(RecvTimeoutError::Timeout) => {}
            }

            if last_report.elapsed() >= time_update {
                audio.report_progress();
                last_report = Instant::now();
            }
        }

        if let Some(s) = audio.sink.take() {
            s.stop();
        }
        debug!("audio thread stopped");
    })
}

impl AudioThread {
    fn handle(&mut self, cmd: DeviceCmd) {
        match cmd {
            DeviceCmd::Load(id, source) => self.load(id, source),
            DeviceCmd::Fetched(id, fetched) => self.fetched(id, fetched),
            DeviceCmd::Play(token) => {
                if matches!(self.media, Some(Media::Fetching)) {
                    self.deferred_play = Some(token);
                } else {
                    self.resolve_play(token);
                }
            }
            DeviceCmd::Pause => {
                if let Some(s) = &self.sink {
                    s.pause();
                }
                self.deferred_play = None;
                self.playing = false;
            }
            DeviceCmd::Seek(position) => self.seek(position),
            DeviceCmd::SetVolume(v) => {
                self.volume = v.clamp(0.0, 1.0);
                if let Some(s) = &self.sink {
                    s.set_volume(self.volume);
                }
            }
            DeviceCmd::Quit => {}
        }
    }

    fn emit(&self, event: MediaEvent) {
        let _ = self.events.send(DeviceEvent::new(self.load, event));
    }

    fn resolve_play(&mut self, token: PlayToken) {
        let result = self.start();
        self.emit(MediaEvent::PlayResolved { token, result });
    }

    /// Stop the old source and fetch the new one on a worker thread, so
    /// commands keep flowing while a download is in progress.
    fn load(&mut self, id: LoadId, source: String) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.load = id;
        self.playing = false;
        self.offset = Duration::ZERO;
        self.deferred_play = None;
        self.media = Some(Media::Fetching);

        let cmds = self.cmds.clone();
        let spawned = thread::Builder::new()
            .name("source-fetch".into())
            .spawn(move || {
                let fetched = fetch(&source);
                match &fetched {
                    Ok(bytes) => info!(%source, bytes = bytes.len(), "source fetched"),
                    Err(e) => warn!(%source, error = %e, "source failed to load"),
                }
                // The audio thread may be gone by now.
                let _ = cmds.send(DeviceCmd::Fetched(id, fetched));
            });
        if let Err(e) = spawned {
            warn!(error = %e, "could not start fetch worker");
            self.media = Some(Media::Failed(PlaybackError::Fetch(e.to_string())));
        }
    }

    fn fetched(&mut self, id: LoadId, fetched: Result<Arc<[u8]>, PlaybackError>) {
        if id != self.load {
            debug!(?id, current = ?self.load, "discarding fetch for a replaced load");
            return;
        }

        let media = fetched.and_then(|bytes| {
            let decoder = Decoder::new(Cursor::new(bytes.clone()))
                .map_err(|e| PlaybackError::Decode(e.to_string()))?;
            if let Some(total) = decoder.total_duration() {
                self.emit(MediaEvent::MetadataReady(total.as_secs_f64()));
            }
            Ok(bytes)
        });
        self.media = Some(match media {
            Ok(bytes) => Media::Ready(bytes),
            Err(e) => Media::Failed(e),
        });

        if let Some(token) = self.deferred_play.take() {
            self.resolve_play(token);
        }
    }

    /// Build a paused sink positioned at `offset`.
    fn build_sink(&self, bytes: &Arc<[u8]>) -> Result<Sink, PlaybackError> {
        let stream = self.stream.as_ref().map_err(|e| e.clone())?;
        let source = Decoder::new(Cursor::new(bytes.clone()))
            .map_err(|e| PlaybackError::Decode(e.to_string()))?
            // Seeking works by decoding from the start and skipping ahead.
            .skip_duration(self.offset);

        let sink = Sink::connect_new(stream.mixer());
        sink.set_volume(self.volume);
        sink.append(source);
        sink.pause();
        Ok(sink)
    }

    fn start(&mut self) -> Result<(), PlaybackError> {
        let bytes = match &self.media {
            None | Some(Media::Fetching) => return Err(PlaybackError::NotLoaded),
            Some(Media::Failed(e)) => return Err(e.clone()),
            Some(Media::Ready(bytes)) => bytes.clone(),
        };

        if self.sink.as_ref().is_none_or(Sink::empty) {
            self.sink = Some(self.build_sink(&bytes)?);
        }
        if let Some(s) = &self.sink {
            s.play();
        }
        self.playing = true;
        Ok(())
    }

    fn seek(&mut self, position: Duration) {
        self.offset = position;
        let Some(Media::Ready(bytes)) = &self.media else {
            return;
        };
        let bytes = bytes.clone();
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        match self.build_sink(&bytes) {
            Ok(sink) => {
                if self.playing {
                    sink.play();
                }
                self.sink = Some(sink);
            }
            Err(e) => {
                warn!(error = %e, "seek failed");
                self.playing = false;
            }
        }
    }

    fn position(&self) -> Duration {
        self.offset + self.sink.as_ref().map_or(Duration::ZERO, Sink::get_pos)
    }

    fn report_progress(&mut self) {
        if !self.playing {
            return;
        }
        let Some(sink) = &self.sink else {
            return;
        };

        if sink.empty() {
            self.playing = false;
            self.sink = None;
            self.offset = Duration::ZERO;
            self.emit(MediaEvent::Ended);
        } else {
            self.emit(MediaEvent::TimeUpdate(self.position().as_secs_f64()));
        }
    }
}
