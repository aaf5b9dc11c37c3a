//! Bar visualizer: randomly animated bars that settle when playback stops.
//!
//! The frame loop is a [`FrameTicker`] owned by the visualizer while it is
//! mounted. Mounting, unmounting and reconfiguring always tear the previous
//! ticker down first, so at most one loop feeds the visualizer.

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

mod bars;
mod surface;
mod ticker;

pub use bars::{Bars, DECAY, JITTER, MAX_HEIGHT, MIN_HEIGHT, next_height};
pub use surface::{BarRect, BarsWidget, GAP_RATIO, HEIGHT_SCALE, Surface, layout};
pub use ticker::{FrameTick, FrameTicker};

pub struct Visualizer {
    bars: Bars,
    rng: StdRng,
    fps: u32,
    ticker: Option<FrameTicker>,
    frame_tx: Sender<FrameTick>,
    frames: Receiver<FrameTick>,
}

impl Visualizer {
    pub fn new(bar_count: usize, fps: u32) -> Self {
        Self::with_rng(bar_count, fps, StdRng::from_os_rng())
    }

    #[cfg(test)]
    pub(crate) fn with_seed(bar_count: usize, fps: u32, seed: u64) -> Self {
        Self::with_rng(bar_count, fps, StdRng::seed_from_u64(seed))
    }

    fn with_rng(bar_count: usize, fps: u32, mut rng: StdRng) -> Self {
        let (frame_tx, frames) = mpsc::channel();
        Self {
            bars: Bars::new(bar_count, &mut rng),
            rng,
            fps: fps.max(1),
            ticker: None,
            frame_tx,
            frames,
        }
    }

    fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps))
    }

    /// Start the frame loop. Restarts it if one is already running.
    pub fn mount(&mut self) {
        self.unmount();
        self.ticker = Some(FrameTicker::start(
            self.frame_interval(),
            self.frame_tx.clone(),
        ));
        debug!(fps = self.fps, bars = self.bars.len(), "visualizer mounted");
    }

    /// Stop the frame loop and discard ticks it already queued.
    pub fn unmount(&mut self) {
        if let Some(mut t) = self.ticker.take() {
            t.stop();
            debug!("visualizer unmounted");
        }
        while self.frames.try_recv().is_ok() {}
    }

    pub fn is_mounted(&self) -> bool {
        self.ticker.as_ref().is_some_and(FrameTicker::is_running)
    }

    /// Change bar count or frame rate. A new bar count re-randomizes the
    /// bars; a mounted loop is restarted with the new rate.
    pub fn configure(&mut self, bar_count: usize, fps: u32) {
        self.bars.resize(bar_count, &mut self.rng);
        self.fps = fps.max(1);
        if self.ticker.is_some() {
            self.mount();
        }
    }

    /// Consume pending frame ticks and advance at most one frame.
    /// Returns whether a frame was advanced.
    pub fn pump(&mut self, playing: bool) -> bool {
        let mut due = false;
        while self.frames.try_recv().is_ok() {
            due = true;
        }
        if due {
            self.advance(playing);
        }
        due
    }

    /// Advance exactly one frame.
    pub fn advance(&mut self, playing: bool) {
        self.bars.step(playing, &mut self.rng);
    }

    pub fn heights(&self) -> &[f32] {
        self.bars.heights()
    }

    pub fn bar_count(&self) -> usize {
        self.bars.len()
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}
