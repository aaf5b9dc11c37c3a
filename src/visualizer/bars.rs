use rand::Rng;

pub const MIN_HEIGHT: f32 = 0.1;
pub const MAX_HEIGHT: f32 = 1.0;
/// Largest per-frame change while playing.
pub const JITTER: f32 = 0.075;
/// Per-frame decay factor while stopped.
pub const DECAY: f32 = 0.95;

/// Bar magnitudes, one per visual bar, each within `[MIN_HEIGHT, MAX_HEIGHT]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bars {
    heights: Vec<f32>,
}

impl Bars {
    pub fn new<R: Rng>(count: usize, rng: &mut R) -> Self {
        Self {
            heights: (0..count).map(|_| rng.random_range(0.2..0.7)).collect(),
        }
    }

    /// Re-randomize when the bar count changes; keep the heights otherwise.
    pub fn resize<R: Rng>(&mut self, count: usize, rng: &mut R) {
        if count != self.heights.len() {
            *self = Self::new(count, rng);
        }
    }

    /// Advance one animation frame.
    pub fn step<R: Rng>(&mut self, playing: bool, rng: &mut R) {
        for h in &mut self.heights {
            *h = next_height(*h, playing, rng);
        }
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }
}

/// Playing: random walk clamped to the valid range. Stopped: decay toward the floor.
pub fn next_height<R: Rng>(h: f32, playing: bool, rng: &mut R) -> f32 {
    if playing {
        (h + rng.random_range(-JITTER..JITTER)).clamp(MIN_HEIGHT, MAX_HEIGHT)
    } else {
        (h * DECAY).max(MIN_HEIGHT)
    }
}
