use std::collections::VecDeque;

// Longest step the walker is allowed to take in one frame. Stalls (window
// drags, breakpoints) would otherwise teleport it through walls.
pub const MAX_STEP: f32 = 1.0 / 20.0;

/// Frame timing for the walk: a clamped movement step per frame, the
/// frame rate over a sliding window, and the time since the walk began.
#[derive(Debug)]
pub struct FrameClock {
    recent: VecDeque<f32>,
    window: usize,
    elapsed: f64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(60)
    }
}

impl FrameClock {
    pub fn new(window: usize) -> Self {
        Self {
            recent: VecDeque::with_capacity(window),
            window: window.max(1),
            elapsed: 0.0,
        }
    }

    /// Records a frame of `dt` seconds and returns the step to simulate.
    pub fn tick(&mut self, dt: f32) -> f32 {
        let dt = dt.max(0.0);
        if self.recent.len() == self.window {
            self.recent.pop_front();
        }
        self.recent.push_back(dt);
        self.elapsed += f64::from(dt);

        dt.min(MAX_STEP)
    }

    /// Frames per second over the window, 0 before any time has passed.
    pub fn rate(&self) -> f32 {
        let total: f32 = self.recent.iter().sum();
        if total > 0.0 {
            self.recent.len() as f32 / total
        } else {
            0.0
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}
