use std::time::Instant;

/// Wall-clock source of frame deltas for the window loop
#[derive(Debug)]
pub struct Clock {
    last_tick: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
        }
    }

    /// Delta in seconds since the last tick, then advance
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        delta
    }

    /// Restart timing, e.g. once the window exists
    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

/// Averages frames over a reporting window
#[derive(Debug, Clone, Copy)]
pub struct FpsCounter {
    window: f32,
    frames: u32,
    elapsed: f32,
}

impl FpsCounter {
    /// Report once every `window` seconds
    pub fn new(window: f32) -> Self {
        Self {
            window,
            frames: 0,
            elapsed: 0.0,
        }
    }

    /// Count one frame; returns the average rate when a window closes
    pub fn frame(&mut self, delta: f32) -> Option<f32> {
        self.frames += 1;
        self.elapsed += delta;

        if self.elapsed < self.window {
            return None;
        }

        let fps = self.frames as f32 / self.elapsed;
        self.frames = 0;
        self.elapsed = 0.0;
        Some(fps)
    }
}
