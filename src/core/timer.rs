/// One-shot countdown driven by frame deltas
///
/// Inactive until [`Countdown::start`]; fires exactly once when the
/// accumulated delta reaches the duration.
#[derive(Debug, Clone, Copy)]
pub struct Countdown {
    duration: f32,
    elapsed: f32,
    active: bool,
}

impl Countdown {
    /// Create inactive countdown of `duration` seconds
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            elapsed: 0.0,
            active: false,
        }
    }

    /// Start (or restart) the countdown
    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.active = true;
    }

    /// Stop without firing
    pub fn cancel(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Tick with delta in seconds, returns true on the tick that completes it
    pub fn tick(&mut self, delta: f32) -> bool {
        if !self.active {
            return false;
        }

        self.elapsed += delta;

        if self.elapsed >= self.duration {
            self.active = false;
            true
        } else {
            false
        }
    }

    /// Seconds left, zero once finished
    pub fn remaining(&self) -> f32 {
        (self.duration - self.elapsed).max(0.0)
    }

    /// Progress in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_fires_once() {
        let mut timer = Countdown::new(1.0);

        assert!(!timer.tick(0.5)); // inactive

        timer.start();
        assert!(!timer.tick(0.5));
        assert_eq!(timer.progress(), 0.5);
        assert_eq!(timer.remaining(), 0.5);

        assert!(timer.tick(0.6));
        assert!(!timer.tick(0.1));
        assert!(!timer.is_active());
    }

    #[test]
    fn countdown_cancel_never_fires() {
        let mut timer = Countdown::new(0.2);
        timer.start();
        timer.cancel();
        assert!(!timer.tick(1.0));
    }

    #[test]
    fn countdown_restart_resets_elapsed() {
        let mut timer = Countdown::new(1.0);
        timer.start();
        timer.tick(0.9);
        timer.start();
        assert!(!timer.tick(0.5));
        assert!(timer.tick(0.5));
    }
}
