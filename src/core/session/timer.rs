//=========================================================================
// Session Timer
//=========================================================================
//
// Countdown of the level time budget. Advanced once per logic tick.
//
//=========================================================================

/// Result of advancing the countdown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Countdown {
    /// Time is left on the clock.
    Running(f32),

    /// The clock reached zero on this advance.
    Expired,
}

/// Remaining time in the current level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionTimer {
    limit: f32,
    remaining: f32,
}

impl SessionTimer {
    pub fn new(limit: f32) -> Self {
        Self {
            limit,
            remaining: limit,
        }
    }

    /// Subtracts `delta_seconds`, clamping at zero.
    ///
    /// Negative and non-finite deltas count as zero.
    pub fn advance(&mut self, delta_seconds: f32) -> Countdown {
        let delta = if delta_seconds.is_finite() {
            delta_seconds.max(0.0)
        } else {
            0.0
        };

        self.remaining -= delta;

        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            Countdown::Expired
        } else {
            Countdown::Running(self.remaining)
        }
    }

    pub fn reset(&mut self) {
        self.remaining = self.limit;
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn limit(&self) -> f32 {
        self.limit
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down() {
        let mut timer = SessionTimer::new(10.0);
        assert_eq!(timer.advance(2.5), Countdown::Running(7.5));
        assert_eq!(timer.remaining(), 7.5);
    }

    #[test]
    fn clamps_to_zero_on_expiry() {
        let mut timer = SessionTimer::new(1.0);
        assert_eq!(timer.advance(5.0), Countdown::Expired);
        assert_eq!(timer.remaining(), 0.0);
    }

    #[test]
    fn exact_zero_expires() {
        let mut timer = SessionTimer::new(1.0);
        assert_eq!(timer.advance(0.5), Countdown::Running(0.5));
        assert_eq!(timer.advance(0.5), Countdown::Expired);
        assert_eq!(timer.remaining(), 0.0);
    }

    #[test]
    fn bad_deltas_are_ignored() {
        let mut timer = SessionTimer::new(3.0);
        timer.advance(-1.0);
        timer.advance(f32::NAN);
        timer.advance(f32::INFINITY);
        assert_eq!(timer.remaining(), 3.0);
    }

    #[test]
    fn reset_restores_limit() {
        let mut timer = SessionTimer::new(3.0);
        timer.advance(2.0);
        timer.reset();
        assert_eq!(timer.remaining(), timer.limit());
    }
}
