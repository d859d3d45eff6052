//=========================================================================
// Game Clock
//=========================================================================
//
// Scaled game time. The host time scale (0 while paused or after game
// over, 1 otherwise) multiplies every frame delta before gameplay sees it.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};

//=== GameClock ===========================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameClock {
    time_scale: f32,
    elapsed: f32,
    unscaled_elapsed: f32,
    frame: u64,
}

impl GameClock {
    pub fn new() -> Self {
        Self {
            time_scale: 1.0,
            elapsed: 0.0,
            unscaled_elapsed: 0.0,
            frame: 0,
        }
    }

    /// Advances by one frame of real time. Returns the scaled delta.
    pub fn advance(&mut self, delta_seconds: f32) -> f32 {
        let real = if delta_seconds.is_finite() {
            delta_seconds.max(0.0)
        } else {
            0.0
        };
        let scaled = real * self.time_scale;

        self.unscaled_elapsed += real;
        self.elapsed += scaled;
        self.frame += 1;
        scaled
    }

    /// Negative or non-finite scales are rejected and freeze time instead.
    pub fn set_time_scale(&mut self, scale: f32) {
        let scale = if scale.is_finite() && scale >= 0.0 {
            scale
        } else {
            warn!("Invalid time scale {}, using 0", scale);
            0.0
        };

        if scale != self.time_scale {
            debug!("Time scale: {} -> {}", self.time_scale, scale);
            self.time_scale = scale;
        }
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Scaled seconds since the clock started.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn unscaled_elapsed(&self) -> f32 {
        self.unscaled_elapsed
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_multiplies_delta() {
        let mut clock = GameClock::new();
        assert_eq!(clock.advance(0.5), 0.5);

        clock.set_time_scale(0.0);
        assert_eq!(clock.advance(0.5), 0.0);

        assert_eq!(clock.elapsed(), 0.5);
        assert_eq!(clock.unscaled_elapsed(), 1.0);
        assert_eq!(clock.frame(), 2);
    }

    #[test]
    fn invalid_inputs_are_neutralized() {
        let mut clock = GameClock::new();
        clock.set_time_scale(f32::NAN);
        assert_eq!(clock.time_scale(), 0.0);

        clock.set_time_scale(1.0);
        assert_eq!(clock.advance(-3.0), 0.0);
        assert_eq!(clock.advance(f32::INFINITY), 0.0);
    }
}
