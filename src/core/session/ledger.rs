//=========================================================================
// Score / Lives Ledger
//=========================================================================
//
// Plain counters for score, lives and enemies killed.
//
// The ledger does not know about session state or notifications; the
// Session gates every call and publishes the resulting values.
//
//=========================================================================

/// Score, lives and kill counters for one play session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ledger {
    score: u32,
    lives: i32,
    enemies_killed: u32,
}

impl Ledger {
    pub fn new(starting_lives: i32) -> Self {
        Self {
            score: 0,
            lives: starting_lives,
            enemies_killed: 0,
        }
    }

    /// Adds points and returns the new total (saturates at `u32::MAX`).
    pub fn add_score(&mut self, points: u32) -> u32 {
        self.score = self.score.saturating_add(points);
        self.score
    }

    /// Removes one life and returns the remaining count (may go negative).
    pub fn lose_life(&mut self) -> i32 {
        self.lives -= 1;
        self.lives
    }

    /// Counts one enemy kill and returns the new total.
    pub fn record_kill(&mut self) -> u32 {
        self.enemies_killed = self.enemies_killed.saturating_add(1);
        self.enemies_killed
    }

    /// `true` once lives have dropped to zero or below.
    pub fn is_out_of_lives(&self) -> bool {
        self.lives <= 0
    }

    pub fn reset(&mut self, starting_lives: i32) {
        *self = Self::new(starting_lives);
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> i32 {
        self.lives
    }

    pub fn enemies_killed(&self) -> u32 {
        self.enemies_killed
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
