//=========================================================================
// Session Configuration
//=========================================================================
//
// Construction-time settings for a game session.
//
// Values are fixed for the lifetime of a Session. Invalid values are
// never fatal: `sanitized()` logs a warning and falls back to defaults.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use log::warn;

//=== Defaults ============================================================

const DEFAULT_STARTING_LIVES: i32 = 3;
const DEFAULT_SCORE_PER_ENEMY: u32 = 100;
const DEFAULT_SCORE_PER_COIN: u32 = 100;
const DEFAULT_LEVEL_TIME_LIMIT: f32 = 120.0;

//=== ConfigError =========================================================

/// A configuration value outside its valid range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// `starting_lives` must be greater than zero.
    NonPositiveLives(i32),

    /// `level_time_limit` must be finite and greater than zero.
    InvalidTimeLimit(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveLives(v) => {
                write!(f, "starting lives should be greater than 0, got {}", v)
            }
            Self::InvalidTimeLimit(v) => {
                write!(f, "level time limit should be greater than 0, got {}", v)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

//=== SessionConfig =======================================================

/// Session tuning values.
///
/// # Default Values
///
/// - **starting_lives**: 3
/// - **score_per_enemy**: 100
/// - **score_per_coin**: 100
/// - **level_time_limit**: 120.0 seconds
/// - **debug_mode**: off (F1 adds 1000 points, F2 costs a life)
///
/// ```
/// use aetheric_arcade::core::session::SessionConfig;
///
/// let config = SessionConfig::default()
///     .with_starting_lives(5)
///     .with_level_time_limit(90.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub starting_lives: i32,
    pub score_per_enemy: u32,
    pub score_per_coin: u32,
    pub level_time_limit: f32,
    pub debug_mode: bool,
}

impl SessionConfig {
    pub fn with_starting_lives(mut self, lives: i32) -> Self {
        self.starting_lives = lives;
        self
    }

    pub fn with_score_per_enemy(mut self, points: u32) -> Self {
        self.score_per_enemy = points;
        self
    }

    pub fn with_score_per_coin(mut self, points: u32) -> Self {
        self.score_per_coin = points;
        self
    }

    pub fn with_level_time_limit(mut self, seconds: f32) -> Self {
        self.level_time_limit = seconds;
        self
    }

    pub fn with_debug_mode(mut self, enabled: bool) -> Self {
        self.debug_mode = enabled;
        self
    }

    //--- Validation -------------------------------------------------------

    /// Checks every field, reporting the first invalid one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starting_lives <= 0 {
            return Err(ConfigError::NonPositiveLives(self.starting_lives));
        }
        if !self.level_time_limit.is_finite() || self.level_time_limit <= 0.0 {
            return Err(ConfigError::InvalidTimeLimit(self.level_time_limit));
        }
        Ok(())
    }

    /// Returns a copy with invalid fields replaced by their defaults.
    ///
    /// Each replacement is logged as a warning.
    pub fn sanitized(mut self) -> Self {
        if self.starting_lives <= 0 {
            warn!(
                target: "session",
                "{}; using {}",
                ConfigError::NonPositiveLives(self.starting_lives),
                DEFAULT_STARTING_LIVES
            );
            self.starting_lives = DEFAULT_STARTING_LIVES;
        }

        if !self.level_time_limit.is_finite() || self.level_time_limit <= 0.0 {
            warn!(
                target: "session",
                "{}; using {}",
                ConfigError::InvalidTimeLimit(self.level_time_limit),
                DEFAULT_LEVEL_TIME_LIMIT
            );
            self.level_time_limit = DEFAULT_LEVEL_TIME_LIMIT;
        }

        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            starting_lives: DEFAULT_STARTING_LIVES,
            score_per_enemy: DEFAULT_SCORE_PER_ENEMY,
            score_per_coin: DEFAULT_SCORE_PER_COIN,
            level_time_limit: DEFAULT_LEVEL_TIME_LIMIT,
            debug_mode: false,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SessionConfig::default();
        assert_eq!(config.starting_lives, 3);
        assert_eq!(config.score_per_enemy, 100);
        assert_eq!(config.level_time_limit, 120.0);
        assert!(!config.debug_mode);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_setters_chain() {
        let config = SessionConfig::default()
            .with_starting_lives(7)
            .with_score_per_enemy(250)
            .with_score_per_coin(10)
            .with_level_time_limit(30.0)
            .with_debug_mode(true);

        assert_eq!(config.starting_lives, 7);
        assert_eq!(config.score_per_enemy, 250);
        assert_eq!(config.score_per_coin, 10);
        assert_eq!(config.level_time_limit, 30.0);
        assert!(config.debug_mode);
    }

    #[test]
    fn validate_rejects_non_positive_lives() {
        let config = SessionConfig::default().with_starting_lives(0);
        assert_eq!(config.validate(), Err(ConfigError::NonPositiveLives(0)));
    }

    #[test]
    fn validate_rejects_bad_time_limit() {
        let config = SessionConfig::default().with_level_time_limit(-1.0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidTimeLimit(-1.0)));

        let config = SessionConfig::default().with_level_time_limit(f32::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn sanitized_clamps_to_defaults() {
        let config = SessionConfig::default()
            .with_starting_lives(-2)
            .with_level_time_limit(0.0)
            .with_score_per_enemy(50)
            .sanitized();

        assert_eq!(config.starting_lives, DEFAULT_STARTING_LIVES);
        assert_eq!(config.level_time_limit, DEFAULT_LEVEL_TIME_LIMIT);
        assert_eq!(config.score_per_enemy, 50, "valid fields are kept");
    }

    #[test]
    fn config_error_display() {
        let msg = ConfigError::NonPositiveLives(0).to_string();
        assert!(msg.contains("greater than 0"));
    }
}
