//=========================================================================
// Notifications
//=========================================================================
//
// Change notifications published by the session.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::session::SessionState;

//=== Notification ========================================================

/// A session change, carrying the new value where there is one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Notification {
    ScoreChanged(u32),
    LivesChanged(i32),
    EnemiesKilledChanged(u32),
    TimeChanged(f32),
    StateChanged(SessionState),
    GameOver,
    LevelComplete,
}

impl Notification {
    /// Channel this notification is delivered on.
    pub fn kind(&self) -> NotificationKind {
        match self {
            Self::ScoreChanged(_) => NotificationKind::ScoreChanged,
            Self::LivesChanged(_) => NotificationKind::LivesChanged,
            Self::EnemiesKilledChanged(_) => NotificationKind::EnemiesKilledChanged,
            Self::TimeChanged(_) => NotificationKind::TimeChanged,
            Self::StateChanged(_) => NotificationKind::StateChanged,
            Self::GameOver => NotificationKind::GameOver,
            Self::LevelComplete => NotificationKind::LevelComplete,
        }
    }
}

//=== NotificationKind ====================================================

/// Payload-free channel identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    ScoreChanged,
    LivesChanged,
    EnemiesKilledChanged,
    TimeChanged,
    StateChanged,
    GameOver,
    LevelComplete,
}

impl NotificationKind {
    pub const ALL: [NotificationKind; 7] = [
        Self::ScoreChanged,
        Self::LivesChanged,
        Self::EnemiesKilledChanged,
        Self::TimeChanged,
        Self::StateChanged,
        Self::GameOver,
        Self::LevelComplete,
    ];
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(Notification::ScoreChanged(5).kind(), NotificationKind::ScoreChanged);
        assert_eq!(Notification::TimeChanged(1.0).kind(), NotificationKind::TimeChanged);
        assert_eq!(
            Notification::StateChanged(SessionState::Paused).kind(),
            NotificationKind::StateChanged
        );
        assert_eq!(Notification::GameOver.kind(), NotificationKind::GameOver);
    }

    #[test]
    fn all_kinds_are_distinct() {
        let set: std::collections::HashSet<_> = NotificationKind::ALL.iter().collect();
        assert_eq!(set.len(), NotificationKind::ALL.len());
    }
}
