//=========================================================================
// Game Session
//=========================================================================
//
// Score, lives, countdown and the session state machine, owned by one
// explicitly constructed object.
//
// Architecture:
//   Session
//     ├─ config:        SessionConfig (fixed at construction)
//     ├─ state:         SessionState (+ paused flag)
//     ├─ ledger:        Ledger (score, lives, kills)
//     ├─ timer:         SessionTimer (remaining level time)
//     ├─ notifications: NotificationBus (observers)
//     └─ boundary:      Box<dyn SceneBoundary> (host requests)
//
// Every operation mutates state first and publishes afterwards, so a
// subscriber never observes a half-applied change. Invalid requests are
// silent no-ops and return `false`.
//
//=========================================================================

//=== Module Declarations =================================================

mod boundary;
mod config;
mod ledger;
mod state;
mod timer;

//=== Public API ==========================================================

pub use boundary::{HostRequest, NullBoundary, SceneBoundary};
pub use config::{ConfigError, SessionConfig};
pub use ledger::Ledger;
pub use state::{SessionState, Transition};
pub use timer::{Countdown, SessionTimer};

//=== External Dependencies ===============================================

use std::fmt;

use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::notify::{Notification, NotificationBus};
use crate::core::world::EntityTag;

//=== Session =============================================================

/// One play session.
///
/// Collaborators (player controller, menus, UI) receive `&mut Session`
/// rather than looking up a global instance.
///
/// ```
/// use aetheric_arcade::core::session::{Session, SessionConfig, SessionState};
///
/// let mut session = Session::headless(SessionConfig::default());
/// session.start();
///
/// session.lose_life();
/// session.lose_life();
/// assert_eq!(session.lives(), 1);
/// assert_eq!(session.state(), SessionState::Playing);
///
/// session.lose_life();
/// assert_eq!(session.state(), SessionState::GameOver);
///
/// session.add_score(100); // ignored after game over
/// assert_eq!(session.score(), 0);
/// ```
pub struct Session {
    config: SessionConfig,
    state: SessionState,
    paused: bool,
    ledger: Ledger,
    timer: SessionTimer,
    notifications: NotificationBus,
    boundary: Box<dyn SceneBoundary>,
}

impl Session {
    //--- Construction -----------------------------------------------------

    /// Creates a session in `MainMenu` with the given host boundary.
    ///
    /// Invalid config values are logged and replaced by defaults.
    pub fn new<B>(config: SessionConfig, boundary: B) -> Self
    where
        B: SceneBoundary + 'static,
    {
        let config = config.sanitized();

        info!(
            target: "session",
            "Session initialized (lives: {}, time limit: {}s)",
            config.starting_lives,
            config.level_time_limit
        );

        Self {
            state: SessionState::MainMenu,
            paused: false,
            ledger: Ledger::new(config.starting_lives),
            timer: SessionTimer::new(config.level_time_limit),
            notifications: NotificationBus::new(),
            boundary: Box::new(boundary),
            config,
        }
    }

    /// Creates a session whose host requests go nowhere.
    pub fn headless(config: SessionConfig) -> Self {
        Self::new(config, NullBoundary)
    }

    //--- Ledger -----------------------------------------------------------

    /// Adds `points` to the score.
    ///
    /// Publishes `ScoreChanged`. Ignored in GameOver and LevelComplete.
    pub fn add_score(&mut self, points: u32) -> bool {
        if !self.accepts_ledger_changes("add_score") {
            return false;
        }

        let total = self.ledger.add_score(points);
        debug!(target: "session", "Score increased by {}. Total: {}", points, total);

        self.notifications.publish(Notification::ScoreChanged(total));
        true
    }

    /// Removes one life, ending the game when none are left.
    ///
    /// Publishes `LivesChanged`, then (on the last life) `StateChanged`
    /// and `GameOver`.
    pub fn lose_life(&mut self) -> bool {
        if !self.accepts_ledger_changes("lose_life") {
            return false;
        }

        let lives = self.ledger.lose_life();
        info!(target: "session", "Life lost! Lives remaining: {}", lives);

        self.notifications.publish(Notification::LivesChanged(lives));

        if self.ledger.is_out_of_lives() {
            self.trigger_game_over();
        }
        true
    }

    /// Counts a kill and awards `score_per_enemy`.
    ///
    /// Publishes `EnemiesKilledChanged`, then `ScoreChanged`.
    pub fn record_enemy_killed(&mut self) -> bool {
        if !self.accepts_ledger_changes("record_enemy_killed") {
            return false;
        }

        let killed = self.ledger.record_kill();
        debug!(target: "session", "Enemy killed! Total enemies defeated: {}", killed);

        self.notifications
            .publish(Notification::EnemiesKilledChanged(killed));
        self.add_score(self.config.score_per_enemy)
    }

    /// Awards the worth of a picked-up collectible.
    pub fn collectible_picked_up(&mut self, value: u32) -> bool {
        let accepted = self.add_score(value);
        if accepted {
            debug!(target: "session", "Collectible picked up worth {} points", value);
        }
        accepted
    }

    //--- Timer ------------------------------------------------------------

    /// Advances the level countdown by one frame.
    ///
    /// Only runs while Playing. Publishes `TimeChanged`; when the clock
    /// hits zero the game ends.
    pub fn tick(&mut self, delta_seconds: f32) -> bool {
        if self.state != SessionState::Playing || self.paused {
            return false;
        }

        match self.timer.advance(delta_seconds) {
            Countdown::Running(remaining) => {
                self.notifications.publish(Notification::TimeChanged(remaining));
            }
            Countdown::Expired => {
                self.notifications.publish(Notification::TimeChanged(0.0));
                info!(target: "session", "Time's up!");
                self.trigger_game_over();
            }
        }
        true
    }

    //--- State Machine ----------------------------------------------------

    /// MainMenu, GameOver or LevelComplete → Playing.
    ///
    /// Resets the countdown and resumes host time. Counters are kept; use
    /// [`restart`](Self::restart) for a full reset. A session with no
    /// lives left starts with fresh counters, since it could not be
    /// Playing otherwise.
    pub fn start(&mut self) -> bool {
        if !self.transition(Transition::Start) {
            return false;
        }

        self.timer.reset();
        self.boundary.set_time_scale(1.0);

        if self.ledger.is_out_of_lives() {
            debug!(target: "session", "No lives left, resetting counters");
            self.ledger.reset(self.config.starting_lives);
            self.publish_snapshot();
        } else {
            self.notifications
                .publish(Notification::StateChanged(self.state));
            self.notifications
                .publish(Notification::TimeChanged(self.timer.remaining()));
        }

        info!(target: "session", "Game started!");
        true
    }

    /// Playing → Paused. Freezes host time.
    pub fn pause(&mut self) -> bool {
        if !self.transition(Transition::Pause) {
            return false;
        }

        self.boundary.set_time_scale(0.0);
        self.notifications
            .publish(Notification::StateChanged(self.state));

        info!(target: "session", "Game paused");
        true
    }

    /// Paused → Playing. Resumes host time.
    pub fn resume(&mut self) -> bool {
        if !self.transition(Transition::Resume) {
            return false;
        }

        self.boundary.set_time_scale(1.0);
        self.notifications
            .publish(Notification::StateChanged(self.state));

        info!(target: "session", "Game resumed");
        true
    }

    /// Pauses while Playing, resumes while Paused, otherwise nothing.
    pub fn toggle_pause(&mut self) -> bool {
        match self.state {
            SessionState::Playing => self.pause(),
            SessionState::Paused => self.resume(),
            _ => false,
        }
    }

    /// Any non-terminal state → GameOver. Freezes host time.
    ///
    /// Publishes `StateChanged`, then `GameOver`.
    pub fn trigger_game_over(&mut self) -> bool {
        if !self.transition(Transition::GameOver) {
            return false;
        }

        self.boundary.set_time_scale(0.0);
        self.notifications
            .publish(Notification::StateChanged(self.state));
        self.notifications.publish(Notification::GameOver);

        info!(target: "session", "GAME OVER!");
        true
    }

    /// Playing → LevelComplete.
    ///
    /// Publishes `StateChanged`, then `LevelComplete`.
    pub fn complete_level(&mut self) -> bool {
        if !self.transition(Transition::CompleteLevel) {
            return false;
        }

        self.notifications
            .publish(Notification::StateChanged(self.state));
        self.notifications.publish(Notification::LevelComplete);

        info!(target: "session", "Level completed!");
        true
    }

    /// Any state → Playing with every counter back at its starting value.
    ///
    /// Transient entities are despawned and the active scene reloaded
    /// through the boundary. The full snapshot (state, lives, score,
    /// kills, time) is published only after the reset is complete.
    pub fn restart(&mut self) -> bool {
        self.transition(Transition::Restart);

        self.ledger.reset(self.config.starting_lives);
        self.timer.reset();

        self.boundary.despawn_tagged(&EntityTag::TRANSIENT);
        self.boundary.set_time_scale(1.0);
        self.boundary.reload_active_scene();

        self.publish_snapshot();

        info!(target: "session", "Game restarted!");
        true
    }

    //--- Scene Boundary ---------------------------------------------------

    /// Asks the host to switch to the scene registered as `name`.
    pub fn load_scene(&mut self, name: &str) {
        info!(target: "session", "Loading scene '{}'", name);
        self.boundary.load_scene(name);
    }

    /// Asks the host to terminate.
    pub fn quit(&mut self) {
        info!(target: "session", "Quit requested");
        self.boundary.quit();
    }

    //--- Observers --------------------------------------------------------

    /// Observer registry. Subscribers survive `restart`.
    pub fn notifications(&mut self) -> &mut NotificationBus {
        &mut self.notifications
    }

    /// Publishes the current value of every channel, for freshly attached UI.
    pub fn publish_snapshot(&mut self) {
        let snapshot = [
            Notification::StateChanged(self.state),
            Notification::LivesChanged(self.ledger.lives()),
            Notification::ScoreChanged(self.ledger.score()),
            Notification::EnemiesKilledChanged(self.ledger.enemies_killed()),
            Notification::TimeChanged(self.timer.remaining()),
        ];

        for notification in snapshot {
            self.notifications.publish(notification);
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn score(&self) -> u32 {
        self.ledger.score()
    }

    pub fn lives(&self) -> i32 {
        self.ledger.lives()
    }

    pub fn enemies_killed(&self) -> u32 {
        self.ledger.enemies_killed()
    }

    pub fn remaining_time(&self) -> f32 {
        self.timer.remaining()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    //--- Internal Helpers -------------------------------------------------

    fn accepts_ledger_changes(&self, operation: &str) -> bool {
        if self.state.is_terminal() {
            debug!(target: "session", "Ignoring {} in {}", operation, self.state);
            return false;
        }
        true
    }

    /// Applies a state change without publishing it.
    fn transition(&mut self, request: Transition) -> bool {
        let Some(next) = self.state.resolve(request) else {
            debug!(target: "session", "Ignoring {:?} in {}", request, self.state);
            return false;
        };

        let previous = self.state;
        self.state = next;
        self.paused = next == SessionState::Paused;

        info!(target: "session", "Game state changed: {} -> {}", previous, next);
        true
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("paused", &self.paused)
            .field("score", &self.ledger.score())
            .field("lives", &self.ledger.lives())
            .field("enemies_killed", &self.ledger.enemies_killed())
            .field("remaining_time", &self.timer.remaining())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::notify::NotificationKind;
    use crossbeam_channel::{unbounded, Receiver};
    use std::sync::{Arc, Mutex};

    //--- Test Helpers -----------------------------------------------------

    fn config() -> SessionConfig {
        SessionConfig::default()
            .with_starting_lives(3)
            .with_level_time_limit(120.0)
    }

    fn playing() -> Session {
        let mut session = Session::headless(config());
        session.start();
        session
    }

    fn record_all(session: &mut Session) -> Arc<Mutex<Vec<Notification>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        session
            .notifications()
            .subscribe_all(move |n| sink.lock().unwrap().push(*n));
        log
    }

    fn with_host() -> (Session, Receiver<HostRequest>) {
        let (tx, rx) = unbounded();
        (Session::new(config(), tx), rx)
    }

    //--- Construction -----------------------------------------------------

    #[test]
    fn new_session_starts_in_main_menu() {
        let session = Session::headless(config());
        assert_eq!(session.state(), SessionState::MainMenu);
        assert_eq!(session.score(), 0);
        assert_eq!(session.lives(), 3);
        assert_eq!(session.enemies_killed(), 0);
        assert_eq!(session.remaining_time(), 120.0);
        assert!(!session.is_paused());
    }

    #[test]
    fn invalid_config_is_clamped() {
        let bad = SessionConfig::default()
            .with_starting_lives(0)
            .with_level_time_limit(-5.0);
        let session = Session::headless(bad);

        assert_eq!(session.lives(), 3);
        assert_eq!(session.remaining_time(), 120.0);
    }

    //--- Ledger -----------------------------------------------------------

    #[test]
    fn add_score_publishes_running_total() {
        let mut session = playing();
        let log = record_all(&mut session);

        for points in [10, 0, 250, 40] {
            session.add_score(points);
        }

        assert_eq!(session.score(), 300);
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                Notification::ScoreChanged(10),
                Notification::ScoreChanged(10),
                Notification::ScoreChanged(260),
                Notification::ScoreChanged(300),
            ]
        );
    }

    #[test]
    fn lose_life_until_game_over() {
        let mut session = playing();

        session.lose_life();
        session.lose_life();
        assert_eq!(session.lives(), 1);
        assert_eq!(session.state(), SessionState::Playing);

        let log = record_all(&mut session);
        session.lose_life();

        assert_eq!(session.lives(), 0);
        assert_eq!(session.state(), SessionState::GameOver);
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                Notification::LivesChanged(0),
                Notification::StateChanged(SessionState::GameOver),
                Notification::GameOver,
            ]
        );
    }

    #[test]
    fn ledger_frozen_after_game_over() {
        let mut session = playing();
        session.trigger_game_over();
        let log = record_all(&mut session);

        assert!(!session.add_score(100));
        assert!(!session.lose_life());
        assert!(!session.record_enemy_killed());

        assert_eq!(session.score(), 0);
        assert_eq!(session.lives(), 3);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn ledger_frozen_after_level_complete() {
        let mut session = playing();
        session.complete_level();

        assert!(!session.add_score(5));
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn enemy_kill_publishes_count_then_score() {
        let mut session = playing();
        let log = record_all(&mut session);

        session.record_enemy_killed();

        assert_eq!(session.enemies_killed(), 1);
        assert_eq!(session.score(), 100);
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                Notification::EnemiesKilledChanged(1),
                Notification::ScoreChanged(100),
            ]
        );
    }

    #[test]
    fn enemy_reward_follows_config() {
        let mut session = Session::headless(config().with_score_per_enemy(40));
        session.start();
        session.record_enemy_killed();
        session.record_enemy_killed();
        assert_eq!(session.score(), 80);
    }

    #[test]
    fn collectible_adds_its_value() {
        let mut session = playing();
        session.collectible_picked_up(25);
        assert_eq!(session.score(), 25);
    }

    //--- Timer ------------------------------------------------------------

    #[test]
    fn tick_counts_down_while_playing() {
        let mut session = playing();
        let log = record_all(&mut session);

        assert!(session.tick(0.5));
        assert_eq!(session.remaining_time(), 119.5);
        assert_eq!(*log.lock().unwrap(), vec![Notification::TimeChanged(119.5)]);
    }

    #[test]
    fn tick_is_noop_outside_playing() {
        let mut session = Session::headless(config());
        assert!(!session.tick(1.0), "main menu");

        session.start();
        session.pause();
        assert!(!session.tick(1.0), "paused");
        assert_eq!(session.remaining_time(), 120.0);
    }

    #[test]
    fn timer_expiry_clamps_and_ends_game() {
        let mut session = Session::headless(config().with_level_time_limit(1.0));
        session.start();

        for _ in 0..3 {
            session.tick(0.4);
        }

        assert_eq!(session.remaining_time(), 0.0);
        assert_eq!(session.state(), SessionState::GameOver);
        assert!(!session.tick(0.4), "timer frozen after game over");
    }

    //--- State Machine ----------------------------------------------------

    #[test]
    fn start_while_playing_emits_nothing() {
        let mut session = playing();
        let log = record_all(&mut session);

        assert!(!session.start());
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn start_publishes_state_then_time() {
        let mut session = Session::headless(config());
        let log = record_all(&mut session);

        session.start();

        assert_eq!(
            *log.lock().unwrap(),
            vec![
                Notification::StateChanged(SessionState::Playing),
                Notification::TimeChanged(120.0),
            ]
        );
    }

    #[test]
    fn start_after_last_life_resets_counters() {
        let mut session = Session::headless(config().with_starting_lives(1));
        session.start();
        session.add_score(250);
        session.lose_life();
        assert_eq!(session.state(), SessionState::GameOver);

        let log = record_all(&mut session);
        assert!(session.start());

        assert_eq!(session.state(), SessionState::Playing);
        assert_eq!(session.lives(), 1);
        assert_eq!(session.score(), 0);
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                Notification::StateChanged(SessionState::Playing),
                Notification::LivesChanged(1),
                Notification::ScoreChanged(0),
                Notification::EnemiesKilledChanged(0),
                Notification::TimeChanged(120.0),
            ]
        );
    }

    #[test]
    fn start_after_level_complete_keeps_counters() {
        let mut session = playing();
        session.add_score(500);
        session.complete_level();

        assert!(session.start());
        assert_eq!(session.score(), 500);
    }

    #[test]
    fn pause_and_resume_toggle_flag() {
        let mut session = playing();

        assert!(session.pause());
        assert!(session.is_paused());
        assert_eq!(session.state(), SessionState::Paused);

        assert!(session.resume());
        assert!(!session.is_paused());
        assert_eq!(session.state(), SessionState::Playing);
    }

    #[test]
    fn pause_from_main_menu_is_noop() {
        let mut session = Session::headless(config());
        let log = record_all(&mut session);

        assert!(!session.pause());
        assert!(!session.resume());
        assert_eq!(session.state(), SessionState::MainMenu);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn toggle_pause_round_trip() {
        let mut session = playing();
        session.toggle_pause();
        assert_eq!(session.state(), SessionState::Paused);
        session.toggle_pause();
        assert_eq!(session.state(), SessionState::Playing);
    }

    #[test]
    fn game_over_while_paused_clears_pause() {
        let mut session = playing();
        session.pause();
        session.trigger_game_over();

        assert_eq!(session.state(), SessionState::GameOver);
        assert!(!session.is_paused());
    }

    #[test]
    fn game_over_twice_emits_once() {
        let mut session = playing();
        let log = record_all(&mut session);

        session.trigger_game_over();
        session.trigger_game_over();

        let game_overs = log
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.kind() == NotificationKind::GameOver)
            .count();
        assert_eq!(game_overs, 1);
    }

    #[test]
    fn complete_level_only_from_playing() {
        let mut session = Session::headless(config());
        assert!(!session.complete_level());

        session.start();
        let log = record_all(&mut session);
        assert!(session.complete_level());

        assert_eq!(
            *log.lock().unwrap(),
            vec![
                Notification::StateChanged(SessionState::LevelComplete),
                Notification::LevelComplete,
            ]
        );
    }

    //--- Restart ----------------------------------------------------------

    #[test]
    fn restart_resets_everything() {
        let mut session = playing();
        session.add_score(700);
        session.record_enemy_killed();
        session.tick(30.0);
        session.lose_life();
        session.lose_life();
        session.lose_life();
        assert_eq!(session.state(), SessionState::GameOver);

        session.restart();

        assert_eq!(session.state(), SessionState::Playing);
        assert_eq!(session.score(), 0);
        assert_eq!(session.lives(), 3);
        assert_eq!(session.enemies_killed(), 0);
        assert_eq!(session.remaining_time(), 120.0);
        assert!(!session.is_paused());
    }

    #[test]
    fn restart_observers_never_see_partial_state() {
        let (mut session, _rx) = with_host();
        session.start();
        session.add_score(500);
        session.pause();

        let snapshots = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&snapshots);
        session.notifications().subscribe_all(move |n| {
            sink.lock().unwrap().push(*n);
        });

        session.restart();

        let seen = snapshots.lock().unwrap();
        assert_eq!(seen[0], Notification::StateChanged(SessionState::Playing));
        assert!(seen.contains(&Notification::ScoreChanged(0)));
        assert!(seen.contains(&Notification::LivesChanged(3)));
        assert!(seen.contains(&Notification::TimeChanged(120.0)));
        assert!(!seen.contains(&Notification::ScoreChanged(500)));
    }

    #[test]
    fn restart_from_playing_still_publishes_state() {
        let mut session = playing();
        let log = record_all(&mut session);

        session.restart();

        assert_eq!(
            log.lock().unwrap().first(),
            Some(&Notification::StateChanged(SessionState::Playing))
        );
    }

    #[test]
    fn restart_keeps_subscribers() {
        let mut session = playing();
        record_all(&mut session);
        session.restart();
        assert_eq!(
            session.notifications().subscriber_count(NotificationKind::ScoreChanged),
            1
        );
    }

    //--- Host Requests ----------------------------------------------------

    #[test]
    fn restart_requests_despawn_time_and_reload() {
        let (mut session, rx) = with_host();
        session.restart();

        let requests: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            requests,
            vec![
                HostRequest::DespawnTagged(EntityTag::TRANSIENT.to_vec()),
                HostRequest::SetTimeScale(1.0),
                HostRequest::ReloadScene,
            ]
        );
    }

    #[test]
    fn pause_and_game_over_freeze_host_time() {
        let (mut session, rx) = with_host();
        session.start();
        session.pause();
        session.resume();
        session.trigger_game_over();

        let scales: Vec<_> = rx
            .try_iter()
            .filter_map(|r| match r {
                HostRequest::SetTimeScale(s) => Some(s),
                _ => None,
            })
            .collect();
        assert_eq!(scales, vec![1.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn rejected_transitions_send_no_requests() {
        let (mut session, rx) = with_host();
        session.pause();
        session.resume();
        session.complete_level();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn scene_passthroughs_reach_host() {
        let (mut session, rx) = with_host();
        session.load_scene("Example");
        session.quit();

        assert_eq!(rx.try_recv(), Ok(HostRequest::LoadScene("Example".into())));
        assert_eq!(rx.try_recv(), Ok(HostRequest::Quit));
    }
}
