//=========================================================================
// Arcade Shooter
//=========================================================================
//
// Gameplay built on the core systems: actions and bindings, the player
// and menu controllers, the two scenes and the per-tick game loop.
//
// Architecture:
//   GameLoop
//     ├─ Session (score, lives, timer, state)
//     ├─ InputSystem<GameAction>
//     ├─ SceneDirector
//     │    ├─ "StartMenu" → MenuScene (MenuController)
//     │    └─ "Example"   → LevelScene (PlayerController, MenuController)
//     └─ HostRequest receiver (session → world / director / clock)
//
//=========================================================================

//=== Module Declarations =================================================

pub mod game_loop;
pub mod menu;
pub mod player;
pub mod scenes;

//=== Public API ==========================================================

pub use game_loop::GameLoop;
pub use menu::MenuController;
pub use player::{PlayerController, PlayerSettings};
pub use scenes::{LevelScene, MenuScene};

//=== Internal Dependencies ===============================================

use crate::core::input::{Action, InputContext, InputSystem, KeyCode, MouseButton};

//=== Scene Names =========================================================

/// Title screen, active at startup.
pub const MENU_SCENE: &str = "StartMenu";

/// Gameplay scene loaded by the Start button.
pub const DEFAULT_MAIN_SCENE: &str = "Example";

//=== Input Contexts ======================================================

pub const GAMEPLAY: InputContext = InputContext::Primary;
pub const MENU: InputContext = InputContext::custom(0);

//=== GameAction ==========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Fire,
    Pause,
    Restart,

    /// Title screen: start the game.
    Confirm,

    /// Title screen: leave the application.
    Exit,

    /// Adds 1000 points when debug mode is on.
    DebugAddScore,

    /// Costs a life when debug mode is on.
    DebugLoseLife,
}

impl Action for GameAction {}

/// Installs the default keyboard and mouse layout.
///
/// Gameplay: WASD / arrows move, Space or left mouse fires, Escape or P
/// pauses, R restarts after the game ends, F1/F2 are debug keys.
/// Menu: Enter starts, Escape exits.
pub fn bind_default_controls(input: &mut InputSystem<GameAction>) {
    use GameAction::*;

    let gameplay_keys = [
        (KeyCode::KeyA, MoveLeft),
        (KeyCode::ArrowLeft, MoveLeft),
        (KeyCode::KeyD, MoveRight),
        (KeyCode::ArrowRight, MoveRight),
        (KeyCode::KeyW, MoveUp),
        (KeyCode::ArrowUp, MoveUp),
        (KeyCode::KeyS, MoveDown),
        (KeyCode::ArrowDown, MoveDown),
        (KeyCode::Space, Fire),
        (KeyCode::Escape, Pause),
        (KeyCode::KeyP, Pause),
        (KeyCode::KeyR, Restart),
        (KeyCode::F1, DebugAddScore),
        (KeyCode::F2, DebugLoseLife),
    ];

    for (key, action) in gameplay_keys {
        input.bind_key(key, action, GAMEPLAY);
    }
    input.bind_mouse(MouseButton::Left, Fire, GAMEPLAY);

    input.bind_key(KeyCode::Enter, Confirm, MENU);
    input.bind_key(KeyCode::Escape, Exit, MENU);
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::InputEvent;

    #[test]
    fn escape_means_pause_in_game_and_exit_in_menu() {
        let mut input = InputSystem::new();
        bind_default_controls(&mut input);

        input.process_frame(&[vec![InputEvent::key_down(KeyCode::Escape)]]);
        assert!(input.is_action_pressed(GameAction::Pause));

        input.set_context(MENU);
        input.process_frame(&[vec![
            InputEvent::key_up(KeyCode::Escape),
            InputEvent::key_down(KeyCode::Escape),
        ]]);
        assert!(input.is_action_pressed(GameAction::Exit));
        assert!(!input.is_action_pressed(GameAction::Pause));
    }

    #[test]
    fn arrows_and_wasd_share_axes() {
        let mut input = InputSystem::new();
        bind_default_controls(&mut input);

        input.process_frame(&[vec![InputEvent::key_down(KeyCode::ArrowUp)]]);
        assert_eq!(input.axis(GameAction::MoveDown, GameAction::MoveUp), 1.0);

        input.process_frame(&[vec![InputEvent::key_down(KeyCode::KeyS)]]);
        assert_eq!(input.axis(GameAction::MoveDown, GameAction::MoveUp), 0.0);
    }
}
