//=========================================================================
// Menu Controller
//=========================================================================
//
// Button handlers for the title screen and the game-over panel.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::DEFAULT_MAIN_SCENE;
use crate::core::platform_bridge::UiCommand;
use crate::core::session::Session;

//=== MenuController ======================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuController {
    main_scene: String,
}

impl MenuController {
    /// `main_scene` is the scene the Start button loads.
    pub fn new(main_scene: impl Into<String>) -> Self {
        Self {
            main_scene: main_scene.into(),
        }
    }

    pub fn main_scene(&self) -> &str {
        &self.main_scene
    }

    //--- Buttons ----------------------------------------------------------

    /// Loads the main scene and starts the session.
    pub fn on_start_click(&self, session: &mut Session) -> bool {
        session.load_scene(&self.main_scene);
        session.start()
    }

    pub fn on_exit_click(&self, session: &mut Session) {
        session.quit();
    }

    /// Game-over panel: play again from scratch.
    ///
    /// Pressed outside the main scene (the title screen), the restarted
    /// session is moved into the main scene as well.
    pub fn on_reload_click(&self, session: &mut Session, active_scene: Option<&str>) -> bool {
        let restarted = session.restart();
        if active_scene != Some(self.main_scene.as_str()) {
            session.load_scene(&self.main_scene);
        }
        restarted
    }

    pub fn on_quit_click(&self, session: &mut Session) {
        session.quit();
    }

    //--- Dispatch ---------------------------------------------------------

    /// Routes a host UI command to its handler. `active_scene` is the
    /// scene showing when the button was pressed.
    pub fn handle(
        &self,
        command: UiCommand,
        session: &mut Session,
        active_scene: Option<&str>,
    ) -> bool {
        debug!("UI command {:?}", command);

        match command {
            UiCommand::StartClicked => self.on_start_click(session),
            UiCommand::ExitClicked => {
                self.on_exit_click(session);
                true
            }
            UiCommand::ReloadClicked => self.on_reload_click(session, active_scene),
            UiCommand::QuitClicked => {
                self.on_quit_click(session);
                true
            }
            UiCommand::PauseClicked => session.pause(),
            UiCommand::ResumeClicked => session.resume(),
        }
    }
}

impl Default for MenuController {
    fn default() -> Self {
        Self::new(DEFAULT_MAIN_SCENE)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
