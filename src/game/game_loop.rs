//=========================================================================
// Game Loop
//=========================================================================
//
// One deterministic step of the whole game per tick.
//
// Step order:
//   1. Input          batches → InputSystem (context of the active scene)
//   2. Messages       contacts and UI commands → MessageBus
//   3. Clock          dt × time scale
//   4. UI commands    MenuController → Session
//   5. Scene update   active scene (menu or level)
//   6. Timer          session.tick(scaled dt)
//   7. Host requests  despawn / load / reload / time scale / quit
//   8. Cleanup        MessageBus cleared
//
// Requests the session issues during a step are applied in step 7 of the
// same step, in the order they were issued.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Receiver};
use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::scenes::{LevelScene, MenuScene};
use super::{bind_default_controls, GameAction, MenuController, PlayerController, MENU_SCENE};
use crate::core::clock::GameClock;
use crate::core::input::InputSystem;
use crate::core::message_bus::MessageBus;
use crate::core::platform_bridge::{FrameEvents, TickControl, UiCommand};
use crate::core::scene::{FrameContext, SceneDirector};
use crate::core::session::{HostRequest, Session, SessionConfig};
use crate::core::world::{EntityRegistry, GameEvent};
use crate::core::Simulation;

//=== GameLoop ============================================================

pub struct GameLoop {
    session: Session,
    host_requests: Receiver<HostRequest>,
    input: InputSystem<GameAction>,
    world: EntityRegistry,
    bus: MessageBus,
    clock: GameClock,
    director: SceneDirector<GameAction>,
    menu: MenuController,
}

impl GameLoop {
    //--- Construction -----------------------------------------------------

    /// Builds the game with the title screen active.
    ///
    /// `main_scene` is the name the Start button loads.
    pub fn new(config: SessionConfig, main_scene: impl Into<String>) -> Self {
        let main_scene = main_scene.into();
        let menu = MenuController::new(main_scene.clone());

        let (boundary, host_requests) = unbounded();
        let session = Session::new(config, boundary);

        let mut input = InputSystem::new();
        bind_default_controls(&mut input);

        let mut director = SceneDirector::new();
        director.register_default(MENU_SCENE, MenuScene::new(menu.clone()));
        director.register(
            main_scene,
            LevelScene::new(PlayerController::default(), menu.clone()),
        );

        let mut game = Self {
            session,
            host_requests,
            input,
            world: EntityRegistry::new(),
            bus: MessageBus::new(),
            clock: GameClock::new(),
            director,
            menu,
        };

        let (director, mut ctx) = game.split(0.0);
        director.start(&mut ctx);

        info!("Game ready, main scene '{}'", game.menu.main_scene());
        game
    }

    //--- Step -------------------------------------------------------------

    /// Runs one tick with `dt` seconds of real time.
    pub fn step(&mut self, dt: f32, frame: &FrameEvents) -> TickControl {
        //--- 1. Input -----------------------------------------------------
        self.input.set_context(self.director.input_context());
        self.input.process_frame(&frame.inputs);

        //--- 2. Messages --------------------------------------------------
        self.bus.extend(frame.contacts.iter().copied());
        self.bus.extend(frame.ui.iter().copied());

        //--- 3. Clock -----------------------------------------------------
        let scaled_dt = self.clock.advance(dt);

        //--- 4. UI commands -----------------------------------------------
        for &command in self.bus.read::<UiCommand>() {
            self.menu
                .handle(command, &mut self.session, self.director.active());
        }

        //--- 5. Scene update ----------------------------------------------
        let (director, mut ctx) = self.split(scaled_dt);
        director.update(&mut ctx);

        //--- 6. Timer -----------------------------------------------------
        self.session.tick(scaled_dt);

        //--- 7. Host requests ---------------------------------------------
        let control = self.apply_host_requests();

        //--- 8. Cleanup ---------------------------------------------------
        self.bus.clear_all();

        control
    }

    //--- Queries ----------------------------------------------------------

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Mutable session, for subscribing observers or driving it directly.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn world(&self) -> &EntityRegistry {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut EntityRegistry {
        &mut self.world
    }

    pub fn input_mut(&mut self) -> &mut InputSystem<GameAction> {
        &mut self.input
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub fn active_scene(&self) -> Option<&str> {
        self.director.active()
    }

    //--- Internal Helpers -------------------------------------------------

    fn split(&mut self, dt: f32) -> (&mut SceneDirector<GameAction>, FrameContext<'_, GameAction>) {
        (
            &mut self.director,
            FrameContext {
                session: &mut self.session,
                world: &mut self.world,
                input: &self.input,
                bus: &self.bus,
                clock: &self.clock,
                dt,
            },
        )
    }

    fn apply_host_requests(&mut self) -> TickControl {
        let mut control = TickControl::Continue;

        while let Ok(request) = self.host_requests.try_recv() {
            debug!("Host request {:?}", request);

            match request {
                HostRequest::DespawnTagged(tags) => {
                    self.world.despawn_tagged(&tags);
                }
                HostRequest::LoadScene(name) => {
                    let (director, mut ctx) = self.split(0.0);
                    director.load(&name, &mut ctx);
                    self.input.release_all();
                }
                HostRequest::ReloadScene => {
                    let (director, mut ctx) = self.split(0.0);
                    director.reload(&mut ctx);
                    self.input.release_all();
                }
                HostRequest::SetTimeScale(scale) => self.clock.set_time_scale(scale),
                HostRequest::Quit => {
                    info!("Quit requested");
                    control = TickControl::Exit;
                }
            }
        }

        control
    }
}

impl Simulation for GameLoop {
    fn step(&mut self, dt: f32, frame: &FrameEvents) -> TickControl {
        GameLoop::step(self, dt, frame)
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new(SessionConfig::default(), super::DEFAULT_MAIN_SCENE)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
