//=========================================================================
// Scenes
//=========================================================================
//
// MenuScene:  title screen. Enter starts, Escape exits.
// LevelScene: gameplay. Player control, contacts, pause and debug keys.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::{GameAction, MenuController, PlayerController, MENU};
use crate::core::input::InputContext;
use crate::core::scene::{FrameContext, Scene};
use crate::core::session::SessionState;
use crate::core::world::{EntityId, EntityTag, GameEvent};

//=== MenuScene ===========================================================

#[derive(Debug, Clone, Default)]
pub struct MenuScene {
    menu: MenuController,
}

impl MenuScene {
    pub fn new(menu: MenuController) -> Self {
        Self { menu }
    }
}

impl Scene<GameAction> for MenuScene {
    fn on_enter(&mut self, _ctx: &mut FrameContext<'_, GameAction>) {
        info!("Title screen");
    }

    fn update(&mut self, ctx: &mut FrameContext<'_, GameAction>) {
        if ctx.input.is_action_pressed(GameAction::Confirm) {
            self.menu.on_start_click(ctx.session);
        } else if ctx.input.is_action_pressed(GameAction::Exit) {
            self.menu.on_exit_click(ctx.session);
        }
    }

    fn input_context(&self) -> InputContext {
        MENU
    }
}

//=== LevelScene ==========================================================

#[derive(Debug, Clone, Default)]
pub struct LevelScene {
    player: PlayerController,
    menu: MenuController,
    ship: Option<EntityId>,
}

impl LevelScene {
    pub fn new(player: PlayerController, menu: MenuController) -> Self {
        Self {
            player,
            menu,
            ship: None,
        }
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    //--- Internal Helpers -------------------------------------------------

    fn handle_commands(&mut self, ctx: &mut FrameContext<'_, GameAction>) {
        let input = ctx.input;
        let session = &mut *ctx.session;

        if input.is_action_pressed(GameAction::Pause) {
            session.toggle_pause();
        }

        if input.is_action_pressed(GameAction::Restart) && session.state().is_terminal() {
            self.menu
                .on_reload_click(session, Some(self.menu.main_scene()));
        }

        if session.config().debug_mode && session.state() == SessionState::Playing {
            if input.is_action_pressed(GameAction::DebugAddScore) {
                debug!("Debug: +1000 points");
                session.add_score(1000);
            }
            if input.is_action_pressed(GameAction::DebugLoseLife) {
                debug!("Debug: lose a life");
                session.lose_life();
            }
        }
    }

    fn handle_game_events(&mut self, ctx: &mut FrameContext<'_, GameAction>) {
        let bus = ctx.bus;

        for event in bus.read::<GameEvent>().iter().copied() {
            match event {
                GameEvent::PlayerContact { entity, tag, value } => {
                    self.player
                        .on_contact(ctx.session, ctx.world, entity, tag, value);
                }
                GameEvent::EnemyDestroyed { enemy, bullet } => {
                    ctx.world.despawn(enemy);
                    if let Some(bullet) = bullet {
                        ctx.world.despawn(bullet);
                    }
                    ctx.session.record_enemy_killed();
                }
            }
        }
    }
}

impl Scene<GameAction> for LevelScene {
    fn on_enter(&mut self, ctx: &mut FrameContext<'_, GameAction>) {
        self.player.reset(ctx.clock.elapsed());
        self.ship = Some(ctx.world.spawn(EntityTag::Player, self.player.position()));
        info!("Level entered");
    }

    fn on_exit(&mut self, ctx: &mut FrameContext<'_, GameAction>) {
        if let Some(ship) = self.ship.take() {
            ctx.world.despawn(ship);
        }
    }

    fn update(&mut self, ctx: &mut FrameContext<'_, GameAction>) {
        self.handle_commands(ctx);
        self.handle_game_events(ctx);
        self.player.update(ctx);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::GameClock;
    use crate::core::input::{InputEvent, InputSystem, KeyCode};
    use crate::core::message_bus::MessageBus;
    use crate::core::session::{Session, SessionConfig};
    use crate::core::world::EntityRegistry;
    use crate::game::bind_default_controls;

    struct Fixture {
        session: Session,
        world: EntityRegistry,
        input: InputSystem<GameAction>,
        bus: MessageBus,
        clock: GameClock,
    }

    impl Fixture {
        fn new() -> Self {
            let mut input = InputSystem::new();
            bind_default_controls(&mut input);
            Self {
                session: Session::headless(SessionConfig::default()),
                world: EntityRegistry::new(),
                input,
                bus: MessageBus::new(),
                clock: GameClock::new(),
            }
        }

        fn ctx(&mut self) -> FrameContext<'_, GameAction> {
            FrameContext {
                session: &mut self.session,
                world: &mut self.world,
                input: &self.input,
                bus: &self.bus,
                clock: &self.clock,
                dt: 0.0,
            }
        }
    }

    #[test]
    fn level_spawns_and_removes_ship() {
        let mut fx = Fixture::new();
        let mut level = LevelScene::default();

        level.on_enter(&mut fx.ctx());
        assert_eq!(fx.world.count(EntityTag::Player), 1);

        level.on_exit(&mut fx.ctx());
        assert!(fx.world.is_empty());
    }

    #[test]
    fn collectible_contact_through_bus() {
        let mut fx = Fixture::new();
        fx.session.start();
        let coin = fx.world.spawn(EntityTag::Collectible, (0.0, 0.0));
        fx.bus.push(GameEvent::PlayerContact {
            entity: coin,
            tag: EntityTag::Collectible,
            value: 40,
        });

        let mut level = LevelScene::default();
        level.update(&mut fx.ctx());

        assert_eq!(fx.session.score(), 40);
        assert!(fx.world.get(coin).is_none());
    }

    #[test]
    fn menu_scene_confirm_starts_session() {
        let mut fx = Fixture::new();
        fx.input.set_context(MENU);
        fx.input
            .process_frame(&[vec![InputEvent::key_down(KeyCode::Enter)]]);

        let mut menu = MenuScene::default();
        menu.update(&mut fx.ctx());

        assert_eq!(fx.session.state(), SessionState::Playing);
        assert_eq!(menu.input_context(), MENU);
    }
}
