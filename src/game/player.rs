//=========================================================================
// Player Controller
//=========================================================================
//
// Ship movement, throttled shooting and contact handling.
//
// The controller only computes: velocity from the input axes, bullet
// spawns into the entity registry, and session calls for contacts. It is
// inert unless the session is Playing.
//
// Fire-rate tiers (applied on each shot, never relaxed):
//   400 < score < 1000 → 0.3 s
//   score > 900        → 0.1 s
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::GameAction;
use crate::core::scene::FrameContext;
use crate::core::session::{Session, SessionState};
use crate::core::world::{EntityId, EntityRegistry, EntityTag};

//=== Constants ===========================================================

/// Score above which firing wins the level.
const WIN_SCORE: u32 = 2000;

//=== PlayerSettings ======================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSettings {
    /// Units per second.
    pub move_speed: f32,

    /// Seconds between shots before any score tier applies.
    pub fire_rate: f32,

    /// Bullet spawn point relative to the ship.
    pub bullet_offset: (f32, f32),

    pub spawn_position: (f32, f32),
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            fire_rate: 0.5,
            bullet_offset: (0.0, 0.5),
            spawn_position: (0.0, -4.0),
        }
    }
}

//=== PlayerController ====================================================

#[derive(Debug, Clone)]
pub struct PlayerController {
    settings: PlayerSettings,
    fire_rate: f32,
    next_fire_time: f32,
    position: (f32, f32),
    velocity: (f32, f32),
}

impl PlayerController {
    pub fn new(settings: PlayerSettings) -> Self {
        Self {
            fire_rate: settings.fire_rate,
            next_fire_time: 0.0,
            position: settings.spawn_position,
            velocity: (0.0, 0.0),
            settings,
        }
    }

    /// Back to spawn position and base fire rate.
    ///
    /// `now` is the current game time; the first shot is available
    /// immediately.
    pub fn reset(&mut self, now: f32) {
        self.fire_rate = self.settings.fire_rate;
        self.next_fire_time = now;
        self.position = self.settings.spawn_position;
        self.velocity = (0.0, 0.0);
    }

    //--- Update -----------------------------------------------------------

    /// One tick of movement and shooting.
    pub fn update(&mut self, ctx: &mut FrameContext<'_, GameAction>) {
        if ctx.session.state() != SessionState::Playing {
            self.velocity = (0.0, 0.0);
            return;
        }

        self.handle_movement(ctx);
        self.handle_shooting(ctx);
    }

    fn handle_movement(&mut self, ctx: &FrameContext<'_, GameAction>) {
        let horizontal = ctx.input.axis(GameAction::MoveLeft, GameAction::MoveRight);
        let vertical = ctx.input.axis(GameAction::MoveDown, GameAction::MoveUp);

        let (x, y) = normalized(horizontal, vertical);
        self.velocity = (x * self.settings.move_speed, y * self.settings.move_speed);

        self.position.0 += self.velocity.0 * ctx.dt;
        self.position.1 += self.velocity.1 * ctx.dt;
    }

    fn handle_shooting(&mut self, ctx: &mut FrameContext<'_, GameAction>) {
        let now = ctx.clock.elapsed();

        if ctx.input.is_action_down(GameAction::Fire) && now >= self.next_fire_time {
            self.fire(ctx.session, ctx.world);
            self.next_fire_time = now + self.fire_rate;
        }
    }

    /// Spawns one bullet. Tightens the fire rate by score and completes
    /// the level once the win score is passed.
    fn fire(&mut self, session: &mut Session, world: &mut EntityRegistry) -> EntityId {
        let score = session.score();

        if score > 400 && score < 1000 {
            self.fire_rate = 0.3;
        }
        if score > 900 {
            self.fire_rate = 0.1;
        }

        let spawn = (
            self.position.0 + self.settings.bullet_offset.0,
            self.position.1 + self.settings.bullet_offset.1,
        );
        let bullet = world.spawn(EntityTag::Bullet, spawn);
        debug!("Fired {:?} (fire rate {}s)", bullet, self.fire_rate);

        if score > WIN_SCORE && session.complete_level() {
            info!("Score {} passed {}, level won", score, WIN_SCORE);
        }

        bullet
    }

    //--- Contacts ---------------------------------------------------------

    /// Something touched the ship.
    ///
    /// Enemies cost a life. Collectibles are despawned and scored at
    /// `value`, or at the configured coin value when `value` is 0.
    /// Returns `true` if the contact had an effect.
    pub fn on_contact(
        &mut self,
        session: &mut Session,
        world: &mut EntityRegistry,
        entity: EntityId,
        tag: EntityTag,
        value: u32,
    ) -> bool {
        if session.state() != SessionState::Playing {
            return false;
        }

        match tag {
            EntityTag::Enemy => {
                debug!("Player hit by enemy {:?}", entity);
                session.lose_life()
            }
            EntityTag::Collectible => {
                world.despawn(entity);
                let value = if value == 0 {
                    session.config().score_per_coin
                } else {
                    value
                };
                session.collectible_picked_up(value)
            }
            EntityTag::Player | EntityTag::Bullet => false,
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn position(&self) -> (f32, f32) {
        self.position
    }

    pub fn velocity(&self) -> (f32, f32) {
        self.velocity
    }

    /// Current seconds between shots.
    pub fn fire_rate(&self) -> f32 {
        self.fire_rate
    }

    pub fn next_fire_time(&self) -> f32 {
        self.next_fire_time
    }

    pub fn settings(&self) -> &PlayerSettings {
        &self.settings
    }
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::new(PlayerSettings::default())
    }
}

/// Unit vector in the direction of `(x, y)`, or zero for a zero input.
fn normalized(x: f32, y: f32) -> (f32, f32) {
    let length = (x * x + y * y).sqrt();
    if length > f32::EPSILON {
        (x / length, y / length)
    } else {
        (0.0, 0.0)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
