//=========================================================================
// World
//=========================================================================
//
// Registry of tagged, transient entities (enemies, bullets, pickups) and
// the gameplay events the host reports about them.
//
// The registry is bookkeeping only: positions are set at spawn time and
// never simulated here. Physics and rendering belong to the host.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeMap;

use log::{debug, trace};

//=== EntityTag ===========================================================

/// Gameplay category of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityTag {
    Player,
    Enemy,
    Bullet,
    Collectible,
}

impl EntityTag {
    /// Tags destroyed when a session restarts.
    pub const TRANSIENT: [EntityTag; 3] = [Self::Enemy, Self::Bullet, Self::Collectible];
}

//=== EntityId ============================================================

/// Opaque entity handle. Never reused within one registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

//=== Entity ==============================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub tag: EntityTag,
    pub position: (f32, f32),
}

//=== GameEvent ===========================================================

/// Discrete gameplay events reported by the host (collision callbacks).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Something entered the player's trigger volume.
    ///
    /// `value` is the score worth of a collectible and ignored otherwise.
    PlayerContact {
        entity: EntityId,
        tag: EntityTag,
        value: u32,
    },

    /// An enemy was destroyed, optionally by a specific bullet.
    EnemyDestroyed {
        enemy: EntityId,
        bullet: Option<EntityId>,
    },
}

//=== EntityRegistry ======================================================

/// Ordered store of live entities keyed by id.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    entities: BTreeMap<EntityId, Entity>,
    next_id: u64,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, tag: EntityTag, position: (f32, f32)) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;

        self.entities.insert(id, Entity { id, tag, position });
        trace!("Spawned {:?} {:?} at {:?}", tag, id, position);
        id
    }

    /// Removes one entity, returning it if it was alive.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        self.entities.remove(&id)
    }

    /// Removes every entity carrying one of `tags`. Returns how many went.
    pub fn despawn_tagged(&mut self, tags: &[EntityTag]) -> usize {
        let before = self.entities.len();
        self.entities.retain(|_, e| !tags.contains(&e.tag));
        let removed = before - self.entities.len();

        debug!("Despawned {} entities tagged {:?}", removed, tags);
        removed
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn count(&self, tag: EntityTag) -> usize {
        self.entities.values().filter(|e| e.tag == tag).count()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
