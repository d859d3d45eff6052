//=========================================================================
// Message Bus
//=========================================================================
//
// Per-tick, type-keyed queues for host events and UI commands.
//
// Architecture:
//   GameLoop ─ push<M>() / extend<M>() ─> HashMap<TypeId, Vec<M>>
//                                              ↓
//   Scenes, controllers ─────────────> read<M>() (shared)
//                                              ↓
//   GameLoop ─────────────────────────> clear_all() at tick end
//
// Pattern: push → read (N consumers) → clear → repeat
//
//=========================================================================

//=== Module Declarations =================================================

mod message_queue;

//=== External Dependencies ===============================================

use std::any::{type_name, TypeId};
use std::collections::HashMap;

use log::warn;

//=== Internal Dependencies ===============================================

use message_queue::MessageQueue;

//=== Public API ==========================================================

/// Marker trait for types that can travel through the [`MessageBus`].
///
/// Implemented for every `Send + 'static` type.
pub trait Message: Send + 'static {}

impl<T: Send + 'static> Message for T {}

//=== MessageBus ==========================================================

/// Batched messages for the current tick, one queue per type.
///
/// ```
/// use aetheric_arcade::core::message_bus::MessageBus;
/// use aetheric_arcade::core::world::{EntityId, GameEvent};
///
/// let mut bus = MessageBus::new();
/// bus.push(GameEvent::EnemyDestroyed { enemy: EntityId(3), bullet: None });
///
/// assert_eq!(bus.read::<GameEvent>().len(), 1);
/// bus.clear_all();
/// assert!(bus.read::<GameEvent>().is_empty());
/// ```
#[derive(Default)]
pub struct MessageBus {
    queues: HashMap<TypeId, Box<dyn MessageQueue>>,
}

impl MessageBus {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Message Operations -----------------------------------------------

    /// Queues one message.
    pub fn push<M: Message>(&mut self, msg: M) {
        if let Some(queue) = self.queue_mut::<M>() {
            queue.push(msg);
        }
    }

    /// Queues every message from `msgs`, preserving order.
    pub fn extend<M, I>(&mut self, msgs: I)
    where
        M: Message,
        I: IntoIterator<Item = M>,
    {
        if let Some(queue) = self.queue_mut::<M>() {
            queue.extend(msgs);
        }
    }

    /// All messages of type `M` queued this tick.
    ///
    /// Any number of consumers may read the same slice before `clear`.
    pub fn read<M: Message>(&self) -> &[M] {
        self.queue_ref::<M>().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Takes every message of type `M` out of the bus.
    ///
    /// Leaves the queue empty with its capacity intact.
    pub fn drain<M: Message>(&mut self) -> Vec<M> {
        match self.queues.get_mut(&TypeId::of::<M>()) {
            Some(queue) => queue
                .as_any_mut()
                .downcast_mut::<Vec<M>>()
                .map(|v| v.drain(..).collect())
                .unwrap_or_default(),
            None => Vec::new(),
        }
    }

    //--- Query API --------------------------------------------------------

    pub fn has_messages<M: Message>(&self) -> bool {
        self.count::<M>() > 0
    }

    pub fn count<M: Message>(&self) -> usize {
        self.queue_ref::<M>().map_or(0, Vec::len)
    }

    /// Messages queued across every type.
    pub fn total(&self) -> usize {
        self.queues.values().map(|q| q.len()).sum()
    }

    //--- Clearing ---------------------------------------------------------

    /// Clears messages of type `M`, keeping the allocation.
    pub fn clear<M: Message>(&mut self) {
        if let Some(queue) = self.queues.get_mut(&TypeId::of::<M>()) {
            queue.clear_queue();
        }
    }

    /// Clears every queue, keeping entries and allocations for reuse.
    pub fn clear_all(&mut self) {
        for queue in self.queues.values_mut() {
            queue.clear_queue();
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn queue_ref<M: Message>(&self) -> Option<&Vec<M>> {
        self.queues
            .get(&TypeId::of::<M>())
            .and_then(|q| q.as_any().downcast_ref::<Vec<M>>())
    }

    fn queue_mut<M: Message>(&mut self) -> Option<&mut Vec<M>> {
        let queue = self
            .queues
            .entry(TypeId::of::<M>())
            .or_insert_with(|| Box::new(Vec::<M>::new()))
            .as_any_mut()
            .downcast_mut::<Vec<M>>();

        if queue.is_none() {
            warn!("MessageBus queue type mismatch for {}", type_name::<M>());
        }
        queue
    }
}

//=========================================================================
// Tests
//=========================================================================
