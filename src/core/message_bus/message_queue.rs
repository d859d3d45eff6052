//=========================================================================
// Message Queue
//=========================================================================
//
// Type-erased view of a `Vec<M>` so queues of different message types
// can share one HashMap.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;

//=== Internal Dependencies ===============================================

use super::Message;

//=========================================================================

pub(super) trait MessageQueue: Send {
    /// Clears all messages while keeping the allocation.
    fn clear_queue(&mut self);

    fn len(&self) -> usize;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<M: Message> MessageQueue for Vec<M> {
    fn clear_queue(&mut self) {
        self.clear();
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_queue_keeps_capacity() {
        let mut queue: Vec<u32> = (0..40).collect();
        let capacity = queue.capacity();

        let erased: &mut dyn MessageQueue = &mut queue;
        erased.clear_queue();

        assert!(queue.is_empty());
        assert_eq!(queue.capacity(), capacity);
    }

    #[test]
    fn downcast_to_concrete_vec() {
        let mut queue: Vec<u32> = vec![7];
        let erased: &mut dyn MessageQueue = &mut queue;

        assert_eq!(erased.len(), 1);
        assert!(erased.as_any().downcast_ref::<Vec<i64>>().is_none());

        if let Some(v) = erased.as_any_mut().downcast_mut::<Vec<u32>>() {
            v.push(8);
        }
        assert_eq!(queue, vec![7, 8]);
    }
}
