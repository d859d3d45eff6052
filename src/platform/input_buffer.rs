//=========================================================================
// Input Buffer
//=========================================================================
//
// Per-frame store for translated input between two RedrawRequested
// boundaries.
//
// - discrete:   key and button edges, in arrival order. A repeat of the
//               previous event (OS key repeat) is dropped.
// - continuous: mouse movement, coalesced to the latest position.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;

//=== InputBuffer =========================================================

pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    continuous: HashSet<InputEvent>,
}

impl InputBuffer {
    pub(crate) fn new() -> Self {
        const DISCRETE_BASE: usize = 64;
        const CONTINUOUS_BASE: usize = 4;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            continuous: HashSet::with_capacity(CONTINUOUS_BASE),
        }
    }

    //--- Recording --------------------------------------------------------

    /// Replaces any earlier event of the same kind.
    pub(crate) fn push_continuous(&mut self, event: InputEvent) {
        self.continuous.replace(event);
    }

    pub(crate) fn push_discrete(&mut self, event: InputEvent) {
        if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    //--- Flushing ---------------------------------------------------------

    /// Takes this frame's events, or `None` when nothing was recorded.
    pub(crate) fn drain(&mut self) -> Option<(Vec<InputEvent>, Vec<InputEvent>)> {
        if self.is_empty() {
            return None;
        }

        let discrete = std::mem::take(&mut self.discrete);
        let continuous = self.continuous.drain().collect();
        Some((discrete, continuous))
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.continuous.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
