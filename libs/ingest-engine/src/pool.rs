use std::sync::{Mutex, PoisonError};

use agent_api::OutboundMessage;

// ═══════════════════════════════════════════════════════════════
//  Outbound Message Pool
// ═══════════════════════════════════════════════════════════════

/// Bounded free-list of outbound messages, shared by all concurrently
/// running dispatch calls. Heartbeat rates make one allocation per
/// record measurable; reusing message buffers keeps the hot path flat.
///
/// An acquired message is exclusively owned until released and may
/// carry a previous occupant's values — the publisher overwrites every
/// field before use, never assumes a zeroed object.
pub struct MessagePool {
    slots: Mutex<Vec<OutboundMessage>>,
    capacity: usize,
}

impl MessagePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Mutex::new(Vec::with_capacity(capacity.min(4096))),
            capacity,
        }
    }

    /// Take a message from the free-list, or a fresh one when empty.
    pub fn acquire(&self) -> OutboundMessage {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop()
            .unwrap_or_default()
    }

    /// Return a message for reuse. Surplus beyond capacity is dropped.
    pub fn release(&self, msg: OutboundMessage) {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        if slots.len() < self.capacity {
            slots.push(msg);
        }
    }

    #[cfg(test)]
    fn idle(&self) -> usize {
        self.slots.lock().unwrap().len()
    }
}
