//! Fixed-capacity ring of recent tick outputs.
//!
//! [`GenerationRing`] keeps the last `capacity` generations produced by
//! ticks so callers can look one up by [`GenerationId`]. It lives inside the
//! active-grid lock, so pushes, lookups and the clear on reset are ordered
//! with the swap that published each generation.

use std::collections::VecDeque;
use std::sync::Arc;

use lifeloop_core::{Generation, GenerationId};

/// A fixed-capacity ring buffer of `Arc<Generation>`.
///
/// Entries are pushed in increasing [`GenerationId`] order. Once full, each
/// push evicts the oldest entry.
#[derive(Debug)]
pub struct GenerationRing {
    slots: VecDeque<Arc<Generation>>,
    capacity: usize,
}

impl GenerationRing {
    /// Create a new ring buffer with the given capacity.
    ///
    /// Capacities below 2 are raised to 2; [`SimConfig`](crate::SimConfig)
    /// rejects them before a ring is ever built.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(2);
        Self {
            slots: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a generation. Returns the evicted entry, if any.
    pub fn push(&mut self, generation: Arc<Generation>) -> Option<Arc<Generation>> {
        let evicted = if self.slots.len() == self.capacity {
            self.slots.pop_front()
        } else {
            None
        };
        self.slots.push_back(generation);
        evicted
    }

    /// The most recently pushed generation.
    pub fn latest(&self) -> Option<Arc<Generation>> {
        self.slots.back().cloned()
    }

    /// Look up a retained generation by id.
    ///
    /// Returns `None` if it was evicted or has not been produced yet.
    pub fn get(&self, id: GenerationId) -> Option<Arc<Generation>> {
        let oldest = self.slots.front()?.id();
        let offset = id.0.checked_sub(oldest.0)? as usize;
        self.slots
            .get(offset)
            .filter(|g| g.id() == id)
            .cloned()
    }

    /// Drop every retained generation.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Number of generations currently stored (up to `capacity`).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the ring is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The ring buffer capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
