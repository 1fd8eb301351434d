//! The active generation shared by the tick thread and editors.
//!
//! [`ActiveGrid`] guards one `Arc<Generation>` handle behind a short mutex.
//! A tick is split in two halves around the lock:
//!
//! 1. [`begin_tick`](ActiveGrid::begin_tick) clones the handle and opens
//!    the edit journal, unless the grid was replaced since the caller's
//!    epoch.
//! 2. The caller runs the step rule on that immutable generation with no
//!    lock held.
//! 3. [`finish_tick`](ActiveGrid::finish_tick) re-applies journaled edits
//!    onto the computed grid and swaps it in, unless a reset or load bumped
//!    the epoch in the meantime.
//!
//! Edits write through [`Generation::write_cell`], so readers holding an
//! older handle keep a consistent view.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lifeloop_core::{CellState, Generation, GenerationId, Grid, GridError};
use tracing::debug;

use crate::metrics::TickMetrics;
use crate::ring::GenerationRing;
use crate::step::StepOutput;

/// Input to one tick: the generation to step from and the epoch it was
/// taken under.
pub(crate) struct TickInput {
    generation: Arc<Generation>,
    epoch: u64,
}

impl TickInput {
    pub(crate) fn generation(&self) -> &Arc<Generation> {
        &self.generation
    }
}

struct ActiveState {
    current: Arc<Generation>,
    /// Bumped by every wholesale replacement.
    epoch: u64,
    tick_in_flight: bool,
    /// Resulting cell states written while a tick was computing.
    journal: Vec<(i32, i32, CellState)>,
    history: GenerationRing,
    metrics: TickMetrics,
}

pub(crate) struct ActiveGrid {
    dimensions: (u32, u32),
    state: Mutex<ActiveState>,
}

impl ActiveGrid {
    pub(crate) fn new(grid: Grid, history_capacity: usize) -> Self {
        let dimensions = grid.dimensions();
        Self {
            dimensions,
            state: Mutex::new(ActiveState {
                current: Arc::new(Generation::new(GenerationId(0), 0, grid)),
                epoch: 0,
                tick_in_flight: false,
                journal: Vec::new(),
                history: GenerationRing::new(history_capacity),
                metrics: TickMetrics::default(),
            }),
        }
    }

    // Every critical section is a pointer swap or a checked cell write, none
    // of which can leave the state half-updated, so a poisoned lock is still
    // consistent.
    fn lock(&self) -> MutexGuard<'_, ActiveState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn dimensions(&self) -> (u32, u32) {
        self.dimensions
    }

    pub(crate) fn snapshot(&self) -> Arc<Generation> {
        Arc::clone(&self.lock().current)
    }

    pub(crate) fn edit(&self, x: i32, y: i32, state: CellState) -> Result<(), GridError> {
        let mut st = self.lock();
        let old = st.current.get(x, y)?;
        if st.tick_in_flight {
            st.journal.push((x, y, state));
        }
        if old != state {
            let revision = st.current.revision() + 1;
            Generation::write_cell(&mut st.current, x, y, state, revision)?;
        }
        Ok(())
    }

    pub(crate) fn toggle(&self, x: i32, y: i32) -> Result<CellState, GridError> {
        let mut st = self.lock();
        let next = !st.current.get(x, y)?;
        if st.tick_in_flight {
            st.journal.push((x, y, next));
        }
        let revision = st.current.revision() + 1;
        Generation::write_cell(&mut st.current, x, y, next, revision)?;
        Ok(next)
    }

    /// Current replacement epoch.
    pub(crate) fn epoch(&self) -> u64 {
        self.lock().epoch
    }

    /// Open a tick against the current generation.
    ///
    /// Returns `None` without touching any state if the grid has been
    /// replaced since `epoch`: the caller was started for a grid that no
    /// longer exists and must not step its successor.
    pub(crate) fn begin_tick(&self, epoch: u64) -> Option<TickInput> {
        let mut st = self.lock();
        if st.epoch != epoch {
            return None;
        }
        st.tick_in_flight = true;
        st.journal.clear();
        Some(TickInput {
            generation: Arc::clone(&st.current),
            epoch,
        })
    }

    /// Swap in the result of a tick started by [`begin_tick`](Self::begin_tick).
    ///
    /// Returns the published generation, or `None` if the tick was
    /// discarded by a replacement that happened while it was computing.
    pub(crate) fn finish_tick(
        &self,
        input: TickInput,
        output: StepOutput,
        step_us: u64,
    ) -> Option<Arc<Generation>> {
        let mut st = self.lock();
        st.tick_in_flight = false;
        if st.epoch != input.epoch {
            st.journal.clear();
            st.metrics.ticks_discarded += 1;
            debug!(
                generation = %input.generation.id().next(),
                "tick discarded by grid replacement"
            );
            return None;
        }

        let StepOutput {
            mut grid,
            births,
            deaths,
            alive,
        } = output;
        let merged_edits = st.journal.len();
        for (x, y, state) in st.journal.drain(..) {
            // Journaled coordinates were bounds-checked against the same
            // dimensions when the edit was accepted.
            let written = grid.set(x, y, state);
            debug_assert!(written.is_ok(), "journaled edit rejected: {written:?}");
        }
        let alive = if merged_edits == 0 {
            alive
        } else {
            grid.alive_count()
        };

        let id = input.generation.id().next();
        let revision = st.current.revision() + 1;
        let next = Arc::new(Generation::new(id, revision, grid));
        st.current = Arc::clone(&next);
        st.history.push(Arc::clone(&next));

        let m = &mut st.metrics;
        m.generation = id;
        m.step_us = step_us;
        m.alive = alive;
        m.births = births;
        m.deaths = deaths;
        m.merged_edits = merged_edits;
        m.ticks_completed += 1;
        Some(next)
    }

    /// Replace the whole grid, restarting the generation count at 0.
    ///
    /// Any tick computing at the time is discarded when it finishes.
    pub(crate) fn replace(&self, grid: Grid) -> Result<Arc<Generation>, GridError> {
        if grid.dimensions() != self.dimensions {
            return Err(GridError::DimensionMismatch {
                expected: self.dimensions,
                actual: grid.dimensions(),
            });
        }
        let mut st = self.lock();
        st.epoch += 1;
        st.journal.clear();
        st.history.clear();
        let revision = st.current.revision() + 1;
        let next = Arc::new(Generation::new(GenerationId(0), revision, grid));
        st.current = Arc::clone(&next);
        Ok(next)
    }

    pub(crate) fn record_overrun(&self) {
        self.lock().metrics.overruns += 1;
    }

    pub(crate) fn metrics(&self) -> TickMetrics {
        self.lock().metrics.clone()
    }

    pub(crate) fn history(&self, id: GenerationId) -> Option<Arc<Generation>> {
        self.lock().history.get(id)
    }

    pub(crate) fn latest_history(&self) -> Option<Arc<Generation>> {
        self.lock().history.latest()
    }
}
