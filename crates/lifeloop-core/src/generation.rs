//! Immutable published grid snapshots.

use std::sync::Arc;

use crate::cell::CellState;
use crate::error::GridError;
use crate::grid::Grid;
use crate::id::GenerationId;

/// A published grid state.
///
/// Generations are shared as `Arc<Generation>` and are never modified once
/// another holder can observe them: the engine builds each tick's output
/// in a fresh buffer, and edits clone the grid before writing whenever the
/// current `Arc` is shared.
///
/// Two counters identify a generation:
/// - [`id`](Self::id) counts ticks since construction or the last reset.
/// - [`revision`](Self::revision) increases on every publication of new
///   content (tick, edit, reset, load) and never restarts, so a renderer can
///   cheaply detect that anything changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Generation {
    id: GenerationId,
    revision: u64,
    grid: Grid,
}

impl Generation {
    /// Wrap a grid as a generation.
    pub fn new(id: GenerationId, revision: u64, grid: Grid) -> Self {
        Self { id, revision, grid }
    }

    /// Tick sequence number.
    pub fn id(&self) -> GenerationId {
        self.id
    }

    /// Publication counter.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The cell states of this generation.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Shorthand for `self.grid().get(x, y)`.
    pub fn get(&self, x: i32, y: i32) -> Result<CellState, GridError> {
        self.grid.get(x, y)
    }

    /// Shorthand for `self.grid().alive_count()`.
    pub fn alive_count(&self) -> usize {
        self.grid.alive_count()
    }

    /// Consume the generation and return its grid.
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Copy-on-write point edit.
    ///
    /// Writes `state` at `(x, y)` and stamps `revision`. If any other holder
    /// shares `this`, the generation is cloned first and `this` is pointed at
    /// the copy, so readers of the old `Arc` never see the write. Nothing is
    /// cloned or written when the coordinate is out of bounds.
    pub fn write_cell(
        this: &mut Arc<Self>,
        x: i32,
        y: i32,
        state: CellState,
        revision: u64,
    ) -> Result<(), GridError> {
        this.grid.get(x, y)?;
        let generation = Arc::make_mut(this);
        generation.grid.set(x, y, state)?;
        generation.revision = revision;
        Ok(())
    }
}
