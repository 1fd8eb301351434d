//! Test utilities for lifeloop development.
//!
//! Provides ASCII grid builders, canonical [`patterns`], a
//! [`RecordingViewPort`] that keeps every publication, and a polling
//! [`wait_until`] helper for tests that race the tick thread.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use lifeloop_core::{CellState, Generation, Grid, ViewPort};

pub mod patterns;

/// Build a grid from rows of `#` (alive) and `.` (dead).
///
/// Any character other than `#` is dead. Panics on ragged or empty input.
pub fn grid_from_rows(rows: &[&str]) -> Grid {
    let height = rows.len() as u32;
    let width = rows.first().map_or(0, |r| r.chars().count()) as u32;
    let mut cells = Vec::with_capacity((width * height) as usize);
    for row in rows {
        assert_eq!(row.chars().count() as u32, width, "ragged row {row:?}");
        cells.extend(row.chars().map(|c| CellState::from(c == '#')));
    }
    Grid::from_cells(width, height, cells).expect("grid_from_rows: invalid grid")
}

/// Alive coordinates of `grid` as an ordered set.
pub fn alive_set(grid: &Grid) -> BTreeSet<(i32, i32)> {
    grid.alive_cells().collect()
}

/// Poll `predicate` every millisecond until it holds or `timeout` elapses.
///
/// Returns whether the predicate held.
pub fn wait_until(timeout: Duration, mut predicate: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    loop {
        if predicate() {
            return true;
        }
        if Instant::now() > deadline {
            return false;
        }
        std::thread::sleep(Duration::from_millis(1));
    }
}

/// A [`ViewPort`] that records every generation it is handed.
#[derive(Debug, Default)]
pub struct RecordingViewPort {
    published: Mutex<Vec<Arc<Generation>>>,
}

impl RecordingViewPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything published so far, in order.
    pub fn published(&self) -> Vec<Arc<Generation>> {
        self.published
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn latest(&self) -> Option<Arc<Generation>> {
        self.published
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.published
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ViewPort for RecordingViewPort {
    fn publish(&self, generation: &Arc<Generation>) {
        self.published
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::clone(generation));
    }
}
