//! The Life rule: neighbour counting and next-generation computation.
//!
//! [`StepEngine`] is a pure transform. It reads one grid and returns a
//! freshly allocated successor; the input is never written, so a reader of
//! the previous generation is unaffected by the computation of the next.

use lifeloop_core::{CellState, EdgeBehavior, Grid};
use smallvec::SmallVec;

/// All 8 neighbour offsets as `(dx, dy)`: NW, N, NE, W, E, SW, S, SE.
const OFFSETS_8: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// B3/S23: birth on exactly 3 neighbours, survival on 2 or 3.
pub fn rule(current: CellState, neighbours: u8) -> CellState {
    match (current, neighbours) {
        (_, 3) => CellState::Alive,
        (CellState::Alive, 2) => CellState::Alive,
        _ => CellState::Dead,
    }
}

/// Result of [`StepEngine::advance`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepOutput {
    /// The next generation's cells.
    pub grid: Grid,
    /// Cells that went from dead to alive.
    pub births: usize,
    /// Cells that went from alive to dead.
    pub deaths: usize,
    /// Alive cells in `grid`.
    pub alive: usize,
}

/// Computes successive generations under the Life rule.
///
/// With the default [`EdgeBehavior::Absorb`], neighbours outside the grid
/// count as dead and every lookup stays in `[0, width) x [0, height)`.
/// [`EdgeBehavior::Wrap`] selects a toroidal neighbourhood.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepEngine {
    edge: EdgeBehavior,
}

impl StepEngine {
    /// Create an engine with the given edge behavior.
    pub fn new(edge: EdgeBehavior) -> Self {
        Self { edge }
    }

    /// The edge behavior used for neighbour lookup.
    pub fn edge(&self) -> EdgeBehavior {
        self.edge
    }

    /// Resolved neighbour coordinates of `(x, y)`.
    ///
    /// Under `Absorb` a corner has 3 and an edge cell 5. Under `Wrap` every
    /// cell has 8 entries, which may repeat on grids narrower than 3.
    pub fn neighbours(&self, grid: &Grid, x: u32, y: u32) -> SmallVec<[(u32, u32); 8]> {
        let (w, h) = grid.dimensions();
        OFFSETS_8
            .iter()
            .filter_map(|&(dx, dy)| {
                let nx = self.edge.resolve_axis(i64::from(x) + dx, w)?;
                let ny = self.edge.resolve_axis(i64::from(y) + dy, h)?;
                Some((nx, ny))
            })
            .collect()
    }

    /// Number of alive neighbours of `(x, y)`.
    pub fn neighbour_count(&self, grid: &Grid, x: u32, y: u32) -> u8 {
        let (w, h) = grid.dimensions();
        let cells = grid.cells();
        let mut count = 0u8;
        for (dx, dy) in OFFSETS_8 {
            let Some(nx) = self.edge.resolve_axis(i64::from(x) + dx, w) else {
                continue;
            };
            let Some(ny) = self.edge.resolve_axis(i64::from(y) + dy, h) else {
                continue;
            };
            if cells[(ny as usize) * (w as usize) + nx as usize].is_alive() {
                count += 1;
            }
        }
        count
    }

    /// Compute the next grid.
    pub fn step(&self, grid: &Grid) -> Grid {
        self.advance(grid).grid
    }

    /// Compute the next grid along with birth and death counts.
    pub fn advance(&self, grid: &Grid) -> StepOutput {
        let mut births = 0;
        let mut deaths = 0;
        let mut alive = 0;
        let next = grid.map(|x, y, current| {
            let state = rule(current, self.neighbour_count(grid, x, y));
            match (current, state) {
                (CellState::Dead, CellState::Alive) => births += 1,
                (CellState::Alive, CellState::Dead) => deaths += 1,
                _ => {}
            }
            if state.is_alive() {
                alive += 1;
            }
            state
        });
        StepOutput {
            grid: next,
            births,
            deaths,
            alive,
        }
    }
}
