//! Fixed-size, bounds-checked cell buffer.

use std::fmt;

use crate::cell::CellState;
use crate::error::GridError;

/// A `width x height` matrix of [`CellState`], stored row-major.
///
/// Dimensions are fixed at construction. Every coordinate accessor checks
/// `0 <= x < width` and `0 <= y < height` and returns
/// [`GridError::OutOfBounds`] otherwise. Wraparound is a step-rule concern
/// (see [`EdgeBehavior`](crate::EdgeBehavior)); the grid never wraps.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<CellState>,
}

impl Grid {
    /// Largest supported dimension: coordinates are carried as `i32`.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// Largest supported cell count.
    pub const MAX_CELLS: usize = u32::MAX as usize;

    /// Whether a `width x height` grid can be built: both dimensions are
    /// in `1..=MAX_DIM` and the cell count fits in [`MAX_CELLS`](Self::MAX_CELLS).
    pub fn supports_dimensions(width: u32, height: u32) -> bool {
        let in_range = |d: u32| (1..=Self::MAX_DIM).contains(&d);
        in_range(width)
            && in_range(height)
            && (width as usize)
                .checked_mul(height as usize)
                .is_some_and(|cells| cells <= Self::MAX_CELLS)
    }

    /// Create an all-dead grid.
    ///
    /// Returns [`GridError::InvalidDimensions`] unless
    /// [`supports_dimensions`](Self::supports_dimensions) holds.
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        Self::check_dimensions(width, height)?;
        let len = (width as usize) * (height as usize);
        Ok(Self {
            width,
            height,
            cells: vec![CellState::Dead; len],
        })
    }

    /// Build a grid from a row-major cell buffer.
    pub fn from_cells(width: u32, height: u32, cells: Vec<CellState>) -> Result<Self, GridError> {
        Self::check_dimensions(width, height)?;
        let expected = (width as usize) * (height as usize);
        if cells.len() != expected {
            return Err(GridError::BufferLength {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Build a grid with the listed `(x, y)` cells alive.
    pub fn with_alive(width: u32, height: u32, alive: &[(i32, i32)]) -> Result<Self, GridError> {
        let mut grid = Self::new(width, height)?;
        for &(x, y) in alive {
            grid.set(x, y, CellState::Alive)?;
        }
        Ok(grid)
    }

    fn check_dimensions(width: u32, height: u32) -> Result<(), GridError> {
        if !Self::supports_dimensions(width, height) {
            return Err(GridError::InvalidDimensions { width, height });
        }
        Ok(())
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Whether `(x, y)` lies inside the grid.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    fn index(&self, x: i32, y: i32) -> Result<usize, GridError> {
        if !self.contains(x, y) {
            return Err(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok((y as usize) * (self.width as usize) + (x as usize))
    }

    /// Read the cell at `(x, y)`.
    pub fn get(&self, x: i32, y: i32) -> Result<CellState, GridError> {
        let idx = self.index(x, y)?;
        Ok(self.cells[idx])
    }

    /// Overwrite the cell at `(x, y)`.
    pub fn set(&mut self, x: i32, y: i32, state: CellState) -> Result<(), GridError> {
        let idx = self.index(x, y)?;
        self.cells[idx] = state;
        Ok(())
    }

    /// Flip the cell at `(x, y)` and return its new state.
    pub fn toggle(&mut self, x: i32, y: i32) -> Result<CellState, GridError> {
        let idx = self.index(x, y)?;
        let next = !self.cells[idx];
        self.cells[idx] = next;
        Ok(next)
    }

    /// A new all-dead grid with the same dimensions.
    pub fn clone_dimensions(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            cells: vec![CellState::Dead; self.cells.len()],
        }
    }

    /// Build a fresh grid of the same dimensions where each cell is
    /// `f(x, y, current)`. Cells are visited in row-major order; `self` is
    /// left untouched.
    pub fn map<F>(&self, mut f: F) -> Self
    where
        F: FnMut(u32, u32, CellState) -> CellState,
    {
        let w = self.width as usize;
        let cells = self
            .cells
            .iter()
            .enumerate()
            .map(|(i, &c)| f((i % w) as u32, (i / w) as u32, c))
            .collect();
        Self {
            width: self.width,
            height: self.height,
            cells,
        }
    }

    /// Row-major view of every cell.
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// One row of cells. Returns `None` if `y` is out of range.
    pub fn row(&self, y: u32) -> Option<&[CellState]> {
        if y >= self.height {
            return None;
        }
        let w = self.width as usize;
        let start = (y as usize) * w;
        Some(&self.cells[start..start + w])
    }

    /// Number of alive cells.
    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Whether every cell is dead.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| !c.is_alive())
    }

    /// Coordinates of alive cells in row-major order.
    pub fn alive_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let w = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_alive())
            .map(move |(i, _)| ((i % w) as i32, (i / w) as i32))
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("alive", &self.alive_count())
            .finish()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.cells.chunks(self.width as usize).enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.as_char())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_grid_is_all_dead() {
        let g = Grid::new(4, 3).unwrap();
        assert_eq!(g.dimensions(), (4, 3));
        assert_eq!(g.cell_count(), 12);
        assert!(g.is_empty());
    }

    #[test]
    fn zero_dimension_is_rejected() {
        assert_eq!(
            Grid::new(0, 5),
            Err(GridError::InvalidDimensions {
                width: 0,
                height: 5
            })
        );
        assert!(matches!(
            Grid::new(5, 0),
            Err(GridError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn oversized_dimension_is_rejected() {
        let big = Grid::MAX_DIM + 1;
        assert!(matches!(
            Grid::new(big, 1),
            Err(GridError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn oversized_cell_count_is_rejected() {
        for (w, h) in [(Grid::MAX_DIM, Grid::MAX_DIM), (65_536, 65_536)] {
            assert_eq!(
                Grid::new(w, h),
                Err(GridError::InvalidDimensions {
                    width: w,
                    height: h
                })
            );
            assert!(matches!(
                Grid::from_cells(w, h, Vec::new()),
                Err(GridError::InvalidDimensions { .. })
            ));
        }
        assert!(Grid::supports_dimensions(65_535, 65_536));
        assert!(Grid::supports_dimensions(Grid::MAX_DIM, 1));
    }

    #[test]
    fn set_then_get() {
        let mut g = Grid::new(5, 5).unwrap();
        g.set(4, 0, CellState::Alive).unwrap();
        assert_eq!(g.get(4, 0), Ok(CellState::Alive));
        assert_eq!(g.get(0, 4), Ok(CellState::Dead));
    }

    #[test]
    fn out_of_bounds_is_reported_not_clamped() {
        let mut g = Grid::new(5, 5).unwrap();
        let err = g.set(5, 0, CellState::Alive).unwrap_err();
        assert_eq!(
            err,
            GridError::OutOfBounds {
                x: 5,
                y: 0,
                width: 5,
                height: 5
            }
        );
        assert!(g.get(-1, 2).is_err());
        assert!(g.get(2, -1).is_err());
        assert!(g.toggle(0, 5).is_err());
        assert!(g.is_empty(), "failed writes must not touch any cell");
    }

    #[test]
    fn toggle_flips_and_returns_new_state() {
        let mut g = Grid::new(3, 3).unwrap();
        assert_eq!(g.toggle(1, 1), Ok(CellState::Alive));
        assert_eq!(g.toggle(1, 1), Ok(CellState::Dead));
        assert!(g.is_empty());
    }

    #[test]
    fn clone_dimensions_is_blank() {
        let g = Grid::with_alive(6, 2, &[(0, 0), (5, 1)]).unwrap();
        let blank = g.clone_dimensions();
        assert_eq!(blank.dimensions(), (6, 2));
        assert!(blank.is_empty());
        assert_eq!(g.alive_count(), 2);
    }

    #[test]
    fn alive_cells_are_x_y_pairs() {
        let g = Grid::with_alive(4, 4, &[(3, 0), (1, 2)]).unwrap();
        let cells: Vec<_> = g.alive_cells().collect();
        assert_eq!(cells, vec![(3, 0), (1, 2)]);
    }

    #[test]
    fn from_cells_checks_length() {
        let err = Grid::from_cells(2, 2, vec![CellState::Dead; 3]).unwrap_err();
        assert_eq!(
            err,
            GridError::BufferLength {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn display_renders_rows() {
        let g = Grid::with_alive(3, 2, &[(1, 0), (2, 1)]).unwrap();
        assert_eq!(g.to_string(), ".#.\n..#");
    }

    #[test]
    fn row_slices() {
        let g = Grid::with_alive(3, 2, &[(0, 1)]).unwrap();
        assert_eq!(
            g.row(1).unwrap(),
            &[CellState::Alive, CellState::Dead, CellState::Dead]
        );
        assert!(g.row(2).is_none());
    }

    #[test]
    fn map_builds_new_buffer() {
        let g = Grid::with_alive(3, 3, &[(0, 0)]).unwrap();
        let inverted = g.map(|_, _, c| !c);
        assert_eq!(inverted.alive_count(), 8);
        assert_eq!(g.alive_count(), 1);
        let diagonal = g.map(|x, y, _| CellState::from(x == y));
        assert_eq!(diagonal.alive_cells().collect::<Vec<_>>(), vec![(0, 0), (1, 1), (2, 2)]);
    }

    proptest! {
        #[test]
        fn accessors_agree_with_contains(
            w in 1u32..12,
            h in 1u32..12,
            x in -3i32..15,
            y in -3i32..15,
        ) {
            let mut g = Grid::new(w, h).unwrap();
            let inside = g.contains(x, y);
            prop_assert_eq!(g.get(x, y).is_ok(), inside);
            prop_assert_eq!(g.set(x, y, CellState::Alive).is_ok(), inside);
            prop_assert_eq!(g.alive_count(), usize::from(inside));
        }
    }
}
