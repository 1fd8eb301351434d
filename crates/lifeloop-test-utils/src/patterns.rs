//! Canonical Life patterns placed on blank grids.
//!
//! Each builder panics if the pattern does not fit at the given offset.

use lifeloop_core::Grid;

fn place(width: u32, height: u32, ox: i32, oy: i32, cells: &[(i32, i32)]) -> Grid {
    let shifted: Vec<_> = cells.iter().map(|&(x, y)| (x + ox, y + oy)).collect();
    Grid::with_alive(width, height, &shifted).expect("pattern does not fit")
}

/// Horizontal blinker at (1,2),(2,2),(3,2) on a 5x5 grid.
pub fn blinker() -> Grid {
    place(5, 5, 0, 0, &[(1, 2), (2, 2), (3, 2)])
}

/// 2x2 block with its top-left corner at `(ox, oy)`.
pub fn block(width: u32, height: u32, ox: i32, oy: i32) -> Grid {
    place(width, height, ox, oy, &[(0, 0), (1, 0), (0, 1), (1, 1)])
}

/// South-east travelling glider in a 3x3 box at `(ox, oy)`:
///
/// ```text
/// .#.
/// ..#
/// ###
/// ```
pub fn glider(width: u32, height: u32, ox: i32, oy: i32) -> Grid {
    place(width, height, ox, oy, &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)])
}
