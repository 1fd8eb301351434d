//! Deterministic random starting grids.

use lifeloop_core::{CellState, Grid};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::ConfigError;
use crate::simulation::SimulationError;

/// A `width x height` grid where each cell is alive with probability
/// `density`.
///
/// The same `seed` always produces the same grid. `density` must lie in
/// `[0, 1]`; anything else (including NaN) is
/// [`ConfigError::InvalidDensity`].
pub fn random_soup(
    width: u32,
    height: u32,
    density: f64,
    seed: u64,
) -> Result<Grid, SimulationError> {
    if !(0.0..=1.0).contains(&density) {
        return Err(ConfigError::InvalidDensity { value: density }.into());
    }
    let blank = Grid::new(width, height)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Ok(blank.map(|_, _, _| CellState::from(rng.random_bool(density))))
}
