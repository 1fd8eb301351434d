//! Benchmark profiles for the lifeloop engine.
//!
//! - [`reference_profile`]: the 64x64, 100 ms configuration the editor ships with
//! - [`stress_profile`]: 256x256 for timing the step rule at scale
//! - [`soup`]: a seeded starting grid for either

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::time::Duration;

use lifeloop_core::{EdgeBehavior, Grid};
use lifeloop_engine::{random_soup, SimConfig, SimulationError};

/// Soup density used by every profile.
pub const SOUP_DENSITY: f64 = 0.35;

/// The reference editor configuration: 64x64 at 100 ms, bounded edges.
pub fn reference_profile() -> SimConfig {
    SimConfig::default()
}

/// 256x256 (~65K cells) with the given edge behavior and a 1 ms period.
pub fn stress_profile(edge: EdgeBehavior) -> SimConfig {
    SimConfig {
        edge,
        ..SimConfig::new(256, 256, Duration::from_millis(1))
    }
}

/// A seeded random grid sized for `config`.
pub fn soup(config: &SimConfig, seed: u64) -> Result<Grid, SimulationError> {
    random_soup(config.width, config.height, SOUP_DENSITY, seed)
}
