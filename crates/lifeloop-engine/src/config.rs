//! Simulation configuration, validation, and error types.
//!
//! [`SimConfig`] is the construction input for a
//! [`Simulation`](crate::simulation::Simulation).
//! [`validate()`](SimConfig::validate) checks every structural invariant
//! before any thread or buffer is created.

use std::time::Duration;

use lifeloop_core::{EdgeBehavior, Grid};
use thiserror::Error;

/// Default grid width.
pub const DEFAULT_WIDTH: u32 = 64;
/// Default grid height.
pub const DEFAULT_HEIGHT: u32 = 64;
/// Default time between generations.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(100);
/// Default number of tick outputs retained for history lookups.
pub const DEFAULT_HISTORY_CAPACITY: usize = 16;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`SimConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Width or height is zero or exceeds `i32::MAX`.
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions {
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
    },
    /// The tick period is zero.
    #[error("tick period must be non-zero")]
    InvalidTickPeriod,
    /// History ring capacity is below the minimum of 2.
    #[error("history capacity {configured} is below minimum of 2")]
    HistoryTooSmall {
        /// The configured capacity.
        configured: usize,
    },
    /// Random soup density outside `[0, 1]`.
    #[error("density must be within [0, 1], got {value}")]
    InvalidDensity {
        /// The configured density.
        value: f64,
    },
}

// ── SimConfig ──────────────────────────────────────────────────────

/// Complete configuration for constructing a simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    /// Grid width in cells. Default: 64.
    pub width: u32,
    /// Grid height in cells. Default: 64.
    pub height: u32,
    /// Time between generations while running. Default: 100ms.
    pub tick_period: Duration,
    /// Neighbourhood edge behavior. Default: [`EdgeBehavior::Absorb`].
    pub edge: EdgeBehavior,
    /// Number of recent tick outputs retained. Default: 16. Minimum: 2.
    pub history_capacity: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tick_period: DEFAULT_TICK_PERIOD,
            edge: EdgeBehavior::Absorb,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl SimConfig {
    /// Configuration with the given dimensions and period; everything else
    /// takes its default.
    pub fn new(width: u32, height: u32, tick_period: Duration) -> Self {
        Self {
            width,
            height,
            tick_period,
            ..Self::default()
        }
    }

    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Grid must be constructible.
        if !Grid::supports_dimensions(self.width, self.height) {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        // 2. A zero period would spin the tick thread.
        if self.tick_period.is_zero() {
            return Err(ConfigError::InvalidTickPeriod);
        }
        // 3. History ring >= 2.
        if self.history_capacity < 2 {
            return Err(ConfigError::HistoryTooSmall {
                configured: self.history_capacity,
            });
        }
        Ok(())
    }
}
