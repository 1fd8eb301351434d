//! lifeloop: a live Game of Life engine.
//!
//! This is the top-level facade crate that re-exports the public API of the
//! lifeloop sub-crates. Adding `lifeloop` as a single dependency is enough
//! for most users.
//!
//! # Quick start
//!
//! ```rust
//! use lifeloop::prelude::*;
//! use std::time::Duration;
//!
//! // A 5x5 grid stepping every 100 ms.
//! let sim = Simulation::new(5, 5, Duration::from_millis(100)).unwrap();
//!
//! // Draw a horizontal blinker and advance one generation by hand.
//! for x in 1..=3 {
//!     sim.edit(x, 2, CellState::Alive).unwrap();
//! }
//! let next = sim.step_once().unwrap();
//! assert_eq!(next.id(), GenerationId(1));
//! assert_eq!(next.get(2, 1), Ok(CellState::Alive));
//! assert_eq!(next.get(1, 2), Ok(CellState::Dead));
//!
//! // Out-of-range edits are reported, never clamped.
//! assert!(sim.edit(5, 0, CellState::Alive).is_err());
//!
//! // Run in the background, then clear everything.
//! sim.start().unwrap();
//! sim.reset().unwrap();
//! assert!(sim.snapshot().grid().is_empty());
//! assert_eq!(sim.run_state(), RunState::Stopped);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `lifeloop-core` | Cells, grids, generations, edge policy, `ViewPort` |
//! | [`engine`] | `lifeloop-engine` | Step rule, `Simulation`, `EditPort`, config, metrics |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types (`lifeloop-core`).
///
/// [`types::Grid`], [`types::Generation`], [`types::CellState`] and the
/// [`types::ViewPort`] trait renderers implement.
pub use lifeloop_core as types;

/// Stepping engine (`lifeloop-engine`).
///
/// [`engine::Simulation`] drives the tick thread; [`engine::StepEngine`]
/// is the pure Life rule.
pub use lifeloop_engine as engine;

/// Common imports for typical lifeloop usage.
///
/// ```rust
/// use lifeloop::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use lifeloop_core::{
        CellState, EdgeBehavior, Generation, GenerationId, Grid, NullViewPort, ViewPort,
    };

    // Errors
    pub use lifeloop_core::GridError;
    pub use lifeloop_engine::{ConfigError, SimulationError};

    // Engine
    pub use lifeloop_engine::{
        ChannelViewPort, EditPort, RunState, SimConfig, Simulation, StepEngine, TickMetrics,
    };
}
