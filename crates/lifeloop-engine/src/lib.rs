//! Stepping engine for the lifeloop Game of Life.
//!
//! Provides the Life rule ([`StepEngine`]), the background tick loop, and
//! the [`Simulation`] that mediates concurrent edits and snapshots against
//! it. Editors go through [`EditPort`]; renderers receive generations
//! through a [`ViewPort`](lifeloop_core::ViewPort) such as
//! [`ChannelViewPort`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod active;
pub mod config;
pub mod metrics;
pub mod port;
pub mod ring;
pub mod seed;
pub mod simulation;
pub mod step;
mod tick_thread;
pub mod viewport;

pub use config::{ConfigError, SimConfig};
pub use metrics::TickMetrics;
pub use port::EditPort;
pub use ring::GenerationRing;
pub use seed::random_soup;
pub use simulation::{RunState, Simulation, SimulationError};
pub use step::{rule, StepEngine, StepOutput};
pub use viewport::ChannelViewPort;
