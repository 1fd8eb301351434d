//! Core types for the lifeloop Game of Life engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! cell state, the bounds-checked [`Grid`], immutable [`Generation`]
//! snapshots, the [`EdgeBehavior`] neighbourhood policy, error types, and
//! the [`ViewPort`] trait through which renderers receive generations.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod edge;
pub mod error;
pub mod generation;
pub mod grid;
pub mod id;
pub mod traits;

pub use cell::CellState;
pub use edge::EdgeBehavior;
pub use error::GridError;
pub use generation::Generation;
pub use grid::Grid;
pub use id::GenerationId;
pub use traits::{NullViewPort, ViewPort};
