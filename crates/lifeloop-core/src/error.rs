//! Error types for grid construction and coordinate access.

use thiserror::Error;

/// Errors from [`Grid`](crate::Grid) construction and accessors.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// A coordinate lies outside `[0, width) x [0, height)`.
    ///
    /// Raised synchronously by every accessor; coordinates are never
    /// clamped or wrapped.
    #[error("cell ({x}, {y}) out of bounds for {width}x{height} grid")]
    OutOfBounds {
        /// Requested column.
        x: i32,
        /// Requested row.
        y: i32,
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },

    /// A dimension is zero or exceeds `i32::MAX`.
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// A replacement grid does not match the existing dimensions.
    #[error("grid dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        /// Dimensions of the active grid as `(width, height)`.
        expected: (u32, u32),
        /// Dimensions of the supplied grid.
        actual: (u32, u32),
    },

    /// A cell buffer's length does not equal `width * height`.
    #[error("cell buffer holds {actual} cells, expected {expected}")]
    BufferLength {
        /// `width * height`.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },
}
