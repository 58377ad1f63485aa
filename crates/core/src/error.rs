//! Error type shared by every fallible grid and simulation operation
//!
//! The core performs no I/O, so there are only two failure modes: a coordinate
//! that falls outside the grid, and a parameter outside its valid range.

use std::fmt;

/// Errors returned by grid access, mutation and configuration
#[derive(Debug, Clone, PartialEq)]
pub enum FireSimError {
    /// Coordinate outside `[0, cols) × [0, rows)`
    OutOfBounds {
        /// Requested column
        x: usize,
        /// Requested row
        y: usize,
        /// Grid width in cells
        cols: usize,
        /// Grid height in cells
        rows: usize,
    },
    /// Parameter value rejected by validation
    InvalidArgument {
        /// Name of the offending parameter (e.g. `"density"`)
        name: &'static str,
        /// Offending value, formatted for display
        value: String,
        /// What the value must satisfy
        reason: &'static str,
    },
}

impl FireSimError {
    /// Create an `OutOfBounds` error for a grid of `cols × rows`
    pub fn out_of_bounds(x: usize, y: usize, cols: usize, rows: usize) -> Self {
        FireSimError::OutOfBounds { x, y, cols, rows }
    }

    /// Create an `InvalidArgument` error
    ///
    /// # Arguments
    /// * `name` - Parameter name (e.g. `"density"`, `"burn_duration"`)
    /// * `value` - The rejected value
    /// * `reason` - Constraint the value violated
    pub fn invalid_argument(
        name: &'static str,
        value: impl fmt::Display,
        reason: &'static str,
    ) -> Self {
        FireSimError::InvalidArgument {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// True for coordinate errors, which drivers are expected to ignore
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, FireSimError::OutOfBounds { .. })
    }
}

impl fmt::Display for FireSimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FireSimError::OutOfBounds { x, y, cols, rows } => {
                write!(f, "Cell ({x}, {y}) is outside the {cols}x{rows} grid")
            }
            FireSimError::InvalidArgument {
                name,
                value,
                reason,
            } => write!(f, "Invalid {name} = {value}: {reason}"),
        }
    }
}

impl std::error::Error for FireSimError {}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, FireSimError>;
