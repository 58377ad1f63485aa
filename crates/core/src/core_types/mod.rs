//! Core types and utilities

pub mod cell;
pub mod units;

pub use cell::{Cell, Coord};
pub use units::Probability;
