//! Grid storage for the fire automaton

pub mod fire_grid;

// Re-export main types
pub use fire_grid::*;
