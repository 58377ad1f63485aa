//! Forest Fire Core Library
//!
//! A cellular automaton of fire spreading over a 2D grid of grass and trees.
//! Each cell is empty, grass, tree, burning or burnt; every tick, trees next to
//! a fire ignite, grass next to a fire ignites with a fixed probability, and
//! burning cells burn out after a fixed number of ticks.
//!
//! ## Layout
//!
//! - [`grid`]: cell storage, burn timers, neighbour queries and direct mutation
//! - [`simulation`]: the per-tick rule ([`Simulator`]), input [`Action`]s and
//!   the driver-facing [`FireSimulation`]
//! - [`config`]: tunable constants ([`SimulationConfig`])
//!
//! ## Example
//!
//! ```
//! use forest_fire_core::{Cell, Grid, Probability, Simulator};
//!
//! let mut grid = Grid::new(5, 5, Cell::Tree);
//! grid.ignite(2, 2).unwrap();
//!
//! let mut sim = Simulator::seeded(Probability::ZERO, 7);
//! let next = sim.step(&grid);
//! assert_eq!(next.get(1, 2).unwrap(), Cell::Burning);
//! ```

pub mod config;
pub mod core_types;
pub mod error;
pub mod grid;
pub mod simulation;

// Re-export core types
pub use config::{GridDimensions, SimulationConfig};
pub use core_types::{Cell, Coord, Probability};
pub use error::{FireSimError, Result};
pub use grid::Grid;
pub use simulation::{
    Action, ActionQueue, CellCounts, FireSimulation, SimulationStats, Simulator, StepSummary,
};
