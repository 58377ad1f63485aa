//! Simulation configuration
//!
//! Every tunable constant of the automaton lives in [`SimulationConfig`]:
//! world and cell size (which fix the grid dimensions), burn duration,
//! grass ignition probability and the default random-planting density.
//! Defaults reproduce an 800×600 world of 10-unit cells (60 rows × 80 columns).

use crate::core_types::{Coord, Probability};
use crate::error::{FireSimError, Result};
use serde::{Deserialize, Serialize};

/// Default world width in world units (pixels for the drivers)
pub const DEFAULT_WORLD_WIDTH: u32 = 800;
/// Default world height in world units
pub const DEFAULT_WORLD_HEIGHT: u32 = 600;
/// Default edge length of one square cell in world units
pub const DEFAULT_CELL_SIZE: u32 = 10;
/// Number of ticks a cell burns before turning to `Burnt`
pub const BURNING_DURATION: u32 = 5;
/// Chance that grass next to a fire ignites in one tick
pub const GRASS_IGNITION_PROBABILITY: f64 = 0.1;
/// Default share of cells turned into trees by random planting
pub const DEFAULT_TREE_DENSITY: f64 = 0.1;

/// Grid extent derived from world size and cell size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDimensions {
    /// Number of rows (y extent)
    pub rows: usize,
    /// Number of columns (x extent)
    pub cols: usize,
    /// Edge length of a cell in world units
    pub cell_size: u32,
}

impl GridDimensions {
    /// Map a world coordinate (e.g. a mouse position) to the cell under it
    ///
    /// Returns `None` when the point lies outside the grid.
    pub fn cell_at(&self, world_x: u32, world_y: u32) -> Option<Coord> {
        if self.cell_size == 0 {
            return None;
        }
        let x = (world_x / self.cell_size) as usize;
        let y = (world_y / self.cell_size) as usize;
        (x < self.cols && y < self.rows).then_some((x, y))
    }
}

/// Tunable parameters of the fire automaton
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// World width in world units
    pub world_width: u32,
    /// World height in world units
    pub world_height: u32,
    /// Cell edge length in world units
    pub cell_size: u32,
    /// Ticks a cell stays `Burning` after ignition
    pub burn_duration: u32,
    /// Probability that grass next to a burning cell ignites per tick
    pub grass_ignition_probability: Probability,
    /// Default density for random tree planting
    pub tree_density: Probability,
    /// Seed for the simulator's random source (`None` = entropy)
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            world_width: DEFAULT_WORLD_WIDTH,
            world_height: DEFAULT_WORLD_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            burn_duration: BURNING_DURATION,
            grass_ignition_probability: Probability(GRASS_IGNITION_PROBABILITY),
            tree_density: Probability(DEFAULT_TREE_DENSITY),
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Configuration for a grid of exactly `rows × cols` cells of size 1
    pub fn with_grid(rows: usize, cols: usize) -> Self {
        Self {
            world_width: cols as u32,
            world_height: rows as u32,
            cell_size: 1,
            ..Self::default()
        }
    }

    /// Set the world size in world units
    pub fn with_world_size(mut self, width: u32, height: u32) -> Self {
        self.world_width = width;
        self.world_height = height;
        self
    }

    /// Set the cell edge length
    pub fn with_cell_size(mut self, cell_size: u32) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Set the burn duration in ticks
    pub fn with_burn_duration(mut self, ticks: u32) -> Self {
        self.burn_duration = ticks;
        self
    }

    /// Set the grass ignition probability
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `p` is outside `[0, 1]`
    pub fn with_grass_ignition_probability(mut self, p: f64) -> Result<Self> {
        self.grass_ignition_probability = Probability::new("grass_ignition_probability", p)?;
        Ok(self)
    }

    /// Set the default random-planting density
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `density` is outside `[0, 1]`
    pub fn with_tree_density(mut self, density: f64) -> Result<Self> {
        self.tree_density = Probability::new("tree_density", density)?;
        Ok(self)
    }

    /// Fix the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every field
    ///
    /// # Errors
    /// Returns `InvalidArgument` for a zero cell size, a world smaller than one
    /// cell, or a zero burn duration
    pub fn validate(&self) -> Result<()> {
        if self.cell_size == 0 {
            return Err(FireSimError::invalid_argument(
                "cell_size",
                self.cell_size,
                "must be positive",
            ));
        }
        if self.world_width < self.cell_size {
            return Err(FireSimError::invalid_argument(
                "world_width",
                self.world_width,
                "must hold at least one cell",
            ));
        }
        if self.world_height < self.cell_size {
            return Err(FireSimError::invalid_argument(
                "world_height",
                self.world_height,
                "must hold at least one cell",
            ));
        }
        if self.burn_duration == 0 {
            return Err(FireSimError::invalid_argument(
                "burn_duration",
                self.burn_duration,
                "must be at least one tick",
            ));
        }
        Ok(())
    }

    /// Grid dimensions implied by world size and cell size
    ///
    /// Partial cells at the right and bottom edges are dropped.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if the configuration does not validate
    pub fn dimensions(&self) -> Result<GridDimensions> {
        self.validate()?;
        Ok(GridDimensions {
            rows: (self.world_height / self.cell_size) as usize,
            cols: (self.world_width / self.cell_size) as usize,
            cell_size: self.cell_size,
        })
    }
}
