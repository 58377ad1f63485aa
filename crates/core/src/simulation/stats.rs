//! Run statistics for driver reports

use crate::core_types::Cell;
use crate::grid::Grid;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of cells in each state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellCounts {
    pub empty: usize,
    pub grass: usize,
    pub tree: usize,
    pub burning: usize,
    pub burnt: usize,
}

impl CellCounts {
    /// Tally every cell of `grid` in one pass
    pub fn from_grid(grid: &Grid) -> Self {
        let mut counts = CellCounts::default();
        for &cell in grid.cells() {
            match cell {
                Cell::Empty => counts.empty += 1,
                Cell::Grass => counts.grass += 1,
                Cell::Tree => counts.tree += 1,
                Cell::Burning => counts.burning += 1,
                Cell::Burnt => counts.burnt += 1,
            }
        }
        counts
    }

    /// Count for a single state
    pub fn get(&self, state: Cell) -> usize {
        match state {
            Cell::Empty => self.empty,
            Cell::Grass => self.grass,
            Cell::Tree => self.tree,
            Cell::Burning => self.burning,
            Cell::Burnt => self.burnt,
        }
    }

    /// Total number of cells
    pub fn total(&self) -> usize {
        self.empty + self.grass + self.tree + self.burning + self.burnt
    }

    /// Fraction of all cells that are burning or burnt
    pub fn fire_affected_fraction(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            (self.burning + self.burnt) as f64 / total as f64
        }
    }
}

impl fmt::Display for CellCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "grass={} tree={} burning={} burnt={} empty={}",
            self.grass, self.tree, self.burning, self.burnt, self.empty
        )
    }
}

/// Cumulative statistics of a [`FireSimulation`](super::FireSimulation)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationStats {
    /// Ticks advanced since creation or last reset
    pub tick: u64,
    /// Current cell tally
    pub counts: CellCounts,
    /// Cells ignited by spread since reset
    pub total_ignitions: u64,
    /// Cells burned out since reset
    pub total_burnouts: u64,
}
