//! 2D fire grid: cell states plus sparse burn timers
//!
//! The grid stores one [`Cell`] per position in row-major order and a sparse
//! map of burn timers for burning cells. It has no transition logic; the
//! simulator reads one grid and writes the next.
//!
//! # Timer invariant
//!
//! A coordinate has a burn timer iff its cell is `Burning`. Every mutation
//! keeps this except a raw [`Grid::set`] to `Burning`, which leaves the timer
//! unregistered; the next simulation step registers it.

use crate::config::{SimulationConfig, BURNING_DURATION};
use crate::core_types::{Cell, Coord, Probability};
use crate::error::{FireSimError, Result};
use rustc_hash::FxHashMap;
use std::fmt;

/// Offsets of the orthogonal neighbours: left, right, up, down
const NEIGHBOR_OFFSETS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Rectangular grid of cell states with burn timers
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Cells in row-major order: `[y * cols + x]`
    cells: Vec<Cell>,
    /// Remaining burn ticks per burning coordinate
    burn_timers: FxHashMap<Coord, u32>,
    /// Countdown assigned to newly ignited cells
    burn_duration: u32,
}

impl Grid {
    /// Create a grid with every cell set to `initial` and no timers
    pub fn new(rows: usize, cols: usize, initial: Cell) -> Self {
        Grid {
            rows,
            cols,
            cells: vec![initial; rows * cols],
            burn_timers: FxHashMap::default(),
            burn_duration: BURNING_DURATION,
        }
    }

    /// Create an all-grass grid
    pub fn with_dimensions(rows: usize, cols: usize) -> Self {
        Self::new(rows, cols, Cell::Grass)
    }

    /// Create an all-grass grid sized and timed from `config`
    ///
    /// # Errors
    /// Returns `InvalidArgument` if the configuration does not validate
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        let dims = config.dimensions()?;
        Ok(Self::with_dimensions(dims.rows, dims.cols).with_burn_duration(config.burn_duration))
    }

    /// Set the countdown used by [`Grid::ignite`]
    pub fn with_burn_duration(mut self, ticks: u32) -> Self {
        self.burn_duration = ticks;
        self
    }

    /// Number of rows (y extent)
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (x extent)
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Countdown assigned to newly ignited cells
    #[inline]
    pub fn burn_duration(&self) -> u32 {
        self.burn_duration
    }

    /// Whether `(x, y)` lies inside the grid
    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.cols && y < self.rows
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Result<usize> {
        if self.in_bounds(x, y) {
            Ok(y * self.cols + x)
        } else {
            Err(FireSimError::out_of_bounds(x, y, self.cols, self.rows))
        }
    }

    /// Get the state of cell `(x, y)`
    ///
    /// # Errors
    /// Returns `OutOfBounds` if `(x, y)` is outside the grid
    pub fn get(&self, x: usize, y: usize) -> Result<Cell> {
        let idx = self.index(x, y)?;
        Ok(self.cells[idx])
    }

    /// Overwrite the state of cell `(x, y)`
    ///
    /// Replacing a burning cell drops its timer. Setting `Burning` does not
    /// register a timer; use [`Grid::ignite`] for that.
    ///
    /// # Errors
    /// Returns `OutOfBounds` if `(x, y)` is outside the grid
    pub fn set(&mut self, x: usize, y: usize, state: Cell) -> Result<()> {
        let idx = self.index(x, y)?;
        self.cells[idx] = state;
        if state != Cell::Burning {
            self.burn_timers.remove(&(x, y));
        }
        Ok(())
    }

    /// Set cell `(x, y)` on fire with a full burn timer
    ///
    /// Igniting a cell that is already burning restarts its countdown.
    ///
    /// # Errors
    /// Returns `OutOfBounds` if `(x, y)` is outside the grid
    pub fn ignite(&mut self, x: usize, y: usize) -> Result<()> {
        let idx = self.index(x, y)?;
        self.cells[idx] = Cell::Burning;
        self.burn_timers.insert((x, y), self.burn_duration);
        Ok(())
    }

    /// Write `state` at a known-valid index, keeping timers consistent
    fn place(&mut self, idx: usize, state: Cell) {
        let coord = (idx % self.cols, idx / self.cols);
        self.cells[idx] = state;
        if state == Cell::Burning {
            self.burn_timers.insert(coord, self.burn_duration);
        } else {
            self.burn_timers.remove(&coord);
        }
    }

    /// Turn every `Burnt` cell into `state` ("make it rain")
    ///
    /// Returns the number of cells changed.
    pub fn extinguish_burnt(&mut self, state: Cell) -> usize {
        let mut changed = 0;
        for idx in 0..self.cells.len() {
            if self.cells[idx] == Cell::Burnt {
                self.place(idx, state);
                changed += 1;
            }
        }
        changed
    }

    /// Independently set each cell to `state` with probability `density`
    ///
    /// At most one draw per cell, cells already in `state` included. Returns the
    /// number of cells written.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `density` is NaN or outside `[0, 1]`
    pub fn scatter<R: rand::Rng + ?Sized>(
        &mut self,
        density: f64,
        state: Cell,
        rng: &mut R,
    ) -> Result<usize> {
        let density = Probability::new("density", density)?;
        let mut written = 0;
        for idx in 0..self.cells.len() {
            if density.sample(rng) {
                self.place(idx, state);
                written += 1;
            }
        }
        Ok(written)
    }

    /// Refill every cell with `initial` and drop all timers
    pub fn reset(&mut self, initial: Cell) {
        self.cells.fill(initial);
        self.burn_timers.clear();
    }

    /// In-bounds orthogonal neighbours of `(x, y)` in the order left, right, up, down
    pub fn neighbors4(&self, x: usize, y: usize) -> impl Iterator<Item = Coord> + '_ {
        NEIGHBOR_OFFSETS.into_iter().filter_map(move |(dx, dy)| {
            let nx = x.checked_add_signed(dx)?;
            let ny = y.checked_add_signed(dy)?;
            self.in_bounds(nx, ny).then_some((nx, ny))
        })
    }

    /// Whether any orthogonal neighbour of `(x, y)` is `Burning`
    pub fn has_burning_neighbor(&self, x: usize, y: usize) -> bool {
        self.neighbors4(x, y)
            .any(|(nx, ny)| self.cells[ny * self.cols + nx] == Cell::Burning)
    }

    /// Full row-major snapshot of cell states
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate over rows, top to bottom
    pub fn rows_iter(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols.max(1))
    }

    /// Remaining ticks for a burning cell, `None` if it has no timer
    pub fn burn_timer(&self, x: usize, y: usize) -> Option<u32> {
        self.burn_timers.get(&(x, y)).copied()
    }

    /// All registered burn timers
    pub fn burn_timers(&self) -> &FxHashMap<Coord, u32> {
        &self.burn_timers
    }

    pub(crate) fn burn_timers_mut(&mut self) -> &mut FxHashMap<Coord, u32> {
        &mut self.burn_timers
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Number of cells in `state`
    pub fn count(&self, state: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == state).count()
    }

    /// Check the timer invariant: timers exactly cover the burning cells
    pub fn timers_consistent(&self) -> bool {
        let burning = self.count(Cell::Burning);
        burning == self.burn_timers.len()
            && self
                .burn_timers
                .keys()
                .all(|&(x, y)| self.get(x, y) == Ok(Cell::Burning))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows_iter() {
            let line: String = row.iter().map(|c| c.glyph()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
