//! Per-tick transition rule
//!
//! [`Simulator::step`] reads the current grid and writes a fresh one, so every
//! neighbour lookup sees the tick-`t` snapshot no matter the scan order:
//!
//! | Current  | Next                                                        |
//! |----------|-------------------------------------------------------------|
//! | Burning  | timer counts down; `Burnt` when it reaches zero             |
//! | Tree     | `Burning` if any orthogonal neighbour is burning            |
//! | Grass    | `Burning` with probability `p` if a neighbour is burning    |
//! | Empty    | unchanged                                                   |
//! | Burnt    | unchanged                                                   |
//!
//! A burning cell without a timer (placed with a raw `set`) gets a full timer
//! on its first step and starts counting down on the next. Cells ignited by
//! spread get their timer immediately, so they burn for exactly the grid's
//! burn duration.

use crate::config::SimulationConfig;
use crate::core_types::{Cell, Probability};
use crate::grid::Grid;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::hash_map::Entry;
use tracing::trace;

/// What changed during one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepSummary {
    /// Grass or tree cells that caught fire
    pub ignitions: usize,
    /// Burning cells that turned to `Burnt`
    pub burnouts: usize,
    /// Burning cells that received their first timer
    pub timers_started: usize,
}

/// Computes grid state `t + 1` from state `t`
///
/// Holds no state between steps except the random source, which is consumed
/// only for grass cells next to a fire.
#[derive(Debug, Clone)]
pub struct Simulator<R = StdRng> {
    grass_ignition_probability: Probability,
    rng: R,
}

impl Simulator<StdRng> {
    /// Create a simulator from `config`
    ///
    /// Uses `config.seed` when set, otherwise an OS-seeded generator.
    pub fn new(config: &SimulationConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(config.grass_ignition_probability, rng)
    }

    /// Create a deterministic simulator
    pub fn seeded(grass_ignition_probability: Probability, seed: u64) -> Self {
        Self::with_rng(grass_ignition_probability, StdRng::seed_from_u64(seed))
    }
}

impl<R: rand::Rng> Simulator<R> {
    /// Create a simulator drawing from an injected random source
    pub fn with_rng(grass_ignition_probability: Probability, rng: R) -> Self {
        Simulator {
            grass_ignition_probability,
            rng,
        }
    }

    /// Probability that grass next to a fire ignites in one tick
    pub fn grass_ignition_probability(&self) -> Probability {
        self.grass_ignition_probability
    }

    /// Change the grass ignition probability between steps
    pub fn set_grass_ignition_probability(&mut self, p: Probability) {
        self.grass_ignition_probability = p;
    }

    /// Mutable access to the random source (for driver-side scatter)
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Advance `grid` by one tick and return the new grid
    ///
    /// The input is left untouched.
    pub fn step(&mut self, grid: &Grid) -> Grid {
        self.step_with_summary(grid).0
    }

    /// Advance `grid` by one tick in place
    pub fn step_in_place(&mut self, grid: &mut Grid) -> StepSummary {
        let (next, summary) = self.step_with_summary(grid);
        *grid = next;
        summary
    }

    /// Advance `grid` by one tick, also reporting what changed
    pub fn step_with_summary(&mut self, grid: &Grid) -> (Grid, StepSummary) {
        let mut next = grid.clone();
        let mut summary = StepSummary::default();
        let cols = grid.cols();
        let duration = grid.burn_duration();

        for (idx, &cell) in grid.cells().iter().enumerate() {
            if cell.is_inert() {
                continue;
            }
            let (x, y) = (idx % cols, idx / cols);

            if cell == Cell::Burning {
                let burnt_out = match next.burn_timers_mut().entry((x, y)) {
                    Entry::Vacant(slot) => {
                        slot.insert(duration);
                        summary.timers_started += 1;
                        false
                    }
                    Entry::Occupied(mut timer) => {
                        let remaining = timer.get().saturating_sub(1);
                        if remaining == 0 {
                            timer.remove();
                            true
                        } else {
                            timer.insert(remaining);
                            false
                        }
                    }
                };
                if burnt_out {
                    next.cells_mut()[idx] = Cell::Burnt;
                    summary.burnouts += 1;
                }
                continue;
            }

            // Trees always catch; grass only on a successful draw
            let ignites = cell.is_flammable()
                && grid.has_burning_neighbor(x, y)
                && (cell == Cell::Tree || self.grass_ignition_probability.sample(&mut self.rng));

            if ignites {
                next.cells_mut()[idx] = Cell::Burning;
                next.burn_timers_mut().insert((x, y), duration);
                summary.ignitions += 1;
            }
        }

        trace!(
            ignitions = summary.ignitions,
            burnouts = summary.burnouts,
            timers_started = summary.timers_started,
            "Fire step complete"
        );

        (next, summary)
    }
}
