//! Fire simulation: transition rule, input actions and a driver-facing owner
//!
//! [`Simulator`] is the pure per-tick rule. [`FireSimulation`] bundles a grid,
//! a simulator, an [`ActionQueue`] and running statistics; drivers hold one of
//! these, submit actions from input events and call [`FireSimulation::update`]
//! once per unpaused frame.

pub mod action_queue;
pub mod simulator;
pub mod stats;

pub use action_queue::{Action, ActionQueue, ActionRecord};
pub use simulator::{Simulator, StepSummary};
pub use stats::{CellCounts, SimulationStats};

use crate::config::SimulationConfig;
use crate::core_types::{Cell, Probability};
use crate::error::Result;
use crate::grid::Grid;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

/// Grid plus simulator plus pending input, advanced one tick at a time
pub struct FireSimulation<R = StdRng> {
    config: SimulationConfig,
    grid: Grid,
    simulator: Simulator<R>,
    actions: ActionQueue,
    stats: SimulationStats,
}

impl FireSimulation<StdRng> {
    /// Create an all-grass simulation from `config`
    ///
    /// # Errors
    /// Returns `InvalidArgument` if the configuration does not validate
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let simulator = Simulator::new(&config);
        Self::with_simulator(config, simulator)
    }
}

impl<R: rand::Rng> FireSimulation<R> {
    /// Create an all-grass simulation using an injected random source
    ///
    /// # Errors
    /// Returns `InvalidArgument` if the configuration does not validate
    pub fn with_rng(config: SimulationConfig, rng: R) -> Result<Self> {
        let simulator = Simulator::with_rng(config.grass_ignition_probability, rng);
        Self::with_simulator(config, simulator)
    }

    fn with_simulator(config: SimulationConfig, simulator: Simulator<R>) -> Result<Self> {
        let grid = Grid::from_config(&config)?;
        info!(
            "Fire simulation initialized: {}x{} grid, burn_duration={}, p_grass={}",
            grid.cols(),
            grid.rows(),
            config.burn_duration,
            config.grass_ignition_probability
        );
        let mut sim = Self {
            config,
            grid,
            simulator,
            actions: ActionQueue::default(),
            stats: SimulationStats::default(),
        };
        sim.reset_stats();
        Ok(sim)
    }

    /// Current grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Configuration the simulation was built from
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Running statistics
    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    /// Ticks advanced since creation or the last reset
    pub fn tick(&self) -> u64 {
        self.stats.tick
    }

    /// Action queue (pending actions and history)
    pub fn actions(&self) -> &ActionQueue {
        &self.actions
    }

    /// Queue an action for the next [`FireSimulation::update`]
    pub fn submit(&mut self, action: Action) {
        self.actions.submit(action);
    }

    /// Probability that grass next to a fire ignites in one tick
    pub fn grass_ignition_probability(&self) -> Probability {
        self.simulator.grass_ignition_probability()
    }

    /// Change the grass ignition probability for subsequent ticks
    pub fn set_grass_ignition_probability(&mut self, p: Probability) {
        info!("Grass ignition probability set to {p}");
        self.simulator.set_grass_ignition_probability(p);
    }

    /// Apply an action immediately, outside the update cycle
    ///
    /// The action is recorded in the history but not in the per-frame list.
    ///
    /// # Errors
    /// Returns the action's error; the grid is left unchanged in that case
    pub fn apply(&mut self, action: Action) -> Result<()> {
        if let Some(record) = self.execute(action)? {
            self.actions.record(record);
        }
        Ok(())
    }

    /// Apply every pending action in submission order
    ///
    /// Actions that fail (e.g. a click outside the grid) are logged and
    /// skipped. Returns the number applied.
    pub fn apply_pending(&mut self) -> usize {
        self.actions.begin_frame();
        let mut applied = 0;
        for action in self.actions.take_pending() {
            match self.execute(action) {
                Ok(record) => {
                    applied += 1;
                    if let Some(record) = record {
                        self.actions.mark_executed(record);
                    }
                }
                Err(e) => warn!("Skipping {action}: {e}"),
            }
        }
        applied
    }

    /// Mutate the grid for `action`; `None` for a reset, which is not recorded
    fn execute(&mut self, action: Action) -> Result<Option<ActionRecord>> {
        action.apply(&mut self.grid, self.simulator.rng_mut())?;
        debug!(tick = self.stats.tick, "Applied {action}");
        if action == Action::Reset {
            self.actions.clear_history();
            self.reset_stats();
            return Ok(None);
        }
        self.stats.counts = CellCounts::from_grid(&self.grid);
        Ok(Some(ActionRecord {
            tick: self.stats.tick,
            action,
        }))
    }

    fn reset_stats(&mut self) {
        self.stats = SimulationStats {
            counts: CellCounts::from_grid(&self.grid),
            ..SimulationStats::default()
        };
    }

    /// Advance the grid one tick without touching pending actions
    pub fn step(&mut self) -> StepSummary {
        let summary = self.simulator.step_in_place(&mut self.grid);
        self.stats.tick += 1;
        self.stats.total_ignitions += summary.ignitions as u64;
        self.stats.total_burnouts += summary.burnouts as u64;
        self.stats.counts = CellCounts::from_grid(&self.grid);
        summary
    }

    /// Apply pending actions, then advance one tick
    pub fn update(&mut self) -> StepSummary {
        self.apply_pending();
        self.step()
    }

    /// Plant trees at random using the configured default density
    ///
    /// # Errors
    /// Never fails for a validated configuration
    pub fn scatter_trees(&mut self) -> Result<()> {
        self.apply(Action::ScatterTrees {
            density: self.config.tree_density,
        })
    }

    /// Clear the grid back to grass, zero the statistics and drop all input
    ///
    /// Same outcome as applying [`Action::Reset`], plus pending actions are
    /// discarded.
    pub fn reset(&mut self) {
        self.grid.reset(Cell::Grass);
        self.actions.clear();
        self.reset_stats();
        info!("Fire simulation reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn small_sim() -> FireSimulation {
        let config = SimulationConfig::with_grid(5, 5)
            .with_grass_ignition_probability(0.0)
            .unwrap()
            .with_seed(11);
        FireSimulation::new(config).unwrap()
    }

    #[test]
    fn test_simulation_creation() {
        let sim = FireSimulation::new(SimulationConfig::default()).unwrap();
        assert_eq!(sim.grid().rows(), 60);
        assert_eq!(sim.grid().cols(), 80);
        assert_eq!(sim.tick(), 0);
        assert_eq!(sim.stats().counts.grass, 4800);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimulationConfig::default().with_burn_duration(0);
        assert!(FireSimulation::new(config).is_err());
    }

    #[test]
    fn test_update_applies_actions_before_step() {
        let mut sim = small_sim();
        sim.submit(Action::PlantTree { x: 1, y: 2 });
        sim.submit(Action::Ignite { x: 2, y: 2 });

        let summary = sim.update();
        assert_eq!(summary.ignitions, 1);
        assert_eq!(sim.grid().get(1, 2).unwrap(), Cell::Burning);
        assert_eq!(sim.tick(), 1);
        assert_eq!(sim.actions().executed_this_frame().len(), 2);
        assert_eq!(sim.actions().history_len(), 2);
    }

    #[test]
    fn test_out_of_bounds_action_skipped() {
        let mut sim = small_sim();
        sim.submit(Action::Ignite { x: 9, y: 9 });
        sim.submit(Action::Ignite { x: 0, y: 0 });
        assert_eq!(sim.apply_pending(), 1);
        assert_eq!(sim.grid().get(0, 0).unwrap(), Cell::Burning);
        assert_eq!(sim.actions().history_len(), 1);
    }

    #[test]
    fn test_stats_accumulate() {
        let mut sim = small_sim();
        sim.apply(Action::ScatterTrees {
            density: Probability::ONE,
        })
        .unwrap();
        sim.apply(Action::Ignite { x: 0, y: 0 }).unwrap();
        for _ in 0..30 {
            sim.step();
        }
        let stats = sim.stats();
        assert_eq!(stats.tick, 30);
        assert_eq!(stats.counts.burnt, 25);
        assert_eq!(stats.total_ignitions, 24);
        assert_eq!(stats.total_burnouts, 25);
    }

    #[test]
    fn test_reset() {
        let mut sim = small_sim();
        sim.apply(Action::Ignite { x: 1, y: 1 }).unwrap();
        sim.step();
        sim.reset();
        assert_eq!(sim.tick(), 0);
        assert_eq!(sim.stats().counts.grass, 25);
        assert!(sim.grid().burn_timers().is_empty());
        assert_eq!(sim.actions().history_len(), 0);
    }

    #[test]
    fn test_reset_action_clears_stats() {
        let mut sim = small_sim();
        sim.step();
        sim.step();
        sim.apply(Action::Reset).unwrap();
        assert_eq!(sim.tick(), 0);
        assert_eq!(sim.stats().counts.grass, 25);
    }

    #[test]
    fn test_reset_paths_agree() {
        let run = |via_action: bool| {
            let mut sim = small_sim();
            sim.submit(Action::Ignite { x: 2, y: 2 });
            for _ in 0..5 {
                sim.update();
            }
            if via_action {
                sim.submit(Action::Reset);
                sim.apply_pending();
            } else {
                sim.reset();
            }
            (
                sim.tick(),
                sim.actions().history_len(),
                sim.actions().executed_this_frame().len(),
                sim.grid().clone(),
            )
        };
        let by_action = run(true);
        assert_eq!(by_action, run(false));
        assert_eq!((by_action.0, by_action.1, by_action.2), (0, 0, 0));
    }

    #[test]
    fn test_actions_after_reset_in_same_frame_are_kept() {
        let mut sim = small_sim();
        sim.submit(Action::Ignite { x: 0, y: 0 });
        sim.submit(Action::Reset);
        sim.submit(Action::PlantTree { x: 4, y: 4 });
        assert_eq!(sim.apply_pending(), 3);
        assert_eq!(sim.grid().get(0, 0).unwrap(), Cell::Grass);
        assert_eq!(sim.grid().get(4, 4).unwrap(), Cell::Tree);
        let history: Vec<Action> = sim.actions().history().map(|r| r.action).collect();
        assert_eq!(history, vec![Action::PlantTree { x: 4, y: 4 }]);
    }

    #[test]
    fn test_direct_apply_skips_frame_list() {
        let mut sim = small_sim();
        for i in 0..100 {
            sim.apply(Action::PlantTree { x: i % 5, y: 0 }).unwrap();
        }
        assert!(sim.actions().executed_this_frame().is_empty());
        assert_eq!(sim.actions().history_len(), 100);
        assert_eq!(sim.tick(), 0);
    }

    #[test]
    fn test_with_injected_rng_matches_seeded() {
        let config = SimulationConfig::with_grid(12, 12)
            .with_grass_ignition_probability(0.5)
            .unwrap()
            .with_seed(21);
        let mut seeded = FireSimulation::new(config.clone()).unwrap();
        let mut injected = FireSimulation::with_rng(config, StdRng::seed_from_u64(21)).unwrap();
        for sim in [&mut seeded, &mut injected] {
            sim.apply(Action::Ignite { x: 6, y: 6 }).unwrap();
            for _ in 0..6 {
                sim.step();
            }
        }
        assert_eq!(seeded.grid(), injected.grid());
        assert!(injected.stats().total_ignitions > 0);
    }

    #[test]
    fn test_grass_ignition_probability_can_change() {
        let mut sim = small_sim();
        assert_eq!(sim.grass_ignition_probability(), Probability::ZERO);
        sim.apply(Action::Ignite { x: 2, y: 2 }).unwrap();
        sim.step();
        assert_eq!(sim.stats().counts.burning, 1);

        sim.set_grass_ignition_probability(Probability::ONE);
        assert_eq!(sim.grass_ignition_probability(), Probability::ONE);
        sim.step();
        assert_eq!(sim.stats().counts.burning, 5);
    }

    #[test]
    fn test_scatter_trees_uses_configured_density() {
        let config = SimulationConfig::with_grid(4, 4)
            .with_tree_density(1.0)
            .unwrap()
            .with_seed(3);
        let mut sim = FireSimulation::new(config).unwrap();
        sim.scatter_trees().unwrap();
        assert_eq!(sim.stats().counts.tree, 16);
    }
}
