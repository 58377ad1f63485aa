//! Input actions and the queue that applies them between ticks
//!
//! Drivers translate input events (clicks, buttons, keys) into [`Action`]s and
//! submit them; the simulation applies all pending actions in submission order
//! before the next step. Executed actions are kept in a bounded history so a
//! run can be replayed from the same seed.

use crate::core_types::{Cell, Probability};
use crate::error::Result;
use crate::grid::Grid;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// A grid mutation triggered by user input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Set a cell on fire
    Ignite { x: usize, y: usize },
    /// Plant a tree in a cell
    PlantTree { x: usize, y: usize },
    /// Plant trees at random with the given density
    ScatterTrees { density: Probability },
    /// Turn every burnt cell back into grass
    MakeItRain,
    /// Refill the grid with grass and drop all fires
    Reset,
}

impl Action {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Action::Ignite { .. } => "ignite",
            Action::PlantTree { .. } => "plant_tree",
            Action::ScatterTrees { .. } => "scatter_trees",
            Action::MakeItRain => "make_it_rain",
            Action::Reset => "reset",
        }
    }

    /// Apply this action to `grid`
    ///
    /// # Arguments
    /// * `grid` - Grid to mutate
    /// * `rng` - Random source for `ScatterTrees`
    ///
    /// # Errors
    /// Returns `OutOfBounds` for a cell action outside the grid
    pub fn apply<R: rand::Rng + ?Sized>(&self, grid: &mut Grid, rng: &mut R) -> Result<()> {
        match *self {
            Action::Ignite { x, y } => grid.ignite(x, y),
            Action::PlantTree { x, y } => grid.set(x, y, Cell::Tree),
            Action::ScatterTrees { density } => {
                grid.scatter(density.value(), Cell::Tree, rng).map(|_| ())
            }
            Action::MakeItRain => {
                grid.extinguish_burnt(Cell::Grass);
                Ok(())
            }
            Action::Reset => {
                grid.reset(Cell::Grass);
                Ok(())
            }
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Ignite { x, y } | Action::PlantTree { x, y } => {
                write!(f, "{} ({x}, {y})", self.name())
            }
            Action::ScatterTrees { density } => write!(f, "{} density={density}", self.name()),
            Action::MakeItRain | Action::Reset => f.write_str(self.name()),
        }
    }
}

/// An action together with the tick it was applied before
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Tick counter value when the action ran
    pub tick: u64,
    pub action: Action,
}

/// Pending actions plus a bounded history of executed ones
#[derive(Debug)]
pub struct ActionQueue {
    /// Actions pending execution (applied before the next step)
    pending: Vec<Action>,
    /// Actions executed during the last update
    executed_this_frame: Vec<ActionRecord>,
    /// History of executed actions, oldest first
    history: VecDeque<ActionRecord>,
    /// Maximum history size (oldest actions are dropped)
    max_history: usize,
}

impl Default for ActionQueue {
    fn default() -> Self {
        Self::new(10_000)
    }
}

impl ActionQueue {
    /// Create a new action queue with the given history limit
    pub fn new(max_history: usize) -> Self {
        Self {
            pending: Vec::with_capacity(32),
            executed_this_frame: Vec::with_capacity(32),
            history: VecDeque::with_capacity(max_history.min(1024)),
            max_history,
        }
    }

    /// Submit an action for the next update
    pub fn submit(&mut self, action: Action) {
        self.pending.push(action);
    }

    /// Actions not yet executed
    pub fn pending_actions(&self) -> &[Action] {
        &self.pending
    }

    /// Actions executed in the last update
    pub fn executed_this_frame(&self) -> &[ActionRecord] {
        &self.executed_this_frame
    }

    /// Executed actions, oldest first
    pub fn history(&self) -> impl Iterator<Item = &ActionRecord> {
        self.history.iter()
    }

    /// Number of actions in the history
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Clear the per-frame list at the start of an update
    pub fn begin_frame(&mut self) {
        self.executed_this_frame.clear();
    }

    /// Record an action executed during the current update
    pub fn mark_executed(&mut self, record: ActionRecord) {
        self.executed_this_frame.push(record);
        self.record(record);
    }

    /// Append an action applied outside an update to the history only
    pub fn record(&mut self, record: ActionRecord) {
        self.history.push_back(record);
        while self.history.len() > self.max_history {
            self.history.pop_front();
        }
    }

    /// Take all pending actions for processing
    pub fn take_pending(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.pending)
    }

    /// Drop the frame list and the history, keeping pending actions
    pub fn clear_history(&mut self) {
        self.executed_this_frame.clear();
        self.history.clear();
    }

    /// Drop pending actions, the frame list and the history
    pub fn clear(&mut self) {
        self.pending.clear();
        self.clear_history();
    }
}
