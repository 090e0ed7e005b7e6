//! Tabular Q-learning agent
//!
//! The agent owns its Q-table and exploration schedule. Nothing else reads
//! or writes the table except through the methods here.

use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::debug;

use crate::{
    app::RaceConfig,
    q_learning::q_table::QTable,
    types::{Action, Position},
};

/// Default learning rate α
pub const LEARNING_RATE: f64 = 0.1;
/// Default discount factor γ
pub const DISCOUNT_FACTOR: f64 = 0.9;
/// Exploration rate after construction or reset
pub const INITIAL_EXPLORATION_RATE: f64 = 1.0;
/// Multiplicative exploration decay applied once per tick
pub const EXPLORATION_DECAY: f64 = 0.995;
/// Floor for the exploration rate
pub const MIN_EXPLORATION_RATE: f64 = 0.01;

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Q-learning agent (off-policy TD control)
///
/// Learns online, one update per attempted move, with an ε-greedy
/// behaviour policy whose ε decays multiplicatively toward a floor.
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    q_table: QTable,
    epsilon: f64,
    initial_epsilon: f64,
    epsilon_decay: f64,
    min_epsilon: f64,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl QLearningAgent {
    /// Create a new Q-learning agent for a `size × size` maze
    ///
    /// # Arguments
    ///
    /// * `size` - Maze side length
    /// * `learning_rate` - α parameter (0.0 to 1.0)
    /// * `discount_factor` - γ parameter (0.0 to 1.0, exclusive)
    /// * `epsilon` - Initial exploration rate
    /// * `epsilon_decay` - Multiplicative decay per tick
    /// * `min_epsilon` - Minimum exploration rate
    pub fn new(
        size: usize,
        learning_rate: f64,
        discount_factor: f64,
        epsilon: f64,
        epsilon_decay: f64,
        min_epsilon: f64,
    ) -> Self {
        Self {
            q_table: QTable::new(size, learning_rate, discount_factor),
            epsilon,
            initial_epsilon: epsilon,
            epsilon_decay,
            min_epsilon,
            rng: build_rng(None),
            rng_seed: None,
        }
    }

    /// Agent using the learning parameters of `config`, seeded from it when a seed is set
    pub fn from_config(config: &RaceConfig, size: usize) -> Self {
        let agent = Self::new(
            size,
            config.learning_rate,
            config.discount_factor,
            config.initial_exploration_rate,
            config.exploration_decay,
            config.min_exploration_rate,
        );
        match config.seed {
            Some(seed) => agent.with_seed(seed),
            None => agent,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.set_rng_seed(seed);
        self
    }

    /// Reseed the exploration RNG.
    pub fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
    }

    /// ε-greedy action selection
    ///
    /// With probability ε a uniformly random action, otherwise the greedy
    /// action for `position` (first maximum in action order).
    pub fn select_action(&mut self, position: Position) -> Action {
        if self.rng.random::<f64>() < self.epsilon {
            // Explore: random action
            Action::ALL[self.rng.random_range(0..Action::COUNT)]
        } else {
            // Exploit: greedy action based on Q-values
            self.q_table.greedy_action(position)
        }
    }

    /// Apply one Bellman update for an attempted move.
    ///
    /// `next_position` is the cell the move aimed at, even when the move was
    /// rejected.
    pub fn observe(&mut self, position: Position, action: Action, reward: f64, next_position: Position) {
        self.q_table
            .q_learning_update(position, action, reward, next_position);
    }

    /// ε ← max(min ε, ε × decay)
    pub fn decay_exploration(&mut self) {
        self.epsilon = (self.epsilon * self.epsilon_decay).max(self.min_epsilon);
    }

    /// Zeroed table for a maze of side `new_size`, ε back to its initial value.
    ///
    /// Must run whenever the maze geometry changes.
    pub fn reset(&mut self, new_size: usize) {
        self.q_table.reset(new_size);
        self.epsilon = self.initial_epsilon;
        self.reset_rng();
        debug!(size = new_size, epsilon = self.epsilon, "agent reset");
    }

    fn reset_rng(&mut self) {
        if let Some(seed) = self.rng_seed {
            self.rng = StdRng::seed_from_u64(seed);
        } else {
            self.rng = build_rng(None);
        }
    }

    pub fn exploration_rate(&self) -> f64 {
        self.epsilon
    }

    pub fn min_exploration_rate(&self) -> f64 {
        self.min_epsilon
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Side length of the maze the table currently covers
    pub fn size(&self) -> usize {
        self.q_table.size()
    }

    /// Greedy action per cell, row-major
    pub fn greedy_policy(&self) -> Vec<Action> {
        let size = self.size();
        (0..size)
            .flat_map(|y| (0..size).map(move |x| Position::new(x, y)))
            .map(|position| self.q_table.greedy_action(position))
            .collect()
    }
}
