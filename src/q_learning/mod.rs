//! Tabular Q-learning for the maze agent
//!
//! The agent keeps one value estimate per (cell, move) pair and updates it
//! online after every attempted move:
//!
//! Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
//!
//! Moves are chosen ε-greedily, and ε decays once per simulation tick down
//! to a floor. The table is reallocated whenever the maze size changes, and
//! it persists across episodes on mazes of the same size.
//!
//! ## Usage Example
//!
//! ```
//! use maze_race::q_learning::QLearningAgent;
//! use maze_race::types::{Action, Position};
//!
//! let mut agent = QLearningAgent::new(
//!     10,    // maze size
//!     0.1,   // learning_rate
//!     0.9,   // discount_factor
//!     1.0,   // epsilon (exploration)
//!     0.995, // epsilon_decay
//!     0.01,  // min_epsilon
//! )
//! .with_seed(42);
//!
//! let action = agent.select_action(Position::START);
//! agent.observe(Position::START, action, -1.0, Position::new(2, 1));
//! agent.decay_exploration();
//! ```

pub mod agent;
pub mod q_table;

// Public re-exports
pub use agent::{
    DISCOUNT_FACTOR, EXPLORATION_DECAY, INITIAL_EXPLORATION_RATE, LEARNING_RATE,
    MIN_EXPLORATION_RATE, QLearningAgent,
};
pub use q_table::QTable;
