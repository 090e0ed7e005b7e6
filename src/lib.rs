//! Maze race between a player and a tabular Q-learning agent
//!
//! This crate provides:
//! - Procedural maze generation by randomized depth-first search
//! - A Q-learning agent with ε-greedy exploration that learns while racing
//! - The per-tick race step and the Selecting / Racing / Finished controller
//! - A headless simulation pipeline with scripted players and observers

pub mod adapters;
pub mod app;
pub mod cli;
pub mod error;
pub mod maze;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod race;
pub mod types;

pub use error::{Error, Result};
pub use maze::{Maze, MazeGenerator};
pub use q_learning::QLearningAgent;
pub use race::{EpisodeController, Phase, RaceState, Snapshot, TickReport};
pub use types::{Action, Competitor, Difficulty, Position};
