//! CLI infrastructure for the maze race
//!
//! Headless simulation of races and text rendering of mazes.

pub mod commands;
pub mod config;
pub mod output;
