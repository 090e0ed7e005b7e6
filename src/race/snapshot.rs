//! Per-tick views handed to the presentation layer

use serde::{Deserialize, Serialize};

use crate::{
    race::visibility,
    types::{Action, Competitor, Difficulty, Position},
};

/// Everything a renderer needs for one frame, apart from the maze itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: usize,
    pub player: Position,
    pub agent: Position,
    pub goal: Position,
    /// Seconds since the first accepted move of the episode
    pub elapsed_secs: f64,
    pub winner: Option<Competitor>,
    /// Completed "advance" transitions in the current difficulty run
    pub episode: usize,
    pub exploration_rate: f64,
    pub difficulty: Difficulty,
}

impl Snapshot {
    pub fn is_finished(&self) -> bool {
        self.winner.is_some()
    }

    /// Whether the renderer should draw `cell` this frame.
    ///
    /// Always true outside blackout mode.
    pub fn is_visible(&self, cell: Position) -> bool {
        !self.difficulty.is_blackout()
            || visibility::is_visible(cell, self.player, self.agent, self.goal)
    }
}

/// What the agent attempted during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentStep {
    pub from: Position,
    pub action: Action,
    /// Cell whose value estimate fed the update
    pub target: Position,
    pub reward: f64,
    pub accepted: bool,
}

/// Final tally of a finished episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeResult {
    pub episode: usize,
    pub difficulty: Difficulty,
    pub winner: Competitor,
    pub ticks: usize,
    pub elapsed_secs: f64,
    pub exploration_rate: f64,
}

/// Result of one simulation tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// `Some(accepted)` when a player command was processed this tick
    pub player_moved: Option<bool>,
    pub agent_step: Option<AgentStep>,
    /// Set on the tick that decided the race
    pub outcome: Option<EpisodeResult>,
    pub snapshot: Snapshot,
}

impl TickReport {
    /// Report for a tick that changed nothing.
    pub fn idle(snapshot: Snapshot) -> Self {
        Self {
            player_moved: None,
            agent_step: None,
            outcome: None,
            snapshot,
        }
    }
}
