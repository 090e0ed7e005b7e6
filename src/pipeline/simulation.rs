//! Headless simulation of many races on a virtual clock

use std::{path::Path, sync::Arc};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Error, Result,
    adapters::ManualClock,
    app::RaceConfig,
    maze::{Maze, layouts},
    ports::{PlayerInput, RaceObserver},
    race::{EpisodeController, EpisodeResult},
    types::{Competitor, Difficulty, Position},
};

/// A hand-authored maze reused for every episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedLayout {
    pub maze: Maze,
    pub goal: Position,
}

impl FixedLayout {
    pub fn new(maze: Maze, goal: Position) -> Self {
        Self { maze, goal }
    }

    /// The built-in 10×10 layout.
    pub fn classic() -> Self {
        Self::new(layouts::classic(), layouts::CLASSIC_GOAL)
    }
}

/// Simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of episodes to race
    pub episodes: usize,

    /// Difficulty of the run; selects maze size and visibility
    pub difficulty: Difficulty,

    /// Random seed, overriding the one in `race`
    pub seed: Option<u64>,

    /// An undecided episode longer than this aborts the run
    pub max_ticks_per_episode: usize,

    /// Race on this layout instead of generated mazes
    pub layout: Option<FixedLayout>,

    /// Agent parameters and tick rate
    pub race: RaceConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            episodes: 100,
            difficulty: Difficulty::Easy,
            seed: None,
            max_ticks_per_episode: 50_000,
            layout: None,
            race: RaceConfig::default(),
        }
    }
}

/// Result of a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub total_episodes: usize,
    pub player_wins: usize,
    pub agent_wins: usize,
    pub player_win_rate: f64,
    pub agent_win_rate: f64,
    /// Mean ticks per episode
    pub avg_ticks: f64,
    /// Mean timer reading at the end of an episode
    pub avg_elapsed_secs: f64,
    pub final_exploration_rate: f64,
    pub episodes: Vec<EpisodeResult>,
}

impl SimulationResult {
    pub fn new(episodes: Vec<EpisodeResult>, final_exploration_rate: f64) -> Self {
        let total_episodes = episodes.len();
        let player_wins = episodes
            .iter()
            .filter(|e| e.winner == Competitor::Player)
            .count();
        let agent_wins = total_episodes - player_wins;
        let rate = |count: usize| {
            if total_episodes > 0 {
                count as f64 / total_episodes as f64
            } else {
                0.0
            }
        };
        let avg_ticks = rate(episodes.iter().map(|e| e.ticks).sum());
        let avg_elapsed_secs = if total_episodes > 0 {
            episodes.iter().map(|e| e.elapsed_secs).sum::<f64>() / total_episodes as f64
        } else {
            0.0
        };

        Self {
            total_episodes,
            player_wins,
            agent_wins,
            player_win_rate: rate(player_wins),
            agent_win_rate: rate(agent_wins),
            avg_ticks,
            avg_elapsed_secs,
            final_exploration_rate,
            episodes,
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Races a player strategy against the learning agent for a number of
/// episodes, advancing a [`ManualClock`] by one tick interval per tick.
pub struct SimulationPipeline {
    config: SimulationConfig,
    observers: Vec<Box<dyn RaceObserver>>,
}

impl SimulationPipeline {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn RaceObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run the simulation.
    ///
    /// # Errors
    ///
    /// Fails on invalid configuration, on generation failure, when an
    /// observer fails, or with [`Error::TickLimitExceeded`] when an episode
    /// runs too long.
    pub fn run(&mut self, player: &mut dyn PlayerInput) -> Result<SimulationResult> {
        self.run_with_controller(player).map(|(result, _)| result)
    }

    /// Run the simulation and hand back the controller, so the trained
    /// agent and the last maze can be inspected.
    pub fn run_with_controller(
        &mut self,
        player: &mut dyn PlayerInput,
    ) -> Result<(SimulationResult, EpisodeController)> {
        let mut race_config = self.config.race.clone();
        if let Some(seed) = self.config.seed {
            race_config.seed = Some(seed);
        }
        if let Some(seed) = race_config.seed {
            player.set_rng_seed(seed.wrapping_add(2));
        }
        let interval = race_config.tick_interval();

        let clock = ManualClock::new();
        let mut controller = EpisodeController::new(&race_config, Arc::new(clock.clone()))?;
        match &self.config.layout {
            Some(layout) => {
                controller.start_with_layout(
                    layout.maze.clone(),
                    layout.goal,
                    self.config.difficulty,
                )?;
            }
            None => {
                controller.select_difficulty(self.config.difficulty)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_simulation_start(self.config.episodes)?;
        }

        let limit = self.config.max_ticks_per_episode;
        let mut results = Vec::with_capacity(self.config.episodes);
        for index in 0..self.config.episodes {
            if index > 0 {
                controller.advance()?;
            }
            let episode = controller.episode_count();
            let (Some(mut snapshot), Some(maze)) =
                (controller.snapshot(), controller.maze().cloned())
            else {
                return Err(Error::InvalidPhase {
                    operation: "simulate",
                    phase: controller.phase().as_str(),
                });
            };

            player.on_episode_start(&snapshot, &maze);
            for observer in &mut self.observers {
                observer.on_episode_start(episode, &snapshot, &maze)?;
            }

            let mut ticks = 0;
            let result = loop {
                if ticks >= limit {
                    return Err(Error::TickLimitExceeded { episode, limit });
                }
                let command = player.next_command(&snapshot, &maze);
                clock.advance(interval);
                let report = controller.tick(command)?;
                ticks += 1;
                for observer in &mut self.observers {
                    observer.on_tick(episode, &report)?;
                }
                if let Some(result) = report.outcome {
                    break result;
                }
                snapshot = report.snapshot;
            };

            debug!(episode, winner = %result.winner, ticks = result.ticks, "simulated episode");
            for observer in &mut self.observers {
                observer.on_episode_end(&result)?;
            }
            results.push(result);
        }

        for observer in &mut self.observers {
            observer.on_simulation_end()?;
        }

        let result = SimulationResult::new(results, controller.agent().exploration_rate());
        Ok((result, controller))
    }
}
