//! Episode state machine
//!
//! ```text
//! Selecting --select_difficulty--> Racing --goal reached--> Finished
//!     ^                                ^                        |
//!     |                                +-------advance----------+
//!     +-------------------------back---------------------------+
//! ```
//!
//! Selecting a difficulty generates a maze and resets the agent's table.
//! Advancing keeps the table, so learning carries across episodes of the
//! same size.

use std::{fmt, sync::Arc};

use tracing::{debug, info};

use crate::{
    Error, Result,
    app::RaceConfig,
    maze::{Maze, MazeGenerator},
    ports::Clock,
    q_learning::QLearningAgent,
    race::{
        snapshot::{Snapshot, TickReport},
        step::RaceState,
    },
    types::{Action, Difficulty, Position},
};

/// Controller phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Selecting,
    Racing,
    Finished,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Selecting => "selecting",
            Phase::Racing => "racing",
            Phase::Finished => "finished",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where episode mazes come from.
#[derive(Debug, Clone)]
enum MazeSource {
    Generated,
    Fixed { maze: Maze, goal: Position },
}

/// Owns the agent, the maze generator and the current race, and decides
/// which inputs are accepted in each phase.
pub struct EpisodeController {
    generator: MazeGenerator,
    agent: QLearningAgent,
    clock: Arc<dyn Clock>,
    source: MazeSource,
    race: Option<RaceState>,
    phase: Phase,
}

impl EpisodeController {
    /// Controller in the `Selecting` phase.
    ///
    /// With a seed in `config`, the generator uses it and the agent uses the
    /// next value, so runs are reproducible.
    pub fn new(config: &RaceConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        config.validate()?;
        let (generator, agent) = match config.seed {
            Some(seed) => (
                MazeGenerator::with_seed(seed),
                QLearningAgent::from_config(config, 0).with_seed(seed.wrapping_add(1)),
            ),
            None => (MazeGenerator::new(), QLearningAgent::from_config(config, 0)),
        };
        Ok(Self {
            generator,
            agent,
            clock,
            source: MazeSource::Generated,
            race: None,
            phase: Phase::Selecting,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn agent(&self) -> &QLearningAgent {
        &self.agent
    }

    pub fn race(&self) -> Option<&RaceState> {
        self.race.as_ref()
    }

    pub fn maze(&self) -> Option<&Maze> {
        self.race.as_ref().map(RaceState::maze)
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.race.as_ref().map(RaceState::difficulty)
    }

    pub fn episode_count(&self) -> usize {
        self.race.as_ref().map_or(0, RaceState::episode)
    }

    pub fn snapshot(&self) -> Option<Snapshot> {
        self.race.as_ref().map(|race| race.snapshot(&self.agent))
    }

    fn reject(&self, operation: &'static str) -> Error {
        Error::InvalidPhase {
            operation,
            phase: self.phase.as_str(),
        }
    }

    fn current_snapshot(&self, operation: &'static str) -> Result<Snapshot> {
        self.snapshot().ok_or_else(|| self.reject(operation))
    }

    /// Choose a difficulty and start racing on a freshly generated maze.
    pub fn select_difficulty(&mut self, difficulty: Difficulty) -> Result<Snapshot> {
        if self.phase != Phase::Selecting {
            return Err(self.reject("select a difficulty"));
        }
        let size = difficulty.maze_size();
        let goal = Position::goal_for(size);
        let maze = self.generator.generate(size)?;
        self.source = MazeSource::Generated;
        self.begin_run(maze, goal, difficulty)
    }

    /// Start racing on a fixed layout. Every episode of the run reuses it.
    ///
    /// `difficulty` only selects the visibility mode; the size comes from the
    /// layout.
    pub fn start_with_layout(
        &mut self,
        maze: Maze,
        goal: Position,
        difficulty: Difficulty,
    ) -> Result<Snapshot> {
        if self.phase != Phase::Selecting {
            return Err(self.reject("start a layout"));
        }
        self.source = MazeSource::Fixed {
            maze: maze.clone(),
            goal,
        };
        self.begin_run(maze, goal, difficulty)
    }

    fn begin_run(&mut self, maze: Maze, goal: Position, difficulty: Difficulty) -> Result<Snapshot> {
        let size = maze.size();
        let race = RaceState::new(maze, goal, difficulty)?;
        self.agent.reset(size);
        self.race = Some(race);
        self.phase = Phase::Racing;
        debug!(%difficulty, size, %goal, "difficulty run started");
        self.current_snapshot("start a run")
    }

    /// Run one tick with an optional player command.
    ///
    /// In `Finished` nothing changes and the current snapshot is reported.
    pub fn tick(&mut self, command: Option<Action>) -> Result<TickReport> {
        match self.phase {
            Phase::Selecting => Err(self.reject("tick")),
            Phase::Finished => Ok(TickReport::idle(self.current_snapshot("tick")?)),
            Phase::Racing => {
                let now = self.clock.now();
                let Some(race) = self.race.as_mut() else {
                    return Err(Error::InvalidPhase {
                        operation: "tick",
                        phase: Phase::Racing.as_str(),
                    });
                };
                let report = race.tick(&mut self.agent, command, now);
                if let Some(result) = &report.outcome {
                    self.phase = Phase::Finished;
                    info!(
                        episode = result.episode,
                        winner = %result.winner,
                        ticks = result.ticks,
                        elapsed_secs = result.elapsed_secs,
                        exploration_rate = result.exploration_rate,
                        "episode finished"
                    );
                }
                Ok(report)
            }
        }
    }

    /// Start the next episode on a new maze of the same size, keeping what
    /// the agent has learned.
    pub fn advance(&mut self) -> Result<Snapshot> {
        if self.phase != Phase::Finished {
            return Err(self.reject("advance"));
        }
        let Some(previous) = self.race.as_ref() else {
            return Err(self.reject("advance"));
        };
        let difficulty = previous.difficulty();
        let episode = previous.episode() + 1;
        let size = previous.maze().size();

        let (maze, goal) = match &self.source {
            MazeSource::Generated => (self.generator.generate(size)?, Position::goal_for(size)),
            MazeSource::Fixed { maze, goal } => (maze.clone(), *goal),
        };
        debug_assert_eq!(maze.size(), self.agent.size());

        self.race = Some(RaceState::new(maze, goal, difficulty)?.with_episode(episode));
        self.phase = Phase::Racing;
        debug!(episode, "next episode");
        self.current_snapshot("advance")
    }

    /// Return to difficulty selection.
    pub fn back(&mut self) -> Result<()> {
        if self.phase != Phase::Finished {
            return Err(self.reject("go back"));
        }
        self.race = None;
        self.phase = Phase::Selecting;
        Ok(())
    }
}
