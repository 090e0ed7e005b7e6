//! Race state and the per-tick simulation step

use std::time::Duration;

use crate::{
    Error, Result,
    maze::Maze,
    q_learning::QLearningAgent,
    race::{
        reward,
        snapshot::{AgentStep, EpisodeResult, Snapshot, TickReport},
    },
    types::{Action, Competitor, Difficulty, Position},
};

/// Everything that changes during one episode.
///
/// The maze is fixed for the lifetime of the state; a new episode gets a
/// new `RaceState`. The learning agent lives outside and is passed into
/// [`RaceState::tick`].
#[derive(Debug, Clone)]
pub struct RaceState {
    maze: Maze,
    goal: Position,
    player: Position,
    agent: Position,
    difficulty: Difficulty,
    episode: usize,
    start_time: Option<Duration>,
    elapsed: Duration,
    winner: Option<Competitor>,
    ticks: usize,
}

impl RaceState {
    /// Fresh episode with both competitors on [`Position::START`].
    ///
    /// # Errors
    ///
    /// Fails if the start or goal is outside the grid or a wall, or if the
    /// goal cannot be reached from the start.
    pub fn new(maze: Maze, goal: Position, difficulty: Difficulty) -> Result<Self> {
        let size = maze.size();
        for position in [Position::START, goal] {
            if !position.in_bounds(size) {
                return Err(Error::OutOfBounds { position, size });
            }
            if !maze.is_path(position) {
                return Err(Error::BlockedLayoutCell { position });
            }
        }
        if !maze.is_reachable(Position::START, goal) {
            return Err(Error::UnreachableGoal {
                start: Position::START,
                goal,
            });
        }

        Ok(Self {
            maze,
            goal,
            player: Position::START,
            agent: Position::START,
            difficulty,
            episode: 0,
            start_time: None,
            elapsed: Duration::ZERO,
            winner: None,
            ticks: 0,
        })
    }

    pub fn with_episode(mut self, episode: usize) -> Self {
        self.episode = episode;
        self
    }

    /// Place the competitors somewhere other than the start cell.
    ///
    /// Both cells must be open.
    pub fn with_positions(mut self, player: Position, agent: Position) -> Result<Self> {
        let size = self.maze.size();
        for position in [player, agent] {
            if !position.in_bounds(size) {
                return Err(Error::OutOfBounds { position, size });
            }
            if !self.maze.is_path(position) {
                return Err(Error::BlockedLayoutCell { position });
            }
        }
        self.player = player;
        self.agent = agent;
        Ok(self)
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn goal(&self) -> Position {
        self.goal
    }

    pub fn player(&self) -> Position {
        self.player
    }

    pub fn agent(&self) -> Position {
        self.agent
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn episode(&self) -> usize {
        self.episode
    }

    pub fn winner(&self) -> Option<Competitor> {
        self.winner
    }

    pub fn is_finished(&self) -> bool {
        self.winner.is_some()
    }

    /// Ticks run while the episode was undecided.
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Clock reading of the first accepted move, if any.
    pub fn start_time(&self) -> Option<Duration> {
        self.start_time
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn snapshot(&self, agent: &QLearningAgent) -> Snapshot {
        Snapshot {
            size: self.maze.size(),
            player: self.player,
            agent: self.agent,
            goal: self.goal,
            elapsed_secs: self.elapsed.as_secs_f64(),
            winner: self.winner,
            episode: self.episode,
            exploration_rate: agent.exploration_rate(),
            difficulty: self.difficulty,
        }
    }

    fn latch_start(&mut self, now: Duration) {
        if self.start_time.is_none() {
            self.start_time = Some(now);
        }
    }

    /// Run one simulation tick.
    ///
    /// Order: player move, agent move and learning update, exploration
    /// decay, timer, win check. The player is checked first, so a
    /// simultaneous arrival goes to the player.
    pub fn tick(
        &mut self,
        agent: &mut QLearningAgent,
        command: Option<Action>,
        now: Duration,
    ) -> TickReport {
        debug_assert_eq!(
            agent.size(),
            self.maze.size(),
            "agent table does not match maze"
        );
        let size = self.maze.size();

        if self.winner.is_none() {
            self.ticks += 1;
        }

        let mut player_moved = None;
        if let Some(action) = command {
            if self.winner.is_none() {
                let accepted = match self.player.step(action, size) {
                    Some(next) if self.maze.is_path(next) => {
                        self.player = next;
                        true
                    }
                    _ => false,
                };
                if accepted {
                    self.latch_start(now);
                }
                player_moved = Some(accepted);
            }
        }

        let mut agent_step = None;
        if self.winner.is_none() {
            let from = self.agent;
            let action = agent.select_action(from);
            let transition = reward::transition(&self.maze, self.goal, from, action);
            agent.observe(from, action, transition.reward, transition.target);
            if transition.accepted {
                self.agent = transition.target;
                self.latch_start(now);
            }
            agent_step = Some(AgentStep {
                from,
                action,
                target: transition.target,
                reward: transition.reward,
                accepted: transition.accepted,
            });
        }

        agent.decay_exploration();

        if let Some(start) = self.start_time {
            if self.winner.is_none() {
                self.elapsed = now.saturating_sub(start);
            }
        }

        let mut outcome = None;
        if self.winner.is_none() {
            let winner = if self.player == self.goal {
                Some(Competitor::Player)
            } else if self.agent == self.goal {
                Some(Competitor::Agent)
            } else {
                None
            };
            if let Some(winner) = winner {
                self.winner = Some(winner);
                outcome = Some(EpisodeResult {
                    episode: self.episode,
                    difficulty: self.difficulty,
                    winner,
                    ticks: self.ticks,
                    elapsed_secs: self.elapsed.as_secs_f64(),
                    exploration_rate: agent.exploration_rate(),
                });
            }
        }

        TickReport {
            player_moved,
            agent_step,
            outcome,
            snapshot: self.snapshot(agent),
        }
    }
}
