//! Scripted stand-ins for the human player
//!
//! Used by the headless simulation and by tests. None of them learn.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng, random, rngs::StdRng};

use crate::{maze::Maze, ports::PlayerInput, race::Snapshot, types::Action};

/// Never moves. The agent races alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdlePlayer;

impl PlayerInput for IdlePlayer {
    fn name(&self) -> &str {
        "idle"
    }

    fn next_command(&mut self, _snapshot: &Snapshot, _maze: &Maze) -> Option<Action> {
        None
    }
}

/// Replays a fixed list of commands, one per tick, then stays put.
///
/// The same script is replayed from the start on every episode.
#[derive(Debug, Clone)]
pub struct ScriptedPlayer {
    script: Vec<Action>,
    pending: VecDeque<Action>,
}

impl ScriptedPlayer {
    pub fn new(script: Vec<Action>) -> Self {
        let pending = script.iter().copied().collect();
        Self { script, pending }
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl PlayerInput for ScriptedPlayer {
    fn name(&self) -> &str {
        "scripted"
    }

    fn next_command(&mut self, _snapshot: &Snapshot, _maze: &Maze) -> Option<Action> {
        self.pending.pop_front()
    }

    fn on_episode_start(&mut self, _snapshot: &Snapshot, _maze: &Maze) {
        self.pending = self.script.iter().copied().collect();
    }
}

/// Presses a uniformly random direction every tick.
pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new() -> Self {
        Self {
            rng: StdRng::seed_from_u64(random()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerInput for RandomPlayer {
    fn name(&self) -> &str {
        "random"
    }

    fn next_command(&mut self, _snapshot: &Snapshot, _maze: &Maze) -> Option<Action> {
        let index = self.rng.random_range(0..Action::COUNT);
        Action::from_index(index)
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

/// Follows a shortest path to the goal, moving once every `stride` ticks.
///
/// A stride of 1 moves every tick; larger strides model a slower human.
#[derive(Debug, Clone)]
pub struct ShortestPathPlayer {
    stride: usize,
    counter: usize,
}

impl ShortestPathPlayer {
    pub fn new(stride: usize) -> Self {
        Self {
            stride: stride.max(1),
            counter: 0,
        }
    }

    pub fn stride(&self) -> usize {
        self.stride
    }
}

impl Default for ShortestPathPlayer {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PlayerInput for ShortestPathPlayer {
    fn name(&self) -> &str {
        "shortest-path"
    }

    fn next_command(&mut self, snapshot: &Snapshot, maze: &Maze) -> Option<Action> {
        self.counter += 1;
        if !self.counter.is_multiple_of(self.stride) {
            return None;
        }
        maze.shortest_path(snapshot.player, snapshot.goal)?
            .first()
            .copied()
    }

    fn on_episode_start(&mut self, _snapshot: &Snapshot, _maze: &Maze) {
        self.counter = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        maze::layouts,
        types::{Difficulty, Position},
    };

    fn snapshot_at(player: Position) -> Snapshot {
        Snapshot {
            size: 10,
            player,
            agent: Position::START,
            goal: layouts::CLASSIC_GOAL,
            elapsed_secs: 0.0,
            winner: None,
            episode: 0,
            exploration_rate: 1.0,
            difficulty: Difficulty::Easy,
        }
    }

    #[test]
    fn test_scripted_player_restarts_each_episode() {
        let maze = layouts::classic();
        let snapshot = snapshot_at(Position::START);
        let mut player = ScriptedPlayer::new(vec![Action::Right, Action::Down]);
        assert_eq!(player.next_command(&snapshot, &maze), Some(Action::Right));
        assert_eq!(player.next_command(&snapshot, &maze), Some(Action::Down));
        assert_eq!(player.next_command(&snapshot, &maze), None);
        player.on_episode_start(&snapshot, &maze);
        assert_eq!(player.remaining(), 2);
    }

    #[test]
    fn test_random_player_is_seeded() {
        let maze = layouts::classic();
        let snapshot = snapshot_at(Position::START);
        let mut a = RandomPlayer::with_seed(9);
        let mut b = RandomPlayer::with_seed(9);
        for _ in 0..20 {
            let command = a.next_command(&snapshot, &maze);
            assert!(command.is_some());
            assert_eq!(command, b.next_command(&snapshot, &maze));
        }
    }

    #[test]
    fn test_shortest_path_player_respects_stride() {
        let maze = layouts::classic();
        let snapshot = snapshot_at(Position::START);
        let mut player = ShortestPathPlayer::new(3);
        assert_eq!(player.next_command(&snapshot, &maze), None);
        assert_eq!(player.next_command(&snapshot, &maze), None);
        let command = player.next_command(&snapshot, &maze).unwrap();
        let next = Position::START.step(command, 10).unwrap();
        assert!(maze.is_path(next));
    }

    #[test]
    fn test_shortest_path_player_at_goal_stays() {
        let maze = layouts::classic();
        let mut player = ShortestPathPlayer::new(1);
        let snapshot = snapshot_at(layouts::CLASSIC_GOAL);
        assert_eq!(player.next_command(&snapshot, &maze), None);
    }
}
