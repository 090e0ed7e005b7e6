//! Randomized depth-first maze carving
//!
//! Carving walks a 2-cell lattice from the start cell with an explicit stack
//! of frames, so corridors are one cell wide and separated by walls. A solid
//! one-cell border is kept around the grid.
//!
//! After carving, the goal is opened and checked with a flood fill. When the
//! goal sits off the carving lattice (every even-sized maze with the default
//! corner goal), it is joined to the carved region through the shortest run
//! of wall cells. Generation fails only if the final grid is still not fully
//! connected.
//!
//! A custom goal whose coordinates are both off the lattice parity of the
//! start is opened in place. It can then touch several carved corridors, so
//! such mazes may contain loops. The default goal never does.

use std::collections::VecDeque;

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use tracing::debug;

use crate::{
    Error, Result,
    maze::grid::{Cell, Maze},
    types::{Action, Position},
};

/// Smallest side length that leaves room for a border, a start and a goal.
pub const MIN_MAZE_SIZE: usize = 4;

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// One level of the carving walk: a lattice cell and its shuffled exits.
struct Frame {
    cell: Position,
    directions: [Action; Action::COUNT],
    next: usize,
}

/// Perfect-maze generator with an injectable random source.
#[derive(Debug, Clone)]
pub struct MazeGenerator {
    rng: StdRng,
    seed: Option<u64>,
}

impl MazeGenerator {
    /// Generator seeded from the thread-local entropy source.
    pub fn new() -> Self {
        Self {
            rng: build_rng(None),
            seed: None,
        }
    }

    /// Deterministic generator: the same seed yields the same sequence of mazes.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: build_rng(Some(seed)),
            seed: Some(seed),
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Generate a maze with the default start `(1, 1)` and goal `(size-2, size-2)`.
    pub fn generate(&mut self, size: usize) -> Result<Maze> {
        self.generate_with(size, Position::START, Position::goal_for(size))
    }

    /// Generate a maze with explicit start and goal cells.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMazeSize`] for sizes below [`MIN_MAZE_SIZE`],
    /// [`Error::OutOfBounds`] if start or goal lie outside the grid,
    /// [`Error::StartOnBorder`] if the start is not an interior cell, and
    /// [`Error::UnreachableGoal`] if the carved grid could not be connected.
    pub fn generate_with(&mut self, size: usize, start: Position, goal: Position) -> Result<Maze> {
        if size < MIN_MAZE_SIZE {
            return Err(Error::InvalidMazeSize {
                size,
                min: MIN_MAZE_SIZE,
            });
        }
        for position in [start, goal] {
            if !position.in_bounds(size) {
                return Err(Error::OutOfBounds { position, size });
            }
        }
        if !is_interior(start, size) {
            return Err(Error::StartOnBorder {
                position: start,
                size,
            });
        }

        let mut maze = Maze::filled(size);
        self.carve(&mut maze, start);
        maze.set(goal, Cell::Path);

        if !maze.is_reachable(start, goal) {
            let bridged = bridge(&mut maze, start, goal);
            debug!(%goal, bridged, "joined goal to carved region");
        }

        if !maze.is_fully_connected(start) {
            return Err(Error::UnreachableGoal { start, goal });
        }
        Ok(maze)
    }

    fn frame(&mut self, cell: Position) -> Frame {
        let mut directions = Action::ALL;
        directions.shuffle(&mut self.rng);
        Frame {
            cell,
            directions,
            next: 0,
        }
    }

    fn carve(&mut self, maze: &mut Maze, start: Position) {
        let size = maze.size();
        maze.set(start, Cell::Path);
        let mut stack = vec![self.frame(start)];

        while let Some(frame) = stack.last_mut() {
            let Some(&direction) = frame.directions.get(frame.next) else {
                stack.pop();
                continue;
            };
            frame.next += 1;
            let current = frame.cell;

            let Some(midpoint) = current.step(direction, size) else {
                continue;
            };
            let Some(target) = midpoint.step(direction, size) else {
                continue;
            };
            if !is_interior(target, size) || !maze.is_wall(target) {
                continue;
            }

            maze.set(midpoint, Cell::Path);
            maze.set(target, Cell::Path);
            stack.push(self.frame(target));
        }
    }
}

impl Default for MazeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn is_interior(position: Position, size: usize) -> bool {
    (1..size - 1).contains(&position.x) && (1..size - 1).contains(&position.y)
}

/// Carve the shortest run of interior wall cells joining `goal` to the region
/// reachable from `start`. Returns the number of cells opened.
fn bridge(maze: &mut Maze, start: Position, goal: Position) -> usize {
    let size = maze.size();
    let reachable = maze.reachable_from(start);
    let index = |p: Position| p.y * size + p.x;

    let mut parent: Vec<Option<Position>> = vec![None; size * size];
    let mut seen = vec![false; size * size];
    let mut queue = VecDeque::from([goal]);
    seen[index(goal)] = true;

    while let Some(current) = queue.pop_front() {
        let neighbors: Vec<Position> = maze.neighbors(current).map(|(_, next)| next).collect();
        for next in neighbors {
            let idx = index(next);
            if seen[idx] {
                continue;
            }
            seen[idx] = true;
            if reachable[idx] {
                let mut opened = 0;
                let mut cursor = current;
                while cursor != goal {
                    maze.set(cursor, Cell::Path);
                    opened += 1;
                    match parent[index(cursor)] {
                        Some(prev) => cursor = prev,
                        None => break,
                    }
                }
                return opened;
            }
            if maze.is_wall(next) && is_interior(next, size) {
                parent[idx] = Some(current);
                queue.push_back(next);
            }
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_tiny_sizes() {
        let mut generator = MazeGenerator::with_seed(1);
        assert!(matches!(
            generator.generate(3),
            Err(Error::InvalidMazeSize { size: 3, .. })
        ));
    }

    #[test]
    fn test_rejects_out_of_bounds_goal() {
        let mut generator = MazeGenerator::with_seed(1);
        let err = generator
            .generate_with(10, Position::START, Position::new(10, 3))
            .unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { size: 10, .. }));
    }

    #[test]
    fn test_rejects_start_on_border() {
        let mut generator = MazeGenerator::with_seed(1);
        let err = generator
            .generate_with(10, Position::new(0, 0), Position::goal_for(10))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::StartOnBorder {
                position: Position { x: 0, y: 0 },
                size: 10
            }
        ));
    }

    #[test]
    fn test_off_lattice_goal_stays_connected() {
        let goal = Position::new(4, 4);
        for seed in 0..20 {
            let maze = MazeGenerator::with_seed(seed)
                .generate_with(11, Position::START, goal)
                .unwrap();
            assert!(maze.is_path(goal));
            assert!(maze.is_fully_connected(Position::START));
        }
    }

    #[test]
    fn test_same_seed_same_maze() {
        let a = MazeGenerator::with_seed(99).generate(16).unwrap();
        let b = MazeGenerator::with_seed(99).generate(16).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_consecutive_mazes_differ() {
        let mut generator = MazeGenerator::with_seed(5);
        let first = generator.generate(16).unwrap();
        let second = generator.generate(16).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_border_stays_solid() {
        let maze = MazeGenerator::with_seed(11).generate(10).unwrap();
        for i in 0..10 {
            assert!(maze.is_wall(Position::new(i, 0)));
            assert!(maze.is_wall(Position::new(i, 9)));
            assert!(maze.is_wall(Position::new(0, i)));
            assert!(maze.is_wall(Position::new(9, i)));
        }
    }

    #[test]
    fn test_even_size_goal_is_bridged_by_one_cell() {
        let maze = MazeGenerator::with_seed(3).generate(10).unwrap();
        let goal = Position::goal_for(10);
        assert!(maze.is_path(goal));
        assert!(maze.is_reachable(Position::START, goal));
        // The goal is a dead end hanging off the lattice.
        let open_neighbors = maze
            .neighbors(goal)
            .filter(|(_, next)| maze.is_path(*next))
            .count();
        assert_eq!(open_neighbors, 1);
    }

    #[test]
    fn test_odd_size_goal_lies_on_lattice() {
        let maze = MazeGenerator::with_seed(8).generate(11).unwrap();
        assert!(maze.is_reachable(Position::START, Position::goal_for(11)));
        assert_eq!(maze.passage_count(), maze.path_count() - 1);
    }

    #[test]
    fn test_large_maze_does_not_overflow() {
        let maze = MazeGenerator::with_seed(21).generate(401).unwrap();
        assert!(maze.is_fully_connected(Position::START));
    }
}
