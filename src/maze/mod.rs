//! Maze grids and their generation
//!
//! - [`Maze`]: immutable-after-generation grid of wall and path cells with
//!   flood-fill reachability and shortest-path queries
//! - [`MazeGenerator`]: randomized depth-first carving that always yields a
//!   fully connected, loop-free maze
//! - [`layouts`]: fixed hand-authored mazes
//!
//! ```
//! use maze_race::maze::MazeGenerator;
//! use maze_race::types::Position;
//!
//! let maze = MazeGenerator::with_seed(7).generate(10).unwrap();
//! assert!(maze.is_reachable(Position::START, Position::goal_for(10)));
//! ```

pub mod generator;
pub mod grid;
pub mod layouts;

pub use generator::{MIN_MAZE_SIZE, MazeGenerator};
pub use grid::{Cell, Maze};
