//! Player port - where the human side of the race gets its commands
//!
//! An interactive front end would translate keystrokes into [`Action`]s; the
//! headless pipeline uses the scripted strategies in
//! [`crate::adapters::players`].

use crate::{maze::Maze, race::Snapshot, types::Action};

/// Source of player commands, polled once per tick.
///
/// # Examples
///
/// ```
/// use maze_race::{
///     maze::Maze,
///     ports::PlayerInput,
///     race::Snapshot,
///     types::Action,
/// };
///
/// struct AlwaysRight;
///
/// impl PlayerInput for AlwaysRight {
///     fn name(&self) -> &str {
///         "always-right"
///     }
///
///     fn next_command(&mut self, _snapshot: &Snapshot, _maze: &Maze) -> Option<Action> {
///         Some(Action::Right)
///     }
/// }
/// ```
pub trait PlayerInput: Send {
    fn name(&self) -> &str;

    /// Command for the coming tick, or `None` to stay put.
    fn next_command(&mut self, snapshot: &Snapshot, maze: &Maze) -> Option<Action>;

    /// Called once a new episode's maze is in place.
    fn on_episode_start(&mut self, _snapshot: &Snapshot, _maze: &Maze) {}

    /// Reseed any internal randomness.
    fn set_rng_seed(&mut self, _seed: u64) {}
}
