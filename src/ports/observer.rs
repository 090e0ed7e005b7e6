//! Observer port - abstraction for watching simulated races
//!
//! Observers collect progress, metrics and exports without coupling the
//! simulation loop to any output format.

use crate::{
    Result,
    maze::Maze,
    race::{EpisodeResult, Snapshot, TickReport},
};

/// Observer trait for monitoring a simulation run
///
/// # Event Sequence
///
/// 1. `on_simulation_start(total_episodes)` - Once at the beginning
/// 2. For each episode:
///    - `on_episode_start(episode, snapshot, maze)`
///    - `on_tick(episode, report)` - For each tick
///    - `on_episode_end(result)` - Only if the episode was decided
/// 3. `on_simulation_end()` - Once at the end
///
/// # Examples
///
/// ```no_run
/// use maze_race::{ports::RaceObserver, race::EpisodeResult, types::Competitor};
///
/// struct AgentWins {
///     count: usize,
/// }
///
/// impl RaceObserver for AgentWins {
///     fn on_episode_end(&mut self, result: &EpisodeResult) -> maze_race::Result<()> {
///         if result.winner == Competitor::Agent {
///             self.count += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait RaceObserver: Send {
    fn on_simulation_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called once the episode's maze is in place, before the first tick.
    fn on_episode_start(&mut self, _episode: usize, _snapshot: &Snapshot, _maze: &Maze) -> Result<()> {
        Ok(())
    }

    /// Called after every tick of an undecided episode, including the
    /// deciding one.
    fn on_tick(&mut self, _episode: usize, _report: &TickReport) -> Result<()> {
        Ok(())
    }

    fn on_episode_end(&mut self, _result: &EpisodeResult) -> Result<()> {
        Ok(())
    }

    /// Called when the run completes. Use this to flush files or print
    /// summaries.
    fn on_simulation_end(&mut self) -> Result<()> {
        Ok(())
    }
}
