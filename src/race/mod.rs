//! The race between the player and the learning agent
//!
//! - [`step`]: per-episode state and the single tick that moves both
//!   competitors, trains the agent and decides the winner
//! - [`controller`]: the Selecting / Racing / Finished state machine
//! - [`reward`]: reward shaping for agent moves
//! - [`visibility`]: which cells a renderer may draw in blackout mode
//! - [`snapshot`]: read-only views handed to renderers and observers
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use maze_race::{
//!     adapters::ManualClock,
//!     app::RaceConfig,
//!     race::{EpisodeController, Phase},
//!     types::{Action, Difficulty},
//! };
//!
//! let clock = ManualClock::new();
//! let mut controller =
//!     EpisodeController::new(&RaceConfig::new().with_seed(3), Arc::new(clock.clone()))?;
//! controller.select_difficulty(Difficulty::Easy)?;
//!
//! clock.advance(std::time::Duration::from_millis(100));
//! let report = controller.tick(Some(Action::Right))?;
//! assert_eq!(report.snapshot.size, 10);
//! assert_eq!(controller.phase(), Phase::Racing);
//! # Ok::<(), maze_race::Error>(())
//! ```

pub mod controller;
pub mod reward;
pub mod snapshot;
pub mod step;
pub mod visibility;

pub use controller::{EpisodeController, Phase};
pub use reward::{GOAL_REWARD, STEP_PENALTY, WALL_PENALTY};
pub use snapshot::{AgentStep, EpisodeResult, Snapshot, TickReport};
pub use step::RaceState;
