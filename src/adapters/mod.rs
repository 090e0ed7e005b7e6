//! Adapters implementing domain ports.
//!
//! Clocks for [`crate::ports::Clock`] and scripted players for
//! [`crate::ports::PlayerInput`]. Observers live in [`crate::pipeline`].

pub mod clock;
pub mod players;

pub use clock::{ManualClock, SystemClock};
pub use players::{IdlePlayer, RandomPlayer, ScriptedPlayer, ShortestPathPlayer};
