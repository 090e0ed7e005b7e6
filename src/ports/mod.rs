//! Ports (trait boundaries) for external dependencies.
//!
//! These traits are owned by the domain and implemented by adapters in
//! [`crate::adapters`].

pub mod clock;
pub mod observer;
pub mod player;

pub use clock::Clock;
pub use observer::RaceObserver;
pub use player::PlayerInput;
