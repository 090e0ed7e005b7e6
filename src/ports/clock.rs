//! Clock port - monotonic time source for the race timer

use std::time::Duration;

/// Monotonic clock.
///
/// Readings are offsets from an arbitrary origin; only differences between
/// two readings of the same clock are meaningful.
pub trait Clock: Send + Sync {
    fn now(&self) -> Duration;
}
