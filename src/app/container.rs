//! Dependency injection container for the maze race.
//!
//! The container owns the infrastructure dependencies (the clock) and builds
//! controllers and agents from a [`RaceConfig`].

use std::sync::Arc;

use super::config::RaceConfig;
use crate::{
    Result,
    adapters::SystemClock,
    ports::Clock,
    q_learning::QLearningAgent,
    race::EpisodeController,
};

/// Application with dependency injection.
///
/// # Examples
///
/// ## Production usage
///
/// ```
/// use maze_race::app::{App, RaceConfig};
/// use maze_race::types::Difficulty;
///
/// let app = App::new();
/// let mut controller = app.create_controller(RaceConfig::new().with_seed(42))?;
/// controller.select_difficulty(Difficulty::Easy)?;
/// # Ok::<(), maze_race::Error>(())
/// ```
///
/// ## Testing with a virtual clock
///
/// ```
/// use maze_race::adapters::ManualClock;
/// use maze_race::app::App;
///
/// let clock = ManualClock::new();
/// let app = App::for_testing()
///     .with_clock(clock.clone())
///     .with_default_seed(42)
///     .build();
/// ```
pub struct App {
    clock: Arc<dyn Clock>,
    /// Default random seed (None = non-deterministic)
    default_seed: Option<u64>,
}

impl App {
    /// Create a new app with production defaults: the wall clock and no
    /// default seed.
    pub fn new() -> Self {
        Self {
            clock: Arc::new(SystemClock::new()),
            default_seed: None,
        }
    }

    /// Create a builder for constructing app with custom dependencies.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    pub fn default_seed(&self) -> Option<u64> {
        self.default_seed
    }

    fn seeded(&self, mut config: RaceConfig) -> RaceConfig {
        // Apply seed from config or use container default
        if config.seed.is_none() {
            config.seed = self.default_seed;
        }
        config
    }

    /// Create an episode controller in the `Selecting` phase.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] when `config` fails
    /// validation.
    pub fn create_controller(&self, config: RaceConfig) -> Result<EpisodeController> {
        let config = self.seeded(config);
        EpisodeController::new(&config, self.clock())
    }

    /// Create a standalone agent for a maze of side `size`.
    pub fn create_agent(&self, config: RaceConfig, size: usize) -> Result<QLearningAgent> {
        let config = self.seeded(config);
        config.validate()?;
        Ok(QLearningAgent::from_config(&config, size))
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing app with custom dependencies.
///
/// Primarily used for testing to inject a virtual clock and control
/// randomness.
pub struct AppBuilder {
    clock: Option<Arc<dyn Clock>>,
    default_seed: Option<u64>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            clock: None,
            default_seed: None,
        }
    }

    pub fn with_clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Set a default random seed for every controller and agent created by
    /// this container.
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    /// Build the app. Uses [`SystemClock`] if no clock was given.
    pub fn build(self) -> App {
        App {
            clock: self
                .clock
                .unwrap_or_else(|| Arc::new(SystemClock::new())),
            default_seed: self.default_seed,
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}
