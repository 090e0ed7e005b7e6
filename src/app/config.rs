//! Configuration for the race core.

use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    q_learning::{
        DISCOUNT_FACTOR, EXPLORATION_DECAY, INITIAL_EXPLORATION_RATE, LEARNING_RATE,
        MIN_EXPLORATION_RATE,
    },
};

/// Default simulation ticks per second.
pub const DEFAULT_TICK_RATE_HZ: u32 = 10;

/// Configuration for the learning agent and the tick pacing.
///
/// Builder-style API; every field has a default matching the classic game.
///
/// # Examples
///
/// ```
/// use maze_race::app::RaceConfig;
///
/// let config = RaceConfig::new()
///     .with_seed(42)
///     .with_exploration(1.0, 0.99, 0.05);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceConfig {
    /// Learning rate α
    pub learning_rate: f64,
    /// Discount factor γ
    pub discount_factor: f64,
    /// Exploration rate at the start of every difficulty run
    pub initial_exploration_rate: f64,
    /// Multiplicative exploration decay per tick
    pub exploration_decay: f64,
    /// Exploration floor
    pub min_exploration_rate: f64,
    /// Ticks per second of the presentation loop
    pub tick_rate_hz: u32,
    /// Random seed for reproducibility (mazes and agent)
    pub seed: Option<u64>,
}

impl RaceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    /// Set initial exploration rate, per-tick decay and floor together.
    pub fn with_exploration(mut self, initial: f64, decay: f64, min: f64) -> Self {
        self.initial_exploration_rate = initial;
        self.exploration_decay = decay;
        self.min_exploration_rate = min;
        self
    }

    pub fn with_tick_rate(mut self, tick_rate_hz: u32) -> Self {
        self.tick_rate_hz = tick_rate_hz;
        self
    }

    /// Wall-clock duration of one tick.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.tick_rate_hz.max(1)))
    }

    /// Check parameter ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Err(Error::InvalidConfiguration { message });

        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return invalid(format!(
                "learning_rate must be in (0, 1], got {}",
                self.learning_rate
            ));
        }
        if !(0.0..1.0).contains(&self.discount_factor) {
            return invalid(format!(
                "discount_factor must be in [0, 1), got {}",
                self.discount_factor
            ));
        }
        if !(self.exploration_decay > 0.0 && self.exploration_decay <= 1.0) {
            return invalid(format!(
                "exploration_decay must be in (0, 1], got {}",
                self.exploration_decay
            ));
        }
        if !(0.0..=1.0).contains(&self.min_exploration_rate) {
            return invalid(format!(
                "min_exploration_rate must be in [0, 1], got {}",
                self.min_exploration_rate
            ));
        }
        if !(self.min_exploration_rate..=1.0).contains(&self.initial_exploration_rate) {
            return invalid(format!(
                "initial_exploration_rate must be in [{}, 1], got {}",
                self.min_exploration_rate, self.initial_exploration_rate
            ));
        }
        if self.tick_rate_hz == 0 {
            return invalid("tick_rate_hz must be positive".to_string());
        }
        Ok(())
    }

    /// Load and validate a configuration from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| Error::Io {
            operation: format!("open config {}", path.display()),
            source,
        })?;
        let config: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            learning_rate: LEARNING_RATE,
            discount_factor: DISCOUNT_FACTOR,
            initial_exploration_rate: INITIAL_EXPLORATION_RATE,
            exploration_decay: EXPLORATION_DECAY,
            min_exploration_rate: MIN_EXPLORATION_RATE,
            tick_rate_hz: DEFAULT_TICK_RATE_HZ,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = RaceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.learning_rate, 0.1);
        assert_eq!(config.discount_factor, 0.9);
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_discount_of_one_rejected() {
        let err = RaceConfig::new().with_discount_factor(1.0).validate().unwrap_err();
        assert!(err.to_string().contains("discount_factor"));
    }

    #[test]
    fn test_initial_below_floor_rejected() {
        let config = RaceConfig::new().with_exploration(0.001, 0.995, 0.01);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: RaceConfig = serde_json::from_str(r#"{"seed": 7, "learning_rate": 0.5}"#).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.learning_rate, 0.5);
        assert_eq!(config.exploration_decay, EXPLORATION_DECAY);
    }

    #[test]
    fn test_save_and_load() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = RaceConfig::new().with_seed(3).with_tick_rate(20);
        config.save(file.path()).unwrap();
        assert_eq!(RaceConfig::load(file.path()).unwrap(), config);
    }
}
