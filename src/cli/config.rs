//! Shared configuration arguments for CLI commands

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::app::RaceConfig;

/// Options every command accepts
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// JSON file with agent parameters (learning rate, exploration, tick rate)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

impl CommonArgs {
    /// Defaults, overlaid by `--config`, then by `--seed`.
    pub fn race_config(&self) -> Result<RaceConfig> {
        let mut config = match &self.config {
            Some(path) => RaceConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => RaceConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("race.json");
        RaceConfig::new().with_seed(1).save(&path).unwrap();

        let args = CommonArgs {
            config: Some(path),
            seed: Some(9),
        };
        assert_eq!(args.race_config().unwrap().seed, Some(9));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let args = CommonArgs {
            config: Some(PathBuf::from("/nonexistent/race.json")),
            seed: None,
        };
        let err = args.race_config().unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }
}
