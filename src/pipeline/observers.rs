//! Observers for simulation pipelines
//!
//! Observers allow composable data collection during a run without coupling
//! the simulation loop to specific output formats.

use std::{fs::File, io::BufWriter, path::Path};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    Result,
    maze::Maze,
    ports::RaceObserver,
    race::{EpisodeResult, Snapshot, TickReport},
    types::Competitor,
};

/// Progress bar observer - Shows simulation progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    player_wins: usize,
    agent_wins: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            player_wins: 0,
            agent_wins: 0,
        }
    }

    fn tally(&self) -> String {
        format!("{} A:{}", self.player_wins, self.agent_wins)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl RaceObserver for ProgressObserver {
    fn on_simulation_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes (P:{msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, result: &EpisodeResult) -> Result<()> {
        match result.winner {
            Competitor::Player => self.player_wins += 1,
            Competitor::Agent => self.agent_wins += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(result.episode as u64 + 1);
            pb.set_message(self.tally());
        }
        Ok(())
    }

    fn on_simulation_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.tally());
        }
        Ok(())
    }
}

/// Metrics observer - Tracks win counts and episode lengths
pub struct MetricsObserver {
    player_wins: usize,
    agent_wins: usize,
    total_episodes: usize,
    tick_counts: Vec<usize>,
    agent_blocked_moves: usize,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self {
            player_wins: 0,
            agent_wins: 0,
            total_episodes: 0,
            tick_counts: Vec::new(),
            agent_blocked_moves: 0,
        }
    }

    pub fn player_win_rate(&self) -> f64 {
        if self.total_episodes == 0 {
            0.0
        } else {
            self.player_wins as f64 / self.total_episodes as f64
        }
    }

    pub fn agent_win_rate(&self) -> f64 {
        if self.total_episodes == 0 {
            0.0
        } else {
            self.agent_wins as f64 / self.total_episodes as f64
        }
    }

    /// Mean ticks per episode, counting the episode in progress.
    pub fn avg_episode_length(&self) -> f64 {
        if self.tick_counts.is_empty() {
            0.0
        } else {
            self.tick_counts.iter().sum::<usize>() as f64 / self.tick_counts.len() as f64
        }
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_episodes: self.total_episodes,
            player_wins: self.player_wins,
            agent_wins: self.agent_wins,
            player_win_rate: self.player_win_rate(),
            agent_win_rate: self.agent_win_rate(),
            avg_episode_length: self.avg_episode_length(),
            agent_blocked_moves: self.agent_blocked_moves,
        }
    }
}

/// Summary of simulation metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_episodes: usize,
    pub player_wins: usize,
    pub agent_wins: usize,
    pub player_win_rate: f64,
    pub agent_win_rate: f64,
    pub avg_episode_length: f64,
    /// Agent moves into walls or off the grid, over the whole run
    pub agent_blocked_moves: usize,
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl RaceObserver for MetricsObserver {
    fn on_episode_start(&mut self, _episode: usize, _snapshot: &Snapshot, _maze: &Maze) -> Result<()> {
        self.tick_counts.push(0);
        Ok(())
    }

    fn on_tick(&mut self, _episode: usize, report: &TickReport) -> Result<()> {
        if let Some(last) = self.tick_counts.last_mut() {
            *last += 1;
        }
        if report.agent_step.is_some_and(|step| !step.accepted) {
            self.agent_blocked_moves += 1;
        }
        Ok(())
    }

    fn on_episode_end(&mut self, result: &EpisodeResult) -> Result<()> {
        self.total_episodes += 1;
        match result.winner {
            Competitor::Player => self.player_wins += 1,
            Competitor::Agent => self.agent_wins += 1,
        }
        Ok(())
    }
}

/// CSV observer - One row per finished episode
///
/// Columns: `episode`, `difficulty`, `winner`, `ticks`, `elapsed_secs`,
/// `exploration_rate`.
pub struct CsvObserver {
    writer: csv::Writer<BufWriter<File>>,
}

impl CsvObserver {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: csv::Writer::from_writer(BufWriter::new(file)),
        })
    }
}

impl RaceObserver for CsvObserver {
    fn on_episode_end(&mut self, result: &EpisodeResult) -> Result<()> {
        self.writer.serialize(result)?;
        Ok(())
    }

    fn on_simulation_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Logs every episode result through `tracing`.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl RaceObserver for TracingObserver {
    fn on_simulation_start(&mut self, total_episodes: usize) -> Result<()> {
        info!(total_episodes, "simulation started");
        Ok(())
    }

    fn on_episode_start(&mut self, episode: usize, snapshot: &Snapshot, maze: &Maze) -> Result<()> {
        info!(
            episode,
            size = snapshot.size,
            difficulty = %snapshot.difficulty,
            path_cells = maze.path_count(),
            "episode started"
        );
        Ok(())
    }

    fn on_episode_end(&mut self, result: &EpisodeResult) -> Result<()> {
        info!(
            episode = result.episode,
            winner = %result.winner,
            ticks = result.ticks,
            elapsed_secs = result.elapsed_secs,
            exploration_rate = result.exploration_rate,
            "episode result"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Difficulty, Position};

    fn result(episode: usize, winner: Competitor) -> EpisodeResult {
        EpisodeResult {
            episode,
            difficulty: Difficulty::Easy,
            winner,
            ticks: 12,
            elapsed_secs: 1.1,
            exploration_rate: 0.9,
        }
    }

    fn snapshot() -> Snapshot {
        Snapshot {
            size: 10,
            player: Position::START,
            agent: Position::START,
            goal: Position::new(8, 8),
            elapsed_secs: 0.0,
            winner: None,
            episode: 0,
            exploration_rate: 1.0,
            difficulty: Difficulty::Easy,
        }
    }

    #[test]
    fn test_metrics_observer_counts() {
        let maze = crate::maze::layouts::classic();
        let mut metrics = MetricsObserver::new();
        metrics.on_episode_start(0, &snapshot(), &maze).unwrap();
        for _ in 0..4 {
            metrics
                .on_tick(0, &TickReport::idle(snapshot()))
                .unwrap();
        }
        metrics.on_episode_end(&result(0, Competitor::Agent)).unwrap();
        metrics.on_episode_start(1, &snapshot(), &maze).unwrap();
        for _ in 0..2 {
            metrics
                .on_tick(1, &TickReport::idle(snapshot()))
                .unwrap();
        }
        metrics.on_episode_end(&result(1, Competitor::Player)).unwrap();

        let summary = metrics.summary();
        assert_eq!(summary.total_episodes, 2);
        assert_eq!(summary.agent_wins, 1);
        assert_eq!(summary.player_win_rate, 0.5);
        assert_eq!(summary.avg_episode_length, 3.0);
        assert_eq!(summary.agent_blocked_moves, 0);
    }

    #[test]
    fn test_csv_observer_writes_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("episodes.csv");
        let mut observer = CsvObserver::new(&path).unwrap();
        observer.on_episode_end(&result(0, Competitor::Player)).unwrap();
        observer.on_episode_end(&result(1, Competitor::Agent)).unwrap();
        observer.on_simulation_end().unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "episode,difficulty,winner,ticks,elapsed_secs,exploration_rate"
        );
        assert_eq!(lines.len(), 3);
        assert!(lines[2].starts_with("1,"));
    }
}
