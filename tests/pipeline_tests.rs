//! Tests for the headless simulation pipeline

use std::sync::{Arc, Mutex};

use maze_race::{
    Error,
    adapters::{IdlePlayer, RandomPlayer, ScriptedPlayer, ShortestPathPlayer},
    maze::Maze,
    pipeline::{
        CsvObserver, FixedLayout, MetricsObserver, SimulationConfig, SimulationPipeline,
        SimulationResult,
    },
    ports::RaceObserver,
    race::{EpisodeResult, Snapshot, TickReport},
    types::{Action, Competitor, Difficulty},
};

#[derive(Default)]
struct EventLog {
    events: Vec<String>,
    ticks: usize,
}

struct RecordingObserver {
    log: Arc<Mutex<EventLog>>,
}

impl RaceObserver for RecordingObserver {
    fn on_simulation_start(&mut self, total_episodes: usize) -> maze_race::Result<()> {
        self.log.lock().unwrap().events.push(format!("start {total_episodes}"));
        Ok(())
    }

    fn on_episode_start(
        &mut self,
        episode: usize,
        _snapshot: &Snapshot,
        _maze: &Maze,
    ) -> maze_race::Result<()> {
        self.log.lock().unwrap().events.push(format!("episode {episode}"));
        Ok(())
    }

    fn on_tick(&mut self, _episode: usize, _report: &TickReport) -> maze_race::Result<()> {
        self.log.lock().unwrap().ticks += 1;
        Ok(())
    }

    fn on_episode_end(&mut self, result: &EpisodeResult) -> maze_race::Result<()> {
        self.log
            .lock()
            .unwrap()
            .events
            .push(format!("end {} {}", result.episode, result.winner));
        Ok(())
    }

    fn on_simulation_end(&mut self) -> maze_race::Result<()> {
        self.log.lock().unwrap().events.push("done".to_string());
        Ok(())
    }
}

fn config(episodes: usize, seed: u64) -> SimulationConfig {
    SimulationConfig {
        episodes,
        seed: Some(seed),
        ..SimulationConfig::default()
    }
}

#[test]
fn test_observer_event_order() {
    let log = Arc::new(Mutex::new(EventLog::default()));
    let mut pipeline = SimulationPipeline::new(config(2, 42)).with_observer(Box::new(
        RecordingObserver {
            log: Arc::clone(&log),
        },
    ));
    let result = pipeline.run(&mut ShortestPathPlayer::new(1)).unwrap();

    let log = log.lock().unwrap();
    assert_eq!(
        log.events,
        vec![
            "start 2",
            "episode 0",
            "end 0 player",
            "episode 1",
            "end 1 player",
            "done"
        ]
    );
    let total_ticks: usize = result.episodes.iter().map(|e| e.ticks).sum();
    assert_eq!(log.ticks, total_ticks);
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let run = |seed| {
        SimulationPipeline::new(config(5, seed))
            .run(&mut RandomPlayer::new())
            .unwrap()
    };
    assert_eq!(run(9), run(9));
}

#[test]
fn test_idle_player_lets_agent_win() {
    let config = SimulationConfig {
        layout: Some(FixedLayout::classic()),
        ..config(5, 3)
    };
    let result = SimulationPipeline::new(config).run(&mut IdlePlayer).unwrap();
    assert_eq!(result.agent_wins, 5);
    assert_eq!(result.agent_win_rate, 1.0);
    assert!(result.final_exploration_rate < 1.0);
    assert!(result.episodes.iter().all(|e| e.winner == Competitor::Agent));
}

#[test]
fn test_csv_and_json_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("episodes.csv");
    let json_path = dir.path().join("summary.json");

    let mut pipeline = SimulationPipeline::new(config(4, 5))
        .with_observer(Box::new(CsvObserver::new(&csv_path).unwrap()))
        .with_observer(Box::new(MetricsObserver::new()));
    let result = pipeline.run(&mut ShortestPathPlayer::new(2)).unwrap();
    result.save(&json_path).unwrap();

    let loaded = SimulationResult::load(&json_path).unwrap();
    assert_eq!(loaded, result);

    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    let rows: Vec<EpisodeResult> = reader.deserialize().map(|row| row.unwrap()).collect();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows, result.episodes);
}

#[test]
fn test_blackout_difficulty_runs_on_large_mazes() {
    let config = SimulationConfig {
        difficulty: Difficulty::Blackout,
        ..config(2, 77)
    };
    let (result, controller) = SimulationPipeline::new(config)
        .run_with_controller(&mut ShortestPathPlayer::new(1))
        .unwrap();
    assert_eq!(result.total_episodes, 2);
    assert_eq!(controller.maze().unwrap().size(), 16);
    assert_eq!(controller.episode_count(), 1);
}

#[test]
fn test_tick_limit_reports_episode() {
    let config = SimulationConfig {
        max_ticks_per_episode: 3,
        layout: Some(FixedLayout::classic()),
        ..config(1, 1)
    };
    let err = SimulationPipeline::new(config)
        .run(&mut ScriptedPlayer::new(vec![Action::Right]))
        .unwrap_err();
    assert!(matches!(err, Error::TickLimitExceeded { limit: 3, .. }));
}
