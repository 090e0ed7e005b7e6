//! Simulate command - Race a scripted player against the learning agent

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use crate::{
    adapters::{IdlePlayer, RandomPlayer, ShortestPathPlayer},
    cli::{
        config::CommonArgs,
        output::{format_number, format_percent, print_section, print_stats_table},
    },
    pipeline::{
        CsvObserver, FixedLayout, ProgressObserver, SimulationConfig, SimulationPipeline,
        SimulationResult, TracingObserver,
    },
    ports::PlayerInput,
    types::Difficulty,
};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    /// Never moves
    Idle,
    /// Random direction every tick
    Random,
    /// Follows a shortest path, one move every `--player-stride` ticks
    ShortestPath,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    /// A fresh maze per episode
    Generated,
    /// The fixed 10x10 layout for every episode
    Classic,
}

#[derive(Parser, Debug)]
#[command(about = "Race a scripted player against the learning agent")]
pub struct SimulateArgs {
    /// Difficulty: easy, medium or blackout
    #[arg(long, short = 'd', default_value = "easy")]
    pub difficulty: Difficulty,

    /// Number of episodes
    #[arg(long, short = 'n', default_value_t = 100)]
    pub episodes: usize,

    /// Player strategy
    #[arg(long, value_enum, default_value_t = PlayerKind::ShortestPath)]
    pub player: PlayerKind,

    /// Ticks between moves of the shortest-path player
    #[arg(long, default_value_t = 3)]
    pub player_stride: usize,

    /// Maze source
    #[arg(long, value_enum, default_value_t = LayoutKind::Generated)]
    pub layout: LayoutKind,

    /// Abort if an episode runs longer than this many ticks
    #[arg(long, default_value_t = 50_000)]
    pub max_ticks: usize,

    /// Write one CSV row per episode
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Write the run summary as JSON
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub fn create_player(kind: PlayerKind, stride: usize) -> Box<dyn PlayerInput> {
    match kind {
        PlayerKind::Idle => Box::new(IdlePlayer),
        PlayerKind::Random => Box::new(RandomPlayer::new()),
        PlayerKind::ShortestPath => Box::new(ShortestPathPlayer::new(stride)),
    }
}

pub fn execute(args: SimulateArgs) -> Result<()> {
    let race = args.common.race_config()?;
    let layout = match args.layout {
        LayoutKind::Generated => None,
        LayoutKind::Classic => Some(FixedLayout::classic()),
    };
    let config = SimulationConfig {
        episodes: args.episodes,
        difficulty: args.difficulty,
        seed: race.seed,
        max_ticks_per_episode: args.max_ticks,
        layout,
        race,
    };

    let mut pipeline = SimulationPipeline::new(config).with_observer(Box::new(TracingObserver));
    if !args.no_progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.csv {
        let observer = CsvObserver::new(path)
            .with_context(|| format!("Failed to create CSV file {}", path.display()))?;
        pipeline = pipeline.with_observer(Box::new(observer));
    }

    let mut player = create_player(args.player, args.player_stride);
    println!(
        "Racing {} player on {} ({} episodes)",
        player.name(),
        args.difficulty,
        format_number(args.episodes)
    );
    let result = pipeline
        .run(player.as_mut())
        .context("Simulation failed")?;

    print_summary(&result);

    if let Some(path) = &args.csv {
        println!("\nEpisodes exported to: {}", path.display());
    }
    if let Some(path) = &args.summary {
        result
            .save(path)
            .with_context(|| format!("Failed to write summary to {}", path.display()))?;
        println!("Summary saved to: {}", path.display());
    }
    Ok(())
}

fn print_summary(result: &SimulationResult) {
    print_section("Simulation Results");
    let episodes = format_number(result.total_episodes);
    let player = format!(
        "{} ({})",
        result.player_wins,
        format_percent(result.player_win_rate)
    );
    let agent = format!(
        "{} ({})",
        result.agent_wins,
        format_percent(result.agent_win_rate)
    );
    let ticks = format!("{:.1}", result.avg_ticks);
    let elapsed = format!("{:.2}s", result.avg_elapsed_secs);
    let epsilon = format!("{:.4}", result.final_exploration_rate);
    print_stats_table(&[
        ("Episodes", &episodes),
        ("Player wins", &player),
        ("Agent wins", &agent),
        ("Avg ticks", &ticks),
        ("Avg time", &elapsed),
        ("Final epsilon", &epsilon),
    ]);
}
