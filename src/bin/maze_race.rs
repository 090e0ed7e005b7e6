//! Maze race CLI - a human-style player against a tabular Q-learning agent
//!
//! - Simulating many races headlessly with scripted players
//! - Rendering generated or built-in mazes, with learned policies

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;

#[derive(Parser)]
#[command(name = "maze-race")]
#[command(version, about = "Maze race against a Q-learning agent", long_about = None)]
struct Cli {
    /// Log debug events to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Race a scripted player against the agent for many episodes
    Simulate(maze_race::cli::commands::simulate::SimulateArgs),

    /// Render a maze as text
    Show(maze_race::cli::commands::show::ShowArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Simulate(args) => maze_race::cli::commands::simulate::execute(args),
        Commands::Show(args) => maze_race::cli::commands::show::execute(args),
    }
}
