//! Show command - Render a maze, optionally with a trained agent's policy

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use crate::{
    adapters::IdlePlayer,
    cli::{
        config::CommonArgs,
        output::{format_number, print_kv, print_section, print_subsection, render_maze},
    },
    maze::{Maze, MazeGenerator, layouts},
    pipeline::{FixedLayout, SimulationConfig, SimulationPipeline},
    q_learning::QLearningAgent,
    race::RaceState,
    types::{Difficulty, Position},
};

#[derive(Parser, Debug)]
#[command(about = "Render a maze as text")]
pub struct ShowArgs {
    /// Difficulty: easy, medium or blackout
    #[arg(long, short = 'd', default_value = "easy")]
    pub difficulty: Difficulty,

    /// `classic`, or a file of `#`/`.` rows. Generates a maze when omitted.
    #[arg(long)]
    pub layout: Option<String>,

    /// Goal cell as `x,y` for a layout file (defaults to the far corner)
    #[arg(long)]
    pub goal: Option<String>,

    /// Overlay the agent's greedy action on every open cell
    #[arg(long)]
    pub policy: bool,

    /// Episodes the agent races alone on this maze before the policy is shown
    #[arg(long, default_value_t = 0)]
    pub train: usize,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub fn execute(args: ShowArgs) -> Result<()> {
    let race = args.common.race_config()?;
    let (maze, goal) = load_maze(&args, race.seed)?;

    let agent = if args.train > 0 {
        let config = SimulationConfig {
            episodes: args.train,
            difficulty: args.difficulty,
            seed: race.seed,
            layout: Some(FixedLayout::new(maze.clone(), goal)),
            race: race.clone(),
            ..SimulationConfig::default()
        };
        let (result, controller) = SimulationPipeline::new(config)
            .run_with_controller(&mut IdlePlayer)
            .context("Training failed")?;
        println!(
            "Trained for {} episodes (avg {:.1} ticks)",
            format_number(result.total_episodes),
            result.avg_ticks
        );
        controller.agent().clone()
    } else {
        QLearningAgent::from_config(&race, maze.size())
    };

    let state = RaceState::new(maze.clone(), goal, args.difficulty)
        .context("Maze cannot be raced")?;
    let snapshot = state.snapshot(&agent);
    let policy = args.policy.then(|| agent.greedy_policy());

    print_section(&format!("{} maze ({}x{})", args.difficulty, maze.size(), maze.size()));
    print!("{}", render_maze(&maze, &snapshot, policy.as_deref()));

    print_subsection("Layout");
    print_kv("Goal", &goal.to_string());
    print_kv("Open cells", &format_number(maze.path_count()));
    let route = maze
        .shortest_path(Position::START, goal)
        .map_or_else(|| "unreachable".to_string(), |plan| plan.len().to_string());
    print_kv("Shortest route", &route);
    if args.policy {
        print_kv("Epsilon", &format!("{:.4}", agent.exploration_rate()));
    }
    Ok(())
}

fn load_maze(args: &ShowArgs, seed: Option<u64>) -> Result<(Maze, Position)> {
    match args.layout.as_deref() {
        Some("classic") => Ok((layouts::classic(), layouts::CLASSIC_GOAL)),
        Some(path) => {
            let path = PathBuf::from(path);
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read layout {}", path.display()))?;
            let maze = Maze::parse(&text)
                .with_context(|| format!("Invalid layout {}", path.display()))?;
            let goal = match &args.goal {
                Some(goal) => parse_position(goal)?,
                None => Position::goal_for(maze.size()),
            };
            Ok((maze, goal))
        }
        None => {
            let size = args.difficulty.maze_size();
            let mut generator = match seed {
                Some(seed) => MazeGenerator::with_seed(seed),
                None => MazeGenerator::new(),
            };
            Ok((generator.generate(size)?, Position::goal_for(size)))
        }
    }
}

fn parse_position(text: &str) -> Result<Position> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| anyhow!("Expected a cell as x,y, got '{text}'"))?;
    let x = x.trim().parse().with_context(|| format!("Invalid x in '{text}'"))?;
    let y = y.trim().parse().with_context(|| format!("Invalid y in '{text}'"))?;
    Ok(Position::new(x, y))
}
