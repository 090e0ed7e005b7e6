//! Common test utilities for the maze race test suite.

#![allow(dead_code)]

use std::sync::Arc;

use maze_race::{
    adapters::ManualClock,
    app::RaceConfig,
    maze::Maze,
    race::EpisodeController,
    types::{Action, Position},
};

/// Controller on a shared virtual clock, seeded for reproducibility.
pub fn seeded_controller(seed: u64) -> (EpisodeController, ManualClock) {
    let clock = ManualClock::new();
    let config = RaceConfig::new().with_seed(seed);
    let controller = EpisodeController::new(&config, Arc::new(clock.clone()))
        .expect("default config is valid");
    (controller, clock)
}

/// Drive the controller with `plan` until the race is decided or the plan
/// runs out, advancing the clock 100 ms per tick.
pub fn play_until_decided(
    controller: &mut EpisodeController,
    clock: &ManualClock,
    plan: &[Action],
) -> Option<maze_race::race::EpisodeResult> {
    for &action in plan {
        clock.advance(std::time::Duration::from_millis(100));
        let report = controller.tick(Some(action)).expect("racing");
        if report.outcome.is_some() {
            return report.outcome;
        }
    }
    None
}

/// Shortest route from the start to `goal` on the controller's maze.
pub fn route_to(controller: &EpisodeController, goal: Position) -> Vec<Action> {
    controller
        .maze()
        .and_then(|maze| maze.shortest_path(Position::START, goal))
        .expect("goal is reachable")
}

/// Whether `maze` is connected with no cycles: a spanning tree over its open
/// cells.
pub fn is_perfect(maze: &Maze) -> bool {
    maze.is_fully_connected(Position::START) && maze.passage_count() + 1 == maze.path_count()
}
