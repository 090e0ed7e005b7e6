//! Episode controller state machine across difficulty runs

mod common;

use maze_race::{
    Error,
    race::Phase,
    types::{Difficulty, Position},
};

#[test]
fn test_learning_carries_across_episodes() {
    let (mut controller, clock) = common::seeded_controller(31);
    controller.select_difficulty(Difficulty::Medium).unwrap();

    for episode in 0..4 {
        assert_eq!(controller.phase(), Phase::Racing);
        assert_eq!(controller.episode_count(), episode);
        let goal = Position::goal_for(16);
        let plan = common::route_to(&controller, goal);
        common::play_until_decided(&mut controller, &clock, &plan).unwrap();
        assert_eq!(controller.phase(), Phase::Finished);

        let rate = controller.agent().exploration_rate();
        controller.advance().unwrap();
        assert_eq!(controller.agent().exploration_rate(), rate);
        assert!(!controller.agent().q_table().is_zeroed());
        assert_eq!(controller.agent().q_table().dimensions(), (16, 16, 4));
    }
}

#[test]
fn test_back_and_reselect_resizes_table() {
    let (mut controller, clock) = common::seeded_controller(8);
    controller.select_difficulty(Difficulty::Medium).unwrap();
    let plan = common::route_to(&controller, Position::goal_for(16));
    common::play_until_decided(&mut controller, &clock, &plan).unwrap();
    controller.advance().unwrap();
    assert_eq!(controller.episode_count(), 1);

    let plan = common::route_to(&controller, Position::goal_for(16));
    common::play_until_decided(&mut controller, &clock, &plan).unwrap();
    controller.back().unwrap();
    assert_eq!(controller.phase(), Phase::Selecting);
    assert!(controller.snapshot().is_none());

    let snapshot = controller.select_difficulty(Difficulty::Easy).unwrap();
    assert_eq!(snapshot.size, 10);
    assert_eq!(snapshot.episode, 0);
    assert_eq!(controller.agent().q_table().dimensions(), (10, 10, 4));
    assert!(controller.agent().q_table().is_zeroed());
    assert_eq!(controller.agent().exploration_rate(), 1.0);
}

#[test]
fn test_commands_in_wrong_phase_are_rejected() {
    let (mut controller, _) = common::seeded_controller(1);
    let err = controller.advance().unwrap_err();
    assert_eq!(err.to_string(), "cannot advance while selecting");

    controller.select_difficulty(Difficulty::Easy).unwrap();
    let err = controller.advance().unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidPhase {
            operation: "advance",
            phase: "racing"
        }
    ));
    let err = controller.select_difficulty(Difficulty::Blackout).unwrap_err();
    assert_eq!(err.to_string(), "cannot select a difficulty while racing");
    assert_eq!(controller.difficulty(), Some(Difficulty::Easy));
}

#[test]
fn test_snapshot_reflects_race() {
    let (mut controller, clock) = common::seeded_controller(12);
    controller.select_difficulty(Difficulty::Easy).unwrap();
    let plan = common::route_to(&controller, Position::goal_for(10));
    let result = common::play_until_decided(&mut controller, &clock, &plan).unwrap();

    let snapshot = controller.snapshot().unwrap();
    assert!(snapshot.is_finished());
    assert_eq!(snapshot.winner, Some(result.winner));
    assert_eq!(snapshot.player, snapshot.goal);
    assert_eq!(snapshot.elapsed_secs, result.elapsed_secs);
    // Ticks are 100 ms apart and the first one moved the player.
    let expected = (plan.len() - 1) as f64 * 0.1;
    assert!((snapshot.elapsed_secs - expected).abs() < 1e-9);
}
