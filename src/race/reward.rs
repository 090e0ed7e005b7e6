//! Reward shaping and move transitions
//!
//! Both functions take the maze and goal explicitly and are independent of
//! whose turn it is.

use crate::{
    maze::Maze,
    types::{Action, Position},
};

pub const GOAL_REWARD: f64 = 100.0;
pub const WALL_PENALTY: f64 = -10.0;
pub const STEP_PENALTY: f64 = -1.0;

/// Reward for landing on (or bumping into) `position`.
pub fn reward(maze: &Maze, goal: Position, position: Position) -> f64 {
    if position == goal {
        GOAL_REWARD
    } else if maze.is_wall(position) {
        WALL_PENALTY
    } else {
        STEP_PENALTY
    }
}

/// Outcome of attempting `action` from a cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// Attempted cell; the current cell when the move would leave the grid
    pub target: Position,
    /// Reward of `target`
    pub reward: f64,
    /// Whether the mover actually ends up on `target`
    pub accepted: bool,
}

pub fn transition(maze: &Maze, goal: Position, from: Position, action: Action) -> Transition {
    match from.step(action, maze.size()) {
        Some(target) => Transition {
            target,
            reward: reward(maze, goal, target),
            accepted: maze.is_path(target),
        },
        None => Transition {
            target: from,
            reward: reward(maze, goal, from),
            accepted: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::layouts;

    #[test]
    fn test_reward_for_every_cell_class() {
        let maze = layouts::classic();
        let goal = layouts::CLASSIC_GOAL;
        for y in 0..maze.size() {
            for x in 0..maze.size() {
                let cell = Position::new(x, y);
                let expected = if cell == goal {
                    100.0
                } else if maze.is_wall(cell) {
                    -10.0
                } else {
                    -1.0
                };
                assert_eq!(reward(&maze, goal, cell), expected, "cell {cell}");
            }
        }
    }

    #[test]
    fn test_wall_transition_is_rejected_but_scored() {
        let maze = layouts::classic();
        let t = transition(&maze, layouts::CLASSIC_GOAL, Position::START, Action::Up);
        assert_eq!(t.target, Position::new(1, 0));
        assert_eq!(t.reward, WALL_PENALTY);
        assert!(!t.accepted);
    }

    #[test]
    fn test_open_transition() {
        let maze = layouts::classic();
        let t = transition(&maze, layouts::CLASSIC_GOAL, Position::START, Action::Right);
        assert_eq!(t.target, Position::new(2, 1));
        assert_eq!(t.reward, STEP_PENALTY);
        assert!(t.accepted);
    }

    #[test]
    fn test_goal_transition() {
        let maze = layouts::classic();
        let t = transition(&maze, layouts::CLASSIC_GOAL, Position::new(8, 7), Action::Down);
        assert_eq!(t.reward, GOAL_REWARD);
        assert!(t.accepted);
    }

    #[test]
    fn test_leaving_grid_scores_the_current_cell() {
        let maze = Maze::parse("#####\n..#.#\n#...#\n#.#.#\n#####").unwrap();
        let goal = Position::new(3, 3);
        let edge = Position::new(0, 1);
        let t = transition(&maze, goal, edge, Action::Left);
        assert_eq!(t.target, edge);
        assert_eq!(t.reward, STEP_PENALTY);
        assert_eq!(t.reward, reward(&maze, goal, edge));
        assert!(!t.accepted);
    }

    #[test]
    fn test_leaving_grid_from_goal_keeps_goal_reward() {
        let maze = Maze::parse("#####\n#...#\n#.#..\n#...#\n#####").unwrap();
        let goal = Position::new(4, 2);
        let t = transition(&maze, goal, goal, Action::Right);
        assert_eq!(t.target, goal);
        assert_eq!(t.reward, GOAL_REWARD);
        assert!(!t.accepted);
    }
}
