//! Hand-authored layouts

use crate::{
    maze::grid::{Cell, Maze},
    types::Position,
};

/// Goal cell of the classic layout.
pub const CLASSIC_GOAL: Position = Position::new(8, 8);

// 1 = wall, 0 = path. The opening at (9, 8) leads nowhere but is part of the layout.
const CLASSIC: [[u8; 10]; 10] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 1, 0, 0, 0, 0, 1],
    [1, 0, 1, 1, 1, 0, 1, 1, 0, 1],
    [1, 0, 1, 0, 0, 0, 1, 0, 0, 1],
    [1, 0, 1, 0, 1, 1, 1, 0, 1, 1],
    [1, 0, 0, 0, 1, 0, 0, 0, 0, 1],
    [1, 1, 1, 0, 1, 0, 1, 1, 0, 1],
    [1, 0, 0, 0, 1, 0, 1, 0, 0, 1],
    [1, 0, 1, 0, 0, 0, 1, 0, 0, 0],
    [1, 1, 1, 1, 1, 1, 1, 1, 0, 1],
];

/// The fixed 10×10 maze raced before procedural generation was introduced.
pub fn classic() -> Maze {
    let mut maze = Maze::filled(CLASSIC.len());
    for (y, row) in CLASSIC.iter().enumerate() {
        for (x, &value) in row.iter().enumerate() {
            if value == 0 {
                maze.set(Position::new(x, y), Cell::Path);
            }
        }
    }
    maze
}
