//! Core value types shared by the maze, the agent and the race.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A cell coordinate in the maze grid.
///
/// `x` grows to the right and `y` grows downward, so `(0, 0)` is the
/// top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    /// Fixed start cell for both competitors.
    pub const START: Position = Position { x: 1, y: 1 };

    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Default goal cell for a maze of the given size (the inner bottom-right corner).
    pub const fn goal_for(size: usize) -> Self {
        Self {
            x: size.saturating_sub(2),
            y: size.saturating_sub(2),
        }
    }

    /// Whether the position lies inside a `size × size` grid.
    pub fn in_bounds(&self, size: usize) -> bool {
        self.x < size && self.y < size
    }

    /// Position one unit step away in the direction of `action`.
    ///
    /// Returns `None` when the step would leave a `size × size` grid.
    pub fn step(&self, action: Action, size: usize) -> Option<Position> {
        let (dx, dy) = action.delta();
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        let next = Position::new(x, y);
        next.in_bounds(size).then_some(next)
    }

    /// Chebyshev (king-move) distance.
    pub fn chebyshev(&self, other: Position) -> usize {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// Manhattan distance.
    pub fn manhattan(&self, other: Position) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four moves available to both competitors.
///
/// The declaration order is the action index used by the value table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Left,
    Right,
    Up,
    Down,
}

impl Action {
    /// Number of actions in the action space.
    pub const COUNT: usize = 4;

    /// All actions in index order.
    pub const ALL: [Action; Action::COUNT] = [Action::Left, Action::Right, Action::Up, Action::Down];

    /// Index of this action in the value table.
    pub const fn index(self) -> usize {
        match self {
            Action::Left => 0,
            Action::Right => 1,
            Action::Up => 2,
            Action::Down => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Unit coordinate delta `(dx, dy)`.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Action::Left => (-1, 0),
            Action::Right => (1, 0),
            Action::Up => (0, -1),
            Action::Down => (0, 1),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Left => "left",
            Action::Right => "right",
            Action::Up => "up",
            Action::Down => "down",
        }
    }

    /// Single-character arrow used by the terminal policy view.
    pub fn arrow(self) -> char {
        match self {
            Action::Left => '<',
            Action::Right => '>',
            Action::Up => '^',
            Action::Down => 'v',
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two racers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Competitor {
    Player,
    Agent,
}

impl Competitor {
    pub fn as_str(self) -> &'static str {
        match self {
            Competitor::Player => "player",
            Competitor::Agent => "agent",
        }
    }
}

impl fmt::Display for Competitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Difficulty selection: determines maze size and visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    /// Medium-sized maze rendered under the blackout visibility mask.
    Blackout,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Blackout];

    /// Side length of the maze generated for this difficulty.
    pub const fn maze_size(self) -> usize {
        match self {
            Difficulty::Easy => 10,
            Difficulty::Medium | Difficulty::Blackout => 16,
        }
    }

    pub const fn is_blackout(self) -> bool {
        matches!(self, Difficulty::Blackout)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Blackout => "blackout",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "blackout" => Ok(Difficulty::Blackout),
            _ => Err(crate::Error::ParseDifficulty {
                input: s.to_string(),
                expected: "easy, medium, blackout".to_string(),
            }),
        }
    }
}
