//! Square wall/path grid with reachability queries

use std::{collections::VecDeque, fmt};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    types::{Action, Position},
};

/// State of a single maze cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    Wall,
    Path,
}

/// A `size × size` grid of walls and paths, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maze {
    size: usize,
    cells: Vec<Cell>,
}

impl Maze {
    /// A grid where every cell is a wall.
    pub(crate) fn filled(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Wall; size * size],
        }
    }

    /// Build a maze from rows of `0` (path) and `1` (wall).
    ///
    /// # Errors
    ///
    /// Returns an error if the rows do not form a square or contain values
    /// other than 0 and 1.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != size {
                return Err(Error::RaggedLayout {
                    row: y,
                    got: row.len(),
                    expected: size,
                });
            }
            for (x, &value) in row.iter().enumerate() {
                cells.push(match value {
                    0 => Cell::Path,
                    1 => Cell::Wall,
                    other => {
                        return Err(Error::InvalidLayoutCharacter {
                            character: char::from_digit(u32::from(other), 10).unwrap_or('?'),
                            row: y,
                            column: x,
                        });
                    }
                });
            }
        }
        Ok(Self { size, cells })
    }

    /// Parse a layout drawn with `#` for walls and `.` for paths.
    ///
    /// Blank lines and surrounding whitespace are ignored.
    pub fn parse(text: &str) -> Result<Self> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for (y, row) in rows.iter().enumerate() {
            let width = row.chars().count();
            if width != size {
                return Err(Error::RaggedLayout {
                    row: y,
                    got: width,
                    expected: size,
                });
            }
            for (x, character) in row.chars().enumerate() {
                cells.push(match character {
                    '#' => Cell::Wall,
                    '.' => Cell::Path,
                    _ => {
                        return Err(Error::InvalidLayoutCharacter {
                            character,
                            row: y,
                            column: x,
                        });
                    }
                });
            }
        }
        Ok(Self { size, cells })
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    fn idx(&self, position: Position) -> usize {
        position.y * self.size + position.x
    }

    /// Cell state; anything outside the grid reads as a wall.
    pub fn cell(&self, position: Position) -> Cell {
        if position.in_bounds(self.size) {
            self.cells[self.idx(position)]
        } else {
            Cell::Wall
        }
    }

    pub fn is_path(&self, position: Position) -> bool {
        self.cell(position) == Cell::Path
    }

    pub fn is_wall(&self, position: Position) -> bool {
        self.cell(position) == Cell::Wall
    }

    pub(crate) fn set(&mut self, position: Position, cell: Cell) {
        debug_assert!(position.in_bounds(self.size));
        let idx = self.idx(position);
        self.cells[idx] = cell;
    }

    /// One row of cells, left to right.
    pub fn row(&self, y: usize) -> &[Cell] {
        &self.cells[y * self.size..(y + 1) * self.size]
    }

    /// Number of path cells.
    pub fn path_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == Cell::Path).count()
    }

    /// Number of 4-adjacent path/path pairs. A connected maze is perfect
    /// exactly when this equals `path_count() - 1`.
    pub fn passage_count(&self) -> usize {
        let mut count = 0;
        for y in 0..self.size {
            for x in 0..self.size {
                let here = Position::new(x, y);
                if !self.is_path(here) {
                    continue;
                }
                if self.is_path(Position::new(x + 1, y)) {
                    count += 1;
                }
                if self.is_path(Position::new(x, y + 1)) {
                    count += 1;
                }
            }
        }
        count
    }

    /// In-bounds neighbours of `position` in action order.
    pub fn neighbors(&self, position: Position) -> impl Iterator<Item = (Action, Position)> + '_ {
        Action::ALL
            .into_iter()
            .filter_map(move |action| position.step(action, self.size).map(|next| (action, next)))
    }

    /// Flood fill over path cells starting at `start`.
    ///
    /// The returned mask is indexed row-major; it is all `false` when `start`
    /// is not a path cell.
    pub fn reachable_from(&self, start: Position) -> Vec<bool> {
        let mut seen = vec![false; self.cells.len()];
        if !self.is_path(start) {
            return seen;
        }
        let mut queue = VecDeque::from([start]);
        seen[self.idx(start)] = true;
        while let Some(current) = queue.pop_front() {
            for (_, next) in self.neighbors(current) {
                let idx = self.idx(next);
                if !seen[idx] && self.cells[idx] == Cell::Path {
                    seen[idx] = true;
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    /// Whether `to` can be reached from `from` through path cells.
    pub fn is_reachable(&self, from: Position, to: Position) -> bool {
        to.in_bounds(self.size) && self.reachable_from(from)[self.idx(to)]
    }

    /// Whether every path cell is reachable from `start`.
    pub fn is_fully_connected(&self, start: Position) -> bool {
        let seen = self.reachable_from(start);
        self.cells
            .iter()
            .zip(&seen)
            .all(|(&cell, &reached)| cell == Cell::Wall || reached)
    }

    /// Shortest sequence of actions leading from `from` to `to`.
    ///
    /// Returns `None` when no path exists. An empty plan means `from == to`.
    pub fn shortest_path(&self, from: Position, to: Position) -> Option<Vec<Action>> {
        if !self.is_path(from) || !self.is_path(to) {
            return None;
        }
        let mut parent: Vec<Option<(usize, Action)>> = vec![None; self.cells.len()];
        let mut seen = vec![false; self.cells.len()];
        let mut queue = VecDeque::from([from]);
        seen[self.idx(from)] = true;

        while let Some(current) = queue.pop_front() {
            if current == to {
                let mut plan = Vec::new();
                let mut idx = self.idx(current);
                while let Some((prev, action)) = parent[idx] {
                    plan.push(action);
                    idx = prev;
                }
                plan.reverse();
                return Some(plan);
            }
            for (action, next) in self.neighbors(current) {
                let idx = self.idx(next);
                if !seen[idx] && self.cells[idx] == Cell::Path {
                    seen[idx] = true;
                    parent[idx] = Some((self.idx(current), action));
                    queue.push_back(next);
                }
            }
        }
        None
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.size {
            for cell in self.row(y) {
                f.write_str(match cell {
                    Cell::Wall => "#",
                    Cell::Path => ".",
                })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
