//! Dense Q-table over maze cells and the four moves

use serde::{Deserialize, Serialize};

use crate::types::{Action, Position};

/// Q-table mapping `(y, x, action)` to a value estimate
///
/// Stored as one row of four values per cell, row-major, so a maze of side
/// `size` always has exactly `size × size × 4` entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QTable {
    size: usize,
    /// Q-values per cell, indexed by `y * size + x`, then by action index
    q_values: Vec<[f64; Action::COUNT]>,
    /// Learning rate α
    learning_rate: f64,
    /// Discount factor γ
    discount_factor: f64,
}

impl QTable {
    /// Create a zeroed Q-table for a `size × size` maze
    pub fn new(size: usize, learning_rate: f64, discount_factor: f64) -> Self {
        Self {
            size,
            q_values: vec![[0.0; Action::COUNT]; size * size],
            learning_rate,
            discount_factor,
        }
    }

    /// Side length of the maze this table covers
    pub fn size(&self) -> usize {
        self.size
    }

    /// `(rows, columns, actions)`
    pub fn dimensions(&self) -> (usize, usize, usize) {
        (self.size, self.size, Action::COUNT)
    }

    /// Total number of Q-values stored
    pub fn len(&self) -> usize {
        self.q_values.len() * Action::COUNT
    }

    pub fn is_empty(&self) -> bool {
        self.q_values.is_empty()
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }

    fn idx(&self, position: Position) -> usize {
        debug_assert!(
            position.in_bounds(self.size),
            "position {position} outside {0}x{0} Q-table",
            self.size
        );
        position.y * self.size + position.x
    }

    /// Get Q-value for a state-action pair
    pub fn get(&self, position: Position, action: Action) -> f64 {
        self.q_values[self.idx(position)][action.index()]
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, position: Position, action: Action, value: f64) {
        let idx = self.idx(position);
        self.q_values[idx][action.index()] = value;
    }

    /// All four action values at a cell, in action-index order
    pub fn values(&self, position: Position) -> &[f64; Action::COUNT] {
        &self.q_values[self.idx(position)]
    }

    /// Maximum Q-value over all actions at a cell
    pub fn max_q(&self, position: Position) -> f64 {
        self.values(position)
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Select greedy action (highest Q-value), first maximum wins ties
    pub fn greedy_action(&self, position: Position) -> Action {
        let values = self.values(position);
        let mut best = 0;
        for (index, &value) in values.iter().enumerate().skip(1) {
            if value > values[best] {
                best = index;
            }
        }
        Action::ALL[best]
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// Returns the updated value.
    pub fn q_learning_update(
        &mut self,
        position: Position,
        action: Action,
        reward: f64,
        next_position: Position,
    ) -> f64 {
        let current_q = self.get(position, action);
        let max_next_q = self.max_q(next_position);
        let td_target = reward + self.discount_factor * max_next_q;
        let td_error = td_target - current_q;
        let new_q = current_q + self.learning_rate * td_error;
        self.set(position, action, new_q);
        new_q
    }

    /// Reallocate a zeroed table for a maze of side `size`
    pub fn reset(&mut self, size: usize) {
        self.size = size;
        self.q_values = vec![[0.0; Action::COUNT]; size * size];
    }

    /// Whether every stored value is exactly zero
    pub fn is_zeroed(&self) -> bool {
        self.q_values.iter().flatten().all(|&q| q == 0.0)
    }

    /// Whether every stored value is finite
    pub fn is_finite(&self) -> bool {
        self.q_values.iter().flatten().all(|q| q.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qtable_initialization() {
        let qtable = QTable::new(10, 0.1, 0.9);
        assert_eq!(qtable.dimensions(), (10, 10, 4));
        assert_eq!(qtable.len(), 400);
        assert!(qtable.is_zeroed());
    }

    #[test]
    fn test_qtable_set_get() {
        let mut qtable = QTable::new(10, 0.1, 0.9);
        let cell = Position::new(3, 7);
        qtable.set(cell, Action::Down, 1.5);
        assert_eq!(qtable.get(cell, Action::Down), 1.5);
        assert_eq!(qtable.get(Position::new(7, 3), Action::Down), 0.0);
    }

    #[test]
    fn test_max_q() {
        let mut qtable = QTable::new(5, 0.1, 0.9);
        let cell = Position::new(1, 1);
        qtable.set(cell, Action::Left, 0.5);
        qtable.set(cell, Action::Right, 1.5);
        qtable.set(cell, Action::Up, 0.8);
        assert_eq!(qtable.max_q(cell), 1.5);
    }

    #[test]
    fn test_greedy_action() {
        let mut qtable = QTable::new(5, 0.1, 0.9);
        let cell = Position::new(1, 1);
        qtable.set(cell, Action::Left, -0.5);
        qtable.set(cell, Action::Right, -1.5);
        qtable.set(cell, Action::Up, 0.8);
        qtable.set(cell, Action::Down, -0.2);
        assert_eq!(qtable.greedy_action(cell), Action::Up);
    }

    #[test]
    fn test_greedy_action_prefers_first_maximum() {
        let mut qtable = QTable::new(5, 0.1, 0.9);
        let cell = Position::new(2, 2);
        assert_eq!(qtable.greedy_action(cell), Action::Left);

        qtable.set(cell, Action::Left, -1.0);
        qtable.set(cell, Action::Up, 2.0);
        qtable.set(cell, Action::Down, 2.0);
        assert_eq!(qtable.greedy_action(cell), Action::Up);
    }

    #[test]
    fn test_q_learning_update() {
        let mut qtable = QTable::new(5, 0.1, 0.9);
        let cell = Position::new(1, 1);
        let next = Position::new(2, 1);
        qtable.set(next, Action::Up, 1.0);
        qtable.set(next, Action::Down, 2.0);

        let updated = qtable.q_learning_update(cell, Action::Right, -1.0, next);

        // Q = 0 + 0.1 * (-1 + 0.9 * 2 - 0) = 0.08
        assert!((updated - 0.08).abs() < 1e-12);
        assert!((qtable.get(cell, Action::Right) - 0.08).abs() < 1e-12);
    }

    #[test]
    fn test_reset_reallocates() {
        let mut qtable = QTable::new(4, 0.1, 0.9);
        qtable.set(Position::new(1, 1), Action::Left, 3.0);
        qtable.reset(6);
        assert_eq!(qtable.dimensions(), (6, 6, 4));
        assert!(qtable.is_zeroed());
    }
}
