//! Blackout visibility policy
//!
//! In blackout mode only the cells within Chebyshev distance
//! [`BLACKOUT_RADIUS`] of the player, the agent or the goal are drawn.

use crate::types::Position;

pub const BLACKOUT_RADIUS: usize = 1;

pub fn is_visible(cell: Position, player: Position, agent: Position, goal: Position) -> bool {
    [player, agent, goal]
        .iter()
        .any(|&anchor| cell.chebyshev(anchor) <= BLACKOUT_RADIUS)
}

/// Row-major visibility mask for a `size × size` grid.
pub fn mask(size: usize, player: Position, agent: Position, goal: Position) -> Vec<bool> {
    (0..size)
        .flat_map(|y| (0..size).map(move |x| Position::new(x, y)))
        .map(|cell| is_visible(cell, player, agent, goal))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_includes_diagonals() {
        let player = Position::new(4, 4);
        let far = Position::new(20, 20);
        assert!(is_visible(Position::new(5, 5), player, far, far));
        assert!(is_visible(Position::new(3, 4), player, far, far));
        assert!(!is_visible(Position::new(6, 4), player, far, far));
    }

    #[test]
    fn test_mask_counts_three_disjoint_windows() {
        let visible = mask(16, Position::new(1, 1), Position::new(7, 7), Position::new(14, 14));
        assert_eq!(visible.iter().filter(|&&v| v).count(), 27);
    }

    #[test]
    fn test_overlapping_windows() {
        let start = Position::new(1, 1);
        let visible = mask(10, start, start, Position::new(8, 8));
        assert_eq!(visible.iter().filter(|&&v| v).count(), 18);
    }
}
