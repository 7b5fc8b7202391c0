//! Per-side rolling move history.

use super::position::Position;
use serde::{Deserialize, Serialize};

/// Maximum number of live marks a side may hold.
pub const MAX_MARKS: usize = 3;

/// Ordered placements of one side, oldest first.
///
/// Holds at most [`MAX_MARKS`] positions. Pushing onto a full history
/// evicts the oldest entry before appending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MoveHistory {
    marks: [Option<Position>; MAX_MARKS],
    len: u8,
}

impl MoveHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live marks (0-3).
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Returns true if the side has no mark on the board.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if the next push evicts.
    pub fn is_full(&self) -> bool {
        self.len() == MAX_MARKS
    }

    /// The mark that would be evicted first.
    pub fn oldest(&self) -> Option<Position> {
        self.marks[0]
    }

    /// Iterates positions from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.marks[..self.len()].iter().flatten().copied()
    }

    /// Returns true if `pos` is one of the live marks.
    pub fn contains(&self, pos: Position) -> bool {
        self.iter().any(|p| p == pos)
    }

    /// 1-based age rank of `pos`; 1 is the oldest live mark.
    pub fn age_of(&self, pos: Position) -> Option<usize> {
        self.iter().position(|p| p == pos).map(|i| i + 1)
    }

    /// Appends `pos`, evicting and returning the oldest mark when full.
    pub fn push(&mut self, pos: Position) -> Option<Position> {
        let evicted = if self.is_full() {
            let oldest = self.marks[0];
            self.marks.rotate_left(1);
            self.marks[MAX_MARKS - 1] = None;
            self.len -= 1;
            oldest
        } else {
            None
        };

        self.marks[self.len()] = Some(pos);
        self.len += 1;
        evicted
    }
}

impl FromIterator<Position> for MoveHistory {
    /// Builds a history by pushing in order; only the last three survive.
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        let mut history = Self::new();
        for pos in iter {
            history.push(pos);
        }
        history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_until_full() {
        let mut history = MoveHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.push(Position::TopLeft), None);
        assert_eq!(history.push(Position::Center), None);
        assert_eq!(history.push(Position::BottomRight), None);
        assert!(history.is_full());
        assert_eq!(history.oldest(), Some(Position::TopLeft));
    }

    #[test]
    fn test_fourth_push_evicts_oldest() {
        let mut history: MoveHistory = [Position::TopLeft, Position::TopCenter, Position::TopRight]
            .into_iter()
            .collect();

        let evicted = history.push(Position::BottomRight);

        assert_eq!(evicted, Some(Position::TopLeft));
        assert_eq!(history.len(), 3);
        assert_eq!(
            history.iter().collect::<Vec<_>>(),
            vec![Position::TopCenter, Position::TopRight, Position::BottomRight]
        );
        assert!(!history.contains(Position::TopLeft));
    }

    #[test]
    fn test_age_of() {
        let history: MoveHistory = [Position::Center, Position::TopLeft].into_iter().collect();
        assert_eq!(history.age_of(Position::Center), Some(1));
        assert_eq!(history.age_of(Position::TopLeft), Some(2));
        assert_eq!(history.age_of(Position::BottomLeft), None);
    }

    #[test]
    fn test_collect_keeps_last_three() {
        let history: MoveHistory = Position::ALL.into_iter().collect();
        assert_eq!(
            history.iter().collect::<Vec<_>>(),
            vec![Position::BottomLeft, Position::BottomCenter, Position::BottomRight]
        );
    }
}
