//! Draw detection logic.

use super::super::{Board, Square};

/// Checks if the board is full (all squares occupied).
///
/// With at most three marks per side this never happens through
/// normal play, but a full board with no winner still counts as a draw.
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| *s != Square::Empty)
}
