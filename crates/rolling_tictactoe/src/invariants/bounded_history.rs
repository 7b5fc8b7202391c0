//! Bounded history invariant: no side ever holds more than three marks.

use super::super::{GameState, MAX_MARKS, Side};
use super::Invariant;
use strum::IntoEnumIterator;

/// Invariant: each side has at most three live marks.
///
/// Checked against both the history and the board, so a stray mark
/// written past the cap is caught even if the history is intact.
pub struct BoundedHistoryInvariant;

impl Invariant<GameState> for BoundedHistoryInvariant {
    fn holds(game: &GameState) -> bool {
        Side::iter().all(|side| {
            game.history(side).len() <= MAX_MARKS && game.board().count(side) <= MAX_MARKS
        })
    }

    fn description() -> &'static str {
        "Each side holds at most three marks"
    }
}
