//! History consistency invariant: the board mirrors both histories.

use super::super::{GameState, Position, Side, Square};
use super::Invariant;

/// Invariant: a cell holds side S's mark iff it appears in S's history.
///
/// Every live mark has exactly one history entry, and every history
/// entry is visible on the board.
pub struct HistoryConsistentInvariant;

impl Invariant<GameState> for HistoryConsistentInvariant {
    fn holds(game: &GameState) -> bool {
        Position::ALL.iter().all(|&pos| {
            let in_first = game.history(Side::First).contains(pos);
            let in_second = game.history(Side::Second).contains(pos);
            match game.board().get(pos) {
                Square::Empty => !in_first && !in_second,
                Square::Mark(Side::First) => in_first && !in_second,
                Square::Mark(Side::Second) => in_second && !in_first,
            }
        })
    }

    fn description() -> &'static str {
        "Board marks match each side's move history"
    }
}
