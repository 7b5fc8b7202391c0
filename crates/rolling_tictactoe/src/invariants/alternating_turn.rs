//! Alternating turn invariant: sides alternate X, O, X, O, ...

use super::super::{GameState, GameStatus, MAX_MARKS, Side};
use super::Invariant;

/// Invariant: the side to move agrees with the mark counts.
///
/// X opens, so before both histories fill up X has either as many
/// marks as O (X to move) or one more (O to move). Once both sides
/// hold three marks the counts stop changing and either side may be
/// on move. A won game leaves the winner on move.
pub struct AlternatingTurnInvariant;

impl Invariant<GameState> for AlternatingTurnInvariant {
    fn holds(game: &GameState) -> bool {
        let first = game.history(Side::First).len();
        let second = game.history(Side::Second).len();
        let saturated = first == MAX_MARKS && second == MAX_MARKS;

        let counts_ok = match game.side_to_move() {
            Side::First => first == second,
            Side::Second => first == second + 1 || saturated,
        };

        match game.status() {
            GameStatus::Won(winner) => winner == game.side_to_move(),
            GameStatus::InProgress => counts_ok,
            GameStatus::Drawn => true,
        }
    }

    fn description() -> &'static str {
        "Sides alternate turns (X, O, X, O, ...)"
    }
}
