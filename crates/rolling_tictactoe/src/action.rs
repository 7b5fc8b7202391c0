//! Move results and errors.
//!
//! A move is a domain event: the outcome records what the placement
//! did to the board so front ends can animate or log it.

use super::{GameStatus, Position, Side};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// What a successful `apply_move` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Getters, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// The side that placed the mark.
    side: Side,
    /// Where the new mark went.
    applied: Position,
    /// The mover's oldest mark, if placing this one removed it.
    evicted: Option<Position>,
    /// Game status after the move.
    status: GameStatus,
}

impl MoveOutcome {
    pub(crate) fn new(
        side: Side,
        applied: Position,
        evicted: Option<Position>,
        status: GameStatus,
    ) -> Self {
        Self {
            side,
            applied,
            evicted,
            status,
        }
    }
}

impl std::fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.side, self.applied)?;
        if let Some(evicted) = self.evicted {
            write!(f, " (removed {})", evicted)?;
        }
        Ok(())
    }
}

/// Error that can occur when applying a move.
///
/// Both variants are recoverable; the state is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    CellOccupied(#[error(not(source))] Position),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,
}
