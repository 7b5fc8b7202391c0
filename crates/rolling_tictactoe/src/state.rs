//! Game state and move application.

use super::action::{MoveError, MoveOutcome};
use super::contracts::{Contract, MoveContract};
use super::history::MoveHistory;
use super::rules::{self, WinLine};
use super::{Board, GameStatus, Position, Side, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Complete game state.
///
/// Self-contained and `Copy`, so the solver can explore hypothetical
/// futures on private copies without touching the caller's instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GameState {
    /// The board.
    pub(crate) board: Board,
    /// Move histories, X first.
    pub(crate) histories: [MoveHistory; 2],
    /// Side to place the next mark.
    pub(crate) side_to_move: Side,
    /// Game status.
    pub(crate) status: GameStatus,
    /// Line that decided the game, once won.
    pub(crate) win_line: Option<WinLine>,
}

pub(crate) fn side_slot(side: Side) -> usize {
    match side {
        Side::First => 0,
        Side::Second => 1,
    }
}

impl GameState {
    /// Creates a fresh game: empty board, X to move.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the live marks of `side`, oldest first.
    pub fn history(&self, side: Side) -> &MoveHistory {
        &self.histories[side_slot(side)]
    }

    /// Returns the side to place the next mark.
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the winning line, if the game was won.
    pub fn win_line(&self) -> Option<WinLine> {
        self.win_line
    }

    /// Returns true once the game is won or drawn.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Empty cells in row-major order.
    pub fn empty_positions(&self) -> Vec<Position> {
        Position::valid_moves(&self.board)
    }

    /// The mark the side to move loses on its next placement.
    ///
    /// `None` unless that side already holds three marks.
    pub fn pending_eviction(&self) -> Option<Position> {
        let history = self.history(self.side_to_move);
        if history.is_full() && !self.is_terminal() {
            history.oldest()
        } else {
            None
        }
    }

    /// Places the side to move's mark at `pos`.
    ///
    /// Checks, in order, that the game is not over and that `pos` is
    /// empty. On success a side already holding three marks first loses
    /// its oldest one, the new mark is placed, and the status is
    /// re-evaluated for the mover. The turn passes only if the game
    /// continues.
    ///
    /// # Errors
    ///
    /// [`MoveError::GameOver`] or [`MoveError::CellOccupied`]; the state
    /// is left unchanged in both cases.
    ///
    /// # Panics
    ///
    /// In debug builds, if the move breaks a state invariant. Only a state
    /// corrupted outside this API can get there.
    #[instrument(skip(self), fields(side = %self.side_to_move))]
    pub fn apply_move(&mut self, pos: Position) -> Result<MoveOutcome, MoveError> {
        MoveContract::pre(self, &pos)?;

        let before = *self;
        let outcome = self.place(pos);

        // Postcondition: verify contract in debug builds
        debug_assert!(
            MoveContract::post(&before, self).is_ok(),
            "Move postcondition violated after placing at {}",
            pos
        );

        if let Some(evicted) = outcome.evicted() {
            debug!(%evicted, "Oldest mark removed");
        }
        if outcome.status().is_terminal() {
            info!(status = %outcome.status(), win_line = ?self.win_line, "Game over");
        }

        Ok(outcome)
    }

    /// Applies a move without checking preconditions.
    ///
    /// Callers must ensure the game is in progress and `pos` is empty.
    pub(crate) fn place(&mut self, pos: Position) -> MoveOutcome {
        let mover = self.side_to_move;
        let slot = side_slot(mover);

        let evicted = self.histories[slot].push(pos);
        if let Some(old) = evicted {
            self.board.set(old, Square::Empty);
        }
        self.board.set(pos, Square::Mark(mover));

        if let Some(line) = rules::winning_line(&self.board, mover) {
            self.status = GameStatus::Won(mover);
            self.win_line = Some(line);
        } else if rules::is_full(&self.board) {
            self.status = GameStatus::Drawn;
        } else {
            self.side_to_move = mover.opponent();
        }

        MoveOutcome::new(mover, pos, evicted, self.status)
    }

    /// Returns a copy with `side` on move.
    ///
    /// Used by the solver to ask "what if `side` placed next".
    pub(crate) fn with_side_to_move(mut self, side: Side) -> Self {
        self.side_to_move = side;
        self
    }

    /// Rebuilds an in-progress state from two histories.
    pub(crate) fn from_histories(first: MoveHistory, second: MoveHistory, to_move: Side) -> Self {
        let mut board = Board::new();
        for (side, history) in [(Side::First, first), (Side::Second, second)] {
            for pos in history.iter() {
                board.set(pos, Square::Mark(side));
            }
        }
        Self {
            board,
            histories: [first, second],
            side_to_move: to_move,
            status: GameStatus::InProgress,
            win_line: None,
        }
    }

    /// Restores the fresh state.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        debug!("Resetting game");
        *self = Self::new();
    }
}
