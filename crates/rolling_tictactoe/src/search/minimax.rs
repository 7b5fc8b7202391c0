//! Optimal move selection.

use super::solve::{Tablebase, Verdict};
use crate::{GameState, GameStatus, Position, Side};
use std::sync::{Mutex, OnceLock, PoisonError};
use tracing::{debug, instrument};

/// Score for the maximizer: +1 win, 0 draw, -1 loss.
pub type Score = i8;

static TABLEBASE: OnceLock<Tablebase> = OnceLock::new();

/// Positions solved on demand, kept for later lookups.
static LOCAL_SOLVES: OnceLock<Mutex<Tablebase>> = OnceLock::new();

/// Solved values of every position reachable from the empty board,
/// with either side opening. Built on first use.
pub fn tablebase() -> &'static Tablebase {
    TABLEBASE.get_or_init(|| {
        let fresh = GameState::new();
        Tablebase::solve(&[fresh, fresh.with_side_to_move(Side::Second)])
    })
}

/// Value of an in-progress `state` for its side to move.
///
/// Positions outside the shared table (unusual mark counts for the side
/// to move) are solved from their own root once. Everything reachable
/// from that root is kept, so sibling moves and repeat queries are
/// lookups.
fn verdict_of(state: &GameState) -> Verdict {
    if let Some(verdict) = tablebase().get(state) {
        return verdict;
    }

    let mut local = LOCAL_SOLVES
        .get_or_init(Mutex::default)
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    if let Some(verdict) = local.get(state) {
        return verdict;
    }

    debug!(cached = local.len(), "Position outside shared table, solving locally");
    let solved = Tablebase::solve(&[*state]);
    let verdict = solved.get(state).unwrap_or(Verdict::Draw);
    local.merge(solved);
    verdict
}

/// One candidate placement and what it leads to for the side placing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMove {
    /// The cell played.
    pub position: Position,
    /// Outcome for the side placing, under optimal play from both sides.
    pub verdict: Verdict,
}

/// Minimax search from the point of view of one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Minimax {
    maximizer: Side,
}

impl Minimax {
    /// Creates a search that maximizes for `maximizer`.
    pub fn new(maximizer: Side) -> Self {
        Self { maximizer }
    }

    /// The side this search plays for.
    pub fn maximizer(&self) -> Side {
        self.maximizer
    }

    /// Scores `state` for the maximizer.
    ///
    /// Terminal states score directly. Otherwise the maximizer places
    /// next when `maximizing` is true, its opponent when false, and the
    /// score is the value of the position under optimal play, endless
    /// play counting as a draw.
    pub fn evaluate(&self, state: &GameState, maximizing: bool) -> Score {
        match state.status() {
            GameStatus::Won(side) if side == self.maximizer => 1,
            GameStatus::Won(_) => -1,
            GameStatus::Drawn => 0,
            GameStatus::InProgress => {
                let to_place = if maximizing {
                    self.maximizer
                } else {
                    self.maximizer.opponent()
                };
                let score = verdict_of(&state.with_side_to_move(to_place)).score();
                if maximizing { score } else { -score }
            }
        }
    }

    /// Every empty cell with its verdict for the maximizer, row-major.
    ///
    /// Each placement is made on a private copy of `state`, with the
    /// maximizer's oldest mark evicted when it already holds three.
    pub fn score_moves(&self, state: &GameState) -> Vec<ScoredMove> {
        if state.is_terminal() {
            return Vec::new();
        }
        let base = state.with_side_to_move(self.maximizer);

        base.empty_positions()
            .into_iter()
            .map(|position| {
                let mut next = base;
                next.place(position);
                let verdict = match next.status() {
                    GameStatus::Won(_) => Verdict::Win(1),
                    GameStatus::Drawn => Verdict::Draw,
                    GameStatus::InProgress => verdict_of(&next).for_previous_mover(),
                };
                ScoredMove { position, verdict }
            })
            .collect()
    }

    /// Picks the best placement for the maximizer.
    ///
    /// Returns `None` on a terminal state or a full board. An empty board
    /// always gets the center. Otherwise the best verdict wins, faster
    /// wins and slower losses preferred; remaining ties go to the first
    /// cell in row-major order.
    ///
    /// Among equal scores this can pick a later cell than plain row-major
    /// minimax would, whenever that cell wins sooner or loses later.
    #[instrument(skip(state), fields(maximizer = %self.maximizer))]
    pub fn choose_move(&self, state: &GameState) -> Option<Position> {
        if state.is_terminal() {
            return None;
        }
        if state.board().is_blank() {
            return Some(Position::Center);
        }

        let mut best: Option<ScoredMove> = None;
        for candidate in self.score_moves(state) {
            if best.is_none_or(|b| candidate.verdict.rank() > b.verdict.rank()) {
                best = Some(candidate);
            }
        }

        if let Some(choice) = best {
            debug!(position = %choice.position, verdict = ?choice.verdict, "Move chosen");
        }
        best.map(|choice| choice.position)
    }
}

/// Picks the optimal placement for `mover` in `state`.
///
/// See [`Minimax::choose_move`]. The caller's state is never modified.
pub fn choose_move(state: &GameState, mover: Side) -> Option<Position> {
    Minimax::new(mover).choose_move(state)
}

/// Scores `state` for `maximizer`; see [`Minimax::evaluate`].
pub fn evaluate(state: &GameState, maximizer: Side, maximizing: bool) -> Score {
    Minimax::new(maximizer).evaluate(state, maximizing)
}
