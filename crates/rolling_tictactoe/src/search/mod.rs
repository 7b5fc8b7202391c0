//! Optimal play for rolling tic-tac-toe.
//!
//! The search explores the complete game graph once, labels it by
//! retrograde analysis and then answers move queries by lookup. Endless
//! play (rolling placement lets positions repeat) counts as a draw.

pub mod graph;
mod minimax;
pub mod solve;

pub use minimax::{Minimax, Score, ScoredMove, choose_move, evaluate, tablebase};
pub use solve::{Tablebase, Verdict};
