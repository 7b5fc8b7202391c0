//! Rolling tic-tac-toe: a 3x3 game where each side keeps at most three
//! marks, plus a solver that always plays optimally.
//!
//! Placing a fourth mark removes that side's oldest one first, so the
//! board keeps changing and positions can repeat.
//!
//! # Example
//!
//! ```
//! use rolling_tictactoe::{GameState, Position, Side, choose_move};
//!
//! let mut game = GameState::new();
//! game.apply_move(Position::TopCenter).unwrap();
//!
//! let reply = choose_move(&game, Side::Second).unwrap();
//! game.apply_move(reply).unwrap();
//! assert_eq!(game.side_to_move(), Side::First);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
pub mod contracts;
mod history;
pub mod invariants;
mod position;
pub mod rules;
pub mod search;
mod state;
mod types;

pub use action::{MoveError, MoveOutcome};
pub use history::{MAX_MARKS, MoveHistory};
pub use position::Position;
pub use rules::WinLine;
pub use search::{Minimax, Score, ScoredMove, Verdict, choose_move, evaluate};
pub use state::GameState;
pub use types::{Board, GameStatus, Side, Square};
