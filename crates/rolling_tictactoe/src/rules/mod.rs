//! Game rules for rolling tic-tac-toe.
//!
//! This module contains pure functions for evaluating a board
//! according to the rules. Rules are separated from board storage
//! so the state machine and the solver share one definition.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{WinLine, winning_line};
