//! Terminal front end for rolling tic-tac-toe.
//!
//! Players take turns through an [`orchestrator::Orchestrator`] that
//! writes a plain-text transcript to any `Write` sink, so the same loop
//! drives an interactive terminal game and in-memory tests.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analysis;
pub mod cli;
pub mod display;
pub mod orchestrator;
pub mod players;

pub use orchestrator::{Ending, GameReport, Limits, Orchestrator};
pub use players::{EnginePlayer, FirstEmptyPlayer, HumanPlayer, Player, Turn};
