//! Player trait and implementations.

use anyhow::{Context, Result};
use rolling_tictactoe::{GameState, Position, choose_move};
use std::io::{BufRead, Write};
use tracing::debug;

/// What a player wants to do on its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// Place a mark.
    Place(Position),
    /// Abandon the game and start a fresh one.
    Reset,
    /// Leave.
    Quit,
}

/// Trait for players that can make moves.
pub trait Player {
    /// Gets the next turn for the side to move in `game`.
    ///
    /// Prompts and messages go to `out`.
    fn get_move(&mut self, game: &GameState, out: &mut dyn Write) -> Result<Turn>;

    /// Returns the player's display name.
    fn name(&self) -> &str;

    /// Whether a rejected move should be reported and asked again
    /// rather than treated as a failure.
    fn is_interactive(&self) -> bool {
        false
    }

    /// Asked once a game is over; true starts another.
    fn rematch(&mut self, _out: &mut dyn Write) -> Result<bool> {
        Ok(false)
    }
}

/// Parses one line of human input.
///
/// `q` quits, `r` resets; anything else must name a cell the way
/// [`Position::from_label_or_number`] accepts it.
pub fn parse_turn(input: &str) -> Option<Turn> {
    match input.trim().to_lowercase().as_str() {
        "q" | "quit" => Some(Turn::Quit),
        "r" | "reset" => Some(Turn::Reset),
        other => Position::from_label_or_number(other).map(Turn::Place),
    }
}

/// Human player reading lines from any buffered input.
pub struct HumanPlayer<R> {
    name: String,
    input: R,
}

impl<R: BufRead> HumanPlayer<R> {
    /// Creates a new human player.
    pub fn new(name: impl Into<String>, input: R) -> Self {
        Self {
            name: name.into(),
            input,
        }
    }

    /// Reads one line; `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        Ok((read > 0).then_some(line))
    }
}

impl<R: BufRead> Player for HumanPlayer<R> {
    fn get_move(&mut self, game: &GameState, out: &mut dyn Write) -> Result<Turn> {
        loop {
            write!(
                out,
                "{} ({}) > cell 1-9, row,col or name; r resets, q quits: ",
                self.name,
                game.side_to_move()
            )?;
            out.flush()?;

            let Some(line) = self.read_line()? else {
                debug!(player = %self.name, "Input closed");
                return Ok(Turn::Quit);
            };

            match parse_turn(&line) {
                Some(turn) => return Ok(turn),
                None => writeln!(out, "Unrecognized input: {:?}", line.trim())?,
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn rematch(&mut self, out: &mut dyn Write) -> Result<bool> {
        write!(out, "Play again? r restarts, anything else quits: ")?;
        out.flush()?;
        let answer = self.read_line()?;
        Ok(matches!(answer.as_deref().map(str::trim), Some("r" | "R")))
    }
}

/// Optimal engine player.
pub struct EnginePlayer {
    name: String,
}

impl EnginePlayer {
    /// Creates a new engine player.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Player for EnginePlayer {
    fn get_move(&mut self, game: &GameState, _out: &mut dyn Write) -> Result<Turn> {
        let side = game.side_to_move();
        let pos = choose_move(game, side).context("No move available for the engine")?;
        debug!(player = %self.name, %side, position = %pos, "Engine chose move");
        Ok(Turn::Place(pos))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Player that always takes the first empty cell in row-major order.
pub struct FirstEmptyPlayer {
    name: String,
}

impl FirstEmptyPlayer {
    /// Creates a new first-empty player.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Player for FirstEmptyPlayer {
    fn get_move(&mut self, game: &GameState, _out: &mut dyn Write) -> Result<Turn> {
        let pos = game
            .empty_positions()
            .first()
            .copied()
            .context("No valid moves available")?;
        debug!(player = %self.name, position = %pos, "Took first empty cell");
        Ok(Turn::Place(pos))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
