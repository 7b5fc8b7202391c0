//! Game orchestration between players.

use crate::display;
use crate::players::{Player, Turn};
use anyhow::{Result, anyhow};
use rolling_tictactoe::{GameState, GameStatus, Side};
use std::io::Write;
use tracing::{debug, info, instrument};

/// When a game should be cut short.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Limits {
    /// Stop after this many plies.
    pub max_plies: Option<usize>,
    /// Stop as soon as a position repeats.
    pub stop_on_repetition: bool,
}

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Ending {
    /// A side completed a line.
    #[display("{} wins", _0)]
    Won(Side),
    /// The board filled without a line.
    #[display("Draw")]
    Drawn,
    /// A position came back; optimal play from here cycles forever.
    #[display("Position repeated")]
    Repetition,
    /// The ply limit was reached.
    #[display("Ply limit reached")]
    PlyLimit,
    /// A player quit.
    #[display("Quit")]
    Quit,
}

/// Summary of one finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameReport {
    /// How the game ended.
    pub ending: Ending,
    /// Successful placements made.
    pub plies: usize,
    /// The final position.
    pub state: GameState,
}

/// Orchestrates gameplay between two players.
pub struct Orchestrator<W> {
    game: GameState,
    player_x: Box<dyn Player>,
    player_o: Box<dyn Player>,
    out: W,
    limits: Limits,
}

impl<W: Write> Orchestrator<W> {
    /// Creates a new orchestrator writing the game transcript to `out`.
    pub fn new(player_x: Box<dyn Player>, player_o: Box<dyn Player>, out: W) -> Self {
        Self {
            game: GameState::new(),
            player_x,
            player_o,
            out,
            limits: Limits::default(),
        }
    }

    /// Sets when games are cut short.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Returns the current game.
    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Consumes the orchestrator and returns its output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Plays games until nobody wants a rematch or a player quits.
    ///
    /// Returns the report of the last game.
    pub fn run(&mut self) -> Result<GameReport> {
        loop {
            let report = self.play_game()?;
            if report.ending == Ending::Quit || !self.wants_rematch()? {
                return Ok(report);
            }
            self.restart();
        }
    }

    /// Plays one game from the current position.
    #[instrument(skip(self), fields(x = self.player_x.name(), o = self.player_o.name()))]
    pub fn play_game(&mut self) -> Result<GameReport> {
        info!("Starting game orchestration");

        let mut seen = vec![self.game];
        let mut plies = 0;

        loop {
            writeln!(self.out, "\n{}", display::render(&self.game))?;

            match self.game.status() {
                GameStatus::Won(side) => {
                    let name = match side {
                        Side::First => self.player_x.name(),
                        Side::Second => self.player_o.name(),
                    };
                    writeln!(self.out, "{} ({}) wins after {} plies", name, side, plies)?;
                    return Ok(self.report(Ending::Won(side), plies));
                }
                GameStatus::Drawn => {
                    writeln!(self.out, "Draw after {} plies", plies)?;
                    return Ok(self.report(Ending::Drawn, plies));
                }
                GameStatus::InProgress => {}
            }

            if self.limits.max_plies.is_some_and(|limit| plies >= limit) {
                writeln!(self.out, "Stopping after {} plies", plies)?;
                return Ok(self.report(Ending::PlyLimit, plies));
            }

            let player = match self.game.side_to_move() {
                Side::First => &mut self.player_x,
                Side::Second => &mut self.player_o,
            };
            let name = player.name().to_string();
            let interactive = player.is_interactive();

            debug!(player = %name, "Waiting for move");
            let turn = player.get_move(&self.game, &mut self.out)?;

            match turn {
                Turn::Quit => {
                    info!(player = %name, "Player quit");
                    return Ok(self.report(Ending::Quit, plies));
                }
                Turn::Reset => {
                    writeln!(self.out, "Game reset")?;
                    self.game.reset();
                    seen = vec![self.game];
                    plies = 0;
                }
                Turn::Place(pos) => match self.game.apply_move(pos) {
                    Ok(outcome) => {
                        writeln!(self.out, "{}: {}", name, outcome)?;
                        plies += 1;

                        if self.limits.stop_on_repetition
                            && !self.game.is_terminal()
                            && seen.contains(&self.game)
                        {
                            writeln!(self.out, "\n{}", display::render(&self.game))?;
                            writeln!(self.out, "Position repeated after {} plies", plies)?;
                            return Ok(self.report(Ending::Repetition, plies));
                        }
                        seen.push(self.game);
                    }
                    Err(e) if interactive => writeln!(self.out, "{}", e)?,
                    Err(e) => {
                        return Err(anyhow!(e).context(format!("{} played an illegal move", name)));
                    }
                },
            }
        }
    }

    /// Restarts the game.
    pub fn restart(&mut self) {
        self.game.reset();
    }

    fn wants_rematch(&mut self) -> Result<bool> {
        for player in [&mut self.player_x, &mut self.player_o] {
            if player.is_interactive() {
                return player.rematch(&mut self.out);
            }
        }
        Ok(false)
    }

    fn report(&self, ending: Ending, plies: usize) -> GameReport {
        GameReport {
            ending,
            plies,
            state: self.game,
        }
    }
}
