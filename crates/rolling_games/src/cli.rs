//! Command-line interface for rolling_games.

use clap::{Parser, Subcommand, ValueEnum};
use rolling_tictactoe::Side;

/// Rolling tic-tac-toe - three marks each, the oldest one rolls off
#[derive(Parser, Debug)]
#[command(name = "rolling_games")]
#[command(about = "Play or study rolling tic-tac-toe against an optimal engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play against the engine in the terminal
    Play {
        /// Side the engine plays; X always opens
        #[arg(long, value_enum, default_value = "o")]
        engine_side: SideArg,
    },

    /// Let the engine play both sides
    Selfplay {
        /// Stop after this many plies
        #[arg(long, default_value = "64")]
        max_plies: usize,
    },

    /// Score every legal move for the side to move
    Analyze {
        /// Moves to replay first, comma separated (cell numbers 1-9 or labels)
        #[arg(long, value_delimiter = ',')]
        moves: Vec<String>,
    },
}

/// A side as typed on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideArg {
    /// The opening side
    X,
    /// The second side
    O,
}

impl From<SideArg> for Side {
    fn from(arg: SideArg) -> Self {
        match arg {
            SideArg::X => Side::First,
            SideArg::O => Side::Second,
        }
    }
}
