//! Rolling Games - terminal front end

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use rolling_games::analysis;
use rolling_games::cli::{Cli, Command, SideArg};
use rolling_games::{EnginePlayer, HumanPlayer, Limits, Orchestrator, Player};
use rolling_tictactoe::Side;
use std::io;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { engine_side } => run_play(engine_side),
        Command::Selfplay { max_plies } => run_selfplay(max_plies),
        Command::Analyze { moves } => run_analyze(&moves),
    }
}

/// Human against the engine on stdin/stdout.
fn run_play(engine_side: SideArg) -> Result<()> {
    let engine_side = Side::from(engine_side);
    info!(%engine_side, "Starting interactive game");

    let human: Box<dyn Player> = Box::new(HumanPlayer::new("Human", io::stdin().lock()));
    let engine: Box<dyn Player> = Box::new(EnginePlayer::new("Engine"));
    let (player_x, player_o) = match engine_side {
        Side::First => (engine, human),
        Side::Second => (human, engine),
    };

    let mut orchestrator = Orchestrator::new(player_x, player_o, io::stdout());
    let report = orchestrator.run()?;
    info!(ending = %report.ending, plies = report.plies, "Session finished");
    Ok(())
}

/// Engine against itself.
fn run_selfplay(max_plies: usize) -> Result<()> {
    let limits = Limits {
        max_plies: Some(max_plies),
        stop_on_repetition: true,
    };
    let mut orchestrator = Orchestrator::new(
        Box::new(EnginePlayer::new("Engine X")),
        Box::new(EnginePlayer::new("Engine O")),
        io::stdout(),
    )
    .with_limits(limits);

    let report = orchestrator.play_game()?;
    info!(ending = %report.ending, plies = report.plies, "Self-play finished");
    Ok(())
}

/// Scores every reply after a replayed line.
fn run_analyze(moves: &[String]) -> Result<()> {
    let moves = analysis::parse_moves(moves)?;
    let game = analysis::replay(&moves)?;
    analysis::write_analysis(&game, &mut io::stdout().lock())
}
