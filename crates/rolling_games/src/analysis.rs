//! Position analysis: replay a line and score every reply.

use crate::display;
use anyhow::{Context, Result};
use rolling_tictactoe::{GameState, Minimax, Position};
use std::io::Write;
use tracing::instrument;

/// Parses move tokens as cell numbers, `row,col` pairs or labels.
pub fn parse_moves<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<Position>> {
    let mut moves = Vec::with_capacity(tokens.len());
    for token in tokens {
        let token: &str = token.as_ref();
        if token.trim().is_empty() {
            continue;
        }
        let pos = Position::from_label_or_number(token)
            .with_context(|| format!("Unrecognized cell: {:?}", token))?;
        moves.push(pos);
    }
    Ok(moves)
}

/// Plays `moves` from a fresh game.
///
/// # Errors
///
/// Fails on the first move the game rejects.
#[instrument]
pub fn replay(moves: &[Position]) -> Result<GameState> {
    let mut game = GameState::new();
    for (ply, pos) in moves.iter().enumerate() {
        game.apply_move(*pos)
            .with_context(|| format!("Move {} ({}) is illegal", ply + 1, pos))?;
    }
    Ok(game)
}

/// Writes the board and every legal move with its score for the side
/// to move, marking the engine's choice.
pub fn write_analysis(game: &GameState, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", display::render(game))?;

    if game.is_terminal() {
        writeln!(out, "{}", game.status())?;
        return Ok(());
    }

    let side = game.side_to_move();
    let search = Minimax::new(side);
    let best = search.choose_move(game);

    writeln!(out, "{} to move", side)?;
    for scored in search.score_moves(game) {
        let marker = if best == Some(scored.position) {
            "  <- best"
        } else {
            ""
        };
        writeln!(
            out,
            "{:<20} {}{}",
            scored.position.to_string(),
            display::describe_verdict(scored.verdict),
            marker
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_moves() {
        let moves = parse_moves(&["1", "5", " center ", ""]).expect("parse");
        assert_eq!(moves, vec![Position::TopLeft, Position::Center, Position::Center]);
        assert!(parse_moves(&["12"]).is_err());
    }

    #[test]
    fn test_replay_rejects_occupied_cell() {
        let err = replay(&[Position::Center, Position::Center]).expect_err("occupied");
        assert!(err.to_string().contains("Move 2"));
    }

    #[test]
    fn test_analysis_marks_best_move() {
        let game = replay(&[Position::Center]).expect("legal line");
        let mut out: Vec<u8> = Vec::new();
        write_analysis(&game, &mut out).expect("write");
        let text = String::from_utf8(out).expect("utf8");

        assert!(text.contains("O to move"));
        assert_eq!(text.matches("<- best").count(), 1);
        assert!(text.contains("Top-left (0,0)"));
        assert!(text.lines().any(|l| l.starts_with("Top-left") && l.ends_with("<- best")));
        assert_eq!(text.matches("loss in 8 plies").count(), 4);
    }

    #[test]
    fn test_analysis_of_finished_game() {
        let game = replay(&[
            Position::TopLeft,
            Position::Center,
            Position::TopCenter,
            Position::MiddleLeft,
            Position::TopRight,
        ])
        .expect("legal line");
        let mut out: Vec<u8> = Vec::new();
        write_analysis(&game, &mut out).expect("write");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.ends_with("Player X wins\n"));
    }
}
