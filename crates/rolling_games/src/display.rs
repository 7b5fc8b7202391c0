//! Text rendering of rolling boards.
//!
//! Marks carry their age (1 = oldest) and the mark the side to move is
//! about to lose is flagged with `*`.

use rolling_tictactoe::{GameState, Position, Square, Verdict};

/// Renders the board with aged marks and numbered empty cells.
///
/// ```text
/// X1 |O1 | 3
/// ---+---+---
///  4 |X2 | 6
/// ```
pub fn render(game: &GameState) -> String {
    let pending = game.pending_eviction();

    let rows: Vec<String> = Position::ALL
        .chunks(3)
        .map(|row| {
            row.iter()
                .map(|pos| render_cell(game, *pos, pending))
                .collect::<Vec<_>>()
                .join("|")
        })
        .collect();

    let mut out = rows.join("\n---+---+---\n");
    if let Some(pos) = pending {
        out.push_str(&format!(
            "\n* {} is removed by {}'s next move",
            pos,
            game.side_to_move()
        ));
    }
    out
}

fn render_cell(game: &GameState, pos: Position, pending: Option<Position>) -> String {
    match game.board().get(pos) {
        Square::Empty => format!(" {} ", pos.to_index() + 1),
        Square::Mark(side) => {
            let age = game.history(side).age_of(pos).unwrap_or_default();
            let flag = if pending == Some(pos) { '*' } else { ' ' };
            format!("{}{}{}", side, age, flag)
        }
    }
}

/// Describes a verdict for the side that would make the move.
pub fn describe_verdict(verdict: Verdict) -> String {
    match verdict {
        Verdict::Win(plies) => format!("+1  win in {} plies", plies),
        Verdict::Draw => " 0  draw".to_string(),
        Verdict::Loss(plies) => format!("-1  loss in {} plies", plies),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(moves: &[Position]) -> GameState {
        let mut game = GameState::new();
        for pos in moves {
            game.apply_move(*pos).expect("legal move");
        }
        game
    }

    #[test]
    fn test_render_fresh_board() {
        let game = GameState::new();
        assert_eq!(
            render(&game),
            " 1 | 2 | 3 \n---+---+---\n 4 | 5 | 6 \n---+---+---\n 7 | 8 | 9 "
        );
    }

    #[test]
    fn test_render_numbers_mark_ages() {
        let game = play(&[Position::TopLeft, Position::Center, Position::TopRight]);
        let text = render(&game);
        assert!(text.starts_with("X1 | 2 |X2 \n"));
        assert!(text.contains(" 4 |O1 | 6 "));
    }

    #[test]
    fn test_render_flags_pending_eviction() {
        let game = play(&[
            Position::TopLeft,
            Position::Center,
            Position::TopCenter,
            Position::BottomLeft,
            Position::MiddleRight,
            Position::MiddleLeft,
        ]);
        let text = render(&game);
        assert!(text.starts_with("X1*|X2 |"));
        assert!(text.ends_with("* Top-left (0,0) is removed by X's next move"));
    }

    #[test]
    fn test_describe_verdict() {
        assert_eq!(describe_verdict(Verdict::Win(3)), "+1  win in 3 plies");
        assert_eq!(describe_verdict(Verdict::Draw), " 0  draw");
        assert_eq!(describe_verdict(Verdict::Loss(8)), "-1  loss in 8 plies");
    }
}
