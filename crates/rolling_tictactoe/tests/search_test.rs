//! Tests for optimal play on the rolling board.

use rolling_tictactoe::search::{Tablebase, tablebase};
use rolling_tictactoe::{
    GameState, GameStatus, Minimax, Position, Side, Verdict, WinLine, choose_move, evaluate,
};

fn play(moves: &[Position]) -> GameState {
    let mut game = GameState::new();
    for pos in moves {
        game.apply_move(*pos).expect("legal move");
    }
    game
}

/// Plays the first empty cell in row-major order.
fn first_empty(game: &GameState) -> Position {
    game.empty_positions()[0]
}

/// Engine for `engine_side`, first-empty player for the other side.
fn engine_against_first_empty(engine_side: Side, max_plies: usize) -> (GameState, usize) {
    let mut game = GameState::new();
    let mut plies = 0;
    while !game.is_terminal() && plies < max_plies {
        let pos = if game.side_to_move() == engine_side {
            choose_move(&game, engine_side).expect("engine has a move")
        } else {
            first_empty(&game)
        };
        game.apply_move(pos).expect("legal move");
        plies += 1;
    }
    (game, plies)
}

#[test]
fn test_choose_move_is_deterministic() {
    let game = play(&[Position::TopCenter, Position::Center, Position::BottomLeft]);
    let first = choose_move(&game, Side::Second);
    for _ in 0..5 {
        assert_eq!(choose_move(&game, Side::Second), first);
    }
}

#[test]
fn test_choice_is_empty_cell() {
    let mut game = GameState::new();
    for _ in 0..30 {
        if game.is_terminal() {
            break;
        }
        let mover = game.side_to_move();
        let pos = choose_move(&game, mover).expect("in progress");
        assert!(game.board().is_empty(pos));
        game.apply_move(pos).expect("legal move");
    }
}

#[test]
fn test_search_respects_eviction() {
    // X holds TL, TC, BR with TL oldest. TR looks like it completes the
    // top row but removes TL.
    let game = play(&[
        Position::TopLeft,
        Position::MiddleLeft,
        Position::TopCenter,
        Position::BottomCenter,
        Position::BottomRight,
        Position::MiddleRight,
    ]);

    let scored = Minimax::new(Side::First).score_moves(&game);
    let top_right = scored
        .iter()
        .find(|m| m.position == Position::TopRight)
        .expect("TR is empty");
    assert!(!matches!(top_right.verdict, Verdict::Win(_)));
    assert!(scored.iter().all(|m| m.verdict.score() < 0));

    // Every move loses; the engine holds out longest from the center.
    assert_eq!(choose_move(&game, Side::First), Some(Position::Center));
    assert_eq!(tablebase().get(&game), Some(Verdict::Loss(10)));
}

#[test]
fn test_completes_own_line() {
    // X: TL, TC vs O: ML, BC. X to move finishes the top row.
    let game = play(&[
        Position::TopLeft,
        Position::MiddleLeft,
        Position::TopCenter,
        Position::BottomCenter,
    ]);
    assert_eq!(choose_move(&game, Side::First), Some(Position::TopRight));
}

#[test]
fn test_engine_as_x_beats_first_empty_player() {
    let (game, plies) = engine_against_first_empty(Side::First, 100);
    assert_eq!(game.status(), GameStatus::Won(Side::First));
    assert_eq!(game.win_line(), Some(WinLine::Col(1)));
    assert_eq!(plies, 5);
}

#[test]
fn test_engine_as_o_beats_first_empty_player() {
    let (game, plies) = engine_against_first_empty(Side::Second, 100);
    assert_eq!(game.status(), GameStatus::Won(Side::Second));
    assert_eq!(game.win_line(), Some(WinLine::DiagAnti));
    assert_eq!(plies, 6);
}

#[test]
fn test_self_play_never_loses_and_repeats() {
    let mut game = GameState::new();
    let mut seen = vec![game];
    let mut repeated = false;

    for _ in 0..64 {
        let mover = game.side_to_move();
        let pos = choose_move(&game, mover).expect("game continues");
        game.apply_move(pos).expect("legal move");
        assert_eq!(game.status(), GameStatus::InProgress);

        repeated |= seen.contains(&game);
        seen.push(game);
    }

    assert!(repeated, "optimal self-play should cycle");
}

#[test]
fn test_self_play_cycle_has_period_eight() {
    let mut game = GameState::new();
    let mut states = Vec::new();
    for _ in 0..24 {
        let pos = choose_move(&game, game.side_to_move()).expect("game continues");
        game.apply_move(pos).expect("legal move");
        states.push(game);
    }
    assert_eq!(states[8], states[16]);
    assert_eq!(states[15], states[23]);
}

#[test]
fn test_evaluate_is_zero_sum() {
    let game = play(&[Position::Center, Position::TopCenter]);
    for maximizing in [true, false] {
        let x = evaluate(&game, Side::First, maximizing);
        let o = evaluate(&game, Side::Second, !maximizing);
        assert_eq!(x, -o);
    }
    assert_eq!(evaluate(&game, Side::First, true), 1);
}

#[test]
fn test_empty_board_is_a_win_for_the_opener() {
    assert_eq!(tablebase().get(&GameState::new()), Some(Verdict::Win(13)));
}

#[test]
fn test_local_solve_matches_shared_table() {
    let game = play(&[
        Position::TopLeft,
        Position::BottomRight,
        Position::Center,
        Position::TopCenter,
        Position::BottomLeft,
    ]);
    let local = Tablebase::solve(&[game]);
    assert_eq!(local.get(&game), tablebase().get(&game));
    assert_eq!(local.get(&game), Some(Verdict::Win(3)));
}

#[test]
fn test_search_leaves_state_untouched() {
    let game = play(&[
        Position::TopLeft,
        Position::Center,
        Position::TopCenter,
        Position::BottomLeft,
        Position::MiddleRight,
        Position::MiddleLeft,
    ]);
    let snapshot = game;
    let _ = Minimax::new(Side::First).score_moves(&game);
    let _ = evaluate(&game, Side::Second, true);
    assert_eq!(game, snapshot);
}

#[test]
fn test_choose_move_for_side_not_on_turn() {
    // X asked to place again before O replies.
    let game = play(&[Position::TopCenter]);
    let first = choose_move(&game, Side::First);
    assert!(first.is_some_and(|pos| game.board().is_empty(pos)));
    assert_eq!(choose_move(&game, Side::First), first);

    let center = play(&[Position::Center]);
    assert_eq!(choose_move(&center, Side::First), Some(Position::TopLeft));
    assert_eq!(choose_move(&center, Side::First), Some(Position::TopLeft));
}
