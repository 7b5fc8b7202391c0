//! Win detection logic.

use super::super::{Board, Position, Side, Square};
use serde::{Deserialize, Serialize};

/// The line whose completion produced a win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinLine {
    /// Row 0-2.
    Row(usize),
    /// Column 0-2.
    Col(usize),
    /// Top-left to bottom-right.
    DiagMain,
    /// Top-right to bottom-left.
    DiagAnti,
}

impl WinLine {
    /// Every line in scan order: rows, then columns, then diagonals.
    pub const ALL: [WinLine; 8] = [
        WinLine::Row(0),
        WinLine::Row(1),
        WinLine::Row(2),
        WinLine::Col(0),
        WinLine::Col(1),
        WinLine::Col(2),
        WinLine::DiagMain,
        WinLine::DiagAnti,
    ];

    /// The three cells making up this line.
    ///
    /// `None` for a `Row` or `Col` index outside `0..3`.
    pub fn positions(self) -> Option<[Position; 3]> {
        let cells = |coords: [(usize, usize); 3]| -> Option<[Position; 3]> {
            let [a, b, c] = coords.map(|(row, col)| Position::from_coords(row, col));
            Some([a?, b?, c?])
        };
        match self {
            WinLine::Row(r) => cells([(r, 0), (r, 1), (r, 2)]),
            WinLine::Col(c) => cells([(0, c), (1, c), (2, c)]),
            WinLine::DiagMain => Some([Position::TopLeft, Position::Center, Position::BottomRight]),
            WinLine::DiagAnti => Some([Position::TopRight, Position::Center, Position::BottomLeft]),
        }
    }
}

impl std::fmt::Display for WinLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WinLine::Row(r) => write!(f, "row {}", r),
            WinLine::Col(c) => write!(f, "column {}", c),
            WinLine::DiagMain => write!(f, "main diagonal"),
            WinLine::DiagAnti => write!(f, "anti-diagonal"),
        }
    }
}

/// Returns the first line fully held by `side`, if any.
///
/// Rows are scanned before columns, columns before diagonals.
pub fn winning_line(board: &Board, side: Side) -> Option<WinLine> {
    let mark = Square::Mark(side);
    WinLine::ALL
        .into_iter()
        .find(|line| {
            line.positions()
                .is_some_and(|cells| cells.iter().all(|pos| board.get(*pos) == mark))
        })
}
