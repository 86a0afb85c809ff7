//! Static evaluation of a position from one side's point of view
//!
//! The score is the sum over every length-4 window on the board, plus a
//! bonus for pieces in the middle column. It is *not* antisymmetric:
//! evaluating for the opponent is a separate computation, not a negation.

use crate::board::{Board, Cell, Perspective};

/// Score of a completed line. Also used by the search for won and lost
/// positions, so it must stay above any sum of window scores.
pub const WIN_SCORE: i32 = 999_999;

/// Tunable window and center weights
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Weights {
    /// three own pieces and one empty cell
    pub three: i32,
    /// two own pieces and two empty cells
    pub two: i32,
    /// three opponent pieces and one empty cell
    pub opponent_three: i32,
    /// two opponent pieces and two empty cells
    pub opponent_two: i32,
    /// per own piece in the middle column
    pub center: i32,
}

impl Weights {
    /// Punishes open opponent threes twice as hard as own threes are worth
    pub const fn cautious() -> Self {
        Self {
            three: 5,
            two: 2,
            opponent_three: -10,
            opponent_two: -2,
            center: 3,
        }
    }

    /// Treats open opponent threes as only slightly worse than own threes
    pub const fn relaxed() -> Self {
        Self {
            opponent_three: -4,
            ..Self::cautious()
        }
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self::cautious()
    }
}

/// Scores one window for `perspective.player`
pub fn evaluate_window(window: &[Cell], perspective: Perspective, weights: &Weights) -> i32 {
    let own_cell = Cell::from(perspective.player);
    let opp_cell = Cell::from(perspective.opponent);

    let mut own = 0;
    let mut opp = 0;
    let mut empty = 0;
    for &cell in window {
        match cell {
            c if c == own_cell => own += 1,
            c if c == opp_cell => opp += 1,
            Cell::Empty => empty += 1,
            _ => {}
        }
    }

    match (own, opp, empty) {
        (4, _, _) => WIN_SCORE,
        (3, _, 1) => weights.three,
        (2, _, 2) => weights.two,
        (_, 4, _) => -WIN_SCORE,
        (_, 3, 1) => weights.opponent_three,
        (_, 2, 2) => weights.opponent_two,
        _ => 0,
    }
}

/// Scores the whole board for `perspective.player`
pub fn evaluate(board: &Board, perspective: Perspective, weights: &Weights) -> i32 {
    let center = weights.center * board.count_in_column(board.cols() / 2, perspective.player) as i32;

    board
        .windows()
        .map(|window| evaluate_window(&window, perspective, weights))
        .sum::<i32>()
        + center
}
