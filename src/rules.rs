//! Win and draw detection

use crate::board::{Board, Cell, Perspective, Player};

/// The state of a game, always derived from the board
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameOutcome {
    InProgress,
    Win(Player),
    Draw,
}

impl GameOutcome {
    pub fn is_over(self) -> bool {
        self != GameOutcome::InProgress
    }
}

/// Does `player` own a full window in any of the four directions?
pub fn has_four_in_row(board: &Board, player: Player) -> bool {
    let cell = Cell::from(player);
    board
        .windows()
        .any(|window| window.iter().all(|&c| c == cell))
}

/// A full board on which nobody has four in a row
pub fn is_draw(board: &Board) -> bool {
    board.is_full()
        && !Player::ALL
            .iter()
            .any(|&player| has_four_in_row(board, player))
}

/// Has either side of `perspective` won, or is the game drawn?
pub fn is_terminal(board: &Board, perspective: Perspective) -> bool {
    has_four_in_row(board, perspective.player)
        || has_four_in_row(board, perspective.opponent)
        || is_draw(board)
}

/// Outcome after `last_mover` has placed a piece. The last mover is checked
/// first, so a full board holding a winning line is always a win.
pub fn outcome(board: &Board, last_mover: Player) -> GameOutcome {
    if has_four_in_row(board, last_mover) {
        return GameOutcome::Win(last_mover);
    }
    if let Some(&winner) = Player::ALL
        .iter()
        .find(|&&player| player != last_mover && has_four_in_row(board, player))
    {
        return GameOutcome::Win(winner);
    }
    if board.is_full() {
        GameOutcome::Draw
    } else {
        GameOutcome::InProgress
    }
}
