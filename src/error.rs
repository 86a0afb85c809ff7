use crate::board::Player;
use crate::{MAX_SIZE, MIN_SIZE};

/// Errors raised while building a board or a search configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("rows must be between {min} and {max}, got {0}", min = MIN_SIZE, max = MAX_SIZE)]
    RowsOutOfRange(usize),

    #[error("columns must be between {min} and {max}, got {0}", min = MIN_SIZE, max = MAX_SIZE)]
    ColsOutOfRange(usize),

    #[error("player and opponent must differ, both are {0}")]
    SameSides(Player),

    #[error("{first} cannot move first in a game against {opponent}")]
    FirstPlayerMismatch { first: Player, opponent: Player },

    #[error("could not parse: {0}")]
    Parse(String),

    #[error("piece at row {row}, column {col} has an empty cell beneath it")]
    FloatingPiece { row: usize, col: usize },
}

/// Rejected placements. Callers of the boolean API never see these, they
/// only learn that nothing was placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} out of range, columns must be below {cols}")]
    ColumnOutOfRange { column: usize, cols: usize },

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("the game is already over")]
    GameOver,
}

/// Errors surfaced by the engine facade.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("precondition violated: move requested on a full board")]
    PreconditionViolated,

    #[error("invalid move: {0}")]
    Move(#[from] MoveError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        assert_eq!(
            ConfigError::RowsOutOfRange(3).to_string(),
            "rows must be between 4 and 9, got 3"
        );
        assert_eq!(
            ConfigError::SameSides(Player::PlayerOne).to_string(),
            "player and opponent must differ, both are player one"
        );
    }

    #[test]
    fn move_error_converts_into_engine_error() {
        let err: EngineError = MoveError::ColumnFull(2).into();
        assert_eq!(err.to_string(), "invalid move: column 2 is full");
    }
}
