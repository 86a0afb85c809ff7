//! The surface a game front end talks to
//!
//! A front end owns the board and whose turn it is. It calls [`try_place`]
//! for human moves, [`outcome`] after every placement and
//! [`Engine::choose_column`] (or [`select_move`] with an explicit
//! configuration) when the automated side is to move.

use log::info;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::{
    board::{Board, Perspective, Player},
    error::{ConfigError, EngineError},
    heuristic::Weights,
    rules::{self, GameOutcome},
    solver::{Algorithm, SearchConfig, Solver},
};

/// Creates an empty board, rejecting dimensions outside 4..=9
pub fn new_board(rows: usize, cols: usize) -> Result<Board, ConfigError> {
    Board::new(rows, cols)
}

/// Drops `player`'s piece into `column`. On `false` nothing was placed and
/// the caller should ask for another column.
pub fn try_place(board: &mut Board, column: usize, player: Player) -> bool {
    board.drop_piece(column, player)
}

/// State of the game after `last_mover` placed a piece
pub fn outcome(board: &Board, last_mover: Player) -> GameOutcome {
    rules::outcome(board, last_mover)
}

/// Searches for the best column for `config.perspective.player`
///
/// The board is borrowed mutably for the search and is unchanged afterwards.
pub fn select_move(board: &mut Board, config: &SearchConfig) -> Result<usize, EngineError> {
    if board.is_full() {
        return Err(EngineError::PreconditionViolated);
    }
    Solver::new(board, *config)
        .solve()
        .best_column
        .ok_or(EngineError::PreconditionViolated)
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Difficulty {
    /// Random valid column, no search
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        })
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ConfigError::Parse(format!(
                "unknown difficulty '{}', expected easy, medium or hard",
                s
            ))),
        }
    }
}

/// An algorithm and how many plies it looks ahead
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SearchLevel {
    pub algorithm: Algorithm,
    pub depth: usize,
}

/// How each difficulty plays
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct DifficultyPolicy {
    pub medium: SearchLevel,
    pub hard: SearchLevel,
    /// Pause a front end should make before showing an easy move
    pub easy_delay: Duration,
    pub weights: Weights,
}

impl Default for DifficultyPolicy {
    fn default() -> Self {
        Self {
            medium: SearchLevel {
                algorithm: Algorithm::Minimax,
                depth: 3,
            },
            hard: SearchLevel {
                algorithm: Algorithm::Negamax,
                depth: 5,
            },
            easy_delay: Duration::from_millis(500),
            weights: Weights::default(),
        }
    }
}

impl DifficultyPolicy {
    /// The search a difficulty runs, `None` for the random easy level
    pub fn level(&self, difficulty: Difficulty) -> Option<SearchLevel> {
        match difficulty {
            Difficulty::Easy => None,
            Difficulty::Medium => Some(self.medium),
            Difficulty::Hard => Some(self.hard),
        }
    }

    pub fn search_config(
        &self,
        difficulty: Difficulty,
        perspective: Perspective,
    ) -> Option<SearchConfig> {
        self.level(difficulty).map(|level| {
            SearchConfig::new(perspective)
                .with_algorithm(level.algorithm)
                .with_depth(level.depth)
                .with_weights(self.weights)
        })
    }
}

/// Picks moves for the automated side according to a [`DifficultyPolicy`]
pub struct Engine {
    policy: DifficultyPolicy,
    rng: StdRng,
}

impl Engine {
    pub fn new(policy: DifficultyPolicy) -> Self {
        Self {
            policy,
            rng: StdRng::from_entropy(),
        }
    }

    /// Makes every random choice, including those inside searches, reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn policy(&self) -> &DifficultyPolicy {
        &self.policy
    }

    /// Chooses a column for `perspective.player`
    pub fn choose_column(
        &mut self,
        board: &mut Board,
        perspective: Perspective,
        difficulty: Difficulty,
    ) -> Result<usize, EngineError> {
        let column = match self.policy.search_config(difficulty, perspective) {
            None => *board
                .valid_columns()
                .choose(&mut self.rng)
                .ok_or(EngineError::PreconditionViolated)?,
            Some(config) => {
                if board.is_full() {
                    return Err(EngineError::PreconditionViolated);
                }
                let seed = self.rng.gen();
                Solver::new(board, config)
                    .with_seed(seed)
                    .solve()
                    .best_column
                    .ok_or(EngineError::PreconditionViolated)?
            }
        };
        info!("{} ({}) plays column {}", perspective.player, difficulty, column);
        Ok(column)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(DifficultyPolicy::default())
    }
}
