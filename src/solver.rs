//! Depth-bounded game tree search for the automated side

use log::debug;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use std::fmt;
use std::str::FromStr;

use crate::{
    board::{Board, Perspective, Player},
    error::ConfigError,
    heuristic::{evaluate, Weights, WIN_SCORE},
    rules::has_four_in_row,
};

/// Bound of the search window, safe to negate
const INFINITY: i32 = i32::MAX;

/// Depth used when a `SearchConfig` is not given one explicitly
pub const DEFAULT_DEPTH: usize = 4;

/// Which tree search to run
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Algorithm {
    /// Separate maximizing and minimizing plies, columns tried left to right
    Minimax,
    /// Single signed recursion with an immediate-win shortcut, columns tried
    /// from the center outwards
    Negamax,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Algorithm::Minimax => "minimax",
            Algorithm::Negamax => "negamax",
        })
    }
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minimax" => Ok(Algorithm::Minimax),
            "negamax" => Ok(Algorithm::Negamax),
            _ => Err(ConfigError::Parse(format!(
                "unknown algorithm '{}', expected minimax or negamax",
                s
            ))),
        }
    }
}

/// Everything a single search needs to know
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SearchConfig {
    /// Maximum number of plies to look ahead
    pub max_depth: usize,
    pub algorithm: Algorithm,
    /// `perspective.player` is the side the search optimizes for
    pub perspective: Perspective,
    pub weights: Weights,
}

impl SearchConfig {
    pub fn new(perspective: Perspective) -> Self {
        Self {
            max_depth: DEFAULT_DEPTH,
            algorithm: Algorithm::Negamax,
            perspective,
            weights: Weights::default(),
        }
    }

    pub fn with_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }
}

/// Outcome of a top-level search
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SearchResult {
    pub best_column: Option<usize>,
    pub score: i32,
}

/// Returns the columns ordered from the middle outwards, as
/// the middle columns are often better moves
pub fn move_order(cols: usize) -> Vec<usize> {
    let center = cols / 2;
    let mut order = vec![center];
    let mut step = 1;
    while order.len() < cols {
        if center + step < cols {
            order.push(center + step);
        }
        if step <= center {
            order.push(center - step);
        }
        step += 1;
    }
    order
}

/// Searches a borrowed board for the best move of `config.perspective.player`
///
/// Moves are simulated in place and reverted, so the board is unchanged
/// once [`Solver::solve`] returns.
///
/// # Position Scoring
/// A position won by the searching side scores [`WIN_SCORE`], a lost one
/// `-WIN_SCORE` and a draw 0, regardless of depth. Positions at the depth
/// limit get the static heuristic score.
pub struct Solver<'a> {
    board: &'a mut Board,
    config: SearchConfig,
    order: Vec<usize>,
    rng: StdRng,

    /// The number of nodes searched by this `Solver` so far (for diagnostics only)
    pub node_count: usize,
}

impl<'a> Solver<'a> {
    pub fn new(board: &'a mut Board, config: SearchConfig) -> Self {
        let order = match config.algorithm {
            Algorithm::Minimax => (0..board.cols()).collect(),
            Algorithm::Negamax => move_order(board.cols()),
        };
        Self {
            board,
            config,
            order,
            rng: StdRng::from_entropy(),
            node_count: 0,
        }
    }

    /// Makes the random fallback column reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Runs the configured search
    ///
    /// # Panics
    /// If the board is full. Callers must check for a finished game first.
    pub fn solve(&mut self) -> SearchResult {
        let columns = self.board.valid_columns();
        assert!(!columns.is_empty(), "search started on a full board");

        // recursion can never go deeper than the number of free cells
        let depth = self.config.max_depth.min(self.board.empty_cells());
        let (best_column, score) = match self.config.algorithm {
            Algorithm::Minimax => self.minimax(depth, -INFINITY, INFINITY, true),
            Algorithm::Negamax => self.negamax(depth, -INFINITY, INFINITY, 1),
        };

        // depth 0 or an already decided position picks no column
        let best_column = best_column.or_else(|| columns.choose(&mut self.rng).copied());
        debug!(
            "{} depth {} searched {} nodes: column {:?}, score {}",
            self.config.algorithm, depth, self.node_count, best_column, score
        );

        SearchResult { best_column, score }
    }

    fn mover(&self, searching_side: bool) -> Player {
        if searching_side {
            self.config.perspective.player
        } else {
            self.config.perspective.opponent
        }
    }

    /// (column, landing row) of every playable column, in search order
    fn moves(&self) -> Vec<(usize, usize)> {
        self.order
            .iter()
            .filter_map(|&column| self.board.landing_row(column).map(|row| (column, row)))
            .collect()
    }

    /// Absolute score of a finished game, from the searching side's view
    fn terminal_score(&self) -> Option<i32> {
        let perspective = self.config.perspective;
        if has_four_in_row(&self.board, perspective.player) {
            Some(WIN_SCORE)
        } else if has_four_in_row(&self.board, perspective.opponent) {
            Some(-WIN_SCORE)
        // only the two sides ever move here, so a full board is a draw
        } else if self.board.is_full() {
            Some(0)
        } else {
            None
        }
    }

    fn heuristic(&self) -> i32 {
        evaluate(&self.board, self.config.perspective, &self.config.weights)
    }

    /// Plays `player` at (`row`, `column`), runs `search` and takes the piece back
    fn simulate<F>(&mut self, column: usize, row: usize, player: Player, search: F) -> i32
    where
        F: FnOnce(&mut Self) -> i32,
    {
        self.board.place(row, column, player);
        let score = search(self);
        self.board.revert(row, column);
        score
    }

    fn minimax(
        &mut self,
        depth: usize,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> (Option<usize>, i32) {
        self.node_count += 1;

        if let Some(score) = self.terminal_score() {
            return (None, score);
        }
        if depth == 0 {
            return (None, self.heuristic());
        }

        let moves = self.moves();
        let mover = self.mover(maximizing);

        if maximizing {
            let mut value = -INFINITY;
            // any child beats -INFINITY, so this only survives when no move is tried
            let mut best_column = moves.choose(&mut self.rng).map(|&(column, _)| column);
            for (column, row) in moves {
                let score = self.simulate(column, row, mover, |solver| {
                    solver.minimax(depth - 1, alpha, beta, false).1
                });
                if score > value {
                    value = score;
                    best_column = Some(column);
                }
                alpha = alpha.max(value);
                // fail-soft: the best value so far is returned, even outside the window
                if alpha >= beta {
                    break;
                }
            }
            (best_column, value)
        } else {
            let mut value = INFINITY;
            for (column, row) in moves {
                let score = self.simulate(column, row, mover, |solver| {
                    solver.minimax(depth - 1, alpha, beta, true).1
                });
                value = value.min(score);
                beta = beta.min(value);
                if alpha >= beta {
                    break;
                }
            }
            (None, value)
        }
    }

    /// Scores are relative to the side to move: `color` is 1 when the
    /// searching side moves and -1 when the opponent does.
    fn negamax(
        &mut self,
        depth: usize,
        mut alpha: i32,
        beta: i32,
        color: i32,
    ) -> (Option<usize>, i32) {
        self.node_count += 1;

        if let Some(score) = self.terminal_score() {
            return (None, color * score);
        }
        if depth == 0 {
            return (None, color * self.heuristic());
        }

        let moves = self.moves();
        let mover = self.mover(color > 0);

        // check for next-move win for the side to move
        for &(column, row) in &moves {
            self.board.place(row, column, mover);
            let wins = has_four_in_row(&self.board, mover);
            self.board.revert(row, column);
            if wins {
                return (Some(column), WIN_SCORE);
            }
        }

        let mut value = -INFINITY;
        let mut best_column = None;
        for (column, row) in moves {
            // the search window is flipped for the other player
            let score = -self.simulate(column, row, mover, |solver| {
                solver.negamax(depth - 1, -beta, -alpha, -color).1
            });
            if score > value {
                value = score;
                best_column = Some(column);
            }
            alpha = alpha.max(value);
            if alpha >= beta {
                break;
            }
        }
        (best_column, value)
    }
}

impl std::ops::Deref for Solver<'_> {
    type Target = Board;

    fn deref(&self) -> &Self::Target {
        &self.board
    }
}
