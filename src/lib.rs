//! A search-based opponent for gravity-stacking four-in-a-row games
//!
//! The board can be any size from 4x4 up to 9x9. The automated side picks its
//! moves with a depth-bounded minimax or negamax search with alpha-beta
//! pruning over a window-based positional heuristic.
//!
//! # Basic Usage
//!
//! ```
//! use four_in_a_row::{board::{Board, Perspective, Player}, solver::SearchConfig};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let mut board = Board::new(6, 7)?;
//! for column in 0..3 {
//!     board.drop_piece(column, Player::Automated);
//! }
//!
//! let perspective = Perspective::new(Player::Automated, Player::PlayerOne)?;
//! let config = SearchConfig::new(perspective).with_depth(2);
//! let column = four_in_a_row::engine::select_move(&mut board, &config)?;
//!
//! assert_eq!(column, 3);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod board;

pub mod rules;

pub mod heuristic;

pub mod solver;

pub mod engine;

pub mod session;


/// Number of rows on a default board
pub const DEFAULT_ROWS: usize = 6;

/// Number of columns on a default board
pub const DEFAULT_COLS: usize = 7;

/// Smallest allowed number of rows or columns
pub const MIN_SIZE: usize = 4;

/// Largest allowed number of rows or columns
pub const MAX_SIZE: usize = 9;

/// Length of a winning run
pub const WIN_LENGTH: usize = 4;

const_assert!(MIN_SIZE <= DEFAULT_ROWS && DEFAULT_ROWS <= MAX_SIZE);
const_assert!(MIN_SIZE <= DEFAULT_COLS && DEFAULT_COLS <= MAX_SIZE);
// every allowed board must fit at least one window in each direction
const_assert!(WIN_LENGTH <= MIN_SIZE);
