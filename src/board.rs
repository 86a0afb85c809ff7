use log::trace;

use std::fmt;

use crate::error::{ConfigError, MoveError};
use crate::{DEFAULT_COLS, DEFAULT_ROWS, MAX_SIZE, MIN_SIZE, WIN_LENGTH};

/// One of the sides that can own a piece
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Player {
    PlayerOne,
    PlayerTwo,
    Automated,
}

impl Player {
    pub const ALL: [Player; 3] = [Player::PlayerOne, Player::PlayerTwo, Player::Automated];

    fn symbol(self) -> char {
        match self {
            Player::PlayerOne => 'X',
            Player::PlayerTwo => 'O',
            Player::Automated => 'A',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Player::PlayerOne => "player one",
            Player::PlayerTwo => "player two",
            Player::Automated => "computer",
        })
    }
}

/// The two sides taking part in a game, seen from `player`'s side of the table
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Perspective {
    pub player: Player,
    pub opponent: Player,
}

impl Perspective {
    pub fn new(player: Player, opponent: Player) -> Result<Self, ConfigError> {
        if player == opponent {
            return Err(ConfigError::SameSides(player));
        }
        Ok(Self { player, opponent })
    }

    /// The same match seen from the opponent's side
    pub fn flip(self) -> Self {
        Self {
            player: self.opponent,
            opponent: self.player,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Cell {
    Empty,
    PlayerOne,
    PlayerTwo,
    Automated,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::PlayerOne => Some(Player::PlayerOne),
            Cell::PlayerTwo => Some(Player::PlayerTwo),
            Cell::Automated => Some(Player::Automated),
        }
    }

    fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(Cell::Empty),
            'X' => Some(Cell::PlayerOne),
            'O' => Some(Cell::PlayerTwo),
            'A' => Some(Cell::Automated),
            _ => None,
        }
    }

    fn symbol(self) -> char {
        self.player().map_or('.', Player::symbol)
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::PlayerOne => Cell::PlayerOne,
            Player::PlayerTwo => Cell::PlayerTwo,
            Player::Automated => Cell::Automated,
        }
    }
}

/// The four directions a line of pieces can run in
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Direction {
    Horizontal,
    Vertical,
    /// rows and columns both increasing
    DiagonalDown,
    /// rows decreasing while columns increase
    DiagonalUp,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagonalDown,
        Direction::DiagonalUp,
    ];

    // (row step, column step)
    fn step(self) -> (isize, usize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::DiagonalDown => (1, 1),
            Direction::DiagonalUp => (-1, 1),
        }
    }
}

/// A rectangular board where pieces fall to the lowest free cell of a column
///
/// Row 0 is the top of the board, row `rows - 1` is the floor.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>, // cells are stored left-to-right, top-to-bottom
}

impl Board {
    pub fn new(rows: usize, cols: usize) -> Result<Self, ConfigError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&rows) {
            return Err(ConfigError::RowsOutOfRange(rows));
        }
        if !(MIN_SIZE..=MAX_SIZE).contains(&cols) {
            return Err(ConfigError::ColsOutOfRange(cols));
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        })
    }

    /// Parses a board drawn one row per line, top row first, using `.` for
    /// empty cells and `X`, `O`, `A` for player one, player two and the
    /// computer. Blank lines and surrounding whitespace are ignored.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let cols = lines.first().map_or(0, |line| line.chars().count());
        let mut board = Self::new(lines.len(), cols)?;

        for (row, line) in lines.iter().enumerate() {
            if line.chars().count() != cols {
                return Err(ConfigError::Parse(format!(
                    "row {} has {} cells, expected {}",
                    row,
                    line.chars().count(),
                    cols
                )));
            }
            for (col, symbol) in line.chars().enumerate() {
                let cell = Cell::from_symbol(symbol)
                    .ok_or_else(|| ConfigError::Parse(format!("unknown cell '{}'", symbol)))?;
                board.cells[row * cols + col] = cell;
            }
        }

        // reject layouts that could never come from dropping pieces
        for row in 0..board.rows - 1 {
            for col in 0..board.cols {
                if !board.get(row, col).is_empty() && board.get(row + 1, col).is_empty() {
                    return Err(ConfigError::FloatingPiece { row, col });
                }
            }
        }
        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    /// The row a piece dropped into `column` would land on
    pub fn landing_row(&self, column: usize) -> Option<usize> {
        if column >= self.cols {
            return None;
        }
        (0..self.rows)
            .rev()
            .find(|&row| self.get(row, column).is_empty())
    }

    /// Drops a piece, returning the row it landed on
    pub fn try_drop(&mut self, column: usize, player: Player) -> Result<usize, MoveError> {
        if column >= self.cols {
            return Err(MoveError::ColumnOutOfRange {
                column,
                cols: self.cols,
            });
        }
        let row = self
            .landing_row(column)
            .ok_or(MoveError::ColumnFull(column))?;
        self.place(row, column, player);
        Ok(row)
    }

    /// Drops a piece into `column`, returning `false` without touching the
    /// board if the column is out of range or full
    pub fn drop_piece(&mut self, column: usize, player: Player) -> bool {
        match self.try_drop(column, player) {
            Ok(_) => true,
            Err(err) => {
                trace!("rejected drop for {}: {}", player, err);
                false
            }
        }
    }

    pub fn is_column_full(&self, column: usize) -> bool {
        column >= self.cols || !self.get(0, column).is_empty()
    }

    /// Columns that can still take a piece, in ascending order
    pub fn valid_columns(&self) -> Vec<usize> {
        (0..self.cols)
            .filter(|&column| !self.is_column_full(column))
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    pub fn empty_cells(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_empty()).count()
    }

    /// Number of `player`'s pieces in `column`
    pub fn count_in_column(&self, column: usize, player: Player) -> usize {
        let cell = Cell::from(player);
        (0..self.rows)
            .filter(|&row| self.get(row, column) == cell)
            .count()
    }

    /// Writes a piece without any gravity check. Only meant for search
    /// simulation, paired with [`Board::revert`].
    pub fn place(&mut self, row: usize, col: usize, player: Player) {
        debug_assert!(self.get(row, col).is_empty());
        self.cells[row * self.cols + col] = player.into();
    }

    /// Clears a cell written by [`Board::place`]
    pub fn revert(&mut self, row: usize, col: usize) {
        self.cells[row * self.cols + col] = Cell::Empty;
    }

    /// Every run of `WIN_LENGTH` cells along `direction`
    pub fn windows_in(
        &self,
        direction: Direction,
    ) -> impl Iterator<Item = [Cell; WIN_LENGTH]> + '_ {
        let span = WIN_LENGTH - 1;
        let (row_step, col_step) = direction.step();
        let (first_row, end_row) = match row_step {
            0 => (0, self.rows),
            1 => (0, self.rows - span),
            _ => (span, self.rows),
        };
        let end_col = self.cols - span * col_step;

        (first_row..end_row).flat_map(move |row| {
            (0..end_col).map(move |col| {
                let mut window = [Cell::Empty; WIN_LENGTH];
                for (i, cell) in window.iter_mut().enumerate() {
                    let r = (row as isize + row_step * i as isize) as usize;
                    *cell = self.get(r, col + col_step * i);
                }
                window
            })
        })
    }

    /// Every run of `WIN_LENGTH` cells in all four directions
    pub fn windows(&self) -> impl Iterator<Item = [Cell; WIN_LENGTH]> + '_ {
        Direction::ALL
            .iter()
            .flat_map(move |&direction| self.windows_in(direction))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            cells: vec![Cell::Empty; DEFAULT_ROWS * DEFAULT_COLS],
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.cols {
                write!(f, "{}", self.get(row, col).symbol())?;
            }
        }
        Ok(())
    }
}
