use log::debug;

use crate::{
    board::{Board, Perspective, Player},
    engine::{Difficulty, Engine},
    error::{ConfigError, EngineError, MoveError},
    rules::{self, GameOutcome},
};

/// One game between player one and either player two or the computer
///
/// Owns the board and whose turn it is, so a front end only has to forward
/// chosen columns and draw what it gets back.
#[derive(Clone, Debug)]
pub struct GameSession {
    board: Board,
    turn: Player,
    opponent: Player,
}

impl GameSession {
    /// `opponent` is whoever faces player one, `first` is one of the two
    pub fn new(board: Board, opponent: Player, first: Player) -> Result<Self, ConfigError> {
        if opponent == Player::PlayerOne {
            return Err(ConfigError::SameSides(opponent));
        }
        if first != Player::PlayerOne && first != opponent {
            return Err(ConfigError::FirstPlayerMismatch { first, opponent });
        }
        Ok(Self {
            board,
            turn: first,
            opponent,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side to move, or the side whose move won the game
    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn opponent(&self) -> Player {
        self.opponent
    }

    /// Read off the board every time, so a board handed in already won or
    /// full is reported as such
    pub fn outcome(&self) -> GameOutcome {
        rules::outcome(&self.board, self.turn)
    }

    /// The side to move against the other side
    pub fn perspective(&self) -> Perspective {
        Perspective {
            player: self.turn,
            opponent: self.other_side(self.turn),
        }
    }

    fn other_side(&self, player: Player) -> Player {
        if player == self.opponent {
            Player::PlayerOne
        } else {
            self.opponent
        }
    }

    /// Plays the side to move into `column` and hands the turn over
    pub fn play(&mut self, column: usize) -> Result<GameOutcome, MoveError> {
        if self.outcome().is_over() {
            return Err(MoveError::GameOver);
        }
        let row = self.board.try_drop(column, self.turn)?;
        debug!("{} played row {}, column {}\n{}", self.turn, row, column, self.board);

        let outcome = self.outcome();
        if !outcome.is_over() {
            self.turn = self.other_side(self.turn);
        }
        Ok(outcome)
    }

    /// Lets `engine` choose a column for the side to move without playing it
    pub fn suggest(
        &mut self,
        engine: &mut Engine,
        difficulty: Difficulty,
    ) -> Result<usize, EngineError> {
        if self.outcome().is_over() {
            return Err(MoveError::GameOver.into());
        }
        let perspective = self.perspective();
        engine.choose_column(&mut self.board, perspective, difficulty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn versus_computer(first: Player) -> GameSession {
        GameSession::new(Board::new(6, 7).unwrap(), Player::Automated, first).unwrap()
    }

    #[test]
    fn rejects_mismatched_sides() {
        let board = Board::default();
        assert_eq!(
            GameSession::new(board.clone(), Player::PlayerTwo, Player::Automated).err(),
            Some(ConfigError::FirstPlayerMismatch {
                first: Player::Automated,
                opponent: Player::PlayerTwo,
            })
        );
        assert_eq!(
            GameSession::new(board.clone(), Player::Automated, Player::PlayerTwo).err(),
            Some(ConfigError::FirstPlayerMismatch {
                first: Player::PlayerTwo,
                opponent: Player::Automated,
            })
        );
        assert_eq!(
            GameSession::new(board, Player::PlayerOne, Player::PlayerOne).err(),
            Some(ConfigError::SameSides(Player::PlayerOne))
        );
    }

    #[test]
    fn turns_alternate_and_invalid_moves_keep_the_turn() {
        let mut session = versus_computer(Player::Automated);
        assert_eq!(session.turn(), Player::Automated);
        assert_eq!(session.play(3), Ok(GameOutcome::InProgress));
        assert_eq!(session.turn(), Player::PlayerOne);

        assert_eq!(
            session.play(7),
            Err(MoveError::ColumnOutOfRange { column: 7, cols: 7 })
        );
        assert_eq!(session.turn(), Player::PlayerOne);
        assert_eq!(
            session.perspective(),
            Perspective::new(Player::PlayerOne, Player::Automated).unwrap()
        );
    }

    #[test]
    fn game_ends_on_a_win() {
        let mut session = versus_computer(Player::PlayerOne);
        for column in 0..3 {
            session.play(column).unwrap();
            session.play(column).unwrap();
        }
        assert_eq!(session.play(3), Ok(GameOutcome::Win(Player::PlayerOne)));
        assert_eq!(session.turn(), Player::PlayerOne);
        assert_eq!(session.play(4), Err(MoveError::GameOver));
    }

    #[test]
    fn two_humans_can_draw() {
        let board = Board::new(4, 4).unwrap();
        let mut session = GameSession::new(board, Player::PlayerTwo, Player::PlayerOne).unwrap();
        // ends as XXOO / OOXX / XXOO / OOXX, no line of four anywhere
        let moves = [2, 0, 3, 1, 0, 2, 1, 3, 2, 0, 3, 1, 0, 2, 1, 3];
        let mut last = GameOutcome::InProgress;
        for &column in moves.iter() {
            last = session.play(column).unwrap();
        }
        assert_eq!(last, GameOutcome::Draw);
        assert!(session.board().is_full());
    }

    #[test]
    fn finished_boards_are_not_in_progress() -> anyhow::Result<()> {
        let won = Board::parse(
            "
            ....
            ....
            ....
            XXXX",
        )?;
        let mut session = GameSession::new(won, Player::Automated, Player::Automated)?;
        assert_eq!(session.outcome(), GameOutcome::Win(Player::PlayerOne));
        assert_eq!(session.play(0), Err(MoveError::GameOver));
        let mut engine = Engine::default().with_seed(3);
        assert_eq!(
            session.suggest(&mut engine, Difficulty::Hard),
            Err(EngineError::Move(MoveError::GameOver))
        );

        let full = Board::parse(
            "
            XXOO
            OOXX
            XXOO
            OOXX",
        )?;
        let mut session = GameSession::new(full, Player::PlayerTwo, Player::PlayerOne)?;
        assert_eq!(session.outcome(), GameOutcome::Draw);
        assert_eq!(session.play(0), Err(MoveError::GameOver));
        Ok(())
    }

    #[test]
    fn suggestion_leaves_the_board_alone() -> anyhow::Result<()> {
        let mut session = versus_computer(Player::Automated);
        let before = session.board().clone();
        let mut engine = Engine::default().with_seed(5);
        let column = session.suggest(&mut engine, Difficulty::Medium)?;
        assert!(column < 7);
        assert_eq!(session.board(), &before);
        Ok(())
    }
}
