//! The authoritative game: one board, one state machine, all mutation here.

use crate::board::BoardState;
use crate::error::GameError;
use crate::player::{Cell, GameResult, GameState};
use crate::validator;
use crate::win::{check_draw, check_win};
use log::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEngine {
    board: BoardState,
}

impl GameEngine {
    /// Starts an empty `cols` x `rows` game with Black to move.
    pub fn new_game(cols: usize, rows: usize) -> Result<Self, GameError> {
        Ok(Self {
            board: BoardState::new(cols, rows)?,
        })
    }

    /// Discards the current game and starts over on the same geometry.
    pub fn restart(&mut self) {
        self.board = self.board.cleared();
    }

    pub fn cols(&self) -> usize {
        self.board.cols()
    }

    pub fn rows(&self) -> usize {
        self.board.rows()
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn is_valid_move(&self, row: usize, col: usize) -> bool {
        validator::is_valid_move(&self.board, row, col)
    }

    /// Drops the mover's disk at `(row, col)` and advances the state machine.
    ///
    /// On error nothing changes.
    pub fn apply_move(&mut self, row: usize, col: usize) -> Result<GameState, GameError> {
        let mover = self
            .board
            .turn()
            .mover()
            .ok_or(GameError::IllegalMove { row, col })?;

        if !self.is_valid_move(row, col) {
            return Err(GameError::IllegalMove { row, col });
        }

        self.board.place(mover, row, col);

        if check_win(&self.board, mover, row, col) {
            self.board.finish(mover.win());
        } else if check_draw(&self.board) {
            self.board.finish(GameResult::Draw);
        } else {
            self.board.advance_turn(mover.opposite());
        }

        debug!(
            "{} placed at (row {}, col {}), state now {:?}",
            mover,
            row,
            col,
            self.board.turn()
        );
        Ok(self.board.turn())
    }

    pub fn cell_state(&self, row: usize, col: usize) -> Result<Cell, GameError> {
        self.board.cell_state(row, col)
    }

    pub fn game_state(&self) -> GameState {
        self.board.turn()
    }

    pub fn game_result(&self) -> Result<GameResult, GameError> {
        match self.board.turn() {
            GameState::Finished => self.board.result().ok_or(GameError::ResultNotAvailable),
            GameState::BlackToMove | GameState::WhiteToMove => Err(GameError::ResultNotAvailable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 4x4 fill with no run of four anywhere, in legal alternating order.
    #[rustfmt::skip]
    const DRAWN_4X4: [(usize, usize); 16] = [
        (3, 0), (3, 2), (3, 1), (3, 3),
        (2, 2), (2, 0), (2, 3), (2, 1),
        (1, 0), (1, 2), (1, 1), (1, 3),
        (0, 2), (0, 0), (0, 3), (0, 1),
    ];

    fn play(engine: &mut GameEngine, moves: &[(usize, usize)]) {
        for &(row, col) in moves {
            engine.apply_move(row, col).unwrap();
        }
    }

    #[test]
    fn test_initial_state() {
        let engine = GameEngine::new_game(7, 6).unwrap();
        assert_eq!(engine.game_state(), GameState::BlackToMove);
        assert_eq!(engine.game_result(), Err(GameError::ResultNotAvailable));
        assert_eq!(engine.cols(), 7);
        assert_eq!(engine.rows(), 6);
    }

    #[test]
    fn test_invalid_geometry() {
        assert_eq!(
            GameEngine::new_game(13, 5),
            Err(GameError::InvalidGeometry { cols: 13, rows: 5 })
        );
        assert!(GameEngine::new_game(8, 8).is_ok());
    }

    #[test]
    fn test_apply_move_alternates_turns() {
        let mut engine = GameEngine::new_game(7, 6).unwrap();
        assert_eq!(engine.apply_move(5, 3), Ok(GameState::WhiteToMove));
        assert_eq!(engine.cell_state(5, 3), Ok(Cell::Black));

        assert_eq!(engine.apply_move(4, 3), Ok(GameState::BlackToMove));
        assert_eq!(engine.cell_state(4, 3), Ok(Cell::White));
    }

    #[test]
    fn test_illegal_move_leaves_board_unchanged() {
        let mut engine = GameEngine::new_game(7, 6).unwrap();
        let before = engine.clone();

        assert_eq!(
            engine.apply_move(4, 3),
            Err(GameError::IllegalMove { row: 4, col: 3 })
        );
        assert_eq!(
            engine.apply_move(6, 0),
            Err(GameError::IllegalMove { row: 6, col: 0 })
        );
        assert_eq!(engine, before);
    }

    #[test]
    fn test_black_wins_bottom_row() {
        let mut engine = GameEngine::new_game(7, 6).unwrap();
        play(
            &mut engine,
            &[(5, 0), (4, 0), (5, 1), (4, 1), (5, 2), (4, 2)],
        );
        assert_eq!(engine.apply_move(5, 3), Ok(GameState::Finished));
        assert_eq!(engine.game_result(), Ok(GameResult::BlackWon));
    }

    #[test]
    fn test_white_wins_vertical() {
        let mut engine = GameEngine::new_game(7, 6).unwrap();
        play(
            &mut engine,
            &[(5, 0), (5, 3), (4, 0), (4, 3), (5, 6), (3, 3), (3, 0), (2, 3)],
        );
        assert_eq!(engine.game_state(), GameState::Finished);
        assert_eq!(engine.game_result(), Ok(GameResult::WhiteWon));
    }

    #[test]
    fn test_single_row_board_win() {
        let mut engine = GameEngine::new_game(7, 1).unwrap();
        play(
            &mut engine,
            &[(0, 0), (0, 6), (0, 1), (0, 5), (0, 2), (0, 4)],
        );
        assert_eq!(engine.game_state(), GameState::BlackToMove);
        engine.apply_move(0, 3).unwrap();
        assert_eq!(engine.game_result(), Ok(GameResult::BlackWon));
    }

    #[test]
    fn test_wrapped_bits_do_not_win() {
        let mut engine = GameEngine::new_game(7, 6).unwrap();
        // Black ends up on bits 33, 34, 35 and 36: (4, 5), (4, 6), (5, 0), (5, 1).
        play(
            &mut engine,
            &[(5, 0), (5, 5), (5, 1), (5, 6), (4, 5), (5, 3), (4, 6)],
        );
        assert_eq!(engine.game_state(), GameState::WhiteToMove);
    }

    #[test]
    fn test_full_board_without_run_is_draw() {
        let mut engine = GameEngine::new_game(4, 4).unwrap();
        play(&mut engine, &DRAWN_4X4[..15]);
        assert_eq!(engine.game_state(), GameState::WhiteToMove);

        engine.apply_move(0, 1).unwrap();
        assert_eq!(engine.game_state(), GameState::Finished);
        assert_eq!(engine.game_result(), Ok(GameResult::Draw));
    }

    #[test]
    fn test_no_moves_after_finish() {
        let mut engine = GameEngine::new_game(4, 1).unwrap();
        play(&mut engine, &[(0, 0), (0, 1), (0, 2), (0, 3)]);
        assert_eq!(engine.game_result(), Ok(GameResult::Draw));

        let mut engine = GameEngine::new_game(7, 1).unwrap();
        play(
            &mut engine,
            &[(0, 0), (0, 6), (0, 1), (0, 5), (0, 2), (0, 4), (0, 3)],
        );
        let before = engine.clone();
        assert!(engine.apply_move(0, 3).is_err());
        assert_eq!(engine, before);
    }

    #[test]
    fn test_restart_discards_game() {
        let mut engine = GameEngine::new_game(5, 5).unwrap();
        play(&mut engine, &[(4, 0), (4, 1)]);
        engine.restart();

        assert_eq!(engine, GameEngine::new_game(5, 5).unwrap());
    }
}
