//! Bitboard representation of a gravity-drop board.
//!
//! Cell `(row, col)` lives at bit `row * cols + col`. Row 0 is the top row and
//! bit 0 is the top-left cell, so "the cell below" is always `cols` bits higher.
//! The raw masks never leave this crate.

use crate::error::GameError;
use crate::player::{Cell, GameResult, GameState, Player};

/// Largest number of cells a board may have (one bit each).
pub const MAX_CELLS: usize = u64::BITS as usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    cols: usize,
    rows: usize,
    black: u64,
    white: u64,
    turn: GameState,
    result: Option<GameResult>,
}

impl BoardState {
    /// Creates an empty board with Black to move.
    pub fn new(cols: usize, rows: usize) -> Result<Self, GameError> {
        let fits = cols
            .checked_mul(rows)
            .map_or(false, |cells| cells <= MAX_CELLS);
        if cols == 0 || rows == 0 || !fits {
            return Err(GameError::InvalidGeometry { cols, rows });
        }

        Ok(Self {
            cols,
            rows,
            black: 0,
            white: 0,
            turn: GameState::BlackToMove,
            result: None,
        })
    }

    /// An empty board with the same geometry, Black to move.
    pub(crate) fn cleared(&self) -> Self {
        Self {
            cols: self.cols,
            rows: self.rows,
            black: 0,
            white: 0,
            turn: GameState::BlackToMove,
            result: None,
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn turn(&self) -> GameState {
        self.turn
    }

    /// Set only once `turn()` is `Finished`.
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    pub fn cell_state(&self, row: usize, col: usize) -> Result<Cell, GameError> {
        if !self.in_bounds(row, col) {
            return Err(GameError::OutOfBounds { row, col });
        }

        let bit = self.bit(row, col);
        Ok(if self.black & bit != 0 {
            Cell::Black
        } else if self.white & bit != 0 {
            Cell::White
        } else {
            Cell::Empty
        })
    }

    /// Number of disks on the board.
    pub fn disk_count(&self) -> u32 {
        self.occupied().count_ones()
    }

    /// Single-bit mask for an in-bounds cell.
    pub(crate) fn bit(&self, row: usize, col: usize) -> u64 {
        debug_assert!(self.in_bounds(row, col));
        1u64 << (row * self.cols + col)
    }

    pub(crate) fn mask_of(&self, player: Player) -> u64 {
        match player {
            Player::Black => self.black,
            Player::White => self.white,
        }
    }

    pub(crate) fn occupied(&self) -> u64 {
        self.black | self.white
    }

    /// The `cols * rows` low bits.
    pub(crate) fn valid_mask(&self) -> u64 {
        let cells = self.cols * self.rows;
        if cells == MAX_CELLS {
            u64::MAX
        } else {
            (1u64 << cells) - 1
        }
    }

    /// Bits `(rows - 1) * cols .. rows * cols`, the cells resting on the floor.
    pub(crate) fn bottom_row_mask(&self) -> u64 {
        let valid = self.valid_mask();
        valid & !valid.checked_shr(self.cols as u32).unwrap_or(0)
    }

    /// Cells where a disk may land this turn.
    ///
    /// A cell is supported when the cell below it is occupied or it sits on
    /// the floor. Placable cells are those where "supported" and "occupied"
    /// disagree.
    pub(crate) fn placable_mask(&self) -> u64 {
        let occupied = self.occupied();
        let below = occupied.checked_shr(self.cols as u32).unwrap_or(0);
        let supported = below | self.bottom_row_mask();
        let placable = (supported ^ occupied) & self.valid_mask();
        debug_assert_eq!(placable & occupied, 0);
        placable
    }

    pub(crate) fn place(&mut self, player: Player, row: usize, col: usize) {
        let bit = self.bit(row, col);
        debug_assert_eq!(self.occupied() & bit, 0);
        match player {
            Player::Black => self.black |= bit,
            Player::White => self.white |= bit,
        }
    }

    pub(crate) fn advance_turn(&mut self, next: Player) {
        self.turn = next.to_move();
    }

    pub(crate) fn finish(&mut self, result: GameResult) {
        self.turn = GameState::Finished;
        self.result = Some(result);
    }
}
