//! Gravity-aware move legality.

use crate::board::BoardState;

/// True when a disk dropped now could occupy `(row, col)`.
///
/// Pure: the same check is used for local selections and for moves claimed by
/// the remote peer. Whose turn it is does not matter here.
pub fn is_valid_move(board: &BoardState, row: usize, col: usize) -> bool {
    board.in_bounds(row, col) && board.placable_mask() & board.bit(row, col) != 0
}
