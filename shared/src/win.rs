//! Four-in-a-row and draw detection.
//!
//! Runs are counted by walking outward from the disk just placed. Every step
//! checks row and column bounds on their own: on a bitboard, the cell "right
//! of" the last column is the first cell of the next row, so a mask test alone
//! would count disks that are not adjacent.

use crate::board::BoardState;
use crate::player::Player;

/// Disks needed in one line to win.
pub const RUN_LENGTH: usize = 4;

/// (row step, col step) for horizontal, diagonal up-right, diagonal down-right.
/// Vertical runs are found by `has_vertical_run`.
const WALK_AXES: [(isize, isize); 3] = [(0, 1), (-1, 1), (1, 1)];

/// True when the disk at `(row, col)` completes a run for `player`.
pub fn check_win(board: &BoardState, player: Player, row: usize, col: usize) -> bool {
    let mask = board.mask_of(player);
    if mask & board.bit(row, col) == 0 {
        return false;
    }

    has_vertical_run(board, mask)
        || WALK_AXES
            .iter()
            .any(|&(dr, dc)| run_length(board, mask, row, col, dr, dc) >= RUN_LENGTH)
}

/// True when no cell can take a disk. Only meaningful once `check_win` has
/// come back false for the move that filled the board.
pub fn check_draw(board: &BoardState) -> bool {
    board.placable_mask() == 0
}

/// Whole-board vertical scan: shifting by `cols` moves straight down a column
/// and can never alias another column.
fn has_vertical_run(board: &BoardState, mask: u64) -> bool {
    let step = board.cols() as u32;
    let pairs = mask & mask.checked_shr(step).unwrap_or(0);
    let quads = pairs & pairs.checked_shr(2 * step).unwrap_or(0);
    quads != 0
}

fn run_length(board: &BoardState, mask: u64, row: usize, col: usize, dr: isize, dc: isize) -> usize {
    1 + steps_toward(board, mask, row, col, dr, dc) + steps_toward(board, mask, row, col, -dr, -dc)
}

/// Consecutive `mask` disks from `(row, col)` in direction `(dr, dc)`,
/// not counting the start.
fn steps_toward(board: &BoardState, mask: u64, row: usize, col: usize, dr: isize, dc: isize) -> usize {
    let rows = board.rows() as isize;
    let cols = board.cols() as isize;
    let mut r = row as isize;
    let mut c = col as isize;
    let mut steps = 0;

    loop {
        r += dr;
        c += dc;
        if r < 0 || r >= rows || c < 0 || c >= cols {
            break;
        }
        if mask & board.bit(r as usize, c as usize) == 0 {
            break;
        }
        steps += 1;
    }

    steps
}
