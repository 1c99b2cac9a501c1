//! Five-in-a-row detection
//!
//! Exact fives and overlines are both wins: no Renju overline exclusion.

use crate::board::{Board, Pos, Stone};

/// Number of aligned stones needed to win.
pub const WIN_LENGTH: usize = 5;

/// Line directions: horizontal, vertical and both diagonals.
const DIRECTIONS: [(i32, i32); 4] = [
    (1, 0),  // Horizontal
    (0, 1),  // Vertical
    (1, 1),  // Diagonal down-right
    (1, -1), // Diagonal up-right
];

/// True iff the `stone` placed at `pos` completes five or more in a line.
///
/// Evaluated right after the placement. Pure: the board is not modified.
#[inline]
pub fn check_win(board: &Board, pos: Pos, stone: Stone) -> bool {
    stone != Stone::Empty && board.get(pos) == stone && would_win(board, pos, stone)
}

/// Win-in-one probe: would a `stone` at `pos` complete five or more?
///
/// The content of `pos` itself is ignored, so this can be asked about an empty cell
/// without placing anything on the board.
#[inline]
pub fn would_win(board: &Board, pos: Pos, stone: Stone) -> bool {
    stone != Stone::Empty
        && DIRECTIONS
            .iter()
            .any(|&dir| line_length(board, pos, stone, dir) >= WIN_LENGTH)
}

/// Length of the line through `pos` along `dir`, counting `pos` itself as one stone.
pub fn line_length(board: &Board, pos: Pos, stone: Stone, (dx, dy): (i32, i32)) -> usize {
    1 + run_length(board, pos, stone, (dx, dy)) + run_length(board, pos, stone, (-dx, -dy))
}

/// Contiguous `stone`s starting next to `pos` and going along `dir`.
fn run_length(board: &Board, pos: Pos, stone: Stone, dir: (i32, i32)) -> usize {
    (1..)
        .map_while(|step| pos.offset(dir, step))
        .take_while(|&p| board.get(p) == stone)
        .count()
}
