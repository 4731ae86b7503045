use crate::{metrics, Board};

const EMPTY_CELL_WEIGHT: i64 = 270;
const MONOTONICITY_WEIGHT: i64 = 100;
const MAX_TILE_WEIGHT: i64 = 10;
const CORNER_BONUS: i64 = 10_000;

/// Static evaluation of a position: running score, empty cells, smoothness (half
/// weight), monotonicity, largest tile, plus a fixed bonus when the largest tile sits
/// in a corner.
pub fn evaluate_board(board: Board, score: u32) -> i64 {
    let empty_cells = i64::from(board.count_empty_cells());
    // Neighbouring tiles are powers of two of at least 2, so the difference sum is even.
    let half_smoothness = metrics::smoothness(board) / 2;
    let monotonicity = metrics::monotonicity(board);
    let max_tile = i64::from(board.max_tile());
    let corner_bonus = if metrics::max_tile_in_corner(board) {
        CORNER_BONUS
    } else {
        0
    };

    i64::from(score)
        + EMPTY_CELL_WEIGHT * empty_cells
        + half_smoothness
        + MONOTONICITY_WEIGHT * monotonicity
        + MAX_TILE_WEIGHT * max_tile
        + corner_bonus
}
