use crate::{transpose_board, Board};

const CORNERS: [(usize, usize); 4] = [(0, 0), (0, 3), (3, 0), (3, 3)];

/// Negated sum of the differences between neighbouring non-empty cells of a row.
pub fn row_smoothness(row: [u32; 4]) -> i64 {
    -row.windows(2)
        .filter(|pair| pair[0] != 0 && pair[1] != 0)
        .map(|pair| i64::from(pair[0].abs_diff(pair[1])))
        .sum::<i64>()
}

/// +1 for every neighbouring pair that does not increase along the row, -1 otherwise.
pub fn row_monotonicity(row: [u32; 4]) -> i64 {
    row.windows(2)
        .map(|pair| if pair[0] >= pair[1] { 1 } else { -1 })
        .sum()
}

fn rows_and_columns(board: Board) -> impl Iterator<Item = [u32; 4]> {
    let columns = transpose_board(board);

    (0..4).flat_map(move |i| [board.row(i), columns.row(i)])
}

pub fn smoothness(board: Board) -> i64 {
    rows_and_columns(board).map(row_smoothness).sum()
}

pub fn monotonicity(board: Board) -> i64 {
    rows_and_columns(board).map(row_monotonicity).sum()
}

pub fn max_tile_in_corner(board: Board) -> bool {
    let max_tile = board.max_tile();

    CORNERS
        .into_iter()
        .any(|(row, col)| board.get(row, col) == max_tile)
}
