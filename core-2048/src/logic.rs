use rand::Rng;

use crate::{
    mirror_board, rotate_transpose_board, transpose_board, transpose_rotate_board, Board,
    Direction,
};

const MOVE_FUNCTIONS: [fn(Board) -> (Board, u32); 4] = [move_up, move_down, move_left, move_right];

/// Spawn outcomes at a chance node: tile value and its probability.
pub const SPAWN_TILES: [(u32, f64); 2] = [(2, 0.9), (4, 0.1)];

/// Compacts one row towards index 0. Each tile merges at most once per pass, scanning
/// from the left, so `[2, 2, 2, 2]` becomes `[4, 4, 0, 0]`. Returns the new row and
/// the sum of the merged values.
pub fn move_row(row: [u32; 4]) -> ([u32; 4], u32) {
    let mut tiles = row.into_iter().filter(|&cell| cell != 0);

    let mut new_row = [0; 4];
    let mut score = 0;
    let mut len = 0;

    let mut pending = tiles.next();

    while let Some(tile) = pending {
        let next = tiles.next();

        if next == Some(tile) {
            let merged = tile * 2;

            new_row[len] = merged;
            score += merged;
            pending = tiles.next();
        } else {
            new_row[len] = tile;
            pending = next;
        }

        len += 1;
    }

    (new_row, score)
}

/// Applies [`move_row`] to every row, i.e. a move to the left.
pub fn do_move(board: Board) -> (Board, u32) {
    let mut cells = [[0; 4]; 4];
    let mut score = 0;

    for (i, new_row) in cells.iter_mut().enumerate() {
        let (row, row_score) = move_row(board.row(i));

        *new_row = row;
        score += row_score;
    }

    (Board::from_cells(cells), score)
}

fn move_up(board: Board) -> (Board, u32) {
    let board = transpose_board(board);

    let (new_board, score) = do_move(board);

    (transpose_board(new_board), score)
}

fn move_down(board: Board) -> (Board, u32) {
    let board = transpose_rotate_board(board);

    let (new_board, score) = do_move(board);

    (rotate_transpose_board(new_board), score)
}

fn move_left(board: Board) -> (Board, u32) {
    do_move(board)
}

fn move_right(board: Board) -> (Board, u32) {
    let board = mirror_board(board);

    let (new_board, score) = do_move(board);

    (mirror_board(new_board), score)
}

/// Slides and merges tiles without spawning. Always returns the compacted board,
/// which equals the input when the move is illegal.
pub fn slide(board: Board, direction: Direction) -> (Board, u32) {
    MOVE_FUNCTIONS[direction as usize](board)
}

/// The board after a legal move, without the spawned tile, or `None` if the move
/// changes nothing.
pub fn try_move(board: Board, direction: Direction) -> Option<(Board, u32)> {
    let (new_board, score) = slide(board, direction);

    (new_board != board).then_some((new_board, score))
}

/// [`try_move`] for every direction, indexed by `Direction as usize`.
pub fn try_all_moves(board: Board) -> [Option<(Board, u32)>; 4] {
    MOVE_FUNCTIONS.map(|move_fn| {
        let (new_board, score) = move_fn(board);

        (new_board != board).then_some((new_board, score))
    })
}

/// Plays `direction` on `board`. An illegal move returns the original board and zero
/// points; a legal one spawns a tile on the result.
pub fn move_board(rng: &mut impl Rng, board: Board, direction: Direction) -> (Board, u32) {
    match try_move(board, direction) {
        Some((new_board, score)) => (spawn_square(rng, new_board), score),
        None => (board, 0),
    }
}

/// Places a 2 (90%) or a 4 (10%) in a uniformly chosen empty cell. A full board is
/// returned unchanged.
pub fn spawn_square(rng: &mut impl Rng, board: Board) -> Board {
    let slot_count = board.count_empty_cells();

    if slot_count > 0 {
        let rand = rng.gen_range(0..(slot_count * 10));

        let slot_idx = rand / 10;
        let cell = if rand % 10 == 0 { 4 } else { 2 };

        board
            .empty_cells()
            .nth(slot_idx as usize)
            .map_or(board, |(row, col)| board.with_cell(row, col, cell))
    } else {
        board
    }
}

pub fn initial_board(rng: &mut impl Rng) -> Board {
    let board = spawn_square(rng, Board::EMPTY);

    spawn_square(rng, board)
}

/// Every board the random spawn can produce, grouped by empty cell. Each group holds
/// one board per entry of [`SPAWN_TILES`] with that tile's probability.
pub fn get_opponent_moves(board: Board) -> impl Iterator<Item = [(Board, f64); 2]> {
    let slots: Vec<_> = board.empty_cells().collect();

    slots.into_iter().map(move |(row, col)| {
        SPAWN_TILES.map(|(cell, probability)| (board.with_cell(row, col, cell), probability))
    })
}

pub fn is_game_over(board: Board) -> bool {
    if board.count_empty_cells() > 0 {
        return false;
    }

    for i in 0..4 {
        for j in 0..4 {
            let cell = board.get(i, j);

            if i < 3 && board.get(i + 1, j) == cell {
                return false;
            }

            if j < 3 && board.get(i, j + 1) == cell {
                return false;
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn it_move_row() {
        assert_eq!(move_row([0, 0, 0, 0]), ([0, 0, 0, 0], 0));
        assert_eq!(move_row([2, 4, 2, 4]), ([2, 4, 2, 4], 0));
        assert_eq!(move_row([0, 2, 0, 4]), ([2, 4, 0, 0], 0));
        assert_eq!(move_row([2, 2, 2, 2]), ([4, 4, 0, 0], 8));
        assert_eq!(move_row([2, 0, 0, 2]), ([4, 0, 0, 0], 4));
        assert_eq!(move_row([2, 2, 4, 0]), ([4, 4, 0, 0], 4));
        assert_eq!(move_row([4, 2, 2, 0]), ([4, 4, 0, 0], 4));
        assert_eq!(move_row([2, 2, 2, 0]), ([4, 2, 0, 0], 4));
        assert_eq!(move_row([512, 512, 8, 8]), ([1024, 16, 0, 0], 1040));
    }

    #[test]
    fn every_direction_uses_the_same_compaction() {
        let board = Board::from_cells([
            [2, 0, 0, 2],
            [0, 4, 4, 0],
            [8, 0, 8, 0],
            [2, 2, 2, 2],
        ]);

        assert_eq!(
            slide(board, Direction::Left),
            (
                Board::from_cells([[4, 0, 0, 0], [8, 0, 0, 0], [16, 0, 0, 0], [4, 4, 0, 0]]),
                36
            )
        );
        assert_eq!(
            slide(board, Direction::Right),
            (
                Board::from_cells([[0, 0, 0, 4], [0, 0, 0, 8], [0, 0, 0, 16], [0, 0, 4, 4]]),
                36
            )
        );
        assert_eq!(
            slide(board, Direction::Up),
            (
                Board::from_cells([[2, 4, 4, 4], [8, 2, 8, 0], [2, 0, 2, 0], [0, 0, 0, 0]]),
                4
            )
        );
        assert_eq!(
            slide(board, Direction::Down),
            (
                Board::from_cells([[0, 0, 0, 0], [2, 0, 4, 0], [8, 4, 8, 0], [2, 2, 2, 4]]),
                4
            )
        );
    }

    #[test]
    fn odd_runs_merge_nearest_the_wall() {
        let row = Board::from_cells([[2, 2, 2, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);

        assert_eq!(slide(row, Direction::Left).0.row(0), [4, 2, 0, 0]);
        assert_eq!(
            slide(row, Direction::Right),
            (
                Board::from_cells([[0, 0, 2, 4], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
                4
            )
        );

        let column = Board::from_cells([[2, 0, 0, 0], [2, 0, 0, 0], [2, 0, 0, 0], [0, 0, 0, 0]]);
        let column_of = |board: Board| [0, 1, 2, 3].map(|i| board.get(i, 0));

        let (up, up_score) = slide(column, Direction::Up);
        assert_eq!(column_of(up), [4, 2, 0, 0]);
        assert_eq!(up_score, 4);

        let (down, down_score) = slide(column, Direction::Down);
        assert_eq!(column_of(down), [0, 0, 2, 4]);
        assert_eq!(down_score, 4);

        let (right, _) = slide(
            Board::from_cells([[0, 4, 4, 4], [0; 4], [0; 4], [0; 4]]),
            Direction::Right,
        );
        assert_eq!(right.row(0), [0, 0, 4, 8]);
    }

    #[test]
    fn end_to_end_left_merge() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let board = Board::from_cells([[0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [2, 0, 0, 2]]);

        assert_eq!(
            slide(board, Direction::Left),
            (
                Board::from_cells([[0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [4, 0, 0, 0]]),
                4
            )
        );

        let (moved, score) = move_board(&mut rng, board, Direction::Left);

        assert_eq!(score, 4);
        assert_eq!(moved.get(3, 0), 4);
        assert_eq!(moved.count_empty_cells(), 14);
    }

    #[test]
    fn illegal_move_returns_original() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let board = Board::from_cells([[2, 4, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);

        assert_eq!(move_board(&mut rng, board, Direction::Left), (board, 0));
        assert_eq!(move_board(&mut rng, board, Direction::Up), (board, 0));
        assert_eq!(try_move(board, Direction::Left), None);
        assert!(try_move(board, Direction::Right).is_some());
    }

    #[test]
    fn spawn_on_full_board_is_noop() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let board = Board::from_cells([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);

        assert_eq!(spawn_square(&mut rng, board), board);
    }

    #[test]
    fn spawn_fills_exactly_one_empty_cell() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let board = Board::from_cells([[2, 0, 0, 0], [0, 8, 0, 0], [0, 0, 0, 0], [0, 0, 0, 16]]);

        for _ in 0..200 {
            let spawned = spawn_square(&mut rng, board);
            let changed: Vec<_> = (0..4)
                .flat_map(|i| (0..4).map(move |j| (i, j)))
                .filter(|&(i, j)| spawned.get(i, j) != board.get(i, j))
                .collect();

            assert_eq!(changed.len(), 1);

            let (i, j) = changed[0];
            assert_eq!(board.get(i, j), 0);
            assert!(matches!(spawned.get(i, j), 2 | 4));
        }
    }

    #[test]
    fn spawn_is_reproducible_with_seed() {
        let a = initial_board(&mut ChaCha8Rng::seed_from_u64(99));
        let b = initial_board(&mut ChaCha8Rng::seed_from_u64(99));

        assert_eq!(a, b);
        assert_eq!(a.count_empty_cells(), 14);
    }

    #[test]
    fn spawn_mostly_twos() {
        let mut rng = ChaCha8Rng::seed_from_u64(2048);
        let fours = (0..10_000)
            .map(|_| spawn_square(&mut rng, Board::EMPTY))
            .filter(|board| board.max_tile() == 4)
            .count();

        assert!((700..1300).contains(&fours), "{fours} fours");
    }

    #[test]
    fn opponent_moves_cover_every_empty_cell() {
        let board = Board::from_cells([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 0, 4], [4, 2, 4, 0]]);
        let moves: Vec<_> = get_opponent_moves(board).collect();

        assert_eq!(moves.len(), 2);
        assert_eq!(
            moves[0],
            [(board.with_cell(2, 2, 2), 0.9), (board.with_cell(2, 2, 4), 0.1)]
        );
        assert_eq!(moves[1][1], (board.with_cell(3, 3, 4), 0.1));
    }

    #[test]
    fn game_over_detection() {
        let stuck = Board::from_cells([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        let vertical_pair =
            Board::from_cells([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [2, 8, 16, 32]]);
        let horizontal_pair =
            Board::from_cells([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [8, 8, 16, 32]]);
        let with_gap = stuck.with_cell(1, 1, 0);

        assert!(is_game_over(stuck));
        assert!(!is_game_over(vertical_pair));
        assert!(!is_game_over(horizontal_pair));
        assert!(!is_game_over(with_gap));
        assert!(try_all_moves(stuck).iter().all(Option::is_none));
    }
}
