use crate::{logic, Board, Direction};

pub mod expectimax;
pub mod heuristic;
pub mod random;

pub trait Ai {
    fn get_next_move(&mut self, board: Board) -> Option<Direction>;
}

/// Boards reachable by a legal move, before the tile spawn, in direction order.
fn get_all_moves(board: Board) -> impl Iterator<Item = (Board, Direction)> {
    Direction::iter().filter_map(move |direction| {
        logic::try_move(board, direction).map(|(new_board, _)| (new_board, direction))
    })
}

/// Directions that change the board, in the fixed order up, down, left, right.
pub fn get_possible_moves(board: Board) -> Vec<Direction> {
    get_all_moves(board).map(|(_, direction)| direction).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn possible_moves_keep_enumeration_order() {
        let board = Board::from_cells([[0, 0, 0, 0], [0, 2, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);

        assert_eq!(
            get_possible_moves(board),
            [
                Direction::Up,
                Direction::Down,
                Direction::Left,
                Direction::Right
            ]
        );
    }

    #[test]
    fn possible_moves_filter_no_ops() {
        let top_left = Board::from_cells([[2, 4, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        let stuck = Board::from_cells([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);

        assert_eq!(
            get_possible_moves(top_left),
            [Direction::Down, Direction::Right]
        );
        assert!(get_possible_moves(stuck).is_empty());
    }
}
