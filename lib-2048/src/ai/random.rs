use rand::Rng;

use crate::{Board, Direction};

use super::Ai;

/// Baseline player that picks uniformly among the legal moves.
pub struct RandomAi<R> {
    rng: R,
}

impl<R> Ai for RandomAi<R>
where
    R: Rng,
{
    fn get_next_move(&mut self, board: Board) -> Option<Direction> {
        let moves = super::get_possible_moves(board);

        (!moves.is_empty()).then(|| moves[self.rng.gen_range(0..moves.len())])
    }
}

impl<R> RandomAi<R>
where
    R: Rng,
{
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}
