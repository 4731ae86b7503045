use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::{logic, Board, Direction};

use super::{heuristic, Ai};

/// Which side moves at a node of the search tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ply {
    /// Picks the best slide.
    Player,
    /// Places a random tile.
    Chance,
}

/// Full-width expectimax with a search depth chosen from the number of empty cells.
///
/// Values are memoized per `(board, depth, ply)` for the duration of one
/// [`ExpectimaxAi::get_best_move`] call.
pub struct ExpectimaxAi {
    parallel: bool,
    transposition_table: FxHashMap<(Board, u32, Ply), f64>,
}

impl Ai for ExpectimaxAi {
    fn get_next_move(&mut self, board: Board) -> Option<Direction> {
        self.get_best_move(board)
    }
}

impl Default for ExpectimaxAi {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpectimaxAi {
    pub fn new() -> Self {
        Self {
            parallel: false,
            transposition_table: FxHashMap::default(),
        }
    }

    /// Evaluates the root moves on the rayon pool, one table per move.
    pub fn parallel() -> Self {
        Self {
            parallel: true,
            ..Self::new()
        }
    }

    pub fn get_best_move(&mut self, board: Board) -> Option<Direction> {
        self.transposition_table.clear();

        let depth = get_adaptive_depth(board);
        let player_moves: Vec<_> = super::get_all_moves(board).collect();

        let scored: Vec<_> = if self.parallel {
            player_moves
                .par_iter()
                .map(|&(new_board, direction)| {
                    let score = Self::new().expectimax(new_board, depth - 1, Ply::Chance);

                    (score, direction)
                })
                .collect()
        } else {
            player_moves
                .iter()
                .map(|&(new_board, direction)| {
                    let score = self.expectimax(new_board, depth - 1, Ply::Chance);

                    (score, direction)
                })
                .collect()
        };

        for (score, direction) in &scored {
            trace!(%direction, score, "root move");
        }

        let best = first_max(scored);

        debug!(
            depth,
            empty_cells = board.count_empty_cells(),
            best = ?best,
            "chose move"
        );

        best.map(|(_, direction)| direction)
    }

    pub fn expectimax(&mut self, board: Board, depth: u32, ply: Ply) -> f64 {
        if depth == 0 || logic::is_game_over(board) {
            return static_score(board);
        }

        if let Some(&score) = self.transposition_table.get(&(board, depth, ply)) {
            return score;
        }

        let score = match ply {
            Ply::Player => self.expectimax_player_move(board, depth),
            Ply::Chance => self.expectimax_opponent_move(board, depth),
        };

        self.transposition_table.insert((board, depth, ply), score);

        score
    }

    fn expectimax_player_move(&mut self, board: Board, depth: u32) -> f64 {
        super::get_all_moves(board)
            .map(|(new_board, _)| self.expectimax(new_board, depth - 1, Ply::Chance))
            .reduce(f64::max)
            .unwrap_or_else(|| static_score(board))
    }

    fn expectimax_opponent_move(&mut self, board: Board, depth: u32) -> f64 {
        let empty_cells = board.count_empty_cells();

        if empty_cells == 0 {
            return static_score(board);
        }

        let mut total_score = 0.0;

        for spawns in logic::get_opponent_moves(board) {
            total_score += spawns
                .into_iter()
                .map(|(new_board, probability)| {
                    probability * self.expectimax(new_board, depth - 1, Ply::Player)
                })
                .sum::<f64>();
        }

        total_score / empty_cells as f64
    }
}

fn static_score(board: Board) -> f64 {
    heuristic::evaluate_board(board, 0) as f64
}

/// The highest score, keeping the earliest entry on ties.
fn first_max<T>(scored: impl IntoIterator<Item = (f64, T)>) -> Option<(f64, T)> {
    scored.into_iter().fold(None, |best, (score, item)| match best {
        Some((best_score, _)) if best_score >= score => best,
        _ => Some((score, item)),
    })
}

/// Deeper searches when fewer cells are empty, since chance nodes branch less.
pub fn get_adaptive_depth(board: Board) -> u32 {
    match board.count_empty_cells() {
        6.. => 4,
        3..=5 => 5,
        _ => 6,
    }
}

pub fn get_best_move(board: Board) -> Option<Direction> {
    ExpectimaxAi::new().get_best_move(board)
}

pub fn expectimax(board: Board, depth: u32, ply: Ply) -> f64 {
    ExpectimaxAi::new().expectimax(board, depth, ply)
}
