//! Caller-side state kept around the stateless engine: running and best score, the
//! game-over latch, the one-time 2048 notice, and the hint loop.

use rand::Rng;
use tracing::{debug, info};

use crate::{ai::Ai, logic, Board, Direction};

pub const WINNING_TILE: u32 = 2048;

/// How the hint button behaves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HintConfig {
    /// Play the suggested moves instead of only reporting the first one.
    pub auto_play: bool,
    /// Upper bound on moves played per hint request.
    pub auto_moves: u32,
}

impl Default for HintConfig {
    fn default() -> Self {
        Self {
            auto_play: true,
            auto_moves: 10,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    pub moved: bool,
    pub points: u32,
    pub game_over: bool,
    /// Set only on the move that first produced the winning tile.
    pub reached_winning_tile: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HintOutcome {
    /// Suggest-only mode: the move the advisor would play.
    Suggested(Direction),
    /// Auto-play used up its move budget, or the suggested move did nothing.
    Played { moves: u32 },
    /// The advisor found no legal move after `moves` auto-played moves.
    NoValidMoves { moves: u32 },
}

pub struct Game<R> {
    rng: R,
    board: Board,
    score: u32,
    best_score: u32,
    over: bool,
    reached_winning_tile: bool,
}

impl<R> Game<R>
where
    R: Rng,
{
    pub fn new(mut rng: R) -> Self {
        let board = logic::initial_board(&mut rng);

        Self::with_board(rng, board)
    }

    /// Starts from a given position with a zero score.
    pub fn with_board(rng: R, board: Board) -> Self {
        Self {
            rng,
            board,
            score: 0,
            best_score: 0,
            over: logic::is_game_over(board),
            reached_winning_tile: board.max_tile() >= WINNING_TILE,
        }
    }

    pub const fn board(&self) -> Board {
        self.board
    }

    pub const fn score(&self) -> u32 {
        self.score
    }

    pub const fn best_score(&self) -> u32 {
        self.best_score
    }

    pub const fn is_over(&self) -> bool {
        self.over
    }

    pub fn handle_move(&mut self, direction: Direction) -> MoveOutcome {
        if self.over {
            return MoveOutcome {
                game_over: true,
                ..MoveOutcome::default()
            };
        }

        let (new_board, points) = logic::move_board(&mut self.rng, self.board, direction);

        if new_board == self.board {
            return MoveOutcome::default();
        }

        self.board = new_board;
        self.score += points;
        self.best_score = self.best_score.max(self.score);
        self.over = logic::is_game_over(new_board);

        let reached_winning_tile =
            !self.reached_winning_tile && new_board.max_tile() >= WINNING_TILE;

        if reached_winning_tile {
            self.reached_winning_tile = true;
            info!(score = self.score, "reached {WINNING_TILE}");
        }

        if self.over {
            info!(score = self.score, max_tile = new_board.max_tile(), "game over");
            debug!("final board\n{new_board}");
        }

        MoveOutcome {
            moved: true,
            points,
            game_over: self.over,
            reached_winning_tile,
        }
    }

    pub fn restart(&mut self) {
        self.best_score = self.best_score.max(self.score);
        self.score = 0;
        self.board = logic::initial_board(&mut self.rng);
        self.over = false;
        self.reached_winning_tile = false;
    }

    /// Asks `ai` for up to `config.auto_moves` moves, re-reading the board each time.
    pub fn hint(&mut self, ai: &mut impl Ai, config: HintConfig) -> HintOutcome {
        let mut moves = 0;

        for _ in 0..config.auto_moves {
            let Some(direction) = ai.get_next_move(self.board) else {
                debug!(moves, "hint found no valid moves");
                return HintOutcome::NoValidMoves { moves };
            };

            if !config.auto_play {
                return HintOutcome::Suggested(direction);
            }

            if !self.handle_move(direction).moved {
                break;
            }

            moves += 1;
        }

        debug!(moves, "hint finished");

        HintOutcome::Played { moves }
    }
}
