use std::{
    io::{self, Read, Write},
    os::fd::AsRawFd,
};

use anyhow::{Context, Result};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lib_2048::{
    ai::{expectimax::ExpectimaxAi, random::RandomAi, Ai},
    game::{Game, HintConfig, HintOutcome},
    Direction,
};

mod cli;
mod render;

use cli::{Cli, Command};

/// Escape sequences and keys, in the order of `KEY_DIRECTIONS` followed by the hint,
/// restart and quit keys.
const KEYS: [&[u8]; 7] = [b"\x1b[A", b"\x1b[B", b"\x1b[D", b"\x1b[C", b"h", b"r", b"q"];
const KEY_DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];
const HINT_KEY: usize = 4;
const RESTART_KEY: usize = 5;
const QUIT_KEY: usize = 6;

const GAME_OVER_STATUS: &str = "Game over: r restarts, q quits";

/// Applies one decoded key, returning the status line to show, if any.
fn handle_key(
    game: &mut Game<impl Rng>,
    ai: &mut impl Ai,
    key: usize,
    hint_config: HintConfig,
) -> Option<String> {
    match key {
        HINT_KEY => match game.hint(ai, hint_config) {
            HintOutcome::Suggested(direction) => Some(format!("Try moving {direction}")),
            HintOutcome::Played { .. } if game.is_over() => Some(GAME_OVER_STATUS.to_owned()),
            HintOutcome::Played { moves } => Some(format!("Hint played {moves} moves")),
            HintOutcome::NoValidMoves { .. } => Some("No valid moves left".to_owned()),
        },
        RESTART_KEY => {
            game.restart();
            Some("New game".to_owned())
        }
        _ => {
            let outcome = game.handle_move(*KEY_DIRECTIONS.get(key)?);

            if outcome.moved && outcome.game_over {
                Some(GAME_OVER_STATUS.to_owned())
            } else {
                outcome
                    .reached_winning_tile
                    .then(|| "You reached 2048! Keep playing.".to_owned())
            }
        }
    }
}

/// Runs until `q` or end of input. A finished game stays on screen and can be
/// restarted.
fn play_interactive(
    out: &mut impl Write,
    input: &mut (impl AsRawFd + Read),
    game: &mut Game<impl Rng>,
    hint_config: HintConfig,
) -> Result<()> {
    let mut ai = ExpectimaxAi::new();

    let mut buf = [0u8; 128];

    let input_searcher =
        aho_corasick::packed::Searcher::new(KEYS).context("no packed searcher for key input")?;

    let mut buf_len = 0;

    let raw_mode = render::RawMode::enable(&*input).context("configuring terminal")?;
    render::draw_board(out, game.board(), game.score(), game.best_score())?;
    render::draw_status(out, "Arrow keys move, h plays a hint, r restarts, q quits")?;

    'input: loop {
        let read = input.read(&mut buf[buf_len..])?;

        if read == 0 {
            break;
        }

        buf_len += read;

        let keys: Vec<_> = input_searcher
            .find_iter(&buf[..buf_len])
            .map(|m| m.pattern().as_usize())
            .collect();

        for key in keys {
            if key == QUIT_KEY {
                break 'input;
            }

            let (old_board, old_score) = (game.board(), game.score());

            let status = handle_key(game, &mut ai, key, hint_config);

            render::redraw_board(
                out,
                old_board,
                game.board(),
                (old_score, game.score()),
                game.best_score(),
            )?;

            if let Some(status) = status {
                render::draw_status(out, &status)?;
            }
        }

        // Keep an escape sequence split across reads.
        buf_len = match &buf[..buf_len] {
            [.., 0x1b, b'['] => {
                buf[..2].copy_from_slice(b"\x1b[");
                2
            }
            [.., 0x1b] => {
                buf[0] = 0x1b;
                1
            }
            _ => 0,
        }
    }

    drop(raw_mode);

    writeln!(out, "Final score {}, best {}", game.score(), game.best_score())?;

    Ok(())
}

fn play_auto(out: &mut impl Write, rng: impl Rng, ai: &mut impl Ai) -> Result<()> {
    let mut game = Game::new(rng);

    render::draw_board(out, game.board(), game.score(), game.best_score())?;

    let mut move_count = 0u32;

    while let Some(direction) = ai.get_next_move(game.board()) {
        let (old_board, old_score) = (game.board(), game.score());

        game.handle_move(direction);
        move_count += 1;

        render::redraw_board(
            out,
            old_board,
            game.board(),
            (old_score, game.score()),
            game.best_score(),
        )?;
    }

    info!(
        moves = move_count,
        score = game.score(),
        max_tile = game.board().max_tile(),
        "finished"
    );

    writeln!(out, "Game over after {move_count} moves, score {}", game.score())?;

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut rng = match cli.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let command = cli.command.unwrap_or_default();

    info!(seed = ?cli.seed, ?command, "starting");

    let mut stdout = io::stdout().lock();
    let mut stdin = io::stdin().lock();

    match command {
        Command::Play {
            hint_moves,
            suggest_only,
        } => {
            let hint_config = HintConfig {
                auto_play: !suggest_only,
                auto_moves: hint_moves,
            };

            play_interactive(&mut stdout, &mut stdin, &mut Game::new(rng), hint_config)
        }
        Command::Ai { parallel } => {
            let mut ai = if parallel {
                ExpectimaxAi::parallel()
            } else {
                ExpectimaxAi::new()
            };

            play_auto(&mut stdout, rng, &mut ai)
        }
        Command::Random => {
            let mut ai = RandomAi::new(ChaCha8Rng::from_rng(&mut rng)?);

            play_auto(&mut stdout, rng, &mut ai)
        }
    }
}
