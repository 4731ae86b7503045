use clap::{Parser, Subcommand};

/// 2048 in the terminal, with an expectimax hint advisor
#[derive(Parser, Debug)]
#[command(name = "hint-2048")]
#[command(about = "2048 in the terminal, with an expectimax hint advisor", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Mode to run; defaults to interactive play
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Seed for tile spawns; drawn from the OS when omitted
    #[arg(long, global = true)]
    pub seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play with the arrow keys; `h` asks for a hint, `r` restarts, `q` quits
    Play {
        /// Moves the hint key plays before handing back control
        #[arg(long, default_value_t = 10)]
        hint_moves: u32,

        /// Only show the suggested move instead of playing it
        #[arg(long)]
        suggest_only: bool,
    },

    /// Let the expectimax advisor play a whole game
    Ai {
        /// Evaluate the root moves on all cores
        #[arg(long)]
        parallel: bool,
    },

    /// Play uniformly random legal moves until stuck
    Random,
}

impl Default for Command {
    fn default() -> Self {
        Self::Play {
            hint_moves: 10,
            suggest_only: false,
        }
    }
}
