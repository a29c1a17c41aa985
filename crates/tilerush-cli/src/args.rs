use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tilerush_bot::{BotMode, Difficulty};
use tilerush_core::Board;
use tilerush_generator::BoardSeed;

/// Sliding-tile puzzles with a humanized bot opponent.
#[derive(Debug, Parser)]
#[command(author, version = crate::version::build_version(), about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a random solvable board.
    Generate(GenerateArgs),
    /// Print the optimal solution of a 3x3 board.
    Solve(SolveArgs),
    /// Suggest the next tile to move.
    Hint(HintArgs),
    /// Run a bot race on a virtual clock and print its steps.
    Race(RaceArgs),
    /// Play a puzzle on the terminal, saving progress as you go.
    Play(PlayArgs),
    /// Inspect or update stage progression.
    Progress(ProgressArgs),
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Board edge length.
    #[arg(long, value_name = "N", default_value_t = 3)]
    pub size: u8,

    /// Seed to regenerate a specific board (64 hex characters).
    #[arg(long, value_name = "SEED")]
    pub seed: Option<BoardSeed>,

    /// Scramble the goal board with this many random slides instead of shuffling.
    #[arg(long, value_name = "STEPS")]
    pub scramble: Option<usize>,
}

#[derive(Debug, Args)]
pub struct SolveArgs {
    /// Board as comma-separated tiles in row-major order, `0` for the blank.
    #[arg(value_name = "BOARD")]
    pub board: Board,
}

#[derive(Debug, Args)]
pub struct HintArgs {
    /// Board as comma-separated tiles in row-major order, `0` for the blank.
    #[arg(value_name = "BOARD")]
    pub board: Board,

    /// Index suggested by the previous hint, to avoid repeating it.
    #[arg(long, value_name = "INDEX")]
    pub previous: Option<usize>,
}

#[derive(Debug, Args)]
pub struct RaceArgs {
    /// Bot tier: easy, medium, hard or adaptive. Unknown names play the plain
    /// optimal line.
    #[arg(long, value_name = "TIER", default_value = "medium")]
    pub difficulty: String,

    /// Bot strategy. Defaults to planned on 3x3 boards and reactive otherwise.
    #[arg(long, value_name = "MODE")]
    pub mode: Option<BotMode>,

    /// Start board. Defaults to a scramble of the goal sized to the tier.
    #[arg(long, value_name = "BOARD", conflicts_with = "size")]
    pub board: Option<Board>,

    /// Board edge length for the generated start board.
    #[arg(long, value_name = "N", default_value_t = 3)]
    pub size: u8,

    /// Seed for the start board and the bot's random choices.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<BoardSeed>,

    /// Simulate a player playing solver moves at this pace, in milliseconds per move.
    #[arg(long, value_name = "MS")]
    pub player_pace: Option<u64>,

    /// Stop after this many bot steps.
    #[arg(long, value_name = "STEPS", default_value_t = 10_000)]
    pub max_steps: usize,
}

impl RaceArgs {
    /// Returns the recognized tier, if any.
    #[must_use]
    pub fn tier(&self) -> Option<Difficulty> {
        self.difficulty.parse().ok()
    }
}

#[derive(Debug, Args)]
pub struct StoreArgs {
    /// Player id. Without one, progress belongs to a guest and is not kept.
    #[arg(long, value_name = "UID", global = true)]
    pub user: Option<String>,

    /// Directory holding saved progress.
    #[arg(long, value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct PlayArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Start a new puzzle even if one is in progress.
    #[arg(long)]
    pub new: bool,
}

#[derive(Debug, Args)]
pub struct ProgressArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    #[command(subcommand)]
    pub action: Option<ProgressAction>,
}

#[derive(Debug, Subcommand)]
pub enum ProgressAction {
    /// Show stage, streaks and per-stage statistics.
    Show,
    /// Record a solve on the current stage.
    Solve {
        /// Solve time in seconds.
        #[arg(value_name = "SECONDS")]
        seconds: f64,
    },
    /// Record a give-up on the current stage.
    GiveUp,
    /// Switch to an unlocked stage.
    Select {
        /// Stage edge length: 3, 4 or 5.
        #[arg(value_name = "STAGE")]
        stage: u8,
    },
}
