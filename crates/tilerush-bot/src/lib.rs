//! A humanized bot opponent for sliding-tile races.
//!
//! The bot plays a race against the player on a copy of the same start board. Its
//! behavior is controlled by a [`Difficulty`] tier and a [`BotMode`]:
//!
//! - [`BotMode::Planned`] computes the optimal path once and [distorts](distort) it
//!   with backtracks and detours, then replays it step by step.
//! - [`BotMode::Reactive`] asks the optimal solver for the best move from the current
//!   board on every step and, with tier-specific odds, pauses or plays a deliberate
//!   mistake instead.
//!
//! Either way, each step yields a [`BotDecision`], and a [`BotScheduler`] spaces the
//! steps out with per-tier delays. The scheduler is polled from the caller's loop and
//! stops when the bot finishes or its [`CancelHandle`] is cancelled.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//!
//! use tilerush_bot::{BotBrain, BotConfig, BotMode, BotScheduler, Difficulty};
//! use tilerush_core::BoardSize;
//! use tilerush_generator::{BoardSeed, scramble_walk};
//!
//! let seed = BoardSeed::from([42; 32]);
//! let mut board = scramble_walk(BoardSize::THREE, Difficulty::Medium.scramble_steps(), seed);
//!
//! let config = BotConfig::new(Difficulty::Medium).with_mode(BotMode::Reactive);
//! let mut scheduler = BotScheduler::start(BotBrain::with_seed(config, &board, seed), Duration::ZERO);
//!
//! let mut now = Duration::ZERO;
//! while let Some(deadline) = scheduler.next_deadline() {
//!     now = deadline;
//!     if let Some(step) = scheduler.poll(now, &board) {
//!         board = step.board;
//!     }
//! #   if scheduler.steps() > 10_000 { break; }
//! }
//! assert!(board.is_solved());
//! ```

pub use self::{
    decision::{BotBrain, BotConfig, BotDecision, BotMode, MoveQuality, ParseBotModeError},
    difficulty::{Difficulty, FALLBACK_DELAY, ParseDifficultyError, sample_delay},
    distort::{PlannedMove, distort, distort_plan, replay_lenient},
    scheduler::{BotScheduler, BotStep, CancelHandle, bot_step},
};

mod decision;
mod difficulty;
mod distort;
mod scheduler;
