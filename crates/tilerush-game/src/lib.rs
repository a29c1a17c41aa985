//! Game management for TileRush.
//!
//! This crate ties boards, the bot and the generator together into playable
//! sessions and long-lived progress:
//!
//! - [`PuzzleSession`]: one puzzle in play, with undo/redo, restart and capped hints
//! - [`next_hint`]: the hint advisor behind [`PuzzleSession::request_hint`]
//! - [`Race`]: the player against the bot on the same start board
//! - [`GameState`]: stage progression with promotion, demotion and per-stage stats
//! - [`ProgressTracker`]: a [`GameState`] saved through a [`StateStore`] after every
//!   change
//!
//! # Examples
//!
//! ```
//! use std::time::{Duration, SystemTime};
//!
//! use tilerush_game::{Identity, MemoryStore, ProgressTracker, PuzzleSession, Stage};
//!
//! let now = SystemTime::now();
//! let mut tracker = ProgressTracker::open(MemoryStore::new(), Identity::Guest);
//!
//! let mut session = PuzzleSession::new("1,2,3,4,5,6,7,0,8".parse()?, now)?;
//! assert!(session.try_move(8)?);
//!
//! let outcome = tracker.complete_puzzle(&session, now + Duration::from_secs(3))?;
//! assert!(!outcome.promoted);
//! assert_eq!(tracker.state().stats(Stage::THREE).map(|s| s.completed), Some(1));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{
    error::{GameError, PersistError},
    hint::next_hint,
    persistence::{
        FileStore, Identity, MemoryStore, ProgressTracker, STORAGE_KEY_PREFIX, StateStore,
        clear_guest_state, load_game_state, save_game_state,
    },
    progression::{
        GIVEUPS_TO_DEMOTE, GameState, GiveUpOutcome, PUZZLES_PER_STAGE, PuzzleSnapshot,
        SOLVES_TO_UNLOCK, SolveOutcome, Stage, StageStats,
    },
    race::{Race, Racer},
    session::{HINT_HIGHLIGHT_DURATION, HINT_LIMIT, HintHighlight, PuzzleSession},
};

mod error;
mod hint;
mod persistence;
mod progression;
mod race;
mod session;
mod undo_redo_stack;
