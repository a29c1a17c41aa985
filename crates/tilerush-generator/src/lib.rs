//! Random solvable board generation.
//!
//! [`BoardGenerator`] draws uniformly random permutations with a Fisher–Yates
//! shuffle and rejects them until one is solvable, not already solved, and not in a
//! caller-supplied set of excluded layouts. Every board is derived from a
//! [`BoardSeed`], so any board can be regenerated from its seed.
//!
//! Rejection sampling is bounded: after [`DEFAULT_MAX_ATTEMPTS`] draws the generator
//! gives up and returns the goal board, flagging the result as a fallback and
//! logging a warning.
//!
//! [`scramble_walk`] offers a second way to obtain boards: a random walk of blank
//! moves away from the goal, which is solvable by construction and whose difficulty
//! is controlled by the walk length.
//!
//! # Examples
//!
//! ```
//! use std::collections::HashSet;
//!
//! use tilerush_core::{BoardSize, is_solvable};
//! use tilerush_generator::BoardGenerator;
//!
//! let generated = BoardGenerator::new().generate(BoardSize::FOUR);
//! assert!(is_solvable(&generated.board));
//! assert!(!generated.board.is_solved());
//!
//! // The same seed always yields the same board.
//! let again = BoardGenerator::new().generate_with_seed(
//!     BoardSize::FOUR,
//!     generated.seed,
//!     &HashSet::new(),
//! );
//! assert_eq!(again.board, generated.board);
//! ```

pub use self::{
    generator::{BoardGenerator, DEFAULT_MAX_ATTEMPTS, GeneratedBoard, new_solvable_board},
    scramble::scramble_walk,
    seed::{BoardSeed, SeedParseError},
};

mod generator;
mod scramble;
mod seed;
