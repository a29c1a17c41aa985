//! Core data structures for sliding-tile puzzles.
//!
//! This crate provides the value types shared by generation, solving, bot play and
//! game management:
//!
//! - [`BoardSize`]: a validated grid edge length
//! - [`Board`]: an immutable permutation of tiles, `0` being the blank
//! - [`Position`]: row/column coordinates derived from a board index
//! - [`LayoutId`]: the canonical string identity of a board
//! - [`solvability`]: inversion counting and the n-puzzle parity rule
//!
//! Boards are never mutated in place. Every transition returns a new value, which
//! keeps history and undo straightforward.
//!
//! # Examples
//!
//! ```
//! use tilerush_core::{Board, BoardSize};
//!
//! let goal = Board::goal(BoardSize::THREE);
//! assert!(goal.is_solved());
//!
//! // Slide the 8 into the blank.
//! let moved = goal.slide(7)?;
//! assert_eq!(moved.to_string(), "1 2 3\n4 5 6\n7 . 8");
//! assert_eq!(moved.layout_id().as_str(), "1,2,3,4,5,6,7,0,8");
//! # Ok::<(), tilerush_core::BoardError>(())
//! ```

pub mod board;
pub mod error;
pub mod layout_id;
pub mod position;
pub mod size;
pub mod solvability;
pub mod tile_images;

pub use self::{
    board::{Board, MoveSequence, Neighbors},
    error::BoardError,
    layout_id::LayoutId,
    position::{Position, are_adjacent, position_of},
    size::BoardSize,
    solvability::{count_inversions, is_solvable},
    tile_images::TileImages,
};
