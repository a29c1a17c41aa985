//! Optimal and heuristic move selection for sliding-tile boards.
//!
//! - [`OptimalSolver`] runs a breadth-first search over the board graph and returns
//!   a shortest [`MoveSequence`](tilerush_core::MoveSequence). It only handles 3×3
//!   boards; other sizes yield an empty sequence.
//! - [`greedy_move`] picks a single locally good move on any board size, for play on
//!   boards the optimal solver does not cover.
//!
//! # Examples
//!
//! ```
//! use tilerush_core::Board;
//! use tilerush_solver::compute_bot_moves;
//!
//! let start: Board = "1,2,3,4,5,6,0,7,8".parse()?;
//! let moves = compute_bot_moves(&start);
//! assert_eq!(moves, vec![7, 8]);
//! assert!(start.apply_moves(&moves)?.is_solved());
//! # Ok::<(), tilerush_core::BoardError>(())
//! ```

pub use self::{
    greedy::greedy_move,
    optimal::{OptimalSolver, compute_bot_moves},
};

mod greedy;
mod optimal;
