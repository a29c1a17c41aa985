//! Inversion counting and the n-puzzle solvability rule.
//!
//! A board is reachable from the goal iff its inversion parity matches the parity
//! invariant of its size:
//!
//! - **Odd sizes**: every blank move changes the inversion count by an even amount
//!   (horizontal moves by 0, vertical moves by `size - 1`), so a board is solvable
//!   iff its inversion count is even, like the goal's.
//! - **Even sizes**: a vertical move changes the inversion count by an odd amount
//!   (`size - 1`) and also changes the blank row, so the parity of
//!   `inversions + blank row` is invariant. With the blank row counted from the
//!   bottom starting at 1, the goal has 0 inversions on row 1, so a board is solvable
//!   iff exactly one of "inversions even" and "blank row from bottom even" holds.

use crate::Board;

/// Counts pairs `(a, b)` where `a` appears before `b` and `a > b`, ignoring the blank.
///
/// # Examples
///
/// ```
/// use tilerush_core::{Board, count_inversions};
///
/// let board: Board = "2,1,3,4,5,6,7,8,0".parse()?;
/// assert_eq!(count_inversions(&board), 1);
/// # Ok::<(), tilerush_core::BoardError>(())
/// ```
#[must_use]
pub fn count_inversions(board: &Board) -> usize {
    let tiles: Vec<u8> = board.tiles().iter().copied().filter(|&t| t != 0).collect();
    tiles
        .iter()
        .enumerate()
        .map(|(i, &a)| tiles[i + 1..].iter().filter(|&&b| a > b).count())
        .sum()
}

/// Returns the blank's row counted from the bottom, starting at 1.
#[must_use]
pub fn blank_row_from_bottom(board: &Board) -> usize {
    let edge = board.size().edge();
    edge - board.position(board.blank_index()).row
}

/// Returns `true` if `board` can be transformed into the goal by sliding tiles.
///
/// # Examples
///
/// ```
/// use tilerush_core::{Board, is_solvable};
///
/// // One swap away from the goal: unreachable.
/// let swapped: Board = "2,1,3,4,5,6,7,8,0".parse()?;
/// assert!(!is_solvable(&swapped));
///
/// let shifted: Board = "1,2,3,4,5,6,7,9,10,11,8,12,13,14,15,0".parse()?;
/// assert!(!is_solvable(&shifted));
/// # Ok::<(), tilerush_core::BoardError>(())
/// ```
#[must_use]
pub fn is_solvable(board: &Board) -> bool {
    let inversions_even = count_inversions(board) % 2 == 0;
    if board.size().is_odd() {
        return inversions_even;
    }
    let blank_row_even = blank_row_from_bottom(board) % 2 == 0;
    blank_row_even != inversions_even
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::BoardSize;

    #[test]
    fn test_goal_is_solvable_for_every_size() {
        for n in BoardSize::MIN..=BoardSize::MAX {
            let goal = Board::goal(BoardSize::new(n).unwrap());
            assert_eq!(count_inversions(&goal), 0);
            assert_eq!(blank_row_from_bottom(&goal), 1);
            assert!(is_solvable(&goal));
        }
    }

    #[test]
    fn test_vertical_move_on_even_board_stays_solvable() {
        // Moving the blank up flips both the inversion parity and the blank row parity.
        let board = Board::goal(BoardSize::FOUR).slide(11).unwrap();
        assert_eq!(count_inversions(&board), 3);
        assert_eq!(blank_row_from_bottom(&board), 2);
        assert!(is_solvable(&board));
    }

    #[test]
    fn test_fifteen_fourteen_puzzle_is_unsolvable() {
        let board: Board = "1,2,3,4,5,6,7,8,9,10,11,12,13,15,14,0".parse().unwrap();
        assert!(!is_solvable(&board));
    }

    proptest! {
        #[test]
        fn prop_random_walks_stay_solvable(
            n in 2u8..=6,
            picks in proptest::collection::vec(0usize..4, 0..80),
        ) {
            let mut board = Board::goal(BoardSize::new(n).unwrap());
            for pick in picks {
                let neighbors = board.blank_neighbors();
                board = board.slide(neighbors[pick % neighbors.len()]).unwrap();
                prop_assert!(is_solvable(&board));
            }
        }

        #[test]
        fn prop_swapping_two_tiles_breaks_solvability(
            n in 2u8..=6,
            picks in proptest::collection::vec(0usize..4, 0..40),
        ) {
            let mut board = Board::goal(BoardSize::new(n).unwrap());
            for pick in picks {
                let neighbors = board.blank_neighbors();
                board = board.slide(neighbors[pick % neighbors.len()]).unwrap();
            }
            // Exchange two non-blank tiles without moving the blank.
            let (a, b) = match board.blank_index() {
                0 => (1, 2),
                1 => (0, 2),
                _ => (0, 1),
            };
            let swapped = board.swap(a, b).unwrap();
            prop_assert!(!is_solvable(&swapped));
        }
    }
}
