use rand::prelude::*;
use tilerush_core::{Board, BoardSize};

use crate::BoardSeed;

/// Scrambles the goal board with a random walk of `steps` blank moves.
///
/// The walk never immediately undoes its previous move, so short walks produce
/// boards close to (but, for `steps > 0`, rarely at) the goal. Boards reached this
/// way are solvable by construction.
///
/// # Examples
///
/// ```
/// use tilerush_core::{BoardSize, is_solvable};
/// use tilerush_generator::{BoardSeed, scramble_walk};
///
/// let board = scramble_walk(BoardSize::FOUR, 20, BoardSeed::random());
/// assert!(is_solvable(&board));
/// assert!(board.manhattan_distance() <= 20);
/// ```
#[must_use]
pub fn scramble_walk(size: BoardSize, steps: usize, seed: BoardSeed) -> Board {
    let mut rng = seed.rng();
    let mut board = Board::goal(size);
    let mut previous_blank = None;

    for _ in 0..steps {
        let blank = board.blank_index();
        let candidates: Vec<usize> = board
            .blank_neighbors()
            .into_iter()
            .filter(|&index| Some(index) != previous_blank)
            .collect();
        let Some(&target) = candidates.choose(&mut rng) else {
            break;
        };
        let Ok(next) = board.slide(target) else {
            break;
        };
        board = next;
        previous_blank = Some(blank);
    }

    board
}

#[cfg(test)]
mod tests {
    use tilerush_core::is_solvable;

    use super::*;

    #[test]
    fn test_zero_steps_is_goal() {
        assert!(scramble_walk(BoardSize::THREE, 0, BoardSeed::random()).is_solved());
    }

    #[test]
    fn test_walk_is_deterministic_and_solvable() {
        let seed = BoardSeed::from([7; 32]);
        for steps in [1, 5, 20, 50] {
            let a = scramble_walk(BoardSize::FIVE, steps, seed);
            let b = scramble_walk(BoardSize::FIVE, steps, seed);
            assert_eq!(a, b);
            assert!(is_solvable(&a));
            assert!(a.manhattan_distance() <= steps);
        }
    }

    #[test]
    fn test_single_step_moves_one_tile() {
        let board = scramble_walk(BoardSize::THREE, 1, BoardSeed::from([1; 32]));
        assert_eq!(board.misplaced_tiles(), 1);
        assert_eq!(board.manhattan_distance(), 1);
    }
}
