use rand::prelude::*;
use rand_pcg::Pcg64;
use tilerush_core::{Board, MoveSequence, are_adjacent};

use crate::{Difficulty, MoveQuality};

/// One entry of a humanized move plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedMove {
    /// Board index the blank should swap with.
    pub index: usize,
    /// Whether the entry comes from the optimal path or was inserted.
    pub quality: MoveQuality,
}

/// Turns an optimal move sequence into a humanized plan.
///
/// A single pass visits every interior step `0 < i < len - 1`:
///
/// - with the tier's backtrack probability, the previous move is undone and replayed
///   (two entries, leaving the board where it was);
/// - on [`Difficulty::Easy`], independently with the copy probability, a move from a
///   random earlier step is inserted. If that cell is next to the blank the bot steps
///   there and back; otherwise the entry is kept as-is and reads as a hesitation.
///
/// Replaying the result while skipping entries that are not adjacent to the blank
/// reaches the same board as `optimal`.
#[must_use]
pub fn distort_plan(
    start: &Board,
    optimal: &[usize],
    difficulty: Difficulty,
    rng: &mut Pcg64,
) -> Vec<PlannedMove> {
    let size = start.size();
    let len = optimal.len();
    let mut plan = Vec::with_capacity(len * 2);
    let mut blank = start.blank_index();
    let mut previous_blank = None;

    let detour = |index| PlannedMove {
        index,
        quality: MoveQuality::Mistake,
    };

    for (i, &index) in optimal.iter().enumerate() {
        let interior = i > 0 && i + 1 < len;
        if interior {
            if let Some(previous) = previous_blank
                && rng.random_bool(difficulty.backtrack_probability())
            {
                plan.extend([detour(previous), detour(blank)]);
            }
            if rng.random_bool(difficulty.copy_probability()) {
                let copied = optimal[rng.random_range(0..i)];
                if are_adjacent(copied, blank, size) {
                    plan.extend([detour(copied), detour(blank)]);
                } else {
                    plan.push(detour(copied));
                }
            }
        }

        plan.push(PlannedMove {
            index,
            quality: MoveQuality::Best,
        });
        previous_blank = Some(blank);
        blank = index;
    }

    plan
}

/// Turns an optimal move sequence into a humanized [`MoveSequence`].
///
/// See [`distort_plan`] for the rules. [`Difficulty::Hard`] returns `optimal`
/// unchanged.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng as _;
/// use rand_pcg::Pcg64;
/// use tilerush_bot::{Difficulty, distort};
/// use tilerush_core::Board;
///
/// let start: Board = "1,0,3,4,2,5,7,8,6".parse()?;
/// let optimal = [4, 5, 8];
/// let mut rng = Pcg64::from_seed([1; 32]);
/// assert_eq!(distort(&start, &optimal, Difficulty::Hard, &mut rng), optimal);
/// assert!(distort(&start, &optimal, Difficulty::Easy, &mut rng).len() >= optimal.len());
/// # Ok::<(), tilerush_core::BoardError>(())
/// ```
#[must_use]
pub fn distort(
    start: &Board,
    optimal: &[usize],
    difficulty: Difficulty,
    rng: &mut Pcg64,
) -> MoveSequence {
    distort_plan(start, optimal, difficulty, rng)
        .into_iter()
        .map(|planned| planned.index)
        .collect()
}

/// Replays `moves` from `start`, skipping entries not adjacent to the blank.
///
/// Returns the final board and the number of moves actually applied.
#[must_use]
pub fn replay_lenient(start: &Board, moves: &[usize]) -> (Board, usize) {
    moves
        .iter()
        .fold((start.clone(), 0), |(board, applied), &index| {
            match board.slide(index) {
                Ok(next) => (next, applied + 1),
                Err(_) => (board, applied),
            }
        })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use tilerush_core::BoardSize;
    use tilerush_generator::{BoardSeed, scramble_walk};
    use tilerush_solver::compute_bot_moves;

    use super::*;

    const START: &str = "4,1,3,7,2,6,0,5,8";

    #[test]
    fn test_hard_keeps_optimal_sequence() {
        let start: Board = START.parse().unwrap();
        let optimal = compute_bot_moves(&start);
        let mut rng = Pcg64::from_seed([3; 32]);
        for _ in 0..20 {
            assert_eq!(distort(&start, &optimal, Difficulty::Hard, &mut rng), optimal);
        }
    }

    #[test]
    fn test_short_sequences_have_no_interior_steps() {
        let start: Board = "1,2,3,4,5,6,0,7,8".parse().unwrap();
        let optimal = compute_bot_moves(&start);
        assert_eq!(optimal.len(), 2);
        let mut rng = Pcg64::from_seed([3; 32]);
        for _ in 0..20 {
            assert_eq!(distort(&start, &optimal, Difficulty::Easy, &mut rng), optimal);
        }
    }

    #[test]
    fn test_easy_distorts_more_than_adaptive() {
        let start: Board = "8,6,7,2,5,4,3,0,1".parse().unwrap();
        let optimal = compute_bot_moves(&start);
        let mut rng = Pcg64::from_seed([9; 32]);
        let extra = |tier, rng: &mut Pcg64| -> usize {
            (0..50)
                .map(|_| distort(&start, &optimal, tier, rng).len() - optimal.len())
                .sum()
        };
        let easy = extra(Difficulty::Easy, &mut rng);
        let adaptive = extra(Difficulty::Adaptive, &mut rng);
        assert!(easy > adaptive, "easy={easy} adaptive={adaptive}");
    }

    #[test]
    fn test_optimal_entries_are_tagged_best() {
        let start: Board = START.parse().unwrap();
        let optimal = compute_bot_moves(&start);
        let mut rng = Pcg64::from_seed([5; 32]);
        let plan = distort_plan(&start, &optimal, Difficulty::Easy, &mut rng);
        let best: Vec<usize> = plan
            .iter()
            .filter(|planned| planned.quality == MoveQuality::Best)
            .map(|planned| planned.index)
            .collect();
        assert_eq!(best, optimal);
    }

    proptest! {
        #[test]
        fn prop_distorted_plans_still_solve(
            bytes in any::<[u8; 32]>(),
            steps in 4usize..40,
            tier in prop::sample::select(Difficulty::ALL.to_vec()),
        ) {
            let start = scramble_walk(BoardSize::THREE, steps, BoardSeed::from(bytes));
            let optimal = compute_bot_moves(&start);
            let mut rng = Pcg64::from_seed(bytes);
            let moves = distort(&start, &optimal, tier, &mut rng);
            prop_assert!(moves.len() >= optimal.len());
            let (end, applied) = replay_lenient(&start, &moves);
            prop_assert!(end.is_solved());
            prop_assert!(applied >= optimal.len());
        }
    }
}
