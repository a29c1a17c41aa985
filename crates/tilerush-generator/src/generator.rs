use std::{collections::HashSet, hash::BuildHasher};

use rand::prelude::*;
use rand_pcg::Pcg64;
use tilerush_core::{Board, BoardSize, LayoutId, is_solvable};

use crate::BoardSeed;

/// Default ceiling on shuffle attempts before falling back to the goal board.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10_000;

/// A board produced by [`BoardGenerator`], with the seed that reproduces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedBoard {
    /// The generated board.
    pub board: Board,
    /// The seed the board was drawn from.
    pub seed: BoardSeed,
    /// Number of shuffles drawn, including the accepted one.
    pub attempts: usize,
    /// `true` if the attempt ceiling was reached and `board` is the goal board.
    pub fallback: bool,
}

/// Generates random, solvable, unsolved boards by rejection sampling.
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
///
/// use tilerush_core::BoardSize;
/// use tilerush_generator::BoardGenerator;
///
/// let generator = BoardGenerator::new();
/// let first = generator.generate(BoardSize::THREE);
///
/// let mut completed = HashSet::new();
/// completed.insert(first.board.layout_id());
/// let second = generator.generate_excluding(BoardSize::THREE, &completed);
/// assert_ne!(second.board, first.board);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGenerator {
    max_attempts: usize,
}

impl Default for BoardGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardGenerator {
    /// Creates a generator with [`DEFAULT_MAX_ATTEMPTS`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Sets the attempt ceiling (at least one attempt is always made).
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = if max_attempts == 0 { 1 } else { max_attempts };
        self
    }

    /// Returns the attempt ceiling.
    #[must_use]
    pub const fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Generates a board from a fresh random seed.
    #[must_use]
    pub fn generate(&self, size: BoardSize) -> GeneratedBoard {
        self.generate_with_seed(size, BoardSeed::random(), &HashSet::new())
    }

    /// Generates a board from a fresh random seed, avoiding `excluded` layouts.
    #[must_use]
    pub fn generate_excluding<S>(
        &self,
        size: BoardSize,
        excluded: &HashSet<LayoutId, S>,
    ) -> GeneratedBoard
    where
        S: BuildHasher,
    {
        self.generate_with_seed(size, BoardSeed::random(), excluded)
    }

    /// Generates a board deterministically from `seed`, avoiding `excluded` layouts.
    ///
    /// Each attempt shuffles the goal permutation and accepts the result if it is
    /// solvable, not already solved, and not excluded. When the attempt ceiling is
    /// reached the goal board is returned with [`GeneratedBoard::fallback`] set.
    #[must_use]
    pub fn generate_with_seed<S>(
        &self,
        size: BoardSize,
        seed: BoardSeed,
        excluded: &HashSet<LayoutId, S>,
    ) -> GeneratedBoard
    where
        S: BuildHasher,
    {
        let goal = Board::goal(size);
        let mut rng = seed.rng();

        for attempts in 1..=self.max_attempts {
            let mut tiles = goal.tiles().to_vec();
            fisher_yates(&mut tiles, &mut rng);
            let Ok(board) = Board::new(size, tiles) else {
                continue;
            };
            if board.is_solved() || !is_solvable(&board) {
                continue;
            }
            if excluded.contains(&board.layout_id()) {
                continue;
            }
            return GeneratedBoard {
                board,
                seed,
                attempts,
                fallback: false,
            };
        }

        log::warn!(
            "no fresh solvable {size} layout after {} attempts (seed {seed}, {} excluded); using the goal board",
            self.max_attempts,
            excluded.len(),
        );
        GeneratedBoard {
            board: goal,
            seed,
            attempts: self.max_attempts,
            fallback: true,
        }
    }
}

/// Returns a fresh solvable board of `size` whose layout is not in `excluded`.
///
/// Shorthand for [`BoardGenerator::generate_excluding`] with default settings.
#[must_use]
pub fn new_solvable_board<S>(size: BoardSize, excluded: &HashSet<LayoutId, S>) -> Board
where
    S: BuildHasher,
{
    BoardGenerator::new()
        .generate_excluding(size, excluded)
        .board
}

fn fisher_yates(tiles: &mut [u8], rng: &mut Pcg64) {
    for i in (1..tiles.len()).rev() {
        let j = rng.random_range(0..=i);
        tiles.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use tilerush_core::count_inversions;

    use super::*;

    const SIZES: [BoardSize; 3] = [BoardSize::THREE, BoardSize::FOUR, BoardSize::FIVE];

    fn assert_permutation(board: &Board) {
        let mut tiles = board.tiles().to_vec();
        tiles.sort_unstable();
        let expected: Vec<u8> = (0..=u8::try_from(board.cells() - 1).unwrap()).collect();
        assert_eq!(tiles, expected);
    }

    #[test]
    fn test_generated_boards_are_valid() {
        let generator = BoardGenerator::new();
        for size in SIZES {
            let mut layouts = HashSet::new();
            for _ in 0..12 {
                let generated = generator.generate(size);
                let board = &generated.board;
                assert_eq!(board.size(), size);
                assert_permutation(board);
                assert!(is_solvable(board), "{board}\ninversions={}", count_inversions(board));
                assert!(!board.is_solved());
                assert!(!generated.fallback);
                layouts.insert(board.layout_id());
            }
            assert!(layouts.len() > 1, "{size} boards were all identical");
        }
    }

    #[test]
    fn test_excluded_layouts_are_not_repeated() {
        let generator = BoardGenerator::new();
        let mut excluded = HashSet::new();
        for _ in 0..20 {
            let generated = generator.generate_excluding(BoardSize::THREE, &excluded);
            assert!(excluded.insert(generated.board.layout_id()));
        }
    }

    #[test]
    fn test_exhausted_layouts_fall_back_to_goal() {
        // A 2x2 board has 11 solvable layouts besides the goal.
        let generator = BoardGenerator::new();
        let mut excluded = HashSet::new();
        loop {
            let generated = generator.generate_excluding(BoardSize::new(2).unwrap(), &excluded);
            if generated.fallback {
                assert!(generated.board.is_solved());
                assert_eq!(generated.attempts, DEFAULT_MAX_ATTEMPTS);
                break;
            }
            assert!(excluded.insert(generated.board.layout_id()));
        }
        assert_eq!(excluded.len(), 11);
    }

    #[test]
    fn test_attempt_ceiling_is_respected() {
        let generator = BoardGenerator::new().with_max_attempts(0);
        assert_eq!(generator.max_attempts(), 1);
    }

    proptest! {
        #[test]
        fn prop_seed_reproduces_board(bytes in any::<[u8; 32]>(), n in 3u8..=5) {
            let size = BoardSize::new(n).unwrap();
            let seed = BoardSeed::from(bytes);
            let generator = BoardGenerator::new();
            let a = generator.generate_with_seed(size, seed, &HashSet::new());
            let b = generator.generate_with_seed(size, seed, &HashSet::new());
            prop_assert_eq!(&a, &b);
            prop_assert!(is_solvable(&a.board));
            prop_assert!(!a.board.is_solved());
        }
    }
}
