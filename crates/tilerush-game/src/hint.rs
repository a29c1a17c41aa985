//! Hint selection.

use tilerush_core::Board;

/// Picks the tile to highlight as the next hint.
///
/// Candidates are the blank's neighbors. `previous` (the last hinted index) is
/// dropped from the candidates unless it is the only one, so the same tile is not
/// hinted twice in a row when there is an alternative. Among the candidates, the
/// lowest-numbered misplaced tile wins; if every candidate is in place, the first
/// candidate (in up, down, left, right order) is returned.
///
/// Returns `None` only if the blank has no neighbors.
///
/// # Examples
///
/// ```
/// use tilerush_core::Board;
/// use tilerush_game::next_hint;
///
/// // 1 2 3
/// // 4 . 6
/// // 7 5 8
/// let board: Board = "1,2,3,4,0,6,7,5,8".parse()?;
/// let first = next_hint(&board, None);
/// assert_eq!(first, Some(7)); // tile 5 is the only misplaced neighbor
/// let second = next_hint(&board, first);
/// assert_eq!(second, Some(1)); // nothing else is misplaced; first remaining neighbor
/// # Ok::<(), tilerush_core::BoardError>(())
/// ```
#[must_use]
pub fn next_hint(board: &Board, previous: Option<usize>) -> Option<usize> {
    let neighbors = board.blank_neighbors();
    if neighbors.is_empty() {
        return None;
    }

    let filtered: Vec<usize> = neighbors
        .iter()
        .copied()
        .filter(|&index| Some(index) != previous)
        .collect();
    let candidates: &[usize] = if filtered.is_empty() {
        &neighbors
    } else {
        &filtered
    };

    let max_tile = u8::try_from(board.cells() - 1).unwrap_or(u8::MAX);
    (1..=max_tile)
        .filter_map(|tile| board.index_of(tile))
        .find(|&index| board.is_misplaced(index) && candidates.contains(&index))
        .or_else(|| candidates.first().copied())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use tilerush_core::BoardSize;
    use tilerush_generator::{BoardSeed, scramble_walk};

    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_prefers_lowest_misplaced_tile() {
        // 2 .      tile 2 (index 0) and tile 1 (index 3) are both neighbors.
        // 3 1
        let b = board("2,0,3,1");
        assert_eq!(next_hint(&b, None), Some(3));
    }

    #[test]
    fn test_previous_hint_is_skipped() {
        let b = board("2,0,3,1");
        assert_eq!(next_hint(&b, Some(3)), Some(0));
    }

    #[test]
    fn test_previous_hint_is_kept_when_it_is_the_only_candidate() {
        // Both neighbors are in place; the first remaining candidate is used.
        let b = board("1,2,3,0");
        let first = next_hint(&b, None).unwrap();
        let second = next_hint(&b, Some(first)).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_hint_is_always_a_blank_neighbor() {
        let b = Board::goal(BoardSize::FOUR);
        let hint = next_hint(&b, None).unwrap();
        assert!(b.can_slide(hint));
    }

    proptest! {
        #[test]
        fn prop_consecutive_hints_differ(bytes in any::<[u8; 32]>(), steps in 1usize..60, n in 3u8..=5) {
            let b = scramble_walk(BoardSize::new(n).unwrap(), steps, BoardSeed::from(bytes));
            let first = next_hint(&b, None).unwrap();
            prop_assert!(b.can_slide(first));
            // Every blank has at least two neighbors on boards of size 2 or more.
            let second = next_hint(&b, Some(first)).unwrap();
            prop_assert_ne!(first, second);
            prop_assert!(b.can_slide(second));
        }
    }
}
