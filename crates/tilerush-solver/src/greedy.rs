use tilerush_core::{Board, Position};

/// Picks a locally good move for boards the optimal solver does not cover.
///
/// Among the tiles next to the blank, chooses the one that lands closest (in
/// Manhattan distance) to its goal cell once slid into the blank, preferring the
/// larger improvement on ties and then neighbor order. `avoid` (typically the
/// cell the blank just left) is skipped unless it is the only candidate.
///
/// Returns `None` only if the blank has no neighbors.
///
/// # Examples
///
/// ```
/// use tilerush_core::Board;
/// use tilerush_solver::greedy_move;
///
/// let board: Board = "1,2,3,4,5,6,7,8,0,9,10,11,12,13,14,15".parse()?;
/// // Tile 9 belongs exactly where the blank is.
/// assert_eq!(greedy_move(&board, None), Some(9));
/// // Without it, tile 5 lands one step from home.
/// assert_eq!(greedy_move(&board, Some(9)), Some(4));
/// # Ok::<(), tilerush_core::BoardError>(())
/// ```
#[must_use]
pub fn greedy_move(board: &Board, avoid: Option<usize>) -> Option<usize> {
    let size = board.size();
    let blank = board.blank_index();
    let blank_pos = Position::from_index(blank, size);

    let candidates = board.blank_neighbors();
    let pool: Vec<usize> = candidates
        .iter()
        .copied()
        .filter(|&index| Some(index) != avoid)
        .collect();
    let pool = if pool.is_empty() {
        candidates.to_vec()
    } else {
        pool
    };

    pool.into_iter().min_by_key(|&index| {
        let tile = board.tiles()[index];
        let goal = Position::from_index(board.goal_index(tile), size);
        let after = blank_pos.manhattan(goal);
        let before = board.tile_distance(index);
        // Smaller distance first, then larger gain.
        (after, std::cmp::Reverse(before))
    })
}
