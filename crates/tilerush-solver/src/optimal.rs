use std::collections::{HashMap, HashSet, VecDeque};

use tilerush_core::{Board, BoardSize, LayoutId, MoveSequence};

/// How a board was first reached during the search.
#[derive(Debug, Clone, Copy)]
struct Predecessor {
    /// Index the blank moved to.
    moved_to: usize,
    /// Blank index in the predecessor board.
    blank_from: usize,
}

/// Breadth-first shortest-path solver for the 8-puzzle.
///
/// Nodes are boards, edges are single blank moves, and the goal is
/// [`Board::goal`]. Because every edge has the same cost, the first time the search
/// dequeues the goal it has found a minimal move sequence.
///
/// Only [`OptimalSolver::SUPPORTED_SIZE`] is searched; the state space of larger
/// boards is far too big for exhaustive search, and those boards return an empty
/// sequence.
///
/// # Examples
///
/// ```
/// use tilerush_core::{Board, BoardSize};
/// use tilerush_solver::OptimalSolver;
///
/// let solver = OptimalSolver::new();
/// let start: Board = "1,0,3,4,2,5,7,8,6".parse()?;
/// assert_eq!(solver.distance(&start), Some(3));
/// assert_eq!(solver.next_move(&start), Some(4));
///
/// // Unsupported sizes are a declared limitation, not an error.
/// assert!(solver.solve(&Board::goal(BoardSize::FOUR).slide(14)?).is_empty());
/// # Ok::<(), tilerush_core::BoardError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct OptimalSolver {}

impl OptimalSolver {
    /// The only board size the solver searches.
    pub const SUPPORTED_SIZE: BoardSize = BoardSize::THREE;

    /// Creates a solver.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    /// Returns `true` if boards of `size` can be solved optimally.
    #[must_use]
    pub fn supports(size: BoardSize) -> bool {
        size == Self::SUPPORTED_SIZE
    }

    /// Returns a minimal move sequence from `start` to the goal.
    ///
    /// The sequence is empty when `start` is already solved, when its size is not
    /// supported, or when the goal is unreachable (an unsolvable board).
    #[must_use]
    pub fn solve(&self, start: &Board) -> MoveSequence {
        if !Self::supports(start.size()) {
            log::debug!("optimal solving is not available for {} boards", start.size());
            return MoveSequence::new();
        }
        if start.is_solved() {
            return MoveSequence::new();
        }

        let mut visited = HashSet::from([start.layout_id()]);
        let mut predecessors: HashMap<LayoutId, Predecessor> = HashMap::new();
        let mut queue = VecDeque::from([start.clone()]);

        while let Some(current) = queue.pop_front() {
            if current.is_solved() {
                return reconstruct(current, &predecessors);
            }

            let blank = current.blank_index();
            for index in current.blank_neighbors() {
                let Ok(next) = current.swap(blank, index) else {
                    continue;
                };
                let id = next.layout_id();
                if visited.contains(&id) {
                    continue;
                }
                visited.insert(id.clone());
                predecessors.insert(
                    id,
                    Predecessor {
                        moved_to: index,
                        blank_from: blank,
                    },
                );
                queue.push_back(next);
            }
        }

        log::warn!(
            "no path to the goal from {} after visiting {} layouts",
            start.layout_id(),
            visited.len(),
        );
        MoveSequence::new()
    }

    /// Returns the first move of an optimal solution, or `None` if there is none.
    #[must_use]
    pub fn next_move(&self, board: &Board) -> Option<usize> {
        self.solve(board).first().copied()
    }

    /// Returns the optimal number of moves to the goal.
    ///
    /// Returns `None` for unsupported sizes and unreachable boards.
    #[must_use]
    pub fn distance(&self, board: &Board) -> Option<usize> {
        if !Self::supports(board.size()) {
            return None;
        }
        if board.is_solved() {
            return Some(0);
        }
        let moves = self.solve(board);
        (!moves.is_empty()).then_some(moves.len())
    }
}

fn reconstruct(goal: Board, predecessors: &HashMap<LayoutId, Predecessor>) -> MoveSequence {
    let mut moves = MoveSequence::new();
    let mut board = goal;
    while let Some(step) = predecessors.get(&board.layout_id()) {
        moves.push(step.moved_to);
        let Ok(previous) = board.swap(step.moved_to, step.blank_from) else {
            break;
        };
        board = previous;
    }
    moves.reverse();
    moves
}

/// Computes the optimal move sequence for the bot opponent.
///
/// Shorthand for [`OptimalSolver::solve`].
#[must_use]
pub fn compute_bot_moves(board: &Board) -> MoveSequence {
    OptimalSolver::new().solve(board)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    fn assert_solves(start: &str, expected_len: usize) {
        let start = board(start);
        let moves = compute_bot_moves(&start);
        assert_eq!(moves.len(), expected_len, "moves: {moves:?}");
        let end = start.apply_moves(&moves).unwrap();
        assert_eq!(end.tiles(), &[1, 2, 3, 4, 5, 6, 7, 8, 0]);
    }

    #[test]
    fn test_one_move_from_goal() {
        assert_solves("1,2,3,4,5,6,7,0,8", 1);
    }

    #[test]
    fn test_two_moves_from_goal() {
        assert_solves("1,2,3,4,5,6,0,7,8", 2);
    }

    #[test]
    fn test_three_moves_from_goal() {
        assert_solves("1,0,3,4,2,5,7,8,6", 3);
    }

    #[test]
    fn test_deeper_board_is_minimal() {
        // Manhattan distance is a lower bound; this layout reaches it.
        let start = board("4,1,3,7,2,6,0,5,8");
        let moves = compute_bot_moves(&start);
        assert_eq!(moves.len(), start.manhattan_distance());
        assert!(start.apply_moves(&moves).unwrap().is_solved());
    }

    #[test]
    fn test_solved_board_yields_empty_sequence() {
        assert!(compute_bot_moves(&board("1,2,3,4,5,6,7,8,0")).is_empty());
        assert_eq!(OptimalSolver::new().distance(&board("1,2,3,4,5,6,7,8,0")), Some(0));
    }

    #[test]
    fn test_unsupported_sizes_yield_empty_sequence() {
        let four = board("1,2,3,4,5,6,7,8,0,9,10,11,12,13,14,15");
        assert!(compute_bot_moves(&four).is_empty());
        assert_eq!(OptimalSolver::new().distance(&four), None);
        let two = board("1,2,0,3");
        assert!(compute_bot_moves(&two).is_empty());
    }

    #[test]
    fn test_unsolvable_board_yields_empty_sequence() {
        let start = board("2,1,3,4,5,6,7,8,0");
        assert!(compute_bot_moves(&start).is_empty());
        assert_eq!(OptimalSolver::new().distance(&start), None);
    }
}
