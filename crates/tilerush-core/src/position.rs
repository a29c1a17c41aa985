//! Row/column coordinates derived from board indices.

use crate::BoardSize;

/// A cell coordinate on a board, derived from a row-major index.
///
/// Positions are never stored on a board; they are computed on demand from an
/// index and the board size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Row, counted from the top (0-based).
    pub row: usize,
    /// Column, counted from the left (0-based).
    pub col: usize,
}

impl Position {
    /// Creates a position from row and column.
    #[must_use]
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Converts a row-major index into a position.
    #[must_use]
    #[inline]
    pub const fn from_index(index: usize, size: BoardSize) -> Self {
        Self {
            row: index / size.edge(),
            col: index % size.edge(),
        }
    }

    /// Converts the position back into a row-major index.
    #[must_use]
    #[inline]
    pub const fn index(self, size: BoardSize) -> usize {
        self.row * size.edge() + self.col
    }

    /// Returns the Manhattan distance to `other`.
    #[must_use]
    #[inline]
    pub const fn manhattan(self, other: Self) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

/// Returns the position of `index` on a board of the given size.
///
/// # Examples
///
/// ```
/// use tilerush_core::{BoardSize, Position, position_of};
///
/// assert_eq!(position_of(5, BoardSize::THREE), Position::new(1, 2));
/// ```
#[must_use]
#[inline]
pub const fn position_of(index: usize, size: BoardSize) -> Position {
    Position::from_index(index, size)
}

/// Returns `true` if `i` and `j` are orthogonal neighbours (Manhattan distance 1).
///
/// Indices at the end of one row and the start of the next are not adjacent.
///
/// # Examples
///
/// ```
/// use tilerush_core::{BoardSize, are_adjacent};
///
/// assert!(are_adjacent(0, 1, BoardSize::THREE));
/// assert!(are_adjacent(1, 4, BoardSize::THREE));
/// assert!(!are_adjacent(2, 3, BoardSize::THREE));
/// assert!(!are_adjacent(4, 4, BoardSize::THREE));
/// ```
#[must_use]
#[inline]
pub const fn are_adjacent(i: usize, j: usize, size: BoardSize) -> bool {
    position_of(i, size).manhattan(position_of(j, size)) == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip() {
        let size = BoardSize::FOUR;
        for index in 0..size.cells() {
            assert_eq!(Position::from_index(index, size).index(size), index);
        }
    }

    #[test]
    fn test_adjacency_does_not_wrap_rows() {
        let size = BoardSize::FOUR;
        assert!(!are_adjacent(3, 4, size));
        assert!(are_adjacent(3, 7, size));
        assert!(!are_adjacent(0, 5, size));
    }
}
