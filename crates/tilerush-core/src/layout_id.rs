//! Canonical string identity of a board layout.

use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

use crate::Board;

/// Canonical identity of a board: tile values joined with [`LayoutId::SEPARATOR`].
///
/// Two boards are identical iff their layout ids are equal. Layout ids are used as
/// deduplication keys, for example to avoid serving a layout that was already
/// completed, and as visited-set keys during search.
///
/// # Examples
///
/// ```
/// use tilerush_core::{Board, BoardSize, LayoutId};
///
/// let id = Board::goal(BoardSize::THREE).layout_id();
/// assert_eq!(id.as_str(), "1,2,3,4,5,6,7,8,0");
/// assert_eq!(id.to_board()?, Board::goal(BoardSize::THREE));
/// # Ok::<(), tilerush_core::BoardError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutId(String);

impl LayoutId {
    /// Separator placed between tile values.
    pub const SEPARATOR: char = ',';

    /// Returns the id as a string slice.
    #[must_use]
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the id back into a board.
    ///
    /// # Errors
    ///
    /// Returns an error if the id does not describe a valid board.
    pub fn to_board(&self) -> Result<Board, crate::BoardError> {
        self.0.parse()
    }
}

impl From<&Board> for LayoutId {
    fn from(board: &Board) -> Self {
        let mut id = String::with_capacity(board.cells() * 3);
        for (i, tile) in board.tiles().iter().enumerate() {
            if i > 0 {
                id.push(Self::SEPARATOR);
            }
            id.push_str(&tile.to_string());
        }
        Self(id)
    }
}

impl fmt::Display for LayoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for LayoutId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::BoardSize;

    #[test]
    fn test_equal_boards_share_ids() {
        let a = Board::goal(BoardSize::FOUR);
        let b = Board::goal(BoardSize::FOUR).slide(14).unwrap().slide(15).unwrap();
        assert_eq!(a.layout_id(), b.layout_id());
        assert_ne!(a.layout_id(), a.slide(14).unwrap().layout_id());
    }

    #[test]
    fn test_multi_digit_tiles_are_unambiguous() {
        let id = Board::goal(BoardSize::FOUR).layout_id();
        assert_eq!(id.as_str(), "1,2,3,4,5,6,7,8,9,10,11,12,13,14,15,0");
    }

    #[test]
    fn test_lookup_by_str() {
        let mut set = HashSet::new();
        set.insert(Board::goal(BoardSize::THREE).layout_id());
        assert!(set.contains("1,2,3,4,5,6,7,8,0"));
    }
}
