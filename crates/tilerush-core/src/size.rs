//! Validated board edge length.

use std::fmt;

use crate::BoardError;

/// Edge length of a square board.
///
/// A `BoardSize` is always within [`BoardSize::MIN`]..=[`BoardSize::MAX`], so boards
/// built from it never need to re-check their dimensions.
///
/// # Examples
///
/// ```
/// use tilerush_core::BoardSize;
///
/// let size = BoardSize::new(4)?;
/// assert_eq!(size.cells(), 16);
/// assert!(BoardSize::new(1).is_err());
/// # Ok::<(), tilerush_core::BoardError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BoardSize(u8);

impl BoardSize {
    /// Smallest supported edge length.
    pub const MIN: u8 = 2;
    /// Largest supported edge length.
    pub const MAX: u8 = 8;

    /// The classic 8-puzzle.
    pub const THREE: Self = Self(3);
    /// The classic 15-puzzle.
    pub const FOUR: Self = Self(4);
    /// The 24-puzzle.
    pub const FIVE: Self = Self(5);

    /// Creates a size from an edge length.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnsupportedSize`] if `size` is outside the supported range.
    pub fn new(size: u8) -> Result<Self, BoardError> {
        if (Self::MIN..=Self::MAX).contains(&size) {
            Ok(Self(size))
        } else {
            Err(BoardError::UnsupportedSize {
                size: usize::from(size),
                min: Self::MIN,
                max: Self::MAX,
            })
        }
    }

    /// Infers the size from a tile count, which must be a perfect square.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnsupportedSize`] if `cells` is not the square of a
    /// supported edge length.
    pub fn from_cells(cells: usize) -> Result<Self, BoardError> {
        (Self::MIN..=Self::MAX)
            .find(|&n| usize::from(n) * usize::from(n) == cells)
            .map(Self)
            .ok_or(BoardError::UnsupportedSize {
                size: cells,
                min: Self::MIN,
                max: Self::MAX,
            })
    }

    /// Returns the edge length.
    #[must_use]
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Returns the edge length as `usize`.
    #[must_use]
    #[inline]
    pub const fn edge(self) -> usize {
        self.0 as usize
    }

    /// Returns the number of cells (`size * size`).
    #[must_use]
    #[inline]
    pub const fn cells(self) -> usize {
        self.edge() * self.edge()
    }

    /// Returns `true` for odd edge lengths, which use the simpler parity rule.
    #[must_use]
    #[inline]
    pub const fn is_odd(self) -> bool {
        self.0 % 2 == 1
    }
}

impl fmt::Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{0}x{0}", self.0)
    }
}

impl TryFrom<u8> for BoardSize {
    type Error = BoardError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BoardSize> for u8 {
    fn from(value: BoardSize) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(BoardSize::new(1).is_err());
        assert!(BoardSize::new(9).is_err());
        assert_eq!(BoardSize::new(3), Ok(BoardSize::THREE));
    }

    #[test]
    fn test_from_cells() {
        assert_eq!(BoardSize::from_cells(9), Ok(BoardSize::THREE));
        assert_eq!(BoardSize::from_cells(25), Ok(BoardSize::FIVE));
        assert!(BoardSize::from_cells(10).is_err());
        assert!(BoardSize::from_cells(1).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(BoardSize::FOUR.to_string(), "4x4");
    }
}
