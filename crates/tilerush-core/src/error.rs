//! Errors produced when constructing or transforming boards.

/// Errors returned by [`Board`](crate::Board) and [`BoardSize`](crate::BoardSize) operations.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    /// The requested edge length is outside the supported range.
    #[display("unsupported board size {size} (expected {min}..={max})")]
    UnsupportedSize {
        /// Requested edge length.
        size: usize,
        /// Smallest supported edge length.
        min: u8,
        /// Largest supported edge length.
        max: u8,
    },
    /// The tile count does not match `size * size`.
    #[display("expected {expected} tiles, found {actual}")]
    WrongLength {
        /// Expected tile count.
        expected: usize,
        /// Actual tile count.
        actual: usize,
    },
    /// The tiles are not a permutation of `0..cells`.
    #[display("tiles are not a permutation of 0..{cells}")]
    NotPermutation {
        /// Number of cells on the board.
        cells: usize,
    },
    /// A board index is outside the board.
    #[display("index {index} is out of range for a board of {cells} cells")]
    IndexOutOfRange {
        /// Offending index.
        index: usize,
        /// Number of cells on the board.
        cells: usize,
    },
    /// The tapped tile cannot slide because it does not touch the blank.
    #[display("tile at index {index} is not adjacent to the blank at {blank}")]
    NotAdjacent {
        /// Tapped index.
        index: usize,
        /// Current blank index.
        blank: usize,
    },
    /// A layout string could not be parsed into tiles.
    #[display("malformed layout {layout:?}")]
    MalformedLayout {
        /// The rejected input.
        layout: String,
    },
}
