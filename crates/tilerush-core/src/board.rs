//! The immutable board value.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tinyvec::ArrayVec;

use crate::{BoardError, BoardSize, LayoutId, Position, are_adjacent, position_of};

/// Board indices the blank moves to, applied in order.
///
/// Each entry names the tile position (in the board state at that step) that the
/// blank is swapped with.
pub type MoveSequence = Vec<usize>;

/// Orthogonal neighbour indices of a cell, in up, down, left, right order.
pub type Neighbors = ArrayVec<[usize; 4]>;

/// A sliding-tile board: a permutation of `0..size*size` in row-major order.
///
/// The value `0` is the blank. Boards are immutable: [`Board::swap`],
/// [`Board::slide`] and [`Board::apply_moves`] return new boards.
///
/// # Examples
///
/// ```
/// use tilerush_core::{Board, BoardSize};
///
/// let board: Board = "1,2,3,4,5,6,7,0,8".parse()?;
/// assert_eq!(board.size(), BoardSize::THREE);
/// assert_eq!(board.blank_index(), 7);
/// assert!(!board.is_solved());
///
/// let solved = board.apply_moves(&[8])?;
/// assert_eq!(solved, Board::goal(BoardSize::THREE));
/// # Ok::<(), tilerush_core::BoardError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Board {
    size: BoardSize,
    tiles: Vec<u8>,
    blank: usize,
}

impl Board {
    /// Creates a board from tiles, checking the length and the permutation invariant.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::WrongLength`] if `tiles.len() != size * size`, or
    /// [`BoardError::NotPermutation`] if a tile is out of range or repeated.
    pub fn new(size: BoardSize, tiles: Vec<u8>) -> Result<Self, BoardError> {
        let cells = size.cells();
        if tiles.len() != cells {
            return Err(BoardError::WrongLength {
                expected: cells,
                actual: tiles.len(),
            });
        }

        let mut seen = vec![false; cells];
        for &tile in &tiles {
            let tile = usize::from(tile);
            if tile >= cells || seen[tile] {
                return Err(BoardError::NotPermutation { cells });
            }
            seen[tile] = true;
        }

        let blank = tiles
            .iter()
            .position(|&tile| tile == 0)
            .ok_or(BoardError::NotPermutation { cells })?;

        Ok(Self { size, tiles, blank })
    }

    /// Creates a board, inferring the size from the tile count.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnsupportedSize`] if the tile count is not the square of
    /// a supported size, or any error from [`Board::new`].
    pub fn from_tiles(tiles: Vec<u8>) -> Result<Self, BoardError> {
        let size = BoardSize::from_cells(tiles.len())?;
        Self::new(size, tiles)
    }

    /// Returns the solved board: `1, 2, ..., size*size - 1` followed by the blank.
    #[must_use]
    pub fn goal(size: BoardSize) -> Self {
        let cells = size.cells();
        #[expect(clippy::cast_possible_truncation)]
        let tiles = (1..cells)
            .map(|tile| tile as u8)
            .chain(std::iter::once(0))
            .collect();
        Self {
            size,
            tiles,
            blank: cells - 1,
        }
    }

    /// Returns the board size.
    #[must_use]
    #[inline]
    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// Returns the number of cells.
    #[must_use]
    #[inline]
    pub fn cells(&self) -> usize {
        self.tiles.len()
    }

    /// Returns the tiles in row-major order.
    #[must_use]
    #[inline]
    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    /// Consumes the board and returns its tiles.
    #[must_use]
    pub fn into_tiles(self) -> Vec<u8> {
        self.tiles
    }

    /// Returns the tile at `index`, or `None` if out of range.
    #[must_use]
    #[inline]
    pub fn tile(&self, index: usize) -> Option<u8> {
        self.tiles.get(index).copied()
    }

    /// Returns the index of the blank.
    #[must_use]
    #[inline]
    pub fn blank_index(&self) -> usize {
        self.blank
    }

    /// Returns the index holding `tile`, or `None` if the tile is not on the board.
    #[must_use]
    pub fn index_of(&self, tile: u8) -> Option<usize> {
        self.tiles.iter().position(|&t| t == tile)
    }

    /// Returns the position of `index` on this board.
    #[must_use]
    #[inline]
    pub fn position(&self, index: usize) -> Position {
        position_of(index, self.size)
    }

    /// Returns the canonical identity of this layout.
    #[must_use]
    pub fn layout_id(&self) -> LayoutId {
        LayoutId::from(self)
    }

    /// Returns `true` if the board is in the goal arrangement.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        let last = self.tiles.len() - 1;
        self.blank == last
            && self.tiles[..last]
                .iter()
                .enumerate()
                .all(|(i, &tile)| usize::from(tile) == i + 1)
    }

    /// Returns the orthogonal neighbours of `index` (up, down, left, right).
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn neighbors(&self, index: usize) -> Neighbors {
        assert!(index < self.cells());
        let edge = self.size.edge();
        let Position { row, col } = self.position(index);
        let mut neighbors = Neighbors::new();
        if row > 0 {
            neighbors.push(index - edge);
        }
        if row + 1 < edge {
            neighbors.push(index + edge);
        }
        if col > 0 {
            neighbors.push(index - 1);
        }
        if col + 1 < edge {
            neighbors.push(index + 1);
        }
        neighbors
    }

    /// Returns the indices that can slide into the blank.
    #[must_use]
    #[inline]
    pub fn blank_neighbors(&self) -> Neighbors {
        self.neighbors(self.blank)
    }

    /// Returns `true` if the tile at `index` can slide into the blank.
    #[must_use]
    #[inline]
    pub fn can_slide(&self, index: usize) -> bool {
        index < self.cells() && are_adjacent(index, self.blank, self.size)
    }

    /// Returns a new board with positions `i` and `j` exchanged.
    ///
    /// Only range checks are performed; callers are expected to pass the blank and
    /// one of its neighbours.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::IndexOutOfRange`] if either index is outside the board.
    pub fn swap(&self, i: usize, j: usize) -> Result<Self, BoardError> {
        let cells = self.cells();
        for index in [i, j] {
            if index >= cells {
                return Err(BoardError::IndexOutOfRange { index, cells });
            }
        }

        let mut tiles = self.tiles.clone();
        tiles.swap(i, j);
        let blank = if self.blank == i {
            j
        } else if self.blank == j {
            i
        } else {
            self.blank
        };
        Ok(Self {
            size: self.size,
            tiles,
            blank,
        })
    }

    /// Slides the tile at `index` into the blank.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::IndexOutOfRange`] if `index` is outside the board, or
    /// [`BoardError::NotAdjacent`] if the tile does not touch the blank.
    pub fn slide(&self, index: usize) -> Result<Self, BoardError> {
        if index >= self.cells() {
            return Err(BoardError::IndexOutOfRange {
                index,
                cells: self.cells(),
            });
        }
        if !are_adjacent(index, self.blank, self.size) {
            return Err(BoardError::NotAdjacent {
                index,
                blank: self.blank,
            });
        }
        self.swap(self.blank, index)
    }

    /// Applies a move sequence, sliding each named tile in turn.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by [`Board::slide`].
    pub fn apply_moves(&self, moves: &[usize]) -> Result<Self, BoardError> {
        moves
            .iter()
            .try_fold(self.clone(), |board, &index| board.slide(index))
    }

    /// Returns the goal index of `tile` (the blank belongs in the last cell).
    #[must_use]
    #[inline]
    pub fn goal_index(&self, tile: u8) -> usize {
        if tile == 0 {
            self.cells() - 1
        } else {
            usize::from(tile) - 1
        }
    }

    /// Returns `true` if the tile at `index` is not a blank and not at its goal cell.
    #[must_use]
    pub fn is_misplaced(&self, index: usize) -> bool {
        match self.tile(index) {
            Some(0) | None => false,
            Some(tile) => self.goal_index(tile) != index,
        }
    }

    /// Returns the number of non-blank tiles away from their goal cell.
    #[must_use]
    pub fn misplaced_tiles(&self) -> usize {
        (0..self.cells()).filter(|&i| self.is_misplaced(i)).count()
    }

    /// Returns the Manhattan distance of the tile at `index` from its goal cell.
    ///
    /// The blank always reports `0`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn tile_distance(&self, index: usize) -> usize {
        let tile = self.tiles[index];
        if tile == 0 {
            return 0;
        }
        self.position(index)
            .manhattan(self.position(self.goal_index(tile)))
    }

    /// Returns the sum of Manhattan distances of all non-blank tiles.
    ///
    /// This is a lower bound on the number of moves needed to solve the board.
    #[must_use]
    pub fn manhattan_distance(&self) -> usize {
        (0..self.cells()).map(|i| self.tile_distance(i)).sum()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.cells() - 1).to_string().len();
        for (row, chunk) in self.tiles.chunks(self.size.edge()).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for (col, &tile) in chunk.iter().enumerate() {
                if col > 0 {
                    write!(f, " ")?;
                }
                if tile == 0 {
                    write!(f, "{:>width$}", ".")?;
                } else {
                    write!(f, "{tile:>width$}")?;
                }
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parses the [`LayoutId`] format: tile values joined with `,`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || BoardError::MalformedLayout {
            layout: s.to_owned(),
        };
        let tiles = s
            .split(LayoutId::SEPARATOR)
            .map(|part| part.trim().parse::<u8>().map_err(|_| malformed()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_tiles(tiles)
    }
}

impl TryFrom<Vec<u8>> for Board {
    type Error = BoardError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_tiles(value)
    }
}

impl From<Board> for Vec<u8> {
    fn from(value: Board) -> Self {
        value.tiles
    }
}
