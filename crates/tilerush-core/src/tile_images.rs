//! Per-tile image lookup for picture puzzles.

use crate::{BoardError, BoardSize};

/// Images for each numbered tile of a picture puzzle, looked up by tile value.
///
/// The blank (`0`) never has an image. Slicing the source picture is up to the
/// caller; this type only enforces that one image exists per numbered tile.
///
/// # Examples
///
/// ```
/// use tilerush_core::{BoardSize, TileImages};
///
/// let names = (1..9).map(|t| format!("tile-{t}.png")).collect();
/// let images = TileImages::new(BoardSize::THREE, names)?;
/// assert_eq!(images.get(3).map(String::as_str), Some("tile-3.png"));
/// assert_eq!(images.get(0), None);
/// # Ok::<(), tilerush_core::BoardError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileImages<T> {
    size: BoardSize,
    images: Vec<T>,
}

impl<T> TileImages<T> {
    /// Wraps images for tiles `1..size*size`, in tile order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::WrongLength`] unless exactly `size*size - 1` images are given.
    pub fn new(size: BoardSize, images: Vec<T>) -> Result<Self, BoardError> {
        let expected = size.cells() - 1;
        if images.len() != expected {
            return Err(BoardError::WrongLength {
                expected,
                actual: images.len(),
            });
        }
        Ok(Self { size, images })
    }

    /// Returns the board size these images were cut for.
    #[must_use]
    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// Returns the image for `tile`, or `None` for the blank or an unknown tile.
    #[must_use]
    pub fn get(&self, tile: u8) -> Option<&T> {
        usize::from(tile)
            .checked_sub(1)
            .and_then(|i| self.images.get(i))
    }
}
