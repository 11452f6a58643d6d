use crate::error::ConfigError;
use crate::input::Direction;

/// Row-major index of one cell on the square grid.
pub type TileIndex = usize;

/// Smallest grid that still leaves an interior tile inside the wall ring.
pub const MIN_GRID_SIZE: u16 = 3;

/// Square board geometry for one session.
///
/// Tiles are addressed by a single index in `[0, size²)`. Coordinates are
/// derived on demand and never stored.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Board {
    size: u16,
}

impl Board {
    /// Creates a board, rejecting grids too small to have an interior.
    pub fn new(size: u16) -> Result<Self, ConfigError> {
        if size < MIN_GRID_SIZE {
            return Err(ConfigError::GridTooSmall {
                min: MIN_GRID_SIZE,
                actual: size,
            });
        }
        Ok(Self { size })
    }

    /// Returns the side length of the grid.
    #[must_use]
    pub fn size(self) -> u16 {
        self.size
    }

    /// Returns the total number of tiles.
    #[must_use]
    pub fn tile_count(self) -> usize {
        usize::from(self.size) * usize::from(self.size)
    }

    /// Iterates over every tile index in row-major order.
    pub fn tiles(self) -> impl Iterator<Item = TileIndex> {
        0..self.tile_count()
    }

    /// Column of `index`.
    #[must_use]
    pub fn to_x(self, index: TileIndex) -> usize {
        index % usize::from(self.size)
    }

    /// Row of `index`.
    #[must_use]
    pub fn to_y(self, index: TileIndex) -> usize {
        index / usize::from(self.size)
    }

    /// Returns true when `index` lies on the outer ring of the grid.
    #[must_use]
    pub fn is_wall(self, index: TileIndex) -> bool {
        let last = usize::from(self.size) - 1;
        let (x, y) = (self.to_x(index), self.to_y(index));
        x == 0 || y == 0 || x == last || y == last
    }

    /// Returns the neighbouring tile in `direction`, or `None` off the grid.
    #[must_use]
    pub fn step(self, index: TileIndex, direction: Direction) -> Option<TileIndex> {
        if index >= self.tile_count() {
            return None;
        }

        let size = usize::from(self.size);
        let last = size - 1;
        match direction {
            Direction::Up => index.checked_sub(size),
            Direction::Down => Some(index + size).filter(|next| *next < self.tile_count()),
            Direction::Left => (self.to_x(index) > 0).then(|| index - 1),
            Direction::Right => (self.to_x(index) < last).then(|| index + 1),
        }
    }
}
