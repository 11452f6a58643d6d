use std::collections::BTreeSet;

use rand::Rng;

use crate::board::{Board, TileIndex};
use crate::error::StateError;
use crate::input::Direction;

/// Ordered set of tile indices.
///
/// Ordering keeps random draws reproducible under a seeded generator.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct TileSet {
    tiles: BTreeSet<TileIndex>,
}

impl TileSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, tile: TileIndex) -> bool {
        self.tiles.contains(&tile)
    }

    /// Adds `tile`, returning false if it was already present.
    pub fn insert(&mut self, tile: TileIndex) -> bool {
        self.tiles.insert(tile)
    }

    /// Removes `tile`, returning false if it was absent.
    pub fn remove(&mut self, tile: TileIndex) -> bool {
        self.tiles.remove(&tile)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = TileIndex> + '_ {
        self.tiles.iter().copied()
    }

    /// Draws one member uniformly at random without removing it.
    #[must_use]
    pub fn pick_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<TileIndex> {
        if self.tiles.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..self.tiles.len());
        self.tiles.iter().nth(index).copied()
    }

    /// Removes one member chosen uniformly at random and returns it.
    pub fn take_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<TileIndex> {
        let tile = self.pick_random(rng)?;
        self.tiles.remove(&tile);
        Some(tile)
    }
}

impl FromIterator<TileIndex> for TileSet {
    fn from_iter<I: IntoIterator<Item = TileIndex>>(iter: I) -> Self {
        Self {
            tiles: iter.into_iter().collect(),
        }
    }
}

/// Board occupancy at one instant. Never mutated once built.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snapshot {
    direction: Direction,
    snake: Vec<TileIndex>,
    food: TileIndex,
    free: TileSet,
    walls: TileSet,
}

impl Snapshot {
    /// Assembles a snapshot from collections the controller has already
    /// partitioned.
    pub(crate) fn assemble(
        direction: Direction,
        snake: Vec<TileIndex>,
        food: TileIndex,
        free: TileSet,
        walls: TileSet,
    ) -> Self {
        debug_assert!(!snake.is_empty());
        debug_assert!(!snake.contains(&food));
        Self {
            direction,
            snake,
            food,
            free,
            walls,
        }
    }

    /// Builds a snapshot for an explicit snake layout and food tile.
    ///
    /// Walls come from the board and every other tile is free. Layouts that
    /// overlap walls, repeat a tile, place food on the snake or are not a
    /// connected chain of neighbouring tiles are rejected.
    pub fn from_parts(
        board: Board,
        direction: Direction,
        snake: Vec<TileIndex>,
        food: TileIndex,
    ) -> Result<Self, StateError> {
        let invalid = |reason: String| Err(StateError::InvalidSnapshot(reason));

        if snake.is_empty() {
            return invalid("snake has no segments".to_string());
        }

        let mut occupied = TileSet::new();
        for &tile in &snake {
            if tile >= board.tile_count() {
                return invalid(format!("snake tile {tile} is off the board"));
            }
            if board.is_wall(tile) {
                return invalid(format!("snake tile {tile} is a wall"));
            }
            if !occupied.insert(tile) {
                return invalid(format!("snake tile {tile} appears twice"));
            }
        }

        let connected = snake.windows(2).all(|pair| {
            Direction::ALL
                .into_iter()
                .any(|direction| board.step(pair[0], direction) == Some(pair[1]))
        });
        if !connected {
            return invalid("snake segments are not adjacent".to_string());
        }

        if food >= board.tile_count() || board.is_wall(food) {
            return invalid(format!("food tile {food} is not an interior tile"));
        }
        if occupied.contains(food) {
            return invalid(format!("food tile {food} overlaps the snake"));
        }

        let walls: TileSet = board.tiles().filter(|tile| board.is_wall(*tile)).collect();
        let free: TileSet = board
            .tiles()
            .filter(|tile| !board.is_wall(*tile) && !occupied.contains(*tile) && *tile != food)
            .collect();

        Ok(Self::assemble(direction, snake, food, free, walls))
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Snake tiles, head first.
    #[must_use]
    pub fn snake(&self) -> Vec<TileIndex> {
        self.snake.clone()
    }

    #[must_use]
    pub fn head(&self) -> TileIndex {
        // `assemble` is only reached with a non-empty snake.
        self.snake[0]
    }

    #[must_use]
    pub fn snake_len(&self) -> usize {
        self.snake.len()
    }

    #[must_use]
    pub fn food(&self) -> TileIndex {
        self.food
    }

    #[must_use]
    pub fn free(&self) -> TileSet {
        self.free.clone()
    }

    #[must_use]
    pub fn walls(&self) -> TileSet {
        self.walls.clone()
    }

    #[must_use]
    pub fn is_free(&self, tile: TileIndex) -> bool {
        self.free.contains(tile)
    }

    #[must_use]
    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    pub(crate) fn snake_tiles(&self) -> &[TileIndex] {
        &self.snake
    }

    pub(crate) fn free_tiles(&self) -> &TileSet {
        &self.free
    }

    pub(crate) fn wall_tiles(&self) -> &TileSet {
        &self.walls
    }
}

/// Append-only sequence of snapshots for one game.
#[derive(Debug, Clone, Default)]
pub struct StateHistory {
    snapshots: Vec<Snapshot>,
}

impl StateHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `snapshot` as the newest entry.
    pub fn append(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
    }

    /// Returns the newest snapshot.
    pub fn latest(&self) -> Result<&Snapshot, StateError> {
        self.snapshots.last().ok_or(StateError::EmptyHistory)
    }

    /// Empties the history.
    pub fn reset(&mut self) {
        self.snapshots.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
