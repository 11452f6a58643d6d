use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, warn};

use crate::board::{Board, TileIndex};
use crate::error::StateError;
use crate::input::Direction;
use crate::state::{Snapshot, StateHistory, TileSet};

/// Outcome of one accepted move.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Transition {
    /// Head moved onto a free tile and the tail followed.
    Moved,
    /// Head moved onto the food; the snake grew and new food was placed.
    Grew,
    /// The last food was eaten with no free tile left to hold the next one.
    /// No snapshot is published for this move.
    Filled,
}

/// Full board state handed to the renderer once per frame.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RenderView {
    pub snake: Vec<TileIndex>,
    pub food: TileIndex,
    pub free: TileSet,
    pub walls: TileSet,
}

/// Builds successive snapshots and owns their history.
#[derive(Debug, Clone)]
pub struct StateController {
    board: Board,
    history: StateHistory,
    rng: StdRng,
}

impl StateController {
    /// Creates an uninitialized controller seeded from system entropy.
    #[must_use]
    pub fn new(board: Board) -> Self {
        Self::with_rng(board, StdRng::from_entropy())
    }

    /// Creates a deterministic controller for tests and reproducible games.
    #[must_use]
    pub fn new_with_seed(board: Board, seed: u64) -> Self {
        Self::with_rng(board, StdRng::seed_from_u64(seed))
    }

    fn with_rng(board: Board, rng: StdRng) -> Self {
        Self {
            board,
            history: StateHistory::new(),
            rng,
        }
    }

    #[must_use]
    pub fn board(&self) -> Board {
        self.board
    }

    #[must_use]
    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    /// Starts a new game heading `direction`, discarding any previous one.
    ///
    /// Fails when the board interior cannot hold both a snake and a food tile.
    pub fn initialize(&mut self, direction: Direction) -> Result<(), StateError> {
        self.history.reset();

        let board = self.board;
        let (walls, free): (Vec<_>, Vec<_>) = board.tiles().partition(|tile| board.is_wall(*tile));
        let walls: TileSet = walls.into_iter().collect();
        let mut free: TileSet = free.into_iter().collect();

        let (Some(head), Some(food)) = (
            free.take_random(&mut self.rng),
            free.take_random(&mut self.rng),
        ) else {
            return Err(StateError::InvalidSnapshot(format!(
                "a {size}x{size} board has no room for both snake and food",
                size = self.board.size()
            )));
        };

        debug!(head, food, ?direction, "initialized game state");
        self.history.append(Snapshot::assemble(
            direction,
            vec![head],
            food,
            free,
            walls,
        ));
        Ok(())
    }

    /// Replaces the whole history with a single, already validated snapshot.
    ///
    /// The snapshot must have been built for this controller's board; one
    /// whose wall ring belongs to another grid size is refused.
    pub fn restore(&mut self, snapshot: Snapshot) -> Result<(), StateError> {
        let board = self.board;
        let ring: TileSet = board.tiles().filter(|tile| board.is_wall(*tile)).collect();
        if *snapshot.wall_tiles() != ring {
            warn!(size = board.size(), "refused snapshot built for another board");
            return Err(StateError::InvalidSnapshot(format!(
                "walls do not match a {size}x{size} board",
                size = board.size()
            )));
        }

        self.history.reset();
        self.history.append(snapshot);
        Ok(())
    }

    /// Moves the head onto `next` heading `direction` and publishes the result.
    ///
    /// `next` must pass [`Self::check_collision`] first; a colliding tile is
    /// refused with [`StateError::Collision`] and leaves the history untouched.
    pub fn advance(
        &mut self,
        direction: Direction,
        next: TileIndex,
    ) -> Result<Transition, StateError> {
        let current = self.history.latest()?;
        if collides(current, next) {
            warn!(next, "refused move onto an occupied tile");
            return Err(StateError::Collision { tile: next });
        }

        let mut snake = Vec::with_capacity(current.snake_len() + 1);
        snake.push(next);
        snake.extend_from_slice(current.snake_tiles());
        let mut free = current.free_tiles().clone();

        let (food, transition) = if next == current.food() {
            // `next` is the food tile, so it is never among the candidates.
            let Some(food) = free.take_random(&mut self.rng) else {
                debug!(next, "snake filled the board");
                return Ok(Transition::Filled);
            };
            (food, Transition::Grew)
        } else {
            free.remove(next);
            if let Some(tail) = snake.pop() {
                free.insert(tail);
            }
            (current.food(), Transition::Moved)
        };

        let walls = current.wall_tiles().clone();
        debug!(next, food, ?direction, ?transition, "advanced game state");
        self.history
            .append(Snapshot::assemble(direction, snake, food, free, walls));
        Ok(transition)
    }

    /// Returns true when `next` is a wall or part of the snake.
    pub fn check_collision(&self, next: TileIndex) -> Result<bool, StateError> {
        Ok(collides(self.history.latest()?, next))
    }

    pub fn snake_head(&self) -> Result<TileIndex, StateError> {
        Ok(self.history.latest()?.head())
    }

    pub fn direction(&self) -> Result<Direction, StateError> {
        Ok(self.history.latest()?.direction())
    }

    /// Returns a copy of the newest snapshot.
    pub fn snapshot(&self) -> Result<Snapshot, StateError> {
        self.history.latest().cloned()
    }

    /// Returns the board state for one rendered frame.
    pub fn render_view(&self) -> Result<RenderView, StateError> {
        let latest = self.history.latest()?;
        Ok(RenderView {
            snake: latest.snake(),
            food: latest.food(),
            free: latest.free(),
            walls: latest.walls(),
        })
    }
}

fn collides(snapshot: &Snapshot, next: TileIndex) -> bool {
    !snapshot.is_free(next) && next != snapshot.food()
}
