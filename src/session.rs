use tracing::{debug, info};

use crate::board::Board;
use crate::config::SessionConfig;
use crate::controller::{RenderView, StateController, Transition};
use crate::error::SessionError;
use crate::input::{Direction, GameInput, InputBacklog};

/// Direction every new game starts with.
pub const START_DIRECTION: Direction = Direction::Right;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Status {
    Start,
    Running,
    Paused,
    Lost,
    Won,
}

impl Status {
    /// Status reached when the trigger key is pressed.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Start | Self::Paused => Self::Running,
            Self::Running => Self::Paused,
            Self::Lost | Self::Won => Self::Start,
        }
    }

    /// Prompt shown under the board for this status.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Start => "press space to start",
            Self::Running => "press space to pause",
            Self::Paused => "paused! press space to start again",
            Self::Lost => "you lost! press space to reset",
            Self::Won => "board cleared! press space to reset",
        }
    }
}

/// Owned aggregate for one game session: geometry, state machine, input.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    controller: StateController,
    backlog: InputBacklog,
    status: Status,
    redraw: bool,
}

impl Session {
    /// Validates `config` and sets up a fresh game waiting to start.
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        config.validate()?;
        let board = Board::new(config.grid_size)?;
        Self::with_controller(config, StateController::new(board))
    }

    /// Like [`Session::new`], with a fixed seed for reproducible games.
    pub fn new_with_seed(config: SessionConfig, seed: u64) -> Result<Self, SessionError> {
        config.validate()?;
        let board = Board::new(config.grid_size)?;
        Self::with_controller(config, StateController::new_with_seed(board, seed))
    }

    fn with_controller(
        config: SessionConfig,
        mut controller: StateController,
    ) -> Result<Self, SessionError> {
        controller.initialize(START_DIRECTION)?;
        info!(grid_size = config.grid_size, "session created");

        Ok(Self {
            config,
            controller,
            backlog: InputBacklog::new(),
            status: Status::Start,
            redraw: true,
        })
    }

    #[must_use]
    pub fn config(&self) -> SessionConfig {
        self.config
    }

    #[must_use]
    pub fn board(&self) -> Board {
        self.controller.board()
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn controller(&self) -> &StateController {
        &self.controller
    }

    /// Mutable access to the state machine, for seeding custom layouts.
    pub fn controller_mut(&mut self) -> &mut StateController {
        &mut self.controller
    }

    /// Handles one input event. Quit is left to the caller.
    pub fn press(&mut self, input: GameInput) -> Result<(), SessionError> {
        match input {
            GameInput::Direction(direction) => self.backlog.push(direction),
            GameInput::Toggle => self.set_status(self.status.toggled())?,
            GameInput::Redraw => self.redraw = true,
            GameInput::Quit => {}
        }
        Ok(())
    }

    /// Runs one simulation step.
    ///
    /// While running, the chosen direction is applied or the game is lost.
    /// The input backlog is emptied every time, whatever the status.
    pub fn tick(&mut self) -> Result<(), SessionError> {
        let result = self.step();
        self.backlog.clear();
        result
    }

    fn step(&mut self) -> Result<(), SessionError> {
        if self.status != Status::Running {
            return Ok(());
        }

        let current = self.controller.direction()?;
        let direction = self.backlog.choose(current);
        let head = self.controller.snake_head()?;

        let next = match self.board().step(head, direction) {
            Some(next) if !self.controller.check_collision(next)? => next,
            _ => {
                debug!(head, ?direction, "collision");
                return self.set_status(Status::Lost);
            }
        };

        match self.controller.advance(direction, next)? {
            Transition::Moved | Transition::Grew => self.redraw = true,
            Transition::Filled => self.set_status(Status::Won)?,
        }
        Ok(())
    }

    fn set_status(&mut self, status: Status) -> Result<(), SessionError> {
        if status == Status::Start {
            self.controller.initialize(START_DIRECTION)?;
        }
        info!(from = ?self.status, to = ?status, "status changed");
        self.status = status;
        self.redraw = true;
        Ok(())
    }

    /// Returns true once per published change, for the render loop.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    /// Current board for rendering.
    pub fn render_view(&self) -> Result<RenderView, SessionError> {
        Ok(self.controller.render_view()?)
    }

    #[must_use]
    pub fn status_message(&self) -> &'static str {
        self.status.message()
    }
}
