use std::io;

use thiserror::Error;

use crate::board::TileIndex;

/// Rejected session configuration.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid size must be at least {min}, got {actual}")]
    GridTooSmall { min: u16, actual: u16 },
    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,
    #[error("render interval must be greater than zero")]
    ZeroRenderInterval,
}

/// Precondition violations raised by the state controller.
///
/// None of these are recoverable: each one points at a driver bug.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum StateError {
    #[error("state history is empty; initialize the game first")]
    EmptyHistory,
    #[error("tile {tile} is a wall or part of the snake")]
    Collision { tile: TileIndex },
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

/// Failure while building or driving a session.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    State(#[from] StateError),
}

/// Top-level error for the terminal binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("failed to parse config file: {0}")]
    Json(#[from] serde_json::Error),
}
