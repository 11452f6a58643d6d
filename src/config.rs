use std::fs;
use std::path::Path;
use std::time::Duration;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, ConfigError};

/// Default side length of the square board.
pub const DEFAULT_GRID_SIZE: u16 = 25;

/// Default simulation tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Default render interval in milliseconds (30 frames per second).
pub const DEFAULT_RENDER_INTERVAL_MS: u64 = 33;

/// Smallest board a session will play on: the interior must hold a snake
/// tile and a food tile.
pub const MIN_PLAYABLE_GRID_SIZE: u16 = 4;

/// Timing and geometry fixed for the lifetime of one session.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub grid_size: u16,
    pub tick_interval_ms: u64,
    pub render_interval_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            render_interval_ms: DEFAULT_RENDER_INTERVAL_MS,
        }
    }
}

impl SessionConfig {
    /// Checks every field, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < MIN_PLAYABLE_GRID_SIZE {
            return Err(ConfigError::GridTooSmall {
                min: MIN_PLAYABLE_GRID_SIZE,
                actual: self.grid_size,
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.render_interval_ms == 0 {
            return Err(ConfigError::ZeroRenderInterval);
        }
        Ok(())
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    #[must_use]
    pub fn render_interval(&self) -> Duration {
        Duration::from_millis(self.render_interval_ms)
    }

    /// Applies the fields present in `overrides` on top of `self`.
    #[must_use]
    pub fn merged(self, overrides: ConfigOverrides) -> Self {
        Self {
            grid_size: overrides.grid_size.unwrap_or(self.grid_size),
            tick_interval_ms: overrides.tick_interval_ms.unwrap_or(self.tick_interval_ms),
            render_interval_ms: overrides
                .render_interval_ms
                .unwrap_or(self.render_interval_ms),
        }
    }
}

/// Partial configuration, as read from a config file or the command line.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    pub grid_size: Option<u16>,
    pub tick_interval_ms: Option<u64>,
    pub render_interval_ms: Option<u64>,
}

impl ConfigOverrides {
    /// Parses overrides from a JSON document.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Reads overrides from a JSON file on disk.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let raw = fs::read_to_string(path)?;
        Ok(Self::from_json(&raw)?)
    }
}

/// Colors for every tile kind and the status line.
#[derive(Debug)]
pub struct Theme {
    pub snake: Color,
    pub food: Color,
    pub wall: Color,
    pub free: Color,
    pub status: Color,
}

/// Cyan snake on charcoal.
pub const THEME_CLASSIC: Theme = Theme {
    snake: Color::Rgb(0x00, 0xff, 0xe5),
    food: Color::Rgb(0xac, 0xac, 0xac),
    wall: Color::Rgb(0x60, 0x60, 0x60),
    free: Color::Rgb(0x46, 0x46, 0x46),
    status: Color::White,
};

/// Terminal cells drawn per tile horizontally, so tiles look square.
pub const TILE_WIDTH: u16 = 2;

/// Full block used for walls and free tiles.
pub const GLYPH_TILE: &str = "██";

/// Snake segment drawn on the free-tile background.
pub const GLYPH_SNAKE: &str = "()";

/// Food drawn on the free-tile background.
pub const GLYPH_FOOD: &str = "<>";
