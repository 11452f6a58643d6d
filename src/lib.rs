//! Grid snake: an immutable-snapshot state machine for the classic game,
//! plus a terminal frontend that drives and draws it.

pub mod board;
pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod renderer;
pub mod session;
pub mod state;
pub mod terminal_runtime;
