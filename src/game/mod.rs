//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Transitions take the state by `&mut`, so they can be tested without a terminal.

pub mod config;
pub mod direction;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use config::{GameConfig, MAX_GRID_SIDE};
pub use direction::Direction;
pub use engine::{GameEngine, StepOutcome};
pub use state::{Cell, CollisionKind, GameState, Snake};
