//! Grid Snake - a terminal Snake game
//!
//! This library provides:
//! - Core game logic (game module)
//! - Key mapping (input module)
//! - The session state machine, tick scheduler and terminal loop (modes module)
//! - TUI rendering (render module)
//! - Asset packs and sound cues (assets and audio modules)

pub mod assets;
pub mod audio;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
