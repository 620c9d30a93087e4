use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::{Cell, Direction};

/// Largest grid side accepted, in cells
pub const MAX_GRID_SIDE: usize = 1000;

/// Configuration for the game
///
/// Sizes are in pixels of a tiled screen layout. The grid is derived
/// from them, so `screen_width / tile_size` columns by
/// `screen_height / tile_size` rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen_width: u32,
    pub screen_height: u32,
    pub tile_size: u32,
    /// Cell the snake is reset to
    pub start: Cell,
    pub start_direction: Direction,
    /// Minimum time between two simulation ticks
    pub tick_interval_ms: u64,
    /// Game-over overlay size, clamped to the grid when drawn
    pub overlay_width: u32,
    pub overlay_height: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 1400,
            screen_height: 700,
            tile_size: 30,
            start: Cell::new(10, 10),
            start_direction: Direction::Right,
            tick_interval_ms: 140,
            overlay_width: 400,
            overlay_height: 300,
        }
    }
}

impl GameConfig {
    /// Default layout resized to `width x height` cells
    pub fn with_grid(width: usize, height: usize) -> Self {
        let mut config = Self::default();
        config.set_grid(width, height);
        config
    }

    /// Resize the screen so the grid becomes `width x height` cells
    pub fn set_grid(&mut self, width: usize, height: usize) {
        self.screen_width = scaled(width, self.tile_size);
        self.screen_height = scaled(height, self.tile_size);
    }

    /// Apply command-line overrides; a missing side keeps its current size
    pub fn apply_overrides(
        &mut self,
        width: Option<usize>,
        height: Option<usize>,
        tick_ms: Option<u64>,
    ) {
        if width.is_some() || height.is_some() {
            let width = width.unwrap_or_else(|| self.grid_width());
            let height = height.unwrap_or_else(|| self.grid_height());
            self.set_grid(width, height);
        }
        if let Some(tick_ms) = tick_ms {
            self.tick_interval_ms = tick_ms;
        }
    }

    /// Read a JSON config; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }

    pub fn grid_width(&self) -> usize {
        (self.screen_width / self.tile_size.max(1)) as usize
    }

    pub fn grid_height(&self) -> usize {
        (self.screen_height / self.tile_size.max(1)) as usize
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Overlay size in whole cells
    pub fn overlay_cells(&self) -> (usize, usize) {
        let tile = self.tile_size.max(1);
        (
            (self.overlay_width / tile) as usize,
            (self.overlay_height / tile) as usize,
        )
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.tile_size > 0, "tile_size must be positive");
        ensure!(
            self.grid_width() >= 1 && self.grid_height() >= 1,
            "screen {}x{} holds no {}px tile",
            self.screen_width,
            self.screen_height,
            self.tile_size
        );
        ensure!(
            self.grid_width() <= MAX_GRID_SIDE && self.grid_height() <= MAX_GRID_SIDE,
            "{}x{} grid exceeds the {MAX_GRID_SIDE}-cell limit",
            self.grid_width(),
            self.grid_height()
        );
        ensure!(
            self.start.col >= 0
                && self.start.row >= 0
                && (self.start.col as usize) < self.grid_width()
                && (self.start.row as usize) < self.grid_height(),
            "start cell ({}, {}) lies outside the {}x{} grid",
            self.start.col,
            self.start.row,
            self.grid_width(),
            self.grid_height()
        );
        ensure!(self.tick_interval_ms > 0, "tick_interval_ms must be positive");
        Ok(())
    }
}

fn scaled(cells: usize, tile_size: u32) -> u32 {
    u32::try_from(cells)
        .unwrap_or(u32::MAX)
        .saturating_mul(tile_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width(), 46);
        assert_eq!(config.grid_height(), 23);
        assert_eq!(config.start, Cell::new(10, 10));
        assert_eq!(config.start_direction, Direction::Right);
        assert_eq!(config.tick_interval(), Duration::from_millis(140));
        assert_eq!(config.overlay_cells(), (13, 10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_grid() {
        let config = GameConfig::with_grid(15, 12);
        assert_eq!(config.grid_width(), 15);
        assert_eq!(config.grid_height(), 12);
    }

    #[test]
    fn test_validate_rejects_start_outside_grid() {
        let config = GameConfig::with_grid(10, 10);
        assert!(config.validate().is_err());

        let config = GameConfig::with_grid(11, 11);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let config = GameConfig {
            tile_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            tick_interval_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_small_grid_accepts_default_overlay() {
        // The overlay is clamped to the grid when drawn.
        let config = GameConfig::with_grid(11, 11);
        assert_eq!(config.overlay_cells(), (13, 10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_huge_grid() {
        let config = GameConfig::with_grid(40000, 20);
        assert!(config.validate().is_err());

        let config = GameConfig::with_grid(usize::MAX, 20);
        assert_eq!(config.screen_width, u32::MAX);
        assert!(config.validate().is_err());

        let config = GameConfig::with_grid(MAX_GRID_SIDE, MAX_GRID_SIDE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_width_override_keeps_height() {
        let mut config = GameConfig::default();
        config.apply_overrides(Some(30), None, None);

        assert_eq!(config.grid_width(), 30);
        assert_eq!(config.grid_height(), 23);
        assert_eq!(config.tick_interval_ms, 140);
    }

    #[test]
    fn test_tick_override_replaces_interval() {
        let mut config = GameConfig::default();
        config.apply_overrides(None, None, Some(75));

        assert_eq!(config.tick_interval(), Duration::from_millis(75));
        assert_eq!(config.grid_width(), 46);
        assert_eq!(config.grid_height(), 23);
    }

    #[test]
    fn test_overrides_apply_over_loaded_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "tile_size": 20,
                "screen_width": 400,
                "screen_height": 300,
                "tick_interval_ms": 90
            }}"#
        )
        .unwrap();

        let mut config = GameConfig::load(file.path()).unwrap();
        assert_eq!((config.grid_width(), config.grid_height()), (20, 15));

        config.apply_overrides(None, Some(18), None);
        assert_eq!((config.grid_width(), config.grid_height()), (20, 18));
        assert_eq!(config.tile_size, 20);
        assert_eq!(config.tick_interval_ms, 90);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_override_moving_start_off_grid_is_invalid() {
        let mut config = GameConfig::default();
        config.apply_overrides(Some(8), None, None);
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.apply_overrides(None, None, Some(0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "tick_interval_ms": 90, "start": {{ "col": 3, "row": 4 }} }}"#).unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.tick_interval_ms, 90);
        assert_eq!(config.start, Cell::new(3, 4));
        assert_eq!(config.tile_size, 30);
    }

    #[test]
    fn test_load_reports_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = GameConfig::load(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }
}
