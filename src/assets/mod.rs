//! Asset pack: tile sprites, menu and game-over art, sound cue levels
//!
//! A pack is a directory holding `theme.json`, `menu.txt` and `gameover.txt`.
//! Loading is all-or-nothing; any missing or malformed file is an error.
//! The default pack ships inside the binary.

use anyhow::{Context, Result, anyhow, ensure};
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

pub const THEME_FILE: &str = "theme.json";
pub const MENU_FILE: &str = "menu.txt";
pub const GAME_OVER_FILE: &str = "gameover.txt";

/// Mixer ceiling for sound levels
pub const MAX_LEVEL: u8 = 128;

const BUILTIN_THEME: &str = include_str!("../../assets/theme.json");
const BUILTIN_MENU: &str = include_str!("../../assets/menu.txt");
const BUILTIN_GAME_OVER: &str = include_str!("../../assets/gameover.txt");

#[derive(Debug, Deserialize)]
struct ThemeFile {
    background: SpriteSpec,
    snake: SpriteSpec,
    food: SpriteSpec,
    sounds: SoundLevels,
}

#[derive(Debug, Deserialize)]
struct SpriteSpec {
    glyph: String,
    fg: String,
    #[serde(default)]
    bg: Option<String>,
}

/// Per-cue levels, 0..=128. Zero silences the cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SoundLevels {
    pub eat: u8,
    pub game_over: u8,
    pub music: u8,
}

/// What one grid cell looks like: two terminal columns of styled text
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub glyph: String,
    pub style: Style,
}

impl Sprite {
    fn from_spec(name: &str, spec: SpriteSpec) -> Result<Self> {
        let width = Span::raw(spec.glyph.as_str()).width();
        ensure!(
            (1..=2).contains(&width),
            "sprite `{}`: glyph {:?} is {} columns wide, expected 1 or 2",
            name,
            spec.glyph,
            width
        );

        let mut glyph = spec.glyph;
        if width == 1 {
            glyph.push(' ');
        }

        let mut style = Style::default().fg(parse_color(name, &spec.fg)?);
        if let Some(bg) = spec.bg.as_deref() {
            style = style.bg(parse_color(name, bg)?);
        }

        Ok(Self { glyph, style })
    }
}

fn parse_color(sprite: &str, value: &str) -> Result<Color> {
    Color::from_str(value).map_err(|_| anyhow!("sprite `{}`: unknown colour {:?}", sprite, value))
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssetPack {
    pub background: Sprite,
    pub snake: Sprite,
    pub food: Sprite,
    pub sounds: SoundLevels,
    pub menu_art: String,
    pub game_over_art: String,
}

impl AssetPack {
    /// The pack compiled into the binary
    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_THEME, BUILTIN_MENU, BUILTIN_GAME_OVER)
            .context("Failed to load built-in assets")
    }

    /// Load every file of the pack in `dir`
    pub fn load(dir: &Path) -> Result<Self> {
        let theme = read_asset(dir, THEME_FILE)?;
        let menu = read_asset(dir, MENU_FILE)?;
        let game_over = read_asset(dir, GAME_OVER_FILE)?;

        Self::parse(&theme, &menu, &game_over)
            .with_context(|| format!("Failed to load assets from {:?}", dir))
    }

    fn parse(theme_json: &str, menu_art: &str, game_over_art: &str) -> Result<Self> {
        let theme: ThemeFile =
            serde_json::from_str(theme_json).with_context(|| format!("Invalid {}", THEME_FILE))?;

        let sounds = theme.sounds;
        ensure!(
            sounds.eat <= MAX_LEVEL && sounds.game_over <= MAX_LEVEL && sounds.music <= MAX_LEVEL,
            "sound levels must be at most {}",
            MAX_LEVEL
        );
        ensure!(!menu_art.trim().is_empty(), "{} is empty", MENU_FILE);
        ensure!(!game_over_art.trim().is_empty(), "{} is empty", GAME_OVER_FILE);

        Ok(Self {
            background: Sprite::from_spec("background", theme.background)?,
            snake: Sprite::from_spec("snake", theme.snake)?,
            food: Sprite::from_spec("food", theme.food)?,
            sounds,
            menu_art: menu_art.trim_end().to_string(),
            game_over_art: game_over_art.trim_end().to_string(),
        })
    }
}

fn read_asset(dir: &Path, name: &str) -> Result<String> {
    let path = dir.join(name);
    std::fs::read_to_string(&path).with_context(|| format!("Failed to load asset {:?}", path))
}
