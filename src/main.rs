use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::assets::AssetPack;
use grid_snake::audio::{AudioSink, BellAudio, SilentAudio};
use grid_snake::game::{GameConfig, GameEngine};
use grid_snake::modes::{PlayMode, Session, Variant};
use grid_snake::render::Renderer;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a fixed grid, in the terminal")]
struct Cli {
    /// Game variant
    #[arg(long, value_enum, default_value = "arcade")]
    variant: Variant,

    /// JSON game configuration; missing fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<usize>,

    /// Milliseconds between simulation ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Load the asset pack from this directory instead of the built-in one
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Disable sound cues
    #[arg(long)]
    mute: bool,

    /// Write logs to this file (filtered by RUST_LOG, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        config.apply_overrides(self.width, self.height, self.tick_ms);
        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = cli.game_config()?;

    // Every asset must load before the terminal is touched
    let assets = match &cli.assets {
        Some(dir) => AssetPack::load(dir)?,
        None => AssetPack::builtin()?,
    };

    let engine = match cli.seed {
        Some(seed) => GameEngine::seeded(config.clone(), seed),
        None => GameEngine::new(config.clone()),
    };

    let audio: Box<dyn AudioSink> = if cli.mute || cli.variant == Variant::Classic {
        Box::new(SilentAudio)
    } else {
        Box::new(BellAudio::stderr(assets.sounds))
    };

    let renderer = Renderer::new(assets, config.overlay_cells());
    let session = Session::new(engine, cli.variant, audio);

    let mut play_mode = PlayMode::new(session, renderer);
    play_mode.run().await?;

    Ok(())
}
