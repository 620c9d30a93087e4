//! The game session: which screen is active, what each key does there,
//! and what happens on every tick. No terminal I/O happens here.

use std::time::Duration;
use tracing::{debug, info};

use crate::audio::{AudioSink, SoundCue};
use crate::game::{GameEngine, GameState, StepOutcome};
use crate::input::KeyAction;
use crate::metrics::GameMetrics;

use super::scheduler::TickScheduler;

/// Which flavour of the game is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Variant {
    /// Menu screen, sound cues, Escape returns to the menu
    Arcade,
    /// Straight into the game, Escape quits
    Classic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Menu,
    Playing,
}

pub struct Session<A: AudioSink> {
    engine: GameEngine,
    state: GameState,
    variant: Variant,
    mode: Mode,
    audio: A,
    metrics: GameMetrics,
    scheduler: TickScheduler,
    should_quit: bool,
    needs_redraw: bool,
}

impl<A: AudioSink> Session<A> {
    pub fn new(mut engine: GameEngine, variant: Variant, mut audio: A) -> Self {
        let state = engine.reset();
        let scheduler = TickScheduler::new(engine.config().tick_interval());
        audio.start_music();

        let mut session = Self {
            engine,
            state,
            variant,
            mode: Mode::Menu,
            audio,
            metrics: GameMetrics::new(),
            scheduler,
            should_quit: false,
            needs_redraw: true,
        };

        info!(
            ?variant,
            grid_width = session.state.grid_width,
            grid_height = session.state.grid_height,
            "session started"
        );

        if variant == Variant::Classic {
            session.start_playing();
        }
        session
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn metrics(&self) -> &GameMetrics {
        &self.metrics
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn is_music_playing(&self) -> bool {
        self.audio.is_music_playing()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    /// Force the next frame to be drawn, e.g. after a terminal resize
    pub fn invalidate(&mut self) {
        self.needs_redraw = true;
    }

    pub fn handle_key(&mut self, action: KeyAction) {
        if action == KeyAction::Quit {
            self.request_quit();
            return;
        }

        match self.mode {
            Mode::Menu => match action {
                KeyAction::Confirm => self.start_playing(),
                KeyAction::Back => self.request_quit(),
                _ => {}
            },
            Mode::Playing => match action {
                KeyAction::Steer(direction) => {
                    self.engine.set_direction(&mut self.state, direction);
                }
                KeyAction::Restart if self.state.game_over => self.new_game(),
                KeyAction::Back => match self.variant {
                    Variant::Arcade => self.enter_menu(),
                    Variant::Classic => self.request_quit(),
                },
                _ => {}
            },
        }
    }

    /// Called once per loop iteration with the time since the previous one.
    /// Returns whether the screen should be redrawn.
    pub fn on_frame(&mut self, elapsed: Duration) -> bool {
        self.metrics.update();

        let ticked = match self.mode {
            // The menu is redrawn every iteration.
            Mode::Menu => true,
            Mode::Playing => {
                let due = self.scheduler.advance(elapsed);
                if due {
                    self.tick();
                }
                due
            }
        };

        let redraw = ticked || self.needs_redraw;
        self.needs_redraw = false;
        redraw
    }

    /// One simulation step plus its audio and statistics side effects
    pub fn tick(&mut self) -> StepOutcome {
        let outcome = self.engine.step(&mut self.state);

        match outcome {
            StepOutcome::Ate => {
                debug!(score = self.state.score, "food eaten");
                self.audio.play(SoundCue::Eat);
            }
            StepOutcome::Collided(kind) => {
                self.audio.halt_music();
                self.audio.play(SoundCue::GameOver);
                self.metrics.on_game_over(self.state.score);
                info!(
                    cause = kind.as_str(),
                    score = self.state.score,
                    length = self.state.snake.len(),
                    steps = self.state.steps,
                    "game over"
                );
            }
            StepOutcome::Moved | StepOutcome::Halted => {}
        }

        outcome
    }

    fn start_playing(&mut self) {
        debug!("entering play");
        self.mode = Mode::Playing;
        self.new_game();
    }

    fn enter_menu(&mut self) {
        debug!("back to menu");
        self.metrics.stop_timer();
        self.mode = Mode::Menu;
        self.needs_redraw = true;
    }

    fn new_game(&mut self) {
        self.engine.reset_state(&mut self.state);
        if !self.audio.is_music_playing() {
            self.audio.start_music();
        }
        self.metrics.on_game_start();
        self.scheduler.restart();
        self.needs_redraw = true;
        info!(food_col = self.state.food.col, food_row = self.state.food.row, "new game");
    }
}
