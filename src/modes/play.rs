use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{error, info};

use crate::audio::AudioSink;
use crate::input::InputHandler;
use crate::render::Renderer;

use super::session::Session;

/// How often the loop wakes up to feed the scheduler and redraw the menu
const POLL_INTERVAL: Duration = Duration::from_millis(10);

type TerminalBackend = CrosstermBackend<Stderr>;

/// Raw mode plus alternate screen, restored when dropped
struct TerminalGuard {
    terminal: Terminal<TerminalBackend>,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        let backend = CrosstermBackend::new(stderr());
        let terminal = Terminal::new(backend).context("Failed to create terminal")?;

        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut guard = Self { terminal };

        execute!(guard.terminal.backend_mut(), EnterAlternateScreen)
            .context("Failed to enter alternate screen")?;
        guard.terminal.hide_cursor().context("Failed to hide cursor")?;
        guard.terminal.clear().context("Failed to clear terminal")?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = disable_raw_mode() {
            error!(?err, "failed to disable raw mode");
        }
        if let Err(err) = execute!(self.terminal.backend_mut(), LeaveAlternateScreen) {
            error!(?err, "failed to leave alternate screen");
        }
        if let Err(err) = self.terminal.show_cursor() {
            error!(?err, "failed to show cursor");
        }
    }
}

/// Interactive play on the terminal
pub struct PlayMode<A: AudioSink> {
    session: Session<A>,
    renderer: Renderer,
    input_handler: InputHandler,
}

impl<A: AudioSink> PlayMode<A> {
    pub fn new(session: Session<A>, renderer: Renderer) -> Self {
        Self {
            session,
            renderer,
            input_handler: InputHandler::new(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut guard = TerminalGuard::enter()?;
        let result = self.run_game_loop(&mut guard.terminal).await;

        info!(
            games_played = self.session.metrics().games_played,
            high_score = self.session.metrics().high_score,
            "session finished"
        );
        result
    }

    async fn run_game_loop(&mut self, terminal: &mut Terminal<TerminalBackend>) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut poll_timer = interval(POLL_INTERVAL);
        poll_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last_frame = Instant::now();

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => {
                            return Err(err).context("Failed to read terminal event");
                        }
                        None => self.session.request_quit(),
                    }
                }

                // Feed the tick scheduler, draw when something changed
                _ = poll_timer.tick() => {
                    let now = Instant::now();
                    let elapsed = now.duration_since(last_frame);
                    last_frame = now;

                    if self.session.on_frame(elapsed) {
                        terminal.draw(|frame| {
                            self.renderer.render(frame, &self.session);
                        }).context("Failed to draw frame")?;
                    }
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.session.request_quit();
                }
            }

            if self.session.should_quit() {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return;
                }
                let action = self.input_handler.handle_key_event(key);
                self.session.handle_key(action);
            }
            Event::Resize(_, _) => self.session.invalidate(),
            _ => {}
        }
    }
}
