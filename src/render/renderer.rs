use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};

use crate::assets::AssetPack;
use crate::audio::AudioSink;
use crate::modes::{Mode, Session, Variant};

use super::board::BoardWidget;

pub struct Renderer {
    assets: AssetPack,
    overlay_cells: (usize, usize),
}

impl Renderer {
    pub fn new(assets: AssetPack, overlay_cells: (usize, usize)) -> Self {
        Self {
            assets,
            overlay_cells,
        }
    }

    pub fn render<A: AudioSink>(&self, frame: &mut Frame, session: &Session<A>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(session), chunks[0]);

        let (grid_cols, grid_rows) = BoardWidget::size(session.state());
        // Two extra columns and rows for the border
        let (outer_cols, outer_rows) = (grid_cols.saturating_add(2), grid_rows.saturating_add(2));
        let outer = centered(chunks[1], outer_cols, outer_rows);
        let block = Block::bordered()
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::White))
            .title(" Snake ");
        let inner = block.inner(outer);
        frame.render_widget(block, outer);

        match session.mode() {
            Mode::Menu => frame.render_widget(self.render_menu(inner), inner),
            Mode::Playing => frame.render_widget(
                BoardWidget::new(session.state(), &self.assets, self.overlay_cells),
                inner,
            ),
        }

        frame.render_widget(self.render_controls(session), chunks[2]);
    }

    fn render_menu(&self, area: Rect) -> Paragraph<'_> {
        let art: Vec<&str> = self.assets.menu_art.lines().collect();
        let top_padding = (area.height as usize).saturating_sub(art.len()) / 2;

        let mut lines = vec![Line::from(""); top_padding];
        lines.extend(art.into_iter().map(|line| {
            Line::from(Span::styled(
                line,
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ))
        }));

        Paragraph::new(lines).alignment(Alignment::Center)
    }

    fn render_stats<A: AudioSink>(&self, session: &Session<A>) -> Paragraph<'_> {
        let state = session.state();
        let metrics = session.metrics();

        let mut spans = vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.high_score.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Games: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.games_played.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ];
        if session.is_music_playing() {
            spans.push(Span::raw("    "));
            spans.push(Span::styled("♪", Style::default().fg(Color::Magenta)));
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn render_controls<A: AudioSink>(&self, session: &Session<A>) -> Paragraph<'_> {
        let escape = match (session.mode(), session.variant()) {
            (Mode::Playing, Variant::Arcade) => " for the menu",
            _ => " to quit",
        };

        let spans = match session.mode() {
            Mode::Menu => vec![
                Span::styled("ENTER", Style::default().fg(Color::Green)),
                Span::raw(" to play | "),
                Span::styled("ESC", Style::default().fg(Color::Red)),
                Span::raw(escape),
            ],
            Mode::Playing => vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("R", Style::default().fg(Color::Green)),
                Span::raw(" to restart | "),
                Span::styled("ESC", Style::default().fg(Color::Red)),
                Span::raw(escape),
            ],
        };

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }
}

/// A `width x height` rectangle centred in `area`, clipped to it
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameEngine};
    use crate::input::KeyAction;
    use crate::modes::session::tests::RecordingAudio;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn draw(session: &Session<RecordingAudio>) -> Buffer {
        let renderer = Renderer::new(AssetPack::builtin().unwrap(), (13, 10));
        let mut terminal = Terminal::new(TestBackend::new(100, 28)).unwrap();
        terminal
            .draw(|frame| renderer.render(frame, session))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn screen_text(buf: &Buffer) -> String {
        let mut text = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                text.push_str(buf.cell((x, y)).unwrap().symbol());
            }
            text.push('\n');
        }
        text
    }

    fn session(variant: Variant) -> Session<RecordingAudio> {
        Session::new(
            GameEngine::seeded(GameConfig::default(), 11),
            variant,
            RecordingAudio::default(),
        )
    }

    #[test]
    fn test_menu_screen() {
        let text = screen_text(&draw(&session(Variant::Arcade)));

        assert!(text.contains("Press ENTER to play"));
        assert!(text.contains("ESC to quit"));
        assert!(text.contains("♪"));
    }

    #[test]
    fn test_board_screen() {
        let mut session = session(Variant::Arcade);
        session.handle_key(KeyAction::Confirm);
        let text = screen_text(&draw(&session));

        assert!(text.contains("Score: 0"));
        assert!(text.contains(" Snake "));
        assert!(text.contains("ESC for the menu"));
        assert!(!text.contains("G A M E"));
    }

    #[test]
    fn test_game_over_overlay() {
        let mut session = session(Variant::Classic);
        session.handle_key(KeyAction::Steer(crate::game::Direction::Up));
        while !session.state().game_over {
            session.tick();
        }
        let text = screen_text(&draw(&session));

        assert!(text.contains("G A M E   O V E R"));
        assert!(text.contains("Games: 1"));
        assert!(text.contains("ESC to quit"));
    }

    #[test]
    fn test_centered_clips() {
        let area = Rect::new(0, 0, 10, 4);
        assert_eq!(centered(area, 4, 2), Rect::new(3, 1, 4, 2));
        assert_eq!(centered(area, 40, 20), area);
    }
}
