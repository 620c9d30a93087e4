use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Clear, Paragraph, Widget},
};

use crate::assets::{AssetPack, Sprite};
use crate::game::{Cell, GameState};

/// Terminal columns per grid cell
pub const CELL_COLUMNS: u16 = 2;

/// The play field: background, snake, food, and the game-over overlay
pub struct BoardWidget<'a> {
    state: &'a GameState,
    assets: &'a AssetPack,
    overlay_cells: (usize, usize),
}

impl<'a> BoardWidget<'a> {
    pub fn new(state: &'a GameState, assets: &'a AssetPack, overlay_cells: (usize, usize)) -> Self {
        Self {
            state,
            assets,
            overlay_cells,
        }
    }

    /// Terminal size the whole grid needs
    pub fn size(state: &GameState) -> (u16, u16) {
        (
            to_u16(state.grid_width).saturating_mul(CELL_COLUMNS),
            to_u16(state.grid_height),
        )
    }
}

impl Widget for BoardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.state;

        for row in 0..state.grid_height as i32 {
            for col in 0..state.grid_width as i32 {
                let cell = Cell::new(col, row);
                put_sprite(buf, area, cell, &self.assets.background, Style::default());
            }
        }

        let head = state.snake.head();
        for cell in state.snake.cells() {
            let extra = if cell == head {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            put_sprite(buf, area, cell, &self.assets.snake, extra);
        }

        put_sprite(buf, area, state.food, &self.assets.food, Style::default());

        if state.game_over {
            let rect = overlay_area(area, state, self.overlay_cells);
            let lines: Vec<Line> = self.assets.game_over_art.lines().map(Line::from).collect();

            Clear.render(rect, buf);
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .style(self.assets.food.style)
                .block(
                    Block::bordered()
                        .border_type(BorderType::Double)
                        .border_style(self.assets.food.style),
                )
                .render(rect, buf);
        }
    }
}

/// Draw `sprite` on grid cell `cell`; cells outside `area` are skipped
fn put_sprite(buf: &mut Buffer, area: Rect, cell: Cell, sprite: &Sprite, extra: Style) {
    if cell.col < 0 || cell.row < 0 {
        return;
    }
    let x = cell.col as u32 * CELL_COLUMNS as u32;
    let y = cell.row as u32;
    if x + CELL_COLUMNS as u32 > area.width as u32 || y >= area.height as u32 {
        return;
    }

    buf.set_stringn(
        area.x + x as u16,
        area.y + y as u16,
        &sprite.glyph,
        CELL_COLUMNS as usize,
        sprite.style.patch(extra),
    );
}

/// Overlay rectangle, `overlay_cells` big and centred on the grid
pub fn overlay_area(board: Rect, state: &GameState, overlay_cells: (usize, usize)) -> Rect {
    let cols = overlay_cells.0.min(state.grid_width);
    let rows = overlay_cells.1.min(state.grid_height);
    let first_col = (state.grid_width - cols) / 2;
    let first_row = (state.grid_height - rows) / 2;

    Rect::new(
        board.x.saturating_add(to_u16(first_col).saturating_mul(CELL_COLUMNS)),
        board.y.saturating_add(to_u16(first_row)),
        to_u16(cols).saturating_mul(CELL_COLUMNS),
        to_u16(rows),
    )
    .intersection(board)
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}
