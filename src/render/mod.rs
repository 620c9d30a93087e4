pub mod board;
pub mod renderer;

pub use board::{BoardWidget, CELL_COLUMNS, overlay_area};
pub use renderer::Renderer;
