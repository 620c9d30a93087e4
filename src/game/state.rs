use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::direction::Direction;

/// A cell on the game grid, addressed by column and row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Offset the cell by (dcol, drow)
    pub fn moved_by(&self, dcol: i32, drow: i32) -> Self {
        Self {
            col: self.col + dcol,
            row: self.row + drow,
        }
    }

    /// The neighbouring cell one step in `direction`
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dcol, drow) = direction.delta();
        self.moved_by(dcol, drow)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at the front
    pub body: VecDeque<Cell>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// A one-cell snake at `head`
    pub fn new(head: Cell, direction: Direction) -> Self {
        Self::from_cells([head], direction)
    }

    /// Build a snake from explicit segments, head first
    ///
    /// Panics if `cells` is empty.
    pub fn from_cells<I>(cells: I, direction: Direction) -> Self
    where
        I: IntoIterator<Item = Cell>,
    {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        assert!(!body.is_empty(), "a snake needs at least one segment");
        Self { body, direction }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    /// Check if `cell` is any segment of the snake, tail included
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Push `new_head` in front, drop the tail unless growing
    pub fn advance_to(&mut self, new_head: Cell, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false for a snake built through `new`/`from_cells`
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }
}

/// What the snake ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    Wall,
    SelfCollision,
}

impl CollisionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollisionKind::Wall => "wall",
            CollisionKind::SelfCollision => "self",
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Cell,
    pub grid_width: usize,
    pub grid_height: usize,
    pub score: u32,
    pub steps: u32,
    pub game_over: bool,
}

impl GameState {
    pub fn new(snake: Snake, food: Cell, grid_width: usize, grid_height: usize) -> Self {
        Self {
            snake,
            food,
            grid_width,
            grid_height,
            score: 0,
            steps: 0,
            game_over: false,
        }
    }

    /// Check if a cell is within `[0, W) x [0, H)`
    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        cell.col >= 0
            && cell.col < self.grid_width as i32
            && cell.row >= 0
            && cell.row < self.grid_height as i32
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction
    }

    /// Change heading unless `requested` reverses the current one.
    ///
    /// Returns whether the change was accepted.
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        if self.snake.direction.is_opposite(requested) {
            return false;
        }
        self.snake.direction = requested;
        true
    }
}
