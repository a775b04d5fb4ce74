//! Wall/open-cell bitmap and coordinate space for one board.
//!
//! Queries treat any position outside the board as a wall, so callers never need a bounds
//! check before asking whether a cell is passable. Mutations outside the board fail with
//! `GameError::OutOfRange`.

use crate::types::{GameError, Pos};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    walls: Vec<bool>,
}

impl Grid {
    pub fn new_filled(width: usize, height: usize, wall: bool) -> Self {
        Self { width, height, walls: vec![wall; width * height] }
    }

    /// Builds a grid from rows of text where `#` marks a wall and anything else is open.
    /// Rows shorter than the widest row are padded with walls.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let mut grid = Self::new_filled(width, rows.len(), true);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                grid.walls[y * width + x] = ch == '#';
            }
        }
        grid
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// True for strictly-inside cells, i.e. everything except the outer ring.
    pub fn is_interior(&self, pos: Pos) -> bool {
        pos.x >= 1
            && pos.y >= 1
            && (pos.x as usize) < self.width.saturating_sub(1)
            && (pos.y as usize) < self.height.saturating_sub(1)
    }

    pub fn is_wall(&self, pos: Pos) -> bool {
        if !self.in_bounds(pos) {
            return true;
        }
        self.walls[self.index(pos)]
    }

    pub fn is_open(&self, pos: Pos) -> bool {
        !self.is_wall(pos)
    }

    pub fn set_wall(&mut self, pos: Pos, wall: bool) -> Result<(), GameError> {
        if !self.in_bounds(pos) {
            return Err(GameError::OutOfRange { pos });
        }
        let idx = self.index(pos);
        self.walls[idx] = wall;
        Ok(())
    }

    /// Row-major wall mask, `true` = impassable.
    pub fn walls(&self) -> &[bool] {
        &self.walls
    }

    pub fn open_cell_count(&self) -> usize {
        self.walls.iter().filter(|&&wall| !wall).count()
    }

    pub fn interior_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        let (width, height) = (self.width as i32, self.height as i32);
        (1..height - 1).flat_map(move |y| (1..width - 1).map(move |x| Pos { y, x }))
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}
