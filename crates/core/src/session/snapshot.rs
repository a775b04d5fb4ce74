//! Read-only copy of the board for renderers and the preview tool.

use serde::Serialize;

use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TrapView {
    pub pos: Pos,
    pub triggered: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major, `true` for walls.
    pub walls: Vec<bool>,
    pub player: Pos,
    pub goal: Pos,
    pub traps: Vec<TrapView>,
    pub adversaries: Vec<Pos>,
    pub lives: u32,
    pub elapsed_ms: u64,
    pub time_limit_ms: u64,
    pub state: SessionState,
}

impl BoardSnapshot {
    pub fn is_wall(&self, pos: Pos) -> bool {
        if pos.x < 0 || pos.y < 0 || pos.x as usize >= self.width || pos.y as usize >= self.height
        {
            return true;
        }
        self.walls[pos.y as usize * self.width + pos.x as usize]
    }

    /// Character for one cell. Entities draw over terrain, the player over everything.
    pub fn glyph_at(&self, pos: Pos) -> char {
        if pos == self.player {
            '@'
        } else if self.adversaries.contains(&pos) {
            'E'
        } else if pos == self.goal {
            '$'
        } else if let Some(trap) = self.traps.iter().find(|trap| trap.pos == pos) {
            if trap.triggered { 'x' } else { '^' }
        } else if self.is_wall(pos) {
            '#'
        } else {
            '.'
        }
    }

    pub fn to_ascii(&self) -> Vec<String> {
        (0..self.height as i32)
            .map(|y| (0..self.width as i32).map(|x| self.glyph_at(Pos { y, x })).collect())
            .collect()
    }
}

impl Session {
    pub fn snapshot(&self) -> BoardSnapshot {
        let (width, height) = self.grid.dimensions();
        BoardSnapshot {
            width,
            height,
            walls: self.grid.walls().to_vec(),
            player: self.player,
            goal: self.goal,
            traps: self
                .traps
                .values()
                .map(|trap| TrapView { pos: trap.pos, triggered: trap.triggered })
                .collect(),
            adversaries: self.adversaries.values().map(|adversary| adversary.pos).collect(),
            lives: self.lives,
            elapsed_ms: self.elapsed_ms,
            time_limit_ms: self.config.time_limit_ms,
            state: self.state,
        }
    }
}
