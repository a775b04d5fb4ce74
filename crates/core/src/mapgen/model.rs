//! Output of one generation run.

use serde::Serialize;

use crate::grid::Grid;
use crate::types::Pos;

use super::repair::RepairKind;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedBoard {
    pub grid: Grid,
    pub entry: Pos,
    pub exit: Pos,
    pub traps: Vec<Pos>,
    pub adversaries: Vec<Pos>,
    pub repair: RepairKind,
    /// Some entity sits on a cell the entry-to-exit route depends on.
    pub placement_relaxed: bool,
}

impl GeneratedBoard {
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let (width, height) = self.grid.dimensions();
        let mut bytes = Vec::new();
        bytes.extend((width as u32).to_le_bytes());
        bytes.extend((height as u32).to_le_bytes());
        for &wall in self.grid.walls() {
            bytes.push(u8::from(wall));
        }
        push_pos(&mut bytes, self.entry);
        push_pos(&mut bytes, self.exit);

        for group in [&self.traps, &self.adversaries] {
            bytes.extend((group.len() as u32).to_le_bytes());
            for &pos in group {
                push_pos(&mut bytes, pos);
            }
        }

        bytes
    }

    pub fn summary(&self) -> BoardSummary {
        let (width, height) = self.grid.dimensions();
        BoardSummary {
            width,
            height,
            open_cells: self.grid.open_cell_count(),
            traps: self.traps.len(),
            adversaries: self.adversaries.len(),
            repaired: self.repair != RepairKind::NotNeeded,
            placement_relaxed: self.placement_relaxed,
        }
    }
}

/// Counts reported by the board preview tool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BoardSummary {
    pub width: usize,
    pub height: usize,
    pub open_cells: usize,
    pub traps: usize,
    pub adversaries: usize,
    pub repaired: bool,
    pub placement_relaxed: bool,
}

fn push_pos(bytes: &mut Vec<u8>, pos: Pos) {
    bytes.extend(pos.y.to_le_bytes());
    bytes.extend(pos.x.to_le_bytes());
}
