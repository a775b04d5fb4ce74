//! Board generation: carve, widen, repair, then place entities.

pub mod model;

mod carve;
mod generator;
mod placement;
mod repair;

pub use generator::BoardGenerator;
pub use model::{BoardSummary, GeneratedBoard};
pub use placement::Placement;
pub use repair::RepairKind;

use crate::grid::Grid;
use crate::rng::seeded_rng;
use crate::tiers::TierConfig;
use crate::types::Pos;

pub fn generate_board(config: &TierConfig, seed: u64) -> GeneratedBoard {
    BoardGenerator::new(*config).generate(&mut seeded_rng(seed))
}

/// Clears a cell the generator has already bounds-checked.
fn open_cell(grid: &mut Grid, pos: Pos) {
    let cleared = grid.set_wall(pos, false);
    debug_assert!(cleared.is_ok(), "generator addressed {pos:?} outside the grid");
}
