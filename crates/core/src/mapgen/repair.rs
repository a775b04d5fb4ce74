//! Post-generation guarantee that the exit is reachable from the entry.

use crate::grid::Grid;
use crate::pathfinding::{cheapest_carve_path, has_path};
use crate::types::Pos;

use super::open_cell;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RepairKind {
    NotNeeded,
    CarvedPath { walls_cleared: usize },
    DirectCorridor,
}

pub(super) fn ensure_path(grid: &mut Grid, entry: Pos, exit: Pos) -> RepairKind {
    if has_path(grid, entry, exit) {
        return RepairKind::NotNeeded;
    }

    let repair = match cheapest_carve_path(grid, entry, exit) {
        Some(path) => {
            let walls_cleared = path.iter().filter(|&&pos| grid.is_wall(pos)).count();
            for pos in path {
                open_cell(grid, pos);
            }
            RepairKind::CarvedPath { walls_cleared }
        }
        None => {
            carve_direct_corridor(grid, entry, exit);
            RepairKind::DirectCorridor
        }
    };

    tracing::debug!(?entry, ?exit, ?repair, "repaired entry-to-exit connectivity");
    debug_assert!(has_path(grid, entry, exit));
    repair
}

/// L-shaped corridor: along the entry row to the exit column, then along that column.
fn carve_direct_corridor(grid: &mut Grid, entry: Pos, exit: Pos) {
    let mut current = entry;
    open_cell(grid, current);
    while current.x != exit.x {
        current.x += (exit.x - current.x).signum();
        open_cell(grid, current);
    }
    while current.y != exit.y {
        current.y += (exit.y - current.y).signum();
        open_cell(grid, current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connected_grid_is_left_alone() {
        let mut grid = Grid::from_ascii(&["#####", "#...#", "#####"]);
        let before = grid.clone();
        let repair = ensure_path(&mut grid, Pos { y: 1, x: 1 }, Pos { y: 1, x: 3 });
        assert_eq!(repair, RepairKind::NotNeeded);
        assert_eq!(grid, before);
    }

    #[test]
    fn isolated_exit_is_joined_through_the_fewest_walls() {
        // Exit on an even cell next to the carved region, as happens on even-sized boards.
        let mut grid = Grid::from_ascii(&[
            "######", //
            "#...##", //
            "###.##", //
            "###.##", //
            "####.#", //
            "######",
        ]);
        let entry = Pos { y: 1, x: 1 };
        let exit = Pos { y: 4, x: 4 };

        let repair = ensure_path(&mut grid, entry, exit);

        assert_eq!(repair, RepairKind::CarvedPath { walls_cleared: 1 });
        assert!(has_path(&grid, entry, exit));
    }

    #[test]
    fn direct_corridor_runs_row_then_column() {
        let mut grid = Grid::new_filled(7, 7, true);
        carve_direct_corridor(&mut grid, Pos { y: 1, x: 1 }, Pos { y: 5, x: 4 });
        for x in 1..=4 {
            assert!(grid.is_open(Pos { y: 1, x }));
        }
        for y in 1..=5 {
            assert!(grid.is_open(Pos { y, x: 4 }));
        }
        assert_eq!(grid.open_cell_count(), 4 + 4);
    }

    #[test]
    fn solid_interior_is_carved_open() {
        let mut grid = Grid::new_filled(8, 8, true);
        let entry = Pos { y: 1, x: 1 };
        let exit = Pos { y: 6, x: 6 };
        let repair = ensure_path(&mut grid, entry, exit);
        assert!(matches!(repair, RepairKind::CarvedPath { walls_cleared: 11 }));
        assert!(has_path(&grid, entry, exit));
    }
}
