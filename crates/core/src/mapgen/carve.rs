//! Randomized backtracking carve and the extra-path pass that adds loops to it.

use rand_chacha::rand_core::Rng;

use crate::grid::Grid;
use crate::rng::{one_in, random_usize};
use crate::types::{Direction, Pos};

use super::open_cell;

const CARVE_STEPS: [(i32, i32); 4] = [(-2, 0), (2, 0), (0, -2), (0, 2)];

/// Carves a spanning tree of passages from `entry` into an all-walls grid.
///
/// Every carved cell stays reachable from `entry` because a cell is only opened together with
/// the connector between it and an already-carved cell.
pub(super) fn carve_maze<R: Rng + ?Sized>(grid: &mut Grid, entry: Pos, rng: &mut R) {
    open_cell(grid, entry);
    let mut stack = vec![entry];

    while let Some(&current) = stack.last() {
        let candidates: Vec<Pos> = CARVE_STEPS
            .iter()
            .map(|&(dx, dy)| current.offset(dx, dy))
            .filter(|&next| grid.is_interior(next) && grid.is_wall(next))
            .collect();

        if candidates.is_empty() {
            stack.pop();
            continue;
        }

        let next = candidates[random_usize(rng, 0, candidates.len() - 1)];
        let connector = Pos { y: (current.y + next.y) / 2, x: (current.x + next.x) / 2 };
        open_cell(grid, next);
        open_cell(grid, connector);
        stack.push(next);
    }
}

/// Opens `count` random interior walls, each optionally together with one cardinal neighbor.
/// Removing walls only ever adds connectivity, so the carve's guarantees survive.
pub(super) fn add_extra_paths<R: Rng + ?Sized>(grid: &mut Grid, count: usize, rng: &mut R) {
    let (width, height) = grid.dimensions();
    for _ in 0..count {
        let pos = Pos {
            y: random_usize(rng, 1, height - 2) as i32,
            x: random_usize(rng, 1, width - 2) as i32,
        };
        if !grid.is_wall(pos) {
            continue;
        }
        open_cell(grid, pos);

        if one_in(rng, 2) {
            let (dx, dy) = Direction::ALL[random_usize(rng, 0, 3)].delta();
            let neighbor = pos.offset(dx, dy);
            if grid.is_interior(neighbor) {
                open_cell(grid, neighbor);
            }
        }
    }
}
