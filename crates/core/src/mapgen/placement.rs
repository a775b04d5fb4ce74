//! Rejection-sampled trap and adversary placement.
//!
//! A candidate cell must be open, free of the player, the goal and every other placed entity,
//! and must not be critical for the entry-to-exit connection. When the strict sampler runs out
//! of attempts it relaxes the critical-path rule, and as a last resort scans the board in
//! row-major order.

use rand_chacha::rand_core::Rng;

use crate::grid::Grid;
use crate::pathfinding::is_critical_cell;
use crate::rng::random_usize;
use crate::types::{GameError, Pos};

const ATTEMPTS_PER_ENTITY: usize = 200;
const MIN_ATTEMPT_BUDGET: usize = 2_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub traps: Vec<Pos>,
    pub adversaries: Vec<Pos>,
    /// True when at least one entity was placed without the critical-path rule.
    pub relaxed: bool,
}

pub(super) struct PlacementContext<'a> {
    pub(super) grid: &'a Grid,
    pub(super) entry: Pos,
    pub(super) exit: Pos,
}

impl PlacementContext<'_> {
    fn is_free(&self, pos: Pos, occupied: &[Pos]) -> bool {
        self.grid.is_open(pos) && pos != self.entry && pos != self.exit && !occupied.contains(&pos)
    }

    fn accepts(&self, pos: Pos, occupied: &[Pos], allow_critical: bool) -> bool {
        self.is_free(pos, occupied)
            && (allow_critical || !is_critical_cell(self.grid, pos, self.entry, self.exit))
    }
}

pub(super) fn place_entities<R: Rng + ?Sized>(
    context: &PlacementContext<'_>,
    trap_count: usize,
    adversary_count: usize,
    rng: &mut R,
) -> Placement {
    let mut occupied = Vec::with_capacity(trap_count + adversary_count);
    let mut relaxed = false;

    let traps = place_batch(context, trap_count, &mut occupied, &mut relaxed, rng);
    let adversaries = place_batch(context, adversary_count, &mut occupied, &mut relaxed, rng);

    Placement { traps, adversaries, relaxed }
}

fn place_batch<R: Rng + ?Sized>(
    context: &PlacementContext<'_>,
    count: usize,
    occupied: &mut Vec<Pos>,
    relaxed: &mut bool,
    rng: &mut R,
) -> Vec<Pos> {
    let mut placed = Vec::with_capacity(count);
    let budget = attempt_budget(count);

    let Err(err) = sample_cells(context, count, occupied, &mut placed, false, budget, rng) else {
        return placed;
    };
    tracing::warn!(%err, "relaxing critical-path rule for entity placement");
    *relaxed = true;

    if sample_cells(context, count, occupied, &mut placed, true, budget, rng).is_ok() {
        return placed;
    }

    for pos in context.grid.interior_cells() {
        if placed.len() >= count {
            break;
        }
        if context.is_free(pos, occupied) {
            occupied.push(pos);
            placed.push(pos);
        }
    }
    if placed.len() < count {
        tracing::warn!(placed = placed.len(), requested = count, "board has no free cells left");
    }
    placed
}

/// Draws random interior cells until `placed` holds `count` entries or `budget` draws are spent.
fn sample_cells<R: Rng + ?Sized>(
    context: &PlacementContext<'_>,
    count: usize,
    occupied: &mut Vec<Pos>,
    placed: &mut Vec<Pos>,
    allow_critical: bool,
    budget: usize,
    rng: &mut R,
) -> Result<(), GameError> {
    let (width, height) = context.grid.dimensions();
    let mut attempts = 0;

    while placed.len() < count {
        if attempts >= budget {
            return Err(GameError::GenerationExhausted { placed: placed.len(), requested: count });
        }
        attempts += 1;

        let pos = Pos {
            y: random_usize(rng, 1, height - 2) as i32,
            x: random_usize(rng, 1, width - 2) as i32,
        };
        if context.accepts(pos, occupied, allow_critical) {
            occupied.push(pos);
            placed.push(pos);
        }
    }

    Ok(())
}

fn attempt_budget(count: usize) -> usize {
    (count * ATTEMPTS_PER_ENTITY).max(MIN_ATTEMPT_BUDGET)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathfinding::has_path;
    use crate::rng::seeded_rng;

    fn context_for(grid: &Grid, entry: Pos, exit: Pos) -> PlacementContext<'_> {
        PlacementContext { grid, entry, exit }
    }

    fn comb_grid() -> Grid {
        // Spine along row 1 with dead-end teeth hanging below it.
        Grid::from_ascii(&[
            "#########", //
            "#.......#", //
            "#.#.#.#.#", //
            "#.#.#.#.#", //
            "#########",
        ])
    }

    #[test]
    fn strict_placement_uses_only_dead_ends() {
        let grid = comb_grid();
        let context = context_for(&grid, Pos { y: 1, x: 1 }, Pos { y: 1, x: 7 });

        let placement = place_entities(&context, 4, 2, &mut seeded_rng(21));

        assert!(!placement.relaxed);
        assert_eq!(placement.traps.len(), 4);
        assert_eq!(placement.adversaries.len(), 2);
        for pos in placement.traps.iter().chain(&placement.adversaries) {
            assert!(pos.y >= 2, "{pos:?} sits on the spine");
            assert!(!is_critical_cell(&grid, *pos, context.entry, context.exit));
        }
    }

    #[test]
    fn placements_never_overlap_or_touch_endpoints() {
        let grid = comb_grid();
        let context = context_for(&grid, Pos { y: 1, x: 1 }, Pos { y: 1, x: 7 });

        for seed in 0..20 {
            let placement = place_entities(&context, 5, 3, &mut seeded_rng(seed));
            let mut all: Vec<Pos> =
                placement.traps.iter().chain(&placement.adversaries).copied().collect();
            assert!(all.iter().all(|&pos| grid.is_open(pos)));
            assert!(!all.contains(&context.entry) && !all.contains(&context.exit));
            let total = all.len();
            all.sort();
            all.dedup();
            assert_eq!(all.len(), total, "seed={seed} placed two entities on one cell");
        }
    }

    #[test]
    fn single_corridor_forces_relaxation() {
        let grid = Grid::from_ascii(&["#######", "#.....#", "#######"]);
        let context = context_for(&grid, Pos { y: 1, x: 1 }, Pos { y: 1, x: 5 });

        let placement = place_entities(&context, 2, 1, &mut seeded_rng(4));

        assert!(placement.relaxed);
        assert_eq!(placement.traps.len() + placement.adversaries.len(), 3);
        assert!(has_path(&grid, context.entry, context.exit));
    }

    #[test]
    fn overfull_request_places_what_fits() {
        let grid = Grid::from_ascii(&["#####", "#...#", "#####"]);
        let context = context_for(&grid, Pos { y: 1, x: 1 }, Pos { y: 1, x: 3 });

        let placement = place_entities(&context, 3, 2, &mut seeded_rng(1));

        assert_eq!(placement.traps, vec![Pos { y: 1, x: 2 }]);
        assert!(placement.adversaries.is_empty());
    }

    #[test]
    fn exhausted_strict_sampler_reports_progress() {
        let grid = Grid::from_ascii(&["#####", "#...#", "#####"]);
        let context = context_for(&grid, Pos { y: 1, x: 1 }, Pos { y: 1, x: 3 });
        let mut occupied = Vec::new();
        let mut placed = Vec::new();

        let mut rng = seeded_rng(2);

        let err = sample_cells(&context, 1, &mut occupied, &mut placed, false, 50, &mut rng)
            .expect_err("the only free cell is critical");
        assert_eq!(err, GameError::GenerationExhausted { placed: 0, requested: 1 });
    }
}
