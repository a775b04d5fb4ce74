//! Generation pipeline for one board: carve, widen, repair, then place entities.

use rand_chacha::rand_core::Rng;

use crate::grid::Grid;
use crate::tiers::TierConfig;

use super::carve::{add_extra_paths, carve_maze};
use super::model::GeneratedBoard;
use super::open_cell;
use super::placement::{PlacementContext, place_entities};
use super::repair::ensure_path;

pub struct BoardGenerator {
    config: TierConfig,
}

impl BoardGenerator {
    pub fn new(config: TierConfig) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid tier {config:?}");
        Self { config }
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> GeneratedBoard {
        let config = &self.config;
        let entry = config.entry();
        let exit = config.exit();
        let mut grid = Grid::new_filled(config.width, config.height, true);

        carve_maze(&mut grid, entry, rng);
        open_cell(&mut grid, exit);
        add_extra_paths(&mut grid, config.extra_paths, rng);
        let repair = ensure_path(&mut grid, entry, exit);

        let placement = place_entities(
            &PlacementContext { grid: &grid, entry, exit },
            config.trap_count,
            config.adversary_count,
            rng,
        );

        tracing::debug!(
            width = config.width,
            height = config.height,
            traps = placement.traps.len(),
            adversaries = placement.adversaries.len(),
            ?repair,
            "generated board"
        );

        GeneratedBoard {
            grid,
            entry,
            exit,
            traps: placement.traps,
            adversaries: placement.adversaries,
            repair,
            placement_relaxed: placement.relaxed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathfinding::{has_path, is_critical_cell, shortest_path};
    use crate::rng::seeded_rng;
    use crate::tiers::Difficulty;
    use crate::types::Pos;
    use proptest::prelude::*;

    fn generate(difficulty: Difficulty, seed: u64) -> GeneratedBoard {
        BoardGenerator::new(difficulty.config()).generate(&mut seeded_rng(seed))
    }

    fn border_is_solid(grid: &Grid) -> bool {
        let (width, height) = grid.dimensions();
        let (w, h) = (width as i32, height as i32);
        (0..w).all(|x| grid.is_wall(Pos { y: 0, x }) && grid.is_wall(Pos { y: h - 1, x }))
            && (0..h).all(|y| grid.is_wall(Pos { y, x: 0 }) && grid.is_wall(Pos { y, x: w - 1 }))
    }

    #[test]
    fn hard_board_has_a_route_from_entry_to_exit() {
        let board = generate(Difficulty::Hard, 2024);
        assert_eq!(board.entry, Pos { y: 1, x: 1 });
        assert_eq!(board.exit, Pos { y: 18, x: 18 });

        let path = shortest_path(&board.grid, board.entry, board.exit);

        assert_eq!(path.last(), Some(&board.exit));
        assert!(!path.contains(&board.entry));
        let mut previous = board.entry;
        for &step in &path {
            assert!(board.grid.is_open(step));
            assert_eq!(previous.x.abs_diff(step.x) + previous.y.abs_diff(step.y), 1);
            previous = step;
        }
    }

    #[test]
    fn same_seed_yields_identical_boards() {
        for difficulty in Difficulty::ALL {
            let first = generate(difficulty, 77);
            let second = generate(difficulty, 77);
            assert_eq!(first.canonical_bytes(), second.canonical_bytes());
        }
    }

    #[test]
    fn different_seeds_usually_differ() {
        let boards: Vec<Vec<u8>> =
            (0..8).map(|seed| generate(Difficulty::Medium, seed).canonical_bytes()).collect();
        assert!(boards.windows(2).any(|pair| pair[0] != pair[1]));
    }

    #[test]
    fn tier_counts_are_honored_on_default_boards() {
        for difficulty in Difficulty::ALL {
            let config = difficulty.config();
            let board = generate(difficulty, 5);
            assert_eq!(board.traps.len(), config.trap_count, "{difficulty}");
            assert_eq!(board.adversaries.len(), config.adversary_count, "{difficulty}");
        }
    }

    #[test]
    fn minimal_board_still_connects() {
        let config = TierConfig {
            width: 5,
            height: 5,
            lives: 1,
            time_limit_ms: 0,
            trap_count: 2,
            adversary_count: 1,
            extra_paths: 0,
        };
        let board = BoardGenerator::new(config).generate(&mut seeded_rng(3));
        assert!(has_path(&board.grid, board.entry, board.exit));
        assert!(border_is_solid(&board.grid));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn generated_boards_keep_their_invariants(seed in any::<u64>(), tier in 0_usize..3) {
            let board = generate(Difficulty::ALL[tier], seed);

            prop_assert!(has_path(&board.grid, board.entry, board.exit));
            prop_assert!(border_is_solid(&board.grid));

            let mut occupied: Vec<Pos> =
                board.traps.iter().chain(&board.adversaries).copied().collect();
            for &pos in &occupied {
                prop_assert!(board.grid.is_open(pos));
                prop_assert!(pos != board.entry && pos != board.exit);
                if !board.placement_relaxed {
                    prop_assert!(!is_critical_cell(&board.grid, pos, board.entry, board.exit));
                }
            }
            let total = occupied.len();
            occupied.sort();
            occupied.dedup();
            prop_assert_eq!(occupied.len(), total);
        }
    }
}
