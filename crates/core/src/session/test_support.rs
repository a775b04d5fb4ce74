//! Hand-drawn boards shared by the session test suites.
//!
//! Legend: `#` wall, `@` player start, `$` goal, `^` trap, `E` adversary, anything else open.

use super::*;
use crate::mapgen::RepairKind;

pub(super) fn session_from_rows(rows: &[&str], lives: u32, time_limit_ms: u64) -> Session {
    let grid = Grid::from_ascii(rows);
    let mut entry = None;
    let mut exit = None;
    let mut traps = Vec::new();
    let mut adversaries = Vec::new();
    for (y, row) in rows.iter().enumerate() {
        for (x, ch) in row.chars().enumerate() {
            let pos = Pos { y: y as i32, x: x as i32 };
            match ch {
                '@' => entry = Some(pos),
                '$' => exit = Some(pos),
                '^' => traps.push(pos),
                'E' => adversaries.push(pos),
                _ => {}
            }
        }
    }

    let (width, height) = grid.dimensions();
    let config = TierConfig {
        width,
        height,
        lives,
        time_limit_ms,
        trap_count: traps.len(),
        adversary_count: adversaries.len(),
        extra_paths: 0,
    };
    let board = GeneratedBoard {
        grid,
        entry: entry.expect("fixture needs a player start"),
        exit: exit.expect("fixture needs a goal"),
        traps,
        adversaries,
        repair: RepairKind::NotNeeded,
        placement_relaxed: false,
    };
    Session::from_board(Difficulty::Medium, config, board, 7)
}

/// Straight corridor: player, one trap, open floor, goal.
pub(super) fn trap_corridor(lives: u32) -> Session {
    session_from_rows(&["#######", "#@^..$#", "#######"], lives, 0)
}

/// Open room with a single adversary two cells east of the player.
pub(super) fn adversary_room(lives: u32) -> Session {
    session_from_rows(
        &[
            "#######", //
            "#.....#", //
            "#@.E..#", //
            "#.....#", //
            "#....$#", //
            "#######",
        ],
        lives,
        0,
    )
}
