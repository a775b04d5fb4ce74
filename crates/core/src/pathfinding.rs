//! Breadth-first connectivity checks and path reconstruction over a `Grid`.
//! Generation uses these to guarantee solvability; placement uses them to keep obstacles
//! off cells that every entry-to-exit route depends on.

use std::collections::VecDeque;

use crate::grid::Grid;
use crate::types::Pos;

/// Neighbor order used by every search: up, right, down, left.
const NEIGHBOR_OFFSETS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

pub fn neighbors(p: Pos) -> [Pos; 4] {
    NEIGHBOR_OFFSETS.map(|(dx, dy)| p.offset(dx, dy))
}

pub fn manhattan(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

pub fn has_path(grid: &Grid, start: Pos, end: Pos) -> bool {
    if !grid.is_open(start) || !grid.is_open(end) {
        return false;
    }
    if start == end {
        return true;
    }

    let (width, height) = grid.dimensions();
    let mut visited = vec![false; width * height];
    let mut queue = VecDeque::from([start]);
    visited[cell_index(width, start)] = true;

    while let Some(current) = queue.pop_front() {
        for next in neighbors(current) {
            if !grid.is_open(next) {
                continue;
            }
            let idx = cell_index(width, next);
            if visited[idx] {
                continue;
            }
            if next == end {
                return true;
            }
            visited[idx] = true;
            queue.push_back(next);
        }
    }

    false
}

/// Shortest open-cell route from `start` to `end`.
///
/// The result excludes `start` and ends with `end`, so its first element is adjacent to
/// `start`. Empty when `end` is unreachable or equal to `start`.
pub fn shortest_path(grid: &Grid, start: Pos, end: Pos) -> Vec<Pos> {
    if start == end || !grid.is_open(start) || !grid.is_open(end) {
        return Vec::new();
    }

    let (width, height) = grid.dimensions();
    // Index into NEIGHBOR_OFFSETS of the step that first reached each cell.
    let mut incoming: Vec<Option<u8>> = vec![None; width * height];
    let mut visited = vec![false; width * height];
    let mut queue = VecDeque::from([start]);
    visited[cell_index(width, start)] = true;

    while let Some(current) = queue.pop_front() {
        if current == end {
            return walk_back(&incoming, width, start, end);
        }
        for (dir, next) in neighbors(current).into_iter().enumerate() {
            if !grid.is_open(next) {
                continue;
            }
            let idx = cell_index(width, next);
            if visited[idx] {
                continue;
            }
            visited[idx] = true;
            incoming[idx] = Some(dir as u8);
            queue.push_back(next);
        }
    }

    Vec::new()
}

/// Cheapest interior route from `start` to `end` where entering a wall costs one and entering
/// an open cell costs nothing. The result includes both endpoints and is `None` only when the
/// grid has no interior connecting them.
pub fn cheapest_carve_path(grid: &Grid, start: Pos, end: Pos) -> Option<Vec<Pos>> {
    if !grid.is_interior(start) || !grid.is_interior(end) {
        return None;
    }

    let (width, height) = grid.dimensions();
    let mut cost = vec![u32::MAX; width * height];
    let mut incoming: Vec<Option<u8>> = vec![None; width * height];
    let mut deque = VecDeque::from([start]);
    cost[cell_index(width, start)] = u32::from(grid.is_wall(start));

    while let Some(current) = deque.pop_front() {
        if current == end {
            let mut path = walk_back(&incoming, width, start, end);
            path.insert(0, start);
            return Some(path);
        }
        let current_cost = cost[cell_index(width, current)];
        for (dir, next) in neighbors(current).into_iter().enumerate() {
            if !grid.is_interior(next) {
                continue;
            }
            let step = u32::from(grid.is_wall(next));
            let idx = cell_index(width, next);
            if current_cost + step >= cost[idx] {
                continue;
            }
            cost[idx] = current_cost + step;
            incoming[idx] = Some(dir as u8);
            if step == 0 {
                deque.push_front(next);
            } else {
                deque.push_back(next);
            }
        }
    }

    None
}

/// An open cell is critical when walling it off would disconnect `entry` from `exit`.
/// The check runs on a scratch copy; `grid` itself is never modified.
pub fn is_critical_cell(grid: &Grid, cell: Pos, entry: Pos, exit: Pos) -> bool {
    if grid.is_wall(cell) {
        return false;
    }
    if cell == entry || cell == exit {
        return true;
    }

    let mut scratch = grid.clone();
    if scratch.set_wall(cell, true).is_err() {
        return false;
    }
    !has_path(&scratch, entry, exit)
}

fn walk_back(incoming: &[Option<u8>], width: usize, start: Pos, end: Pos) -> Vec<Pos> {
    let mut path = Vec::new();
    let mut current = end;
    while current != start {
        path.push(current);
        let Some(dir) = incoming[cell_index(width, current)] else {
            break;
        };
        let (dx, dy) = NEIGHBOR_OFFSETS[dir as usize];
        current = current.offset(-dx, -dy);
    }
    path.reverse();
    path
}

fn cell_index(width: usize, pos: Pos) -> usize {
    (pos.y as usize) * width + (pos.x as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor_with_dead_end() -> Grid {
        Grid::from_ascii(&[
            "#######", //
            "#.....#", //
            "#.###.#", //
            "#.#...#", //
            "#######",
        ])
    }

    #[test]
    fn has_path_follows_open_cells_only() {
        let grid = corridor_with_dead_end();
        assert!(has_path(&grid, Pos { y: 1, x: 1 }, Pos { y: 3, x: 3 }));
        assert!(has_path(&grid, Pos { y: 3, x: 1 }, Pos { y: 3, x: 5 }));
        assert!(!has_path(&grid, Pos { y: 1, x: 1 }, Pos { y: 2, x: 2 }));
    }

    #[test]
    fn has_path_rejects_out_of_range_endpoints() {
        let grid = corridor_with_dead_end();
        assert!(!has_path(&grid, Pos { y: 1, x: 1 }, Pos { y: 1, x: 40 }));
    }

    #[test]
    fn shortest_path_is_adjacent_chain_ending_at_goal() {
        let grid = corridor_with_dead_end();
        let start = Pos { y: 3, x: 1 };
        let end = Pos { y: 3, x: 3 };
        let path = shortest_path(&grid, start, end);

        // Up the left column, across the top, down the right column, back left.
        assert_eq!(path.len(), 2 + 4 + 2 + 2);
        assert_eq!(manhattan(start, path[0]), 1);
        assert_eq!(path.last(), Some(&end));
        for pair in path.windows(2) {
            assert_eq!(manhattan(pair[0], pair[1]), 1);
        }
        assert!(path.iter().all(|&pos| grid.is_open(pos)));
    }

    #[test]
    fn shortest_path_is_empty_when_unreachable_or_trivial() {
        let grid = Grid::from_ascii(&["#####", "#.#.#", "#####"]);
        assert!(shortest_path(&grid, Pos { y: 1, x: 1 }, Pos { y: 1, x: 3 }).is_empty());
        assert!(shortest_path(&grid, Pos { y: 1, x: 1 }, Pos { y: 1, x: 1 }).is_empty());
    }

    #[test]
    fn cheapest_carve_path_prefers_existing_corridors() {
        let grid = Grid::from_ascii(&[
            "#######", //
            "#.....#", //
            "#####.#", //
            "#.....#", //
            "#.#####", //
            "#.....#", //
            "#######",
        ]);
        let start = Pos { y: 1, x: 1 };
        let end = Pos { y: 5, x: 5 };
        let mut blocked = grid.clone();
        blocked.set_wall(Pos { y: 3, x: 1 }, true).unwrap();

        let path = cheapest_carve_path(&blocked, start, end).expect("interior connects");
        let walls_cleared = path.iter().filter(|&&pos| blocked.is_wall(pos)).count();
        assert_eq!(walls_cleared, 1);
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&end));
    }

    #[test]
    fn cheapest_carve_path_stays_inside_the_border() {
        let grid = Grid::new_filled(6, 6, true);
        let path = cheapest_carve_path(&grid, Pos { y: 1, x: 1 }, Pos { y: 4, x: 4 })
            .expect("solid interior still connects");
        assert!(path.iter().all(|&pos| grid.is_interior(pos)));
        assert_eq!(path.len(), 7);
    }

    #[test]
    fn critical_cells_are_single_points_of_failure() {
        let grid = corridor_with_dead_end();
        let entry = Pos { y: 1, x: 1 };
        let exit = Pos { y: 3, x: 3 };

        assert!(is_critical_cell(&grid, Pos { y: 1, x: 3 }, entry, exit));
        assert!(!is_critical_cell(&grid, Pos { y: 3, x: 1 }, entry, exit));
        assert!(!is_critical_cell(&grid, Pos { y: 0, x: 0 }, entry, exit));
        assert!(is_critical_cell(&grid, exit, entry, exit));
    }

    #[test]
    fn critical_check_leaves_grid_untouched() {
        let grid = corridor_with_dead_end();
        let before = grid.clone();
        let _ = is_critical_cell(&grid, Pos { y: 1, x: 3 }, Pos { y: 1, x: 1 }, Pos { y: 3, x: 3 });
        assert_eq!(grid, before);
    }
}
