use gridlab_core::{Grid, Position};

use crate::{UNREACHABLE, cell_count, index, manhattan, position_at};

/// A* shortest path from the grid's start cell to its end cell.
///
/// Returns the full path including both endpoints, or `None` when the open
/// list empties before the end is reached.
///
/// The open list is scanned linearly for the minimum `f = g + h` under the
/// Manhattan heuristic; among equal scores the earliest-pushed entry wins,
/// and removal preserves list order so that tie-break is stable. A node
/// already in the open list is re-parented only when the new tentative `g`
/// is strictly smaller.
pub fn astar_path(grid: &Grid) -> Option<Vec<Position>> {
    let len = cell_count(grid);
    let mut g = vec![UNREACHABLE; len];
    let mut f = vec![UNREACHABLE; len];
    let mut parent = vec![usize::MAX; len];
    let mut in_open = vec![false; len];
    let mut closed = vec![false; len];

    let start = grid.start();
    let end = grid.end();
    let si = index(grid, start);

    g[si] = 0;
    f[si] = manhattan(start, end);
    in_open[si] = true;
    let mut open = vec![start];

    while !open.is_empty() {
        let mut best = 0;
        for i in 1..open.len() {
            if f[index(grid, open[i])] < f[index(grid, open[best])] {
                best = i;
            }
        }
        let current = open.remove(best);
        let ci = index(grid, current);
        in_open[ci] = false;
        closed[ci] = true;

        if current == end {
            return Some(reconstruct(grid, &parent, end));
        }

        let current_g = g[ci];
        for next in grid.open_neighbors(current) {
            let ni = index(grid, next);
            if closed[ni] {
                continue;
            }
            let tentative = current_g + 1;
            if !in_open[ni] {
                in_open[ni] = true;
                open.push(next);
            } else if tentative >= g[ni] {
                continue;
            }
            parent[ni] = ci;
            g[ni] = tentative;
            f[ni] = tentative + manhattan(next, end);
        }
    }

    None
}

/// Walk the parent chain backward from the end cell, then reverse.
fn reconstruct(grid: &Grid, parent: &[usize], end: Position) -> Vec<Position> {
    let mut path = Vec::new();
    let mut ci = index(grid, end);
    while ci != usize::MAX {
        path.push(position_at(grid, ci));
        ci = parent[ci];
    }
    path.reverse();
    debug_assert_eq!(path.first(), Some(&grid.start()));
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortest_path_on_open_grid() {
        let g = Grid::new(5);
        let path = astar_path(&g).unwrap();
        assert_eq!(path.len(), 9);
        assert_eq!(path[0], g.start());
        assert_eq!(*path.last().unwrap(), g.end());
        for pair in path.windows(2) {
            assert_eq!(manhattan(pair[0], pair[1]), 1);
        }
    }

    #[test]
    fn tie_break_takes_first_minimum() {
        // Every frontier entry shares the same f on an open grid, so the
        // earliest-pushed cell wins each scan and the route is deterministic.
        let g = Grid::new(3);
        let path = astar_path(&g).unwrap();
        assert_eq!(
            path,
            vec![
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(0, 2),
                Position::new(1, 2),
                Position::new(2, 2),
            ]
        );
    }

    #[test]
    fn detour_around_u_wall() {
        // A wall column with a single gap at the bottom forces a detour well
        // past the Manhattan estimate.
        let mut g = Grid::new(5);
        g.set_end(Position::new(4, 0));
        for y in 0..4 {
            g.set_wall(Position::new(2, y), true);
        }
        let path = astar_path(&g).unwrap();
        assert_eq!(path.len(), 13);
        assert_eq!(path[0], g.start());
        assert_eq!(*path.last().unwrap(), g.end());
        assert!(path.contains(&Position::new(2, 4)));
    }

    #[test]
    fn none_when_goal_sealed() {
        let mut g = Grid::new(3);
        g.set_wall(Position::new(2, 1), true);
        g.set_wall(Position::new(1, 2), true);
        assert_eq!(astar_path(&g), None);
    }

    #[test]
    fn single_cell_grid() {
        let g = Grid::new(1);
        assert_eq!(astar_path(&g), Some(vec![Position::ZERO]));
    }
}
