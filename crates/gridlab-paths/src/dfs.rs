use gridlab_core::{Grid, Position};

use crate::{cell_count, index};

/// Depth-first exploration from the grid's start cell.
///
/// Returns every cell in the order it was expanded, up to and including the
/// end cell, or the whole reachable component when the end is unreachable.
///
/// Neighbors are pushed in the canonical direction order, so the stack
/// expands them in reverse (left before right before down before up). Cells
/// are marked visited when popped; the stack may briefly hold duplicates, and
/// stale entries are skipped on pop.
pub fn dfs_visit(grid: &Grid) -> Vec<Position> {
    let mut visited = vec![false; cell_count(grid)];
    let mut stack = vec![grid.start()];
    let mut visit = Vec::new();
    let end = grid.end();

    while let Some(current) = stack.pop() {
        let ci = index(grid, current);
        if visited[ci] {
            continue;
        }
        visited[ci] = true;
        visit.push(current);
        if current == end {
            break;
        }
        for next in grid.open_neighbors(current) {
            if !visited[index(grid, next)] {
                stack.push(next);
            }
        }
    }
    visit
}
