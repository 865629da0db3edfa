use std::collections::VecDeque;

use gridlab_core::{Grid, Position};

use crate::{cell_count, index};

/// Breadth-first exploration from the grid's start cell.
///
/// Returns every cell in dequeue order, up to and including the end cell, or
/// the whole reachable component when the end is unreachable. Cells are
/// marked visited when enqueued, so the queue never holds duplicates.
pub fn bfs_visit(grid: &Grid) -> Vec<Position> {
    let mut visited = vec![false; cell_count(grid)];
    let mut queue = VecDeque::new();
    let mut visit = Vec::new();
    let end = grid.end();

    visited[index(grid, grid.start())] = true;
    queue.push_back(grid.start());

    while let Some(current) = queue.pop_front() {
        visit.push(current);
        if current == end {
            break;
        }
        for next in grid.open_neighbors(current) {
            let ni = index(grid, next);
            if !visited[ni] {
                visited[ni] = true;
                queue.push_back(next);
            }
        }
    }
    visit
}
