use gridlab_core::{Grid, Position};

use crate::{UNREACHABLE, cell_count, index};

/// Dijkstra exploration from the grid's start cell.
///
/// Returns every cell in the order it was settled, up to and including the
/// end cell, or the whole reachable component when the end is unreachable.
///
/// The unvisited list is scanned linearly for the minimum cost with the same
/// first-minimum tie-break as [`astar_path`](crate::astar_path), which on a
/// unit-cost grid settles cells in exactly breadth-first order.
///
/// The early exit at the end cell only fires when the end differs from the
/// start; a coincident start/end pair settles the entire reachable component
/// instead of stopping immediately.
pub fn dijkstra_visit(grid: &Grid) -> Vec<Position> {
    let len = cell_count(grid);
    let mut dist = vec![UNREACHABLE; len];
    let mut visited = vec![false; len];
    let mut in_queue = vec![false; len];

    let start = grid.start();
    let end = grid.end();
    let si = index(grid, start);

    dist[si] = 0;
    in_queue[si] = true;
    let mut unvisited = vec![start];
    let mut visit = Vec::new();

    while !unvisited.is_empty() {
        let mut best = 0;
        for i in 1..unvisited.len() {
            if dist[index(grid, unvisited[i])] < dist[index(grid, unvisited[best])] {
                best = i;
            }
        }
        let current = unvisited.remove(best);
        let ci = index(grid, current);
        in_queue[ci] = false;
        visited[ci] = true;
        visit.push(current);

        if end != start && current == end {
            break;
        }

        for next in grid.open_neighbors(current) {
            let ni = index(grid, next);
            if visited[ni] {
                continue;
            }
            let alt = dist[ci] + 1;
            if alt < dist[ni] {
                dist[ni] = alt;
                if !in_queue[ni] {
                    in_queue[ni] = true;
                    unvisited.push(next);
                }
            }
        }
    }
    visit
}
