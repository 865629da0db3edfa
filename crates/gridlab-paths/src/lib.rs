//! Search strategies over the obstacle [`Grid`].
//!
//! Four traversals share one expansion contract: neighbors are visited in
//! the canonical direction order (up, down, right, left) and every edge
//! costs 1. The visit variants return every cell expanded up to and
//! including the end cell (or the whole reachable component when the end is
//! unreachable); only A* reconstructs a start-to-end route, and only it can
//! report absence.
//!
//! | Strategy | Frontier | Output |
//! |---|---|---|
//! | [`dfs_visit`] | stack | visit order |
//! | [`bfs_visit`] | queue | visit order |
//! | [`astar_path`] | open list, first-minimum `f` scan | shortest path or `None` |
//! | [`dijkstra_visit`] | unvisited list, first-minimum cost scan | visit order |
//!
//! All bookkeeping lives in flat per-call arrays indexed by `y * size + x`;
//! nothing is cached between invocations.

mod astar;
mod bfs;
mod dfs;
mod dijkstra;
mod distance;

pub use astar::astar_path;
pub use bfs::bfs_visit;
pub use dfs::dfs_visit;
pub use dijkstra::dijkstra_visit;
pub use distance::manhattan;

use std::fmt;

use gridlab_core::{Grid, Position};

/// Sentinel cost meaning "not yet reached".
pub const UNREACHABLE: i32 = i32::MAX;

#[inline]
pub(crate) fn index(grid: &Grid, p: Position) -> usize {
    (p.y * grid.size() + p.x) as usize
}

#[inline]
pub(crate) fn position_at(grid: &Grid, idx: usize) -> Position {
    let size = grid.size();
    Position::new(idx as i32 % size, idx as i32 / size)
}

#[inline]
pub(crate) fn cell_count(grid: &Grid) -> usize {
    (grid.size() * grid.size()) as usize
}

// ---------------------------------------------------------------------------
// SearchKind
// ---------------------------------------------------------------------------

/// Selects one of the four search strategies.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchKind {
    Dfs,
    Bfs,
    Astar,
    Dijkstra,
}

impl SearchKind {
    /// All strategies, in display order.
    pub const ALL: [SearchKind; 4] = [
        SearchKind::Dfs,
        SearchKind::Bfs,
        SearchKind::Astar,
        SearchKind::Dijkstra,
    ];

    /// Run this strategy against the grid's start and end cells.
    ///
    /// `None` can only come from [`SearchKind::Astar`]; the visit variants
    /// always produce at least the start cell.
    pub fn search(self, grid: &Grid) -> Option<Vec<Position>> {
        match self {
            SearchKind::Dfs => Some(dfs_visit(grid)),
            SearchKind::Bfs => Some(bfs_visit(grid)),
            SearchKind::Astar => astar_path(grid),
            SearchKind::Dijkstra => Some(dijkstra_visit(grid)),
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchKind::Dfs => write!(f, "Depth-First Search (DFS)"),
            SearchKind::Bfs => write!(f, "Breadth-First Search (BFS)"),
            SearchKind::Astar => write!(f, "A* Search"),
            SearchKind::Dijkstra => write!(f, "Dijkstra's Algorithm"),
        }
    }
}
