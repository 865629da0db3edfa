use gridlab_core::Position;

/// Manhattan (L1) distance between two positions.
///
/// Never overestimates the true remaining cost on a 4-directional unit-cost
/// grid, so it is an admissible (and consistent) A* heuristic.
#[inline]
pub fn manhattan(a: Position, b: Position) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}
