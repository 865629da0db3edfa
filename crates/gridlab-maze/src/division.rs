//! Recursive-division maze layout.
//!
//! Splits the open grid with randomly placed walls, each pierced by one
//! passage, recursing into both halves until a region is thinner than three
//! cells. Tall regions take horizontal walls, wide regions vertical ones.

use gridlab_core::{Grid, Position};
use rand::{Rng, RngExt};

use crate::{carve_guaranteed_path, is_solvable};

/// Generate a maze by recursive division.
///
/// Alternative layout to [`generate`](crate::generate): starts from a fully
/// open field and adds walls instead of carving corridors out of rock. Ends
/// with the same tail as the carving pipeline: endpoints forced open,
/// reachability checked, unreachable ends repaired.
pub fn recursive_division(grid: &mut Grid, rng: &mut impl Rng) {
    grid.fill(false);
    let size = grid.size();
    divide(grid, 0, 0, size, size, rng);
    let (start, end) = (grid.start(), grid.end());
    grid.set_wall(start, false);
    grid.set_wall(end, false);
    if !is_solvable(grid) {
        log::debug!("division left {end} unreachable from {start}, carving repair route");
        carve_guaranteed_path(grid);
    }
}

/// Wall off one split of the region at `(x, y)` sized `width` x `height`,
/// skipping the endpoints and one random passage cell, then divide both
/// halves. Recursion depth is bounded by the region dimensions, not the
/// cell count.
fn divide(grid: &mut Grid, x: i32, y: i32, width: i32, height: i32, rng: &mut impl Rng) {
    if width < 3 || height < 3 {
        return;
    }
    if width < height {
        let wall_y = y + rng.random_range(0..height - 2) + 1;
        let passage_x = x + rng.random_range(0..width);
        for i in x..x + width {
            let p = Position::new(i, wall_y);
            if grid.is_start(p) || grid.is_end(p) || i == passage_x {
                continue;
            }
            grid.set_wall(p, true);
        }
        divide(grid, x, y, width, wall_y - y, rng);
        divide(grid, x, wall_y + 1, width, y + height - wall_y - 1, rng);
    } else {
        let wall_x = x + rng.random_range(0..width - 2) + 1;
        let passage_y = y + rng.random_range(0..height);
        for i in y..y + height {
            let p = Position::new(wall_x, i);
            if grid.is_start(p) || grid.is_end(p) || i == passage_y {
                continue;
            }
            grid.set_wall(p, true);
        }
        divide(grid, x, y, wall_x - x, height, rng);
        divide(grid, wall_x + 1, y, x + width - wall_x - 1, height, rng);
    }
}
