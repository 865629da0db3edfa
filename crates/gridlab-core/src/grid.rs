//! The obstacle grid: a square wall matrix with designated start and end
//! cells.
//!
//! All bounds checking funnels through [`Grid::is_valid_position`]; the
//! accessors absorb out-of-bounds coordinates (reads answer "wall", writes do
//! nothing) so bad indices cannot escape this module.

use std::fmt;

use rand::{Rng, RngExt};

use crate::geom::Position;

// ---------------------------------------------------------------------------
// GridConfig
// ---------------------------------------------------------------------------

/// Parameters for [`Grid::configure`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    /// Side length of the square grid.
    pub size: i32,
    /// Probability that any given cell is randomized to a wall.
    pub wall_probability: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: 60,
            wall_probability: 0.3,
        }
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A square matrix of wall/open cells with one start and one end cell.
///
/// The start and end cells are always in bounds and never walls; the setters
/// uphold this by forcing the target cell open.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    size: i32,
    /// Row-major wall flags, indexed by `y * size + x`.
    walls: Vec<bool>,
    start: Position,
    end: Position,
}

impl Grid {
    /// Create an all-open grid with `start` in the top-left and `end` in the
    /// bottom-right corner.
    ///
    /// `size` must be at least 1. A 1×1 grid has `start == end`, the only
    /// legal cell.
    pub fn new(size: i32) -> Self {
        debug_assert!(size > 0, "grid size must be positive");
        Self {
            size,
            walls: vec![false; (size * size) as usize],
            start: Position::ZERO,
            end: Position::new(size - 1, size - 1),
        }
    }

    /// Build a fresh random grid: random start/end (re-rolled apart when the
    /// grid has more than one cell), then walls drawn independently with
    /// `config.wall_probability`.
    pub fn configure(config: &GridConfig, rng: &mut impl Rng) -> Self {
        let mut grid = Grid::new(config.size);
        grid.randomize_endpoints(rng);
        grid.randomize(config.wall_probability, rng);
        grid
    }

    /// Side length of the grid.
    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    #[inline]
    fn index(&self, p: Position) -> usize {
        (p.y * self.size + p.x) as usize
    }

    /// Whether both coordinates lie in `[0, size)`.
    ///
    /// The single source of truth for bounds checks; nothing touches the
    /// matrix without this holding first.
    #[inline]
    pub fn is_valid_position(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.size && y >= 0 && y < self.size
    }

    /// Whether the position lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Position) -> bool {
        self.is_valid_position(p.x, p.y)
    }

    /// Whether the cell at `p` is a wall. Out-of-bounds positions answer
    /// `true`, so traversals never step outside.
    #[inline]
    pub fn is_wall(&self, p: Position) -> bool {
        if !self.contains(p) {
            return true;
        }
        self.walls[self.index(p)]
    }

    /// Set the wall flag at `p`. Does nothing if out of bounds.
    #[inline]
    pub fn set_wall(&mut self, p: Position, wall: bool) {
        if !self.contains(p) {
            return;
        }
        let idx = self.index(p);
        self.walls[idx] = wall;
    }

    /// Set every cell to the given wall flag, including the start and end
    /// cells.
    pub fn fill(&mut self, wall: bool) {
        self.walls.fill(wall);
    }

    /// The start cell. Always in bounds and open.
    #[inline]
    pub fn start(&self) -> Position {
        self.start
    }

    /// The end cell. Always in bounds and open.
    #[inline]
    pub fn end(&self) -> Position {
        self.end
    }

    /// Whether `p` is the start cell.
    #[inline]
    pub fn is_start(&self, p: Position) -> bool {
        p == self.start
    }

    /// Whether `p` is the end cell.
    #[inline]
    pub fn is_end(&self, p: Position) -> bool {
        p == self.end
    }

    /// Move the start cell, forcing it open. Ignored if out of bounds.
    pub fn set_start(&mut self, p: Position) {
        if !self.contains(p) {
            return;
        }
        self.start = p;
        self.set_wall(p, false);
    }

    /// Move the end cell, forcing it open. Ignored if out of bounds.
    pub fn set_end(&mut self, p: Position) {
        if !self.contains(p) {
            return;
        }
        self.end = p;
        self.set_wall(p, false);
    }

    /// The in-bounds cardinal neighbors of `p`, in [`DIRECTIONS`] order.
    ///
    /// [`DIRECTIONS`]: crate::geom::DIRECTIONS
    pub fn neighbors(&self, p: Position) -> impl Iterator<Item = Position> + '_ {
        p.neighbors_4().into_iter().filter(move |&q| self.contains(q))
    }

    /// The in-bounds, non-wall cardinal neighbors of `p`, in the same order
    /// as [`Grid::neighbors`].
    pub fn open_neighbors(&self, p: Position) -> impl Iterator<Item = Position> + '_ {
        self.neighbors(p).filter(move |&q| !self.is_wall(q))
    }

    /// Set every cell to a wall independently with probability
    /// `wall_probability`, then force the start and end cells open.
    pub fn randomize(&mut self, wall_probability: f64, rng: &mut impl Rng) {
        for w in self.walls.iter_mut() {
            *w = rng.random::<f64>() < wall_probability;
        }
        let (start, end) = (self.start, self.end);
        self.set_wall(start, false);
        self.set_wall(end, false);
    }

    /// Pick new random start and end cells, both forced open.
    ///
    /// While the end coincides with the start (and the grid has more than
    /// one cell), only the end is re-rolled, so the start is always the
    /// first pair drawn from `rng`.
    pub fn randomize_endpoints(&mut self, rng: &mut impl Rng) {
        let start = self.random_position(rng);
        let mut end = self.random_position(rng);
        while end == start && self.size > 1 {
            end = self.random_position(rng);
        }
        self.set_start(start);
        self.set_end(end);
    }

    fn random_position(&self, rng: &mut impl Rng) -> Position {
        Position::new(
            rng.random_range(0..self.size),
            rng.random_range(0..self.size),
        )
    }

    /// Row-major iterator over every position in the grid.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let size = self.size;
        (0..size).flat_map(move |y| (0..size).map(move |x| Position::new(x, y)))
    }

    /// Number of non-wall cells.
    pub fn count_open(&self) -> usize {
        self.walls.iter().filter(|&&w| !w).count()
    }
}

impl fmt::Display for Grid {
    /// ASCII rendering: `#` wall, `.` open, `S` start, `E` end.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.size {
            for x in 0..self.size {
                let p = Position::new(x, y);
                let c = if self.is_start(p) {
                    'S'
                } else if self.is_end(p) {
                    'E'
                } else if self.is_wall(p) {
                    '#'
                } else {
                    '.'
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
