//! Obstacle-grid model and geometry.
//!
//! Foundational types for the gridlab engine: the [`Position`] coordinate
//! with its canonical neighbor order [`DIRECTIONS`], and the square wall
//! [`Grid`] that the maze generator and the search strategies operate on.

pub mod geom;
pub mod grid;

pub use geom::{DIRECTIONS, Position};
pub use grid::{Grid, GridConfig};
