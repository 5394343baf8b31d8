//! # maze_pathfinding
//!
//! Generates perfect mazes (every corridor cell reachable, no loops) with
//! [Eller's algorithm](http://www.neocomputer.org/projects/eller.html) and solves them with an
//! incremental best-first search. The search does one unit of work per
//! [tick](maze::Maze::advance), so a render loop can animate the growing frontier, the path
//! being traced back from the goal and a colour gradient flowing along the finished route.
//!
//! Drawing, input handling and frame timing are left to the caller, which reads
//! [CellState](cell::CellState)s from the [Grid](grid::Grid) and feeds edits back through
//! [Maze](maze::Maze).
pub mod cell;
mod error;
pub mod generator;
pub mod grid;
pub mod maze;
pub mod search;

pub use cell::{Cell, CellKind, CellState, Marker, Rgb};
pub use error::{MazeError, Result};
pub use grid::Grid;
pub use maze::{EditMode, Maze};
pub use search::{Pathfinder, Phase, SearchConfig};

/// Cost of a cardinal move.
pub const C: f64 = 1.0;
/// Cost of a diagonal move.
pub const D: f64 = std::f64::consts::SQRT_2;

pub(crate) const N_SMALLVEC_SIZE: usize = 8;

/// First colour of the gradient painted along a solved path.
pub const GRADIENT_START: Rgb = Rgb::new(0x00, 0xF2, 0x60);
/// Colour the path gradient walks towards.
pub const GRADIENT_END: Rgb = Rgb::new(0x05, 0x75, 0xE6);
