use grid_util::Point;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MazeError {
    /// The half-resolution lattice behind a `height x width` grid must hold at least two
    /// corridor cells, one for the start and one for the goal, and the grid must be
    /// addressable.
    #[error("a {height}x{width} maze is too small or too large")]
    InvalidDimensions { height: usize, width: usize },

    #[error("point {point:?} lies outside the {height}x{width} grid")]
    OutOfBounds {
        point: Point,
        height: usize,
        width: usize,
    },

    /// Colours may only be assigned to cells tagged as part of the coloured path.
    #[error("cell {point:?} is not tagged as custom-coloured")]
    NotCustomColored { point: Point },
}

pub type Result<T> = std::result::Result<T, MazeError>;
