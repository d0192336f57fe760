use std::io;

use thiserror::Error;

use crate::grid::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::End => write!(f, "end"),
        }
    }
}

#[derive(Debug, Error)]
pub enum MazeError {
    #[error("point {point} is outside a {dim}x{dim} grid")]
    OutOfBounds { point: Point, dim: usize },

    #[error("{which} point {point} sits on a wall")]
    BlockedEndpoint { which: Endpoint, point: Point },

    #[error("grid is {got}x{got}, expected {expected}x{expected}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("grid literal contains {value}, expected 0 or 1")]
    BadLiteral { value: u8 },

    #[error("grid literal is not square")]
    NotSquare,

    #[error("start and end are not connected")]
    Unsolvable,

    #[error(transparent)]
    Io(#[from] io::Error),
}
