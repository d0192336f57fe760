use crate::error::{Endpoint, MazeError};
use crate::graph;
use crate::grid::{Grid, Point};

/// A grid with a start and an end cell, both guaranteed free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    grid: Grid,
    start: Point,
    end: Point,
}

impl Layout {
    pub fn new(grid: Grid, start: Point, end: Point) -> Result<Self, MazeError> {
        check_endpoint(&grid, start, Endpoint::Start)?;
        check_endpoint(&grid, end, Endpoint::End)?;
        Ok(Self { grid, start, end })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn dim(&self) -> usize {
        self.grid.dim()
    }

    pub fn is_solvable(&self) -> bool {
        graph::is_solvable(&self.grid, self.start, self.end)
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }
}

pub(crate) fn check_endpoint(grid: &Grid, p: Point, which: Endpoint) -> Result<(), MazeError> {
    if !grid.contains(p) {
        return Err(MazeError::OutOfBounds {
            point: p,
            dim: grid.dim(),
        });
    }
    if !grid.is_free(p) {
        return Err(MazeError::BlockedEndpoint { which, point: p });
    }
    Ok(())
}

const CORRIDORS: [[u8; 8]; 8] = [
    [1, 1, 1, 1, 1, 1, 1, 1],
    [0, 0, 0, 0, 0, 0, 0, 0],
    [1, 1, 1, 1, 1, 1, 1, 0],
    [0, 0, 0, 0, 0, 0, 0, 0],
    [0, 1, 1, 1, 1, 1, 1, 1],
    [0, 1, 0, 0, 0, 1, 0, 0],
    [0, 1, 0, 1, 0, 1, 0, 1],
    [0, 0, 0, 1, 0, 0, 0, 1],
];

const SIDEWAYS: [[u8; 8]; 8] = [
    [1, 1, 1, 1, 1, 1, 1, 1],
    [0, 0, 0, 0, 0, 0, 0, 0],
    [0, 1, 1, 1, 1, 0, 1, 0],
    [0, 0, 0, 0, 0, 0, 1, 0],
    [0, 1, 1, 1, 1, 1, 1, 1],
    [0, 1, 0, 0, 0, 1, 0, 0],
    [0, 1, 0, 1, 0, 1, 0, 1],
    [0, 0, 0, 1, 0, 0, 0, 1],
];

const SPIRAL: [[u8; 8]; 8] = [
    [0, 0, 0, 1, 1, 0, 0, 0],
    [0, 1, 0, 0, 0, 0, 1, 0],
    [0, 1, 1, 1, 1, 1, 1, 1],
    [0, 1, 0, 1, 0, 0, 0, 1],
    [0, 1, 0, 1, 0, 1, 0, 1],
    [0, 1, 0, 1, 1, 1, 0, 1],
    [0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1],
];

/// The hand-drawn 8x8 mazes. Used as seeds for toggle-mode generation.
pub fn presets() -> Result<Vec<Layout>, MazeError> {
    Ok(vec![
        Layout::new(Grid::from_rows(&CORRIDORS)?, Point::new(0, 1), Point::new(7, 5))?,
        Layout::new(Grid::from_columns(&SIDEWAYS)?, Point::new(5, 7), Point::new(3, 7))?,
        Layout::new(Grid::from_rows(&SPIRAL)?, Point::new(4, 4), Point::new(7, 1))?,
    ])
}
