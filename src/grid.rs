use std::fmt;

use crate::error::MazeError;

pub const HAT_DIM: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The neighbouring point one unit towards `dir`, if it stays inside a
    /// `dim` x `dim` grid.
    pub fn step(self, dir: Direction, dim: usize) -> Option<Point> {
        let (dx, dy) = dir.delta();
        let nx = self.x as isize + dx;
        let ny = self.y as isize + dy;
        if nx < 0 || ny < 0 {
            return None;
        }
        let nx = nx as usize;
        let ny = ny as usize;
        if nx >= dim || ny >= dim {
            return None;
        }
        Some(Point { x: nx, y: ny })
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(usize, usize)> for Point {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

/// Joystick directions. `Middle` is the stick being pushed in; it never
/// moves anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    Middle,
}

impl Direction {
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Middle => (0, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Free,
    Wall,
}

impl Tile {
    pub fn flipped(self) -> Tile {
        match self {
            Tile::Free => Tile::Wall,
            Tile::Wall => Tile::Free,
        }
    }

    fn from_literal(value: u8) -> Result<Tile, MazeError> {
        match value {
            0 => Ok(Tile::Free),
            1 => Ok(Tile::Wall),
            value => Err(MazeError::BadLiteral { value }),
        }
    }
}

/// Square obstacle map. Cells are stored column-major, so the cell at
/// `(x, y)` lives at `x * dim + y`; that index doubles as the vertex id in
/// [`crate::graph::ConnectivityGraph`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    dim: usize,
    cells: Vec<Tile>,
}

impl Grid {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            cells: vec![Tile::Free; dim * dim],
        }
    }

    /// Builds a grid from literal rows as they would be drawn on the matrix:
    /// `rows[y][x]`, `0` for free, `1` for wall.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, MazeError> {
        let dim = rows.len();
        let mut grid = Grid::new(dim);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != dim {
                return Err(MazeError::NotSquare);
            }
            for (x, value) in row.iter().enumerate() {
                grid.cells[x * dim + y] = Tile::from_literal(*value)?;
            }
        }
        Ok(grid)
    }

    /// Builds a grid from literal columns: `columns[x][y]`.
    pub fn from_columns<C: AsRef<[u8]>>(columns: &[C]) -> Result<Self, MazeError> {
        let dim = columns.len();
        let mut grid = Grid::new(dim);
        for (x, column) in columns.iter().enumerate() {
            let column = column.as_ref();
            if column.len() != dim {
                return Err(MazeError::NotSquare);
            }
            for (y, value) in column.iter().enumerate() {
                grid.cells[x * dim + y] = Tile::from_literal(*value)?;
            }
        }
        Ok(grid)
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x < self.dim && p.y < self.dim
    }

    pub fn index(&self, p: Point) -> Option<usize> {
        if self.contains(p) {
            Some(p.x * self.dim + p.y)
        } else {
            None
        }
    }

    pub fn get(&self, p: Point) -> Option<Tile> {
        self.index(p).map(|idx| self.cells[idx])
    }

    pub fn is_free(&self, p: Point) -> bool {
        self.get(p) == Some(Tile::Free)
    }

    pub fn set(&mut self, p: Point, tile: Tile) -> Result<(), MazeError> {
        let idx = self.checked_index(p)?;
        self.cells[idx] = tile;
        Ok(())
    }

    /// Flips the cell and returns its previous state.
    pub fn toggle(&mut self, p: Point) -> Result<Tile, MazeError> {
        let idx = self.checked_index(p)?;
        let before = self.cells[idx];
        self.cells[idx] = before.flipped();
        Ok(before)
    }

    pub fn tiles(&self) -> impl Iterator<Item = (usize, Tile)> + '_ {
        self.cells.iter().copied().enumerate()
    }

    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|t| **t == Tile::Wall).count()
    }

    fn checked_index(&self, p: Point) -> Result<usize, MazeError> {
        self.index(p).ok_or(MazeError::OutOfBounds {
            point: p,
            dim: self.dim,
        })
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.dim {
            for x in 0..self.dim {
                let c = match self.cells[x * self.dim + y] {
                    Tile::Free => '.',
                    Tile::Wall => '#',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
