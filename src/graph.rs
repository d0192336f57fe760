use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::grid::{Grid, Point, Tile};

/// Undirected adjacency over the free cells of a grid.
///
/// Vertices are cell indices (`x * dim + y`). An edge `(a, b)` always has
/// `a < b` and joins two free cells that share a side. The graph is a
/// snapshot: change the grid and you build a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectivityGraph {
    dim: usize,
    vertices: BTreeSet<usize>,
    edges: BTreeSet<(usize, usize)>,
    adjacency: BTreeMap<usize, Vec<usize>>,
}

impl ConnectivityGraph {
    pub fn build(grid: &Grid) -> Self {
        let dim = grid.dim();
        let vertices: BTreeSet<usize> = grid
            .tiles()
            .filter(|(_, tile)| *tile == Tile::Free)
            .map(|(idx, _)| idx)
            .collect();

        let mut edges = BTreeSet::new();
        for &v in &vertices {
            // v + dim is the cell one column to the right
            if vertices.contains(&(v + dim)) {
                edges.insert((v, v + dim));
            }
            // v + 1 is the cell one row down, unless v ends its column
            if (v + 1) % dim != 0 && vertices.contains(&(v + 1)) {
                edges.insert((v, v + 1));
            }
        }

        let mut adjacency: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for &v in &vertices {
            adjacency.entry(v).or_default();
        }
        for &(a, b) in &edges {
            adjacency.entry(a).or_default().push(b);
            adjacency.entry(b).or_default().push(a);
        }

        Self {
            dim,
            vertices,
            edges,
            adjacency,
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn vertices(&self) -> &BTreeSet<usize> {
        &self.vertices
    }

    pub fn edges(&self) -> &BTreeSet<(usize, usize)> {
        &self.edges
    }

    /// Vertex id of a free cell, `None` for walls and points off the grid.
    pub fn vertex_of(&self, p: Point) -> Option<usize> {
        if p.x >= self.dim || p.y >= self.dim {
            return None;
        }
        let v = p.x * self.dim + p.y;
        self.vertices.contains(&v).then_some(v)
    }

    pub fn neighbors(&self, v: usize) -> &[usize] {
        self.adjacency.get(&v).map_or(&[], |n| n.as_slice())
    }

    pub fn is_reachable(&self, start: Point, end: Point) -> bool {
        if start == end {
            return true;
        }
        let (Some(start), Some(end)) = (self.vertex_of(start), self.vertex_of(end)) else {
            return false;
        };

        let mut enqueued = BTreeSet::new();
        let mut q = VecDeque::new();
        enqueued.insert(start);
        q.push_back(start);

        while let Some(v) = q.pop_front() {
            if v == end {
                return true;
            }
            for &next in self.neighbors(v) {
                if enqueued.insert(next) {
                    q.push_back(next);
                }
            }
        }
        false
    }
}

pub fn is_solvable(grid: &Grid, start: Point, end: Point) -> bool {
    ConnectivityGraph::build(grid).is_reachable(start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_4x4() -> Grid {
        let rows: [[u8; 4]; 4] = [[0, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 1, 1, 1]];
        Grid::from_rows(&rows).unwrap()
    }

    #[test]
    fn border_path_is_found() {
        let grid = example_4x4();
        let graph = ConnectivityGraph::build(&grid);
        assert!(graph.is_reachable(Point::new(0, 0), Point::new(0, 3)));
    }

    #[test]
    fn walled_off_endpoints_are_unreachable() {
        let mut grid = Grid::new(8);
        for x in 0..8 {
            for y in 0..8 {
                grid.set(Point::new(x, y), Tile::Wall).unwrap();
            }
        }
        let start = Point::new(0, 0);
        let end = Point::new(5, 6);
        grid.set(start, Tile::Free).unwrap();
        grid.set(end, Tile::Free).unwrap();
        assert!(!is_solvable(&grid, start, end));
    }

    #[test]
    fn edges_do_not_wrap_between_columns() {
        // (0, 3) and (1, 0) are indices 3 and 4 in a 4x4 grid
        let grid = Grid::new(4);
        let graph = ConnectivityGraph::build(&grid);
        assert!(!graph.edges().contains(&(3, 4)));
        assert_eq!(graph.edges().len(), 2 * 4 * 3);
        assert_eq!(graph.neighbors(0), &[1, 4]);
    }

    #[test]
    fn same_point_is_trivially_reachable() {
        let graph = ConnectivityGraph::build(&example_4x4());
        assert!(graph.is_reachable(Point::new(2, 2), Point::new(2, 2)));
    }

    #[test]
    fn walls_and_outside_points_are_not_vertices() {
        let graph = ConnectivityGraph::build(&example_4x4());
        assert_eq!(graph.vertex_of(Point::new(0, 1)), None);
        assert_eq!(graph.vertex_of(Point::new(4, 0)), None);
        assert_eq!(graph.vertex_of(Point::new(1, 0)), Some(4));
        assert!(!graph.is_reachable(Point::new(0, 0), Point::new(0, 1)));
    }

    #[test]
    fn build_is_deterministic() {
        let grid = example_4x4();
        let a = ConnectivityGraph::build(&grid);
        let b = ConnectivityGraph::build(&grid);
        assert_eq!(a.vertices(), b.vertices());
        assert_eq!(a.edges(), b.edges());
    }
}
