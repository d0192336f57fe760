use std::time::Duration;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sense_maze::{
    generate, ConnectivityGraph, Direction, GeneratorConfig, Grid, Layout, MazeSession, Mode,
    MoveOutcome, NullDisplay, Point, SessionState, Tile,
};

/// Reachability by union-find over free cells, independent of the BFS.
fn union_find_reachable(grid: &Grid, start: Point, end: Point) -> bool {
    if start == end {
        return true;
    }
    if !grid.is_free(start) || !grid.is_free(end) {
        return false;
    }
    let dim = grid.dim();
    let mut parent: Vec<usize> = (0..dim * dim).collect();

    fn find(parent: &mut [usize], mut v: usize) -> usize {
        while parent[v] != v {
            parent[v] = parent[parent[v]];
            v = parent[v];
        }
        v
    }

    for x in 0..dim {
        for y in 0..dim {
            let p = Point::new(x, y);
            if !grid.is_free(p) {
                continue;
            }
            for q in [Point::new(x + 1, y), Point::new(x, y + 1)] {
                if grid.is_free(q) {
                    let a = find(&mut parent, x * dim + y);
                    let b = find(&mut parent, q.x * dim + q.y);
                    parent[a] = b;
                }
            }
        }
    }
    let a = find(&mut parent, start.x * dim + start.y);
    let b = find(&mut parent, end.x * dim + end.y);
    a == b
}

fn grid_strategy() -> impl Strategy<Value = Grid> {
    (1usize..=8).prop_flat_map(|dim| {
        prop::collection::vec(prop::collection::vec(0u8..=1, dim), dim)
            .prop_map(|columns| Grid::from_columns(&columns).unwrap())
    })
}

fn point_in(dim: usize) -> impl Strategy<Value = Point> {
    (0..dim, 0..dim).prop_map(|(x, y)| Point::new(x, y))
}

fn grid_with_points() -> impl Strategy<Value = (Grid, Point, Point)> {
    grid_strategy().prop_flat_map(|grid| {
        let dim = grid.dim();
        (Just(grid), point_in(dim), point_in(dim))
    })
}

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
        Just(Direction::Middle),
    ]
}

proptest! {
    #[test]
    fn bfs_agrees_with_union_find((grid, start, end) in grid_with_points()) {
        let graph = ConnectivityGraph::build(&grid);
        prop_assert_eq!(graph.is_reachable(start, end), union_find_reachable(&grid, start, end));
    }

    #[test]
    fn build_is_deterministic(grid in grid_strategy()) {
        let a = ConnectivityGraph::build(&grid);
        let b = ConnectivityGraph::build(&grid);
        prop_assert_eq!(a.vertices(), b.vertices());
        prop_assert_eq!(a.edges(), b.edges());
    }

    #[test]
    fn moves_respect_walls_and_edges(
        (mut grid, start, end) in grid_with_points(),
        dirs in prop::collection::vec(direction(), 1..40),
    ) {
        grid.set(start, Tile::Free).unwrap();
        grid.set(end, Tile::Free).unwrap();
        let layout = Layout::new(grid.clone(), start, end).unwrap();
        let mut session = MazeSession::new(layout);

        for dir in dirs {
            let before = session.ball();
            let was_won = session.is_won();
            let candidate = before.step(dir, grid.dim()).filter(|p| grid.is_free(*p));
            let outcome = session.step(dir);

            if was_won || dir == Direction::Middle {
                prop_assert_eq!(outcome, MoveOutcome::Ignored);
                prop_assert_eq!(session.ball(), before);
                continue;
            }
            match candidate {
                None => {
                    prop_assert_eq!(outcome, MoveOutcome::Blocked);
                    prop_assert_eq!(session.ball(), before);
                }
                Some(next) => {
                    prop_assert_eq!(session.ball(), next);
                    let won = next == session.target();
                    prop_assert_eq!(outcome == MoveOutcome::Won, won);
                    prop_assert_eq!(session.state() == SessionState::Won, won);
                }
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generated_layouts_are_solvable(
        seed in any::<u64>(),
        dim in 2usize..=8,
        toggle in any::<bool>(),
        mutations in 0usize..300,
        patience_ms in 0u64..20,
    ) {
        let config = GeneratorConfig {
            patience: Duration::from_millis(patience_ms),
            mode: if toggle { Mode::Toggle } else { Mode::Additive },
            max_mutations: Some(mutations),
            ..GeneratorConfig::new(dim)
        };
        let mut rng = StdRng::seed_from_u64(seed);
        let layout = generate(&config, &mut rng, None, &mut NullDisplay).unwrap();
        prop_assert!(layout.is_solvable());
        prop_assert!(layout.grid().is_free(layout.start()));
        prop_assert!(layout.grid().is_free(layout.end()));
    }
}
