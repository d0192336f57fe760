use std::thread;
use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, instrument, warn};

use crate::error::MazeError;
use crate::graph::is_solvable;
use crate::grid::{Grid, Point, Tile};
use crate::hat::{Display, Rgb, BACKGROUND_COLOR, WALL_COLOR};
use crate::layout::Layout;

/// How many times one tick may redraw a cell that landed on start or end.
const MAX_REDRAWS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Additive,
    Toggle,
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub dim: usize,
    pub start: Point,
    pub end: Point,
    pub patience: Duration,
    pub mode: Mode,
    /// Pause after each mutation so the display can be watched.
    pub step_delay: Duration,
    pub max_mutations: Option<usize>,
}

impl GeneratorConfig {
    pub fn new(dim: usize) -> Self {
        let far = dim.saturating_sub(1);
        Self {
            dim,
            start: Point::new(0, 0),
            end: Point::new(far, far),
            patience: Duration::from_secs(5),
            mode: Mode::Additive,
            step_delay: Duration::ZERO,
            max_mutations: None,
        }
    }
}

struct Budget {
    started: Instant,
    patience: Duration,
    max_mutations: Option<usize>,
    mutations: usize,
}

impl Budget {
    fn spent(&self) -> bool {
        if let Some(max) = self.max_mutations {
            if self.mutations >= max {
                return true;
            }
        }
        self.started.elapsed() >= self.patience
    }
}

/// Grows a random maze that stays solvable from `config.start` to
/// `config.end`.
#[instrument(skip_all, fields(dim = config.dim, mode = ?config.mode))]
pub fn generate(
    config: &GeneratorConfig,
    rng: &mut impl Rng,
    initial: Option<Grid>,
    display: &mut impl Display,
) -> Result<Layout, MazeError> {
    let dim = config.dim;
    let grid = match initial {
        Some(grid) if grid.dim() != dim => {
            return Err(MazeError::DimensionMismatch {
                expected: dim,
                got: grid.dim(),
            })
        }
        Some(grid) => grid,
        None => Grid::new(dim),
    };
    let layout = Layout::new(grid, config.start, config.end)?;
    if !layout.is_solvable() {
        return Err(MazeError::Unsolvable);
    }

    let (start, end) = (layout.start(), layout.end());
    let fixed = if start == end { 1 } else { 2 };
    if dim * dim <= fixed {
        return Ok(layout);
    }

    let mut grid = layout.into_grid();
    show(display, &grid);

    let mut budget = Budget {
        started: Instant::now(),
        patience: config.patience,
        max_mutations: config.max_mutations,
        mutations: 0,
    };
    let mut passes = 0;
    let mut undos = 0;

    while !budget.spent() {
        passes += 1;
        let mut solvable = true;
        let mut last: Option<(Point, Tile)> = None;

        while solvable && !budget.spent() {
            let Some(r) = draw_cell(rng, dim, start, end) else {
                continue;
            };
            let before = match config.mode {
                Mode::Additive => {
                    let before = grid.get(r).unwrap_or(Tile::Free);
                    grid.set(r, Tile::Wall)?;
                    before
                }
                Mode::Toggle => grid.toggle(r)?,
            };
            budget.mutations += 1;
            last = Some((r, before));

            show(display, &grid);
            if !config.step_delay.is_zero() {
                thread::sleep(config.step_delay);
            }
            solvable = is_solvable(&grid, start, end);
        }

        if !solvable {
            if let Some((r, before)) = last {
                grid.set(r, before)?;
                undos += 1;
                debug!(cell = %r, "undid disconnecting mutation");
                show(display, &grid);
            }
        }
    }

    debug!(
        passes,
        undos,
        mutations = budget.mutations,
        walls = grid.wall_count(),
        "generation finished"
    );
    Layout::new(grid, start, end)
}

fn draw_cell(rng: &mut impl Rng, dim: usize, start: Point, end: Point) -> Option<Point> {
    for _ in 0..MAX_REDRAWS {
        let p = Point::new(rng.gen_range(0..dim), rng.gen_range(0..dim));
        if p != start && p != end {
            return Some(p);
        }
    }
    None
}

fn show(display: &mut impl Display, grid: &Grid) {
    if let Err(err) = display.set_pixels(&pixels(grid)) {
        warn!(%err, "display rejected generator frame");
    }
}

pub fn pixels(grid: &Grid) -> Vec<Rgb> {
    let dim = grid.dim();
    let mut out = Vec::with_capacity(dim * dim);
    for y in 0..dim {
        for x in 0..dim {
            let color = match grid.get(Point::new(x, y)) {
                Some(Tile::Wall) => WALL_COLOR,
                _ => BACKGROUND_COLOR,
            };
            out.push(color);
        }
    }
    out
}
