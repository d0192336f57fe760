use tracing::{debug, info};

use crate::error::MazeError;
use crate::grid::{Direction, Point, Tile};
use crate::hat::{
    Action, Display, Input, BACKGROUND_COLOR, BALL_COLOR, TARGET_COLOR, WALL_COLOR,
};
use crate::layout::Layout;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Won,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    Blocked,
    /// The ball reached the target with this move.
    Won,
    /// Not a move, or the round is already over.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won { moves: usize },
    /// Input closed before the ball reached the target.
    Abandoned,
}

#[derive(Debug, Clone)]
pub struct MazeSession {
    layout: Layout,
    ball: Point,
    target: Point,
    state: SessionState,
    moves: usize,
}

impl MazeSession {
    pub fn new(layout: Layout) -> Self {
        let ball = layout.start();
        let target = layout.end();
        Self {
            layout,
            ball,
            target,
            state: SessionState::Active,
            moves: 0,
        }
    }

    pub fn ball(&self) -> Point {
        self.ball
    }

    pub fn target(&self) -> Point {
        self.target
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_won(&self) -> bool {
        self.state == SessionState::Won
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn can_move(&self, dir: Direction) -> bool {
        self.candidate(dir).is_some()
    }

    fn candidate(&self, dir: Direction) -> Option<Point> {
        if dir == Direction::Middle {
            return None;
        }
        let grid = self.layout.grid();
        let next = self.ball.step(dir, grid.dim())?;
        match grid.get(next) {
            Some(Tile::Free) => Some(next),
            _ => None,
        }
    }

    pub fn step(&mut self, dir: Direction) -> MoveOutcome {
        if self.state == SessionState::Won || dir == Direction::Middle {
            return MoveOutcome::Ignored;
        }
        let Some(next) = self.candidate(dir) else {
            debug!(ball = %self.ball, ?dir, "move blocked");
            return MoveOutcome::Blocked;
        };
        self.ball = next;
        self.moves += 1;
        if self.ball == self.target {
            self.state = SessionState::Won;
            return MoveOutcome::Won;
        }
        MoveOutcome::Moved
    }

    pub fn draw(&self, display: &mut impl Display) -> Result<(), MazeError> {
        let grid = self.layout.grid();
        for x in 0..grid.dim() {
            for y in 0..grid.dim() {
                let p = Point::new(x, y);
                let color = if grid.is_free(p) {
                    BACKGROUND_COLOR
                } else {
                    WALL_COLOR
                };
                display.paint(p, color)?;
            }
        }
        display.paint(self.target, TARGET_COLOR)?;
        display.paint(self.ball, BALL_COLOR)?;
        Ok(())
    }

    /// Plays the round: read an event, move, redraw, until the ball reaches
    /// the target or the input closes. Released events are skipped.
    pub fn run(
        &mut self,
        display: &mut impl Display,
        input: &mut impl Input,
    ) -> Result<Outcome, MazeError> {
        info!(start = %self.ball, target = %self.target, "round started");
        self.draw(display)?;

        while !self.is_won() {
            let event = loop {
                match input.wait_for_event()? {
                    None => return Ok(Outcome::Abandoned),
                    Some(event) if event.action == Action::Released => continue,
                    Some(event) => break event,
                }
            };

            let from = self.ball;
            if let MoveOutcome::Moved | MoveOutcome::Won = self.step(event.direction) {
                display.paint(from, BACKGROUND_COLOR)?;
                display.paint(self.ball, BALL_COLOR)?;
            }
        }

        info!(moves = self.moves, "round won");
        display.celebrate()?;
        Ok(Outcome::Won { moves: self.moves })
    }
}
