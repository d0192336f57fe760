//! Contracts for the LED matrix and the joystick.

use std::collections::VecDeque;
use std::io;

use crate::grid::{Direction, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
}

pub const BALL_COLOR: Rgb = Rgb::RED;
pub const TARGET_COLOR: Rgb = Rgb::GREEN;
pub const BACKGROUND_COLOR: Rgb = Rgb::BLACK;
pub const WALL_COLOR: Rgb = Rgb::WHITE;

pub trait Display {
    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb) -> io::Result<()>;

    /// Replaces every pixel. `pixels` is row-major.
    fn set_pixels(&mut self, pixels: &[Rgb]) -> io::Result<()>;

    fn clear(&mut self) -> io::Result<()>;

    fn celebrate(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn show_message(&mut self, _text: &str) -> io::Result<()> {
        Ok(())
    }

    fn paint(&mut self, p: Point, color: Rgb) -> io::Result<()> {
        self.set_pixel(p.x, p.y, color)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullDisplay;

impl Display for NullDisplay {
    fn set_pixel(&mut self, _x: usize, _y: usize, _color: Rgb) -> io::Result<()> {
        Ok(())
    }

    fn set_pixels(&mut self, _pixels: &[Rgb]) -> io::Result<()> {
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Pressed,
    Held,
    Released,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputEvent {
    pub direction: Direction,
    pub action: Action,
}

impl InputEvent {
    pub fn pressed(direction: Direction) -> Self {
        Self {
            direction,
            action: Action::Pressed,
        }
    }
}

pub trait Input {
    /// Blocks until the next event. `None` once the input is closed.
    fn wait_for_event(&mut self) -> io::Result<Option<InputEvent>>;
}

#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    events: VecDeque<InputEvent>,
}

impl ScriptedInput {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl Input for ScriptedInput {
    fn wait_for_event(&mut self) -> io::Result<Option<InputEvent>> {
        Ok(self.events.pop_front())
    }
}
