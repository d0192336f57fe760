//! Ball-in-a-maze for an 8x8 LED matrix.
//!
//! A [`Grid`] of free and wall cells is turned into a [`ConnectivityGraph`]
//! to answer "can the ball get from here to there". [`generate`] uses that
//! question to grow random mazes that always stay solvable, and
//! [`MazeSession`] rolls a ball through one of them under joystick control.
//!
//! The LED matrix and the joystick are behind the [`Display`] and [`Input`]
//! traits; [`terminal::TerminalHat`] and [`terminal::TerminalStick`] stand in
//! for them on a terminal.

pub mod art;
pub mod config;
mod error;
pub mod generator;
pub mod graph;
pub mod grid;
pub mod hat;
pub mod layout;
pub mod round;
pub mod session;
pub mod terminal;

pub use error::{Endpoint, MazeError};
pub use generator::{generate, GeneratorConfig, Mode};
pub use graph::{is_solvable, ConnectivityGraph};
pub use grid::{Direction, Grid, Point, Tile, HAT_DIM};
pub use hat::{Action, Display, Input, InputEvent, NullDisplay, Rgb, ScriptedInput};
pub use layout::{presets, Layout};
pub use session::{MazeSession, MoveOutcome, Outcome, SessionState};
