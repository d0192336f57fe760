//! The LED matrix and joystick, played on a terminal.
//!
//! Redraws are diffed against what is already on screen. The stick shares
//! the screen with the hat so a resize can recentre the matrix while the
//! game is waiting for a key.

use std::cell::RefCell;
use std::io::{self, Stdout, Write};
use std::rc::Rc;
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use rand::thread_rng;
use unicode_width::UnicodeWidthStr;

use crate::art::{self, CelebrationTiming};
use crate::grid::Direction;
use crate::hat::{Action, Display, Input, InputEvent, Rgb};

const CELL_W: usize = 2;
const LIT: &str = "██";
const DARK: &str = "  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Stick(InputEvent),
    Quit,
    Other,
}

pub fn key_input(key: KeyEvent) -> KeyInput {
    let direction = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            return if key.kind == KeyEventKind::Release {
                KeyInput::Other
            } else {
                KeyInput::Quit
            };
        }
        KeyCode::Up | KeyCode::Char('k') => Direction::Up,
        KeyCode::Down | KeyCode::Char('j') => Direction::Down,
        KeyCode::Left | KeyCode::Char('h') => Direction::Left,
        KeyCode::Right | KeyCode::Char('l') => Direction::Right,
        KeyCode::Enter | KeyCode::Char(' ') => Direction::Middle,
        _ => return KeyInput::Other,
    };
    let action = match key.kind {
        KeyEventKind::Press => Action::Pressed,
        KeyEventKind::Repeat => Action::Held,
        KeyEventKind::Release => Action::Released,
    };
    KeyInput::Stick(InputEvent { direction, action })
}

/// Top-left corner that centres a `dim` x `dim` matrix plus a message line,
/// or `None` if the terminal is too small.
pub fn origin_for(term_w: u16, term_h: u16, dim: usize) -> Option<(u16, u16)> {
    let needed_w = (dim * CELL_W) as u16;
    let needed_h = (dim + 2) as u16;
    if term_w < needed_w || term_h < needed_h {
        return None;
    }
    Some(((term_w - needed_w) / 2, (term_h - needed_h) / 2))
}

struct Screen<W: Write> {
    stdout: W,
    dim: usize,
    frame: Vec<Rgb>,
    shown: Vec<Option<Rgb>>,
    message: String,
    origin: Option<(u16, u16)>,
}

impl<W: Write> Screen<W> {
    fn new(stdout: W, dim: usize) -> Self {
        Self {
            stdout,
            dim,
            frame: vec![Rgb::BLACK; dim * dim],
            shown: vec![None; dim * dim],
            message: String::new(),
            origin: None,
        }
    }

    fn redraw(&mut self, size: (u16, u16)) -> io::Result<()> {
        self.origin = None;
        self.render_at(size)
    }

    fn render(&mut self) -> io::Result<()> {
        self.render_at(terminal::size()?)
    }

    fn render_at(&mut self, (term_w, term_h): (u16, u16)) -> io::Result<()> {
        let Some(origin) = origin_for(term_w, term_h, self.dim) else {
            self.stdout.queue(MoveTo(0, 0))?;
            self.stdout.queue(Clear(ClearType::All))?;
            let msg = format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                self.dim * CELL_W,
                self.dim + 2,
                term_w,
                term_h
            );
            self.stdout.queue(Print(msg))?;
            self.stdout.flush()?;
            self.origin = None;
            return Ok(());
        };

        if self.origin != Some(origin) {
            self.stdout.queue(Clear(ClearType::All))?;
            self.shown.iter_mut().for_each(|c| *c = None);
            self.origin = Some(origin);
            self.draw_message()?;
        }

        for idx in 0..self.frame.len() {
            let color = self.frame[idx];
            if self.shown[idx] != Some(color) {
                self.shown[idx] = Some(color);
                self.draw_cell(origin, idx % self.dim, idx / self.dim, color)?;
            }
        }
        self.stdout.flush()
    }

    fn draw_cell(&mut self, origin: (u16, u16), x: usize, y: usize, color: Rgb) -> io::Result<()> {
        let text = if color == Rgb::BLACK { DARK } else { LIT };
        let Rgb(r, g, b) = color;
        let x_pos = origin.0 + (x * CELL_W) as u16;
        let y_pos = origin.1 + y as u16;
        self.stdout.queue(MoveTo(x_pos, y_pos))?;
        self.stdout.queue(SetForegroundColor(Color::Rgb { r, g, b }))?;
        self.stdout.queue(Print(text))?;
        let w = UnicodeWidthStr::width(text);
        if w < CELL_W {
            for _ in 0..(CELL_W - w) {
                self.stdout.queue(Print(' '))?;
            }
        }
        self.stdout.queue(ResetColor)?;
        Ok(())
    }

    fn draw_message(&mut self) -> io::Result<()> {
        let Some((ox, oy)) = self.origin else {
            return Ok(());
        };
        self.stdout.queue(MoveTo(0, oy + self.dim as u16 + 1))?;
        self.stdout.queue(Clear(ClearType::CurrentLine))?;
        let width = UnicodeWidthStr::width(self.message.as_str()) as u16;
        let centre = ox + (self.dim * CELL_W) as u16 / 2;
        self.stdout.queue(MoveTo(centre.saturating_sub(width / 2), oy + self.dim as u16 + 1))?;
        self.stdout.queue(SetForegroundColor(Color::White))?;
        self.stdout.queue(Print(&self.message))?;
        self.stdout.queue(ResetColor)?;
        Ok(())
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb) -> io::Result<()> {
        if x >= self.dim || y >= self.dim {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("pixel ({}, {}) is off the matrix", x, y),
            ));
        }
        self.frame[y * self.dim + x] = color;
        self.render()
    }

    fn set_pixels(&mut self, pixels: &[Rgb]) -> io::Result<()> {
        if pixels.len() != self.frame.len() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("expected {} pixels, got {}", self.frame.len(), pixels.len()),
            ));
        }
        self.frame.copy_from_slice(pixels);
        self.render()
    }

    fn clear(&mut self) -> io::Result<()> {
        self.frame.iter_mut().for_each(|c| *c = Rgb::BLACK);
        self.message.clear();
        self.draw_message()?;
        self.render()
    }

    fn show_message(&mut self, text: &str) -> io::Result<()> {
        self.message = text.to_string();
        self.draw_message()?;
        self.stdout.flush()
    }
}

pub struct TerminalHat {
    screen: Rc<RefCell<Screen<Stdout>>>,
}

impl TerminalHat {
    pub fn new(stdout: Stdout, dim: usize) -> Self {
        Self {
            screen: Rc::new(RefCell::new(Screen::new(stdout, dim))),
        }
    }

    pub fn stick(&self) -> TerminalStick {
        TerminalStick {
            screen: Rc::clone(&self.screen),
        }
    }
}

impl Display for TerminalHat {
    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb) -> io::Result<()> {
        self.screen.borrow_mut().set_pixel(x, y, color)
    }

    fn set_pixels(&mut self, pixels: &[Rgb]) -> io::Result<()> {
        self.screen.borrow_mut().set_pixels(pixels)
    }

    fn clear(&mut self) -> io::Result<()> {
        self.screen.borrow_mut().clear()
    }

    fn celebrate(&mut self) -> io::Result<()> {
        art::celebrate(self, &mut thread_rng(), &CelebrationTiming::default())
    }

    fn show_message(&mut self, text: &str) -> io::Result<()> {
        self.screen.borrow_mut().show_message(text)
    }
}

/// True if a quit key sits among the keys pressed while nobody was waiting.
/// Everything else in that backlog is thrown away.
pub fn quit_pending(stale: &[KeyInput]) -> bool {
    stale.contains(&KeyInput::Quit)
}

/// Arrow keys (or hjkl) as the joystick; Enter or space pushes it in.
pub struct TerminalStick {
    screen: Rc<RefCell<Screen<Stdout>>>,
}

impl TerminalStick {
    fn key(&self, event: Event) -> io::Result<Option<KeyInput>> {
        match event {
            Event::Key(key) => Ok(Some(key_input(key))),
            Event::Resize(cols, rows) => {
                self.screen.borrow_mut().redraw((cols, rows))?;
                Ok(None)
            }
            _ => Ok(None),
        }
    }
}

impl Input for TerminalStick {
    fn wait_for_event(&mut self) -> io::Result<Option<InputEvent>> {
        let mut stale = Vec::new();
        while event::poll(Duration::from_millis(0))? {
            if let Some(key) = self.key(event::read()?)? {
                stale.push(key);
            }
        }
        if quit_pending(&stale) {
            return Ok(None);
        }

        loop {
            match self.key(event::read()?)? {
                Some(KeyInput::Stick(ev)) => return Ok(Some(ev)),
                Some(KeyInput::Quit) => return Ok(None),
                Some(KeyInput::Other) | None => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        let mut ev = KeyEvent::new(code, KeyModifiers::NONE);
        ev.kind = kind;
        ev
    }

    #[test]
    fn keys_map_to_stick_events() {
        assert_eq!(
            key_input(key(KeyCode::Char('l'), KeyEventKind::Press)),
            KeyInput::Stick(InputEvent::pressed(Direction::Right))
        );
        assert_eq!(
            key_input(key(KeyCode::Up, KeyEventKind::Repeat)),
            KeyInput::Stick(InputEvent {
                direction: Direction::Up,
                action: Action::Held,
            })
        );
        assert_eq!(
            key_input(key(KeyCode::Left, KeyEventKind::Release)),
            KeyInput::Stick(InputEvent {
                direction: Direction::Left,
                action: Action::Released,
            })
        );
        assert_eq!(
            key_input(key(KeyCode::Enter, KeyEventKind::Press)),
            KeyInput::Stick(InputEvent::pressed(Direction::Middle))
        );
        assert_eq!(key_input(key(KeyCode::Char('q'), KeyEventKind::Press)), KeyInput::Quit);
        assert_eq!(key_input(key(KeyCode::Char('x'), KeyEventKind::Press)), KeyInput::Other);
    }

    #[test]
    fn backlog_is_dropped_but_quit_survives() {
        let up = KeyInput::Stick(InputEvent::pressed(Direction::Up));
        assert!(!quit_pending(&[]));
        assert!(!quit_pending(&[up, up, KeyInput::Other]));
        assert!(quit_pending(&[up, KeyInput::Quit, up]));

        let stale: Vec<KeyInput> = [
            key(KeyCode::Right, KeyEventKind::Press),
            key(KeyCode::Esc, KeyEventKind::Release),
        ]
        .into_iter()
        .map(key_input)
        .collect();
        assert!(!quit_pending(&stale));
        let stale = [key_input(key(KeyCode::Esc, KeyEventKind::Press))];
        assert!(quit_pending(&stale));
    }

    #[test]
    fn resize_redraws_everything_at_the_new_origin() {
        let mut screen = Screen::new(Vec::new(), 8);
        screen.frame[0] = Rgb::WHITE;
        screen.render_at((80, 24)).unwrap();
        assert_eq!(screen.origin, Some((32, 7)));

        screen.stdout.clear();
        screen.render_at((80, 24)).unwrap();
        assert!(screen.stdout.is_empty());

        screen.redraw((100, 30)).unwrap();
        assert_eq!(screen.origin, Some((42, 10)));
        assert!(screen.shown.iter().all(|c| c.is_some()));
        assert!(String::from_utf8_lossy(&screen.stdout).contains(LIT));
    }

    #[test]
    fn matrix_is_centred() {
        assert_eq!(origin_for(80, 24, 8), Some((32, 7)));
        assert_eq!(origin_for(16, 10, 8), Some((0, 0)));
        assert_eq!(origin_for(15, 10, 8), None);
        assert_eq!(origin_for(80, 9, 8), None);
    }
}
