//! 8x8 pixel art and the win animation.

use std::io;
use std::thread;
use std::time::Duration;

use rand::Rng;

use crate::hat::{Display, Rgb};

pub type Frame = [Rgb; 64];

const Y: Rgb = Rgb(250, 250, 55);
const W: Rgb = Rgb::WHITE;
const B: Rgb = Rgb::BLACK;

#[rustfmt::skip]
pub const HAPPY: Frame = [
    W, W, Y, Y, Y, Y, W, W,
    W, Y, B, Y, Y, B, Y, W,
    Y, B, B, Y, Y, B, B, Y,
    Y, Y, Y, Y, Y, Y, Y, Y,
    Y, B, Y, Y, Y, Y, B, Y,
    Y, B, B, Y, Y, B, B, Y,
    W, Y, B, B, B, B, Y, W,
    W, W, Y, Y, Y, Y, W, W,
];

#[rustfmt::skip]
pub const WINK_LEFT: Frame = [
    W, W, Y, Y, Y, Y, W, W,
    W, Y, Y, Y, Y, B, Y, W,
    Y, B, B, Y, Y, B, B, Y,
    Y, Y, Y, Y, Y, Y, Y, Y,
    Y, B, Y, Y, Y, Y, B, Y,
    Y, B, B, Y, Y, B, B, Y,
    W, Y, B, B, B, B, Y, W,
    W, W, Y, Y, Y, Y, W, W,
];

pub fn sparkle(rng: &mut impl Rng) -> Frame {
    let mut frame = [Rgb::BLACK; 64];
    for px in frame.iter_mut() {
        *px = Rgb(rng.gen(), rng.gen(), rng.gen());
    }
    frame
}

#[derive(Debug, Clone, Copy)]
pub struct CelebrationTiming {
    pub sparkles: usize,
    pub sparkle: Duration,
    pub smile: Duration,
    pub wink: Duration,
}

impl Default for CelebrationTiming {
    fn default() -> Self {
        Self {
            sparkles: 10,
            sparkle: Duration::from_millis(250),
            smile: Duration::from_secs(1),
            wink: Duration::from_millis(300),
        }
    }
}

/// Confetti, a smile, a wink, and the smile again.
pub fn celebrate(
    display: &mut impl Display,
    rng: &mut impl Rng,
    timing: &CelebrationTiming,
) -> io::Result<()> {
    for _ in 0..timing.sparkles {
        display.set_pixels(&sparkle(rng))?;
        thread::sleep(timing.sparkle);
    }
    display.set_pixels(&HAPPY)?;
    thread::sleep(timing.smile);
    display.set_pixels(&WINK_LEFT)?;
    thread::sleep(timing.wink);
    display.set_pixels(&HAPPY)?;
    thread::sleep(timing.smile);
    Ok(())
}
