use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use crate::config::Settings;
use crate::error::MazeError;
use crate::generator::{generate, GeneratorConfig, Mode};
use crate::grid::{Grid, HAT_DIM};
use crate::hat::Display;
use crate::layout::Layout;

pub fn plan(
    rng: &mut impl Rng,
    presets: &[Layout],
    score: u64,
    settings: &Settings,
) -> (GeneratorConfig, Option<Grid>) {
    let preset = if rng.gen::<f64>() < settings.additive_chance {
        None
    } else {
        presets.choose(rng)
    };

    match preset {
        None => {
            let config = GeneratorConfig {
                patience: Settings::additive_patience(score),
                mode: Mode::Additive,
                step_delay: settings.step_delay,
                ..GeneratorConfig::new(HAT_DIM)
            };
            (config, None)
        }
        Some(preset) => {
            let config = GeneratorConfig {
                dim: preset.dim(),
                start: preset.start(),
                end: preset.end(),
                patience: Settings::toggle_patience(score),
                mode: Mode::Toggle,
                step_delay: settings.step_delay,
                max_mutations: None,
            };
            (config, Some(preset.grid().clone()))
        }
    }
}

pub fn next_layout(
    rng: &mut impl Rng,
    presets: &[Layout],
    score: u64,
    settings: &Settings,
    display: &mut impl Display,
) -> Result<Layout, MazeError> {
    let (config, initial) = plan(rng, presets, score, settings);
    info!(
        score,
        mode = ?config.mode,
        patience_secs = config.patience.as_secs(),
        "generating maze"
    );
    generate(&config, rng, initial, display)
}

pub fn next_score(score: u64) -> u64 {
    score.saturating_add(1)
}
