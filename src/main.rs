use std::fs::File;
use std::io::{self, Stdout};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sense_maze::config::Settings;
use sense_maze::round::{next_layout, next_score};
use sense_maze::terminal::TerminalHat;
use sense_maze::{presets, Display, MazeError, MazeSession, Outcome, HAT_DIM};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const SCORE_PAUSE: Duration = Duration::from_secs(1);

fn main() -> io::Result<()> {
    let settings = Settings::from_env();
    init_logging(&settings)?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(stdout, &settings);

    let mut stdout = io::stdout();
    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    result.map_err(|err| {
        error!(%err, "maze stopped");
        match err {
            MazeError::Io(err) => err,
            other => io::Error::new(io::ErrorKind::Other, other),
        }
    })
}

fn init_logging(settings: &Settings) -> io::Result<()> {
    let Some(path) = &settings.log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(stdout: Stdout, settings: &Settings) -> Result<(), MazeError> {
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let presets = presets()?;
    let mut hat = TerminalHat::new(stdout, HAT_DIM);
    let mut stick = hat.stick();
    let mut score = settings.initial_score;

    loop {
        hat.show_message(&format!("Score: {}  (q to quit)", score))?;
        let layout = next_layout(&mut rng, &presets, score, settings, &mut hat)?;

        let mut session = MazeSession::new(layout);
        match session.run(&mut hat, &mut stick)? {
            Outcome::Won { moves } => info!(score, moves, "maze solved"),
            Outcome::Abandoned => {
                info!(score, "quit");
                return Ok(());
            }
        }

        hat.clear()?;
        score = next_score(score);
        hat.show_message(&format!("Score: {}", score))?;
        thread::sleep(SCORE_PAUSE);
    }
}
