use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_INITIAL_SCORE: u64 = 9;
const DEFAULT_STEP_MS: u64 = 80;
const DEFAULT_ADDITIVE_CHANCE: f64 = 0.7;
/// Toggle-mode rounds never think longer than this.
pub const TOGGLE_PATIENCE_CAP: u64 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub initial_score: u64,
    pub step_delay: Duration,
    pub additive_chance: f64,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let initial_score = lookup("MAZE_INITIAL_SCORE")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_INITIAL_SCORE);
        let step_ms = lookup("MAZE_STEP_MS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_STEP_MS);
        let additive_chance = lookup("MAZE_ADDITIVE_CHANCE")
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .map(|v| v.clamp(0.0, 1.0))
            .unwrap_or(DEFAULT_ADDITIVE_CHANCE);
        let seed = lookup("MAZE_SEED").and_then(|v| v.parse::<u64>().ok());
        let log_file = lookup("MAZE_LOG")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self {
            initial_score,
            step_delay: Duration::from_millis(step_ms),
            additive_chance,
            seed,
            log_file,
        }
    }

    pub fn additive_patience(score: u64) -> Duration {
        Duration::from_secs(score)
    }

    pub fn toggle_patience(score: u64) -> Duration {
        Duration::from_secs(score.min(TOGGLE_PATIENCE_CAP))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Settings {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let s = settings(&[]);
        assert_eq!(s.initial_score, 9);
        assert_eq!(s.step_delay, Duration::from_millis(80));
        assert_eq!(s.additive_chance, 0.7);
        assert_eq!(s.seed, None);
        assert_eq!(s.log_file, None);
    }

    #[test]
    fn overrides_and_garbage() {
        let s = settings(&[
            ("MAZE_INITIAL_SCORE", "2"),
            ("MAZE_STEP_MS", "0"),
            ("MAZE_ADDITIVE_CHANCE", "3.5"),
            ("MAZE_SEED", "not a number"),
            ("MAZE_LOG", "/tmp/maze.log"),
        ]);
        assert_eq!(s.initial_score, 2);
        assert_eq!(s.step_delay, Duration::ZERO);
        assert_eq!(s.additive_chance, 1.0);
        assert_eq!(s.seed, None);
        assert_eq!(s.log_file, Some(PathBuf::from("/tmp/maze.log")));
    }

    #[test]
    fn toggle_patience_is_capped() {
        assert_eq!(Settings::additive_patience(12), Duration::from_secs(12));
        assert_eq!(Settings::toggle_patience(3), Duration::from_secs(3));
        assert_eq!(Settings::toggle_patience(12), Duration::from_secs(5));
    }
}
