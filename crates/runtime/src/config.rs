//! Session configuration
//!
//! Read from `TILERISE_*` environment variables; anything missing or unparsable falls
//! back to the default.

use std::time::Duration;

use crate::types::{
    Difficulty, GameSettings, GameSpeed, DEFAULT_ANIMATION_TIMEOUT_MS, DEFAULT_HEIGHT,
    DEFAULT_QUEUE_LIMIT, DEFAULT_WIDTH,
};

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub settings: GameSettings,
    pub seed: u32,
    /// Resolve animations inline instead of waiting for completions
    pub headless: bool,
    /// Longest wait for an animation completion before it is forced
    pub animation_timeout: Duration,
    pub max_pending_commands: usize,
    /// Stop after this many ticks
    pub max_ticks: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            settings: GameSettings::default(),
            seed: 12345,
            headless: false,
            animation_timeout: Duration::from_millis(DEFAULT_ANIMATION_TIMEOUT_MS),
            max_pending_commands: DEFAULT_QUEUE_LIMIT,
            max_ticks: None,
        }
    }
}

impl SessionConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from any key lookup (the environment in production)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let defaults = Self::default();

        let width = get("TILERISE_WIDTH")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_WIDTH);
        let height = get("TILERISE_HEIGHT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_HEIGHT);
        let speed_ms = get("TILERISE_SPEED")
            .and_then(|s| parse_speed(&s))
            .unwrap_or_else(|| GameSpeed::Normal.tick_ms());
        let starting_rows = get("TILERISE_DIFFICULTY")
            .and_then(|s| parse_difficulty(&s))
            .unwrap_or_else(|| Difficulty::Normal.rows());
        let seed = get("TILERISE_SEED")
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(seed_from_clock);
        let headless = get("TILERISE_HEADLESS")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(defaults.headless);
        let animation_timeout = get("TILERISE_ANIMATION_TIMEOUT_MS")
            .and_then(|s| s.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.animation_timeout);

        Self {
            settings: GameSettings {
                width,
                height,
                speed_ms,
                starting_rows,
            },
            seed,
            headless,
            animation_timeout,
            ..defaults
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.settings.speed_ms.max(1) as u64)
    }
}

/// Speed preset label or a raw tick interval in ms
pub fn parse_speed(s: &str) -> Option<u32> {
    GameSpeed::from_str(s)
        .map(|speed| speed.tick_ms())
        .or_else(|| s.parse().ok().filter(|&ms| ms > 0))
}

/// Difficulty preset label or a raw starting row count
pub fn parse_difficulty(s: &str) -> Option<u8> {
    Difficulty::from_str(s)
        .map(|difficulty| difficulty.rows())
        .or_else(|| s.parse().ok())
}

fn seed_from_clock() -> u32 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u32)
        .unwrap_or(1)
}
