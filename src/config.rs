//! Runtime configuration parsed from environment variables.
//!
//! The state-file path is a clap argument (with its own env fallback); this
//! module covers the knobs that only make sense as environment settings.

use std::time::Duration;

pub const DEFAULT_STATE_PATH: &str = "spinwheel.json";
pub const DEFAULT_FRAME_MS: u64 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameConfig {
    /// Delay between animation frames.
    pub interval: Duration,
}

impl FrameConfig {
    /// Build frame config from environment variables.
    ///
    /// Optional:
    /// - `SPINWHEEL_FRAME_MS`: default 16, minimum 1
    #[must_use]
    pub fn from_env() -> Self {
        let frame_ms = env_parse("SPINWHEEL_FRAME_MS", DEFAULT_FRAME_MS).max(1);
        Self { interval: Duration::from_millis(frame_ms) }
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self { interval: Duration::from_millis(DEFAULT_FRAME_MS) }
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
