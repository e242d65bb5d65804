//! Host configuration with documented defaults
//!
//! Engine constants (tick length, foundation fill time, tribulation danger)
//! live next to the code that uses them. This config only covers how the
//! host process runs: where data lives, how often the live loop fires and
//! how logging and randomness are set up.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::error::{HeavenError, Result};

/// Configuration for the cultivation host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Directory holding players.toml, worlds.toml and calendar.toml
    pub data_dir: PathBuf,

    /// Real seconds between live ticks
    ///
    /// Should match `SECONDS_PER_TICK` so a live tick covers one in-game
    /// day. Shorter intervals still work: the tick planner enforces a floor
    /// of one tick per live cycle.
    pub live_tick_interval_secs: u64,

    /// Seed for the tribulation/breakthrough RNG
    ///
    /// `None` seeds from OS entropy. Set it for reproducible runs.
    pub seed: Option<u64>,

    /// Default `tracing` filter directive (overridden by `RUST_LOG`)
    pub log_filter: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".data"),
            live_tick_interval_secs: 60,
            seed: None,
            log_filter: "heaven_and_earth=info".to_string(),
        }
    }
}

impl GameConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from a TOML file, falling back to defaults when absent
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: GameConfig = toml::from_str(&content)?;
        config.validate().map_err(HeavenError::InvalidConfig)?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.live_tick_interval_secs == 0 {
            return Err("live_tick_interval_secs must be positive".into());
        }

        if self.data_dir.as_os_str().is_empty() {
            return Err("data_dir must not be empty".into());
        }

        if self.log_filter.trim().is_empty() {
            return Err("log_filter must not be empty".into());
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<GameConfig> = OnceLock::new();

/// Get the global host config (initializes with defaults if not set)
pub fn config() -> &'static GameConfig {
    CONFIG.get_or_init(GameConfig::default)
}

/// Set the global host config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: GameConfig) -> std::result::Result<(), GameConfig> {
    CONFIG.set(config)
}
