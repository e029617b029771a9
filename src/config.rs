//! Runtime configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::{DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE, MIN_BOARD_SIZE};

pub const ENV_SIZE: &str = "TUI2048_SIZE";
pub const ENV_DATA_DIR: &str = "TUI2048_DATA_DIR";
pub const ENV_SEED: &str = "TUI2048_SEED";
pub const ENV_LOG_PATH: &str = "TUI2048_LOG_PATH";
pub const ENV_NO_SAVE: &str = "TUI2048_NO_SAVE";

const APP_DIR: &str = "tui-2048";
const LOG_FILE: &str = "tui-2048.log";

/// Terminal client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub board_size: u8,
    pub data_dir: PathBuf,
    pub seed: u32,
    pub log_path: PathBuf,
    /// False keeps everything in memory; nothing is written to `data_dir`.
    pub save_enabled: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let board_size = var(ENV_SIZE)
            .and_then(|s| s.parse::<u8>().ok())
            .unwrap_or(DEFAULT_BOARD_SIZE)
            .clamp(MIN_BOARD_SIZE, MAX_BOARD_SIZE);

        let data_dir = var(ENV_DATA_DIR)
            .map(PathBuf::from)
            .or_else(|| var("XDG_DATA_HOME").map(|d| PathBuf::from(d).join(APP_DIR)))
            .or_else(|| {
                var("HOME").map(|h| PathBuf::from(h).join(".local").join("share").join(APP_DIR))
            })
            .unwrap_or_else(|| PathBuf::from(".tui-2048"));

        let seed = var(ENV_SEED)
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(clock_seed);

        let log_path = var(ENV_LOG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(LOG_FILE));

        let save_enabled = !var(ENV_NO_SAVE).is_some_and(|s| is_truthy(&s));

        Self {
            board_size,
            data_dir,
            seed,
            log_path,
            save_enabled,
        }
    }
}

fn is_truthy(s: &str) -> bool {
    matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

fn clock_seed() -> u32 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    (now.as_secs() as u32) ^ now.subsec_nanos()
}
