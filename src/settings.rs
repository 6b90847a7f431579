//! Runtime settings
//!
//! Read from a JSON file at startup. Missing keys take their defaults, and a missing
//! or unreadable file means all defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::sim::Viewport;

/// Environment variable naming the settings file
pub const SETTINGS_ENV: &str = "SKYRUNNER_SETTINGS";
/// Settings file used when the environment variable is unset
pub const DEFAULT_SETTINGS_PATH: &str = "skyrunner.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// World seed; a fresh one is picked per run when unset
    pub seed: Option<u64>,

    // === Viewport ===
    pub viewport_width: f32,
    pub viewport_height: f32,

    // === Score service ===
    /// Base URL serving `get_score` and `save_score`
    pub score_service_url: String,
    pub request_timeout_secs: u64,

    // === Headless runner ===
    /// Let the demo AI play
    pub autopilot: bool,
    /// Upper bound on ticks before the runner stops on its own
    pub max_ticks: u64,

    // === Accessibility ===
    /// Reduced motion (no hit flicker or colour strobing)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,

            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,

            score_service_url: "http://127.0.0.1:5000".to_string(),
            request_timeout_secs: 5,

            autopilot: true,
            // Five minutes at 60 Hz
            max_ticks: 5 * 60 * 60,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Settings file named by `SKYRUNNER_SETTINGS`, or the default path
    pub fn path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH))
    }

    /// Load settings, writing the defaults out first if the file does not exist
    pub fn load_or_create(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if path.exists() {
            return Self::load_from(path);
        }

        let settings = Self::default();
        match settings.save_to(path) {
            Ok(()) => log::info!("Wrote default settings to {}", path.display()),
            Err(e) => log::warn!("Failed to write {}: {e}", path.display()),
        }
        settings
    }

    /// Load settings from a file, falling back to defaults
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Failed to parse {}: {e}, using defaults", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save_to(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.viewport_width,
            height: self.viewport_height,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Effective hit flicker (respects reduced_motion)
    pub fn effective_flicker(&self) -> bool {
        !self.reduced_motion
    }
}
