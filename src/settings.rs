//! Game settings
//!
//! Loaded from an optional JSON file; anything missing falls back to the
//! defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// Run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    /// Arena width (application units)
    pub arena_width: i64,
    /// Arena height (application units)
    pub arena_height: i64,
    /// Player start position (application units); arena centre if unset
    pub player_start: Option<(i64, i64)>,

    // === Determinism ===
    /// RNG seed; a fresh one is drawn (and logged) if unset
    pub seed: Option<u64>,

    // === Driver ===
    /// Driver clock rate
    pub tick_rate_hz: u32,
    /// Ticks a downed player waits before revival
    pub revive_delay_ticks: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            player_start: None,

            seed: None,

            tick_rate_hz: TICK_RATE_HZ,
            revive_delay_ticks: REVIVE_DELAY_TICKS,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a settings file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from a file, falling back to defaults on any error
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    /// Reject configurations the simulation cannot run
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.arena_width < 1 || self.arena_height < 1 {
            return Err(SettingsError::EmptyArena {
                width: self.arena_width,
                height: self.arena_height,
            });
        }
        if self.arena_width > MAX_ARENA_UNITS || self.arena_height > MAX_ARENA_UNITS {
            return Err(SettingsError::ArenaTooLarge {
                width: self.arena_width,
                height: self.arena_height,
                max: MAX_ARENA_UNITS,
            });
        }
        if self.tick_rate_hz == 0 {
            return Err(SettingsError::ZeroTickRate);
        }
        if let Some((x, y)) = self.player_start {
            if !(0..=self.arena_width).contains(&x) || !(0..=self.arena_height).contains(&y) {
                return Err(SettingsError::StartOutsideArena {
                    x,
                    y,
                    width: self.arena_width,
                    height: self.arena_height,
                });
            }
        }
        Ok(())
    }

    /// Player start, defaulting to the arena centre
    pub fn start_position(&self) -> (i64, i64) {
        self.player_start
            .unwrap_or((self.arena_width / 2, self.arena_height / 2))
    }

    /// Configured seed, or a random one logged so the run can be replayed
    pub fn seed_or_entropy(&self) -> u64 {
        match self.seed {
            Some(seed) => seed,
            None => {
                let seed = rand::random::<u64>();
                log::info!("No seed configured, using {}", seed);
                seed
            }
        }
    }
}
