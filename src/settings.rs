//! Game settings and preferences
//!
//! Persisted separately from best scores in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_TICK_MS;
use crate::platform::storage;
use crate::sim::Mode;

/// Movement speed presets offered in the speed selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpeedPreset {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl SpeedPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeedPreset::Slow => "Slow",
            SpeedPreset::Normal => "Normal",
            SpeedPreset::Fast => "Fast",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "slow" => Some(SpeedPreset::Slow),
            "normal" | "medium" => Some(SpeedPreset::Normal),
            "fast" => Some(SpeedPreset::Fast),
            _ => None,
        }
    }

    /// Milliseconds between movement ticks
    pub fn tick_ms(&self) -> u32 {
        match self {
            SpeedPreset::Slow => 150,
            SpeedPreset::Normal => DEFAULT_TICK_MS,
            SpeedPreset::Fast => 75,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Milliseconds per movement tick (always positive)
    pub tick_ms: u32,

    /// Mode picked last time, preselected in the menu
    pub last_mode: Option<Mode>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,

    // === Accessibility ===
    /// Reduced motion (no eat flash)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            last_mode: None,
            master_volume: 0.8,
            muted: false,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Change the tick interval. Zero is rejected. Returns true on change.
    pub fn set_tick_ms(&mut self, ms: u32) -> bool {
        if ms == 0 || ms == self.tick_ms {
            return false;
        }
        self.tick_ms = ms;
        true
    }

    /// Preset matching the current interval, if any
    pub fn speed_preset(&self) -> Option<SpeedPreset> {
        [SpeedPreset::Slow, SpeedPreset::Normal, SpeedPreset::Fast]
            .into_iter()
            .find(|p| p.tick_ms() == self.tick_ms)
    }

    /// Flip mute; returns the new flag
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Set master volume, clamped to 0.0 - 1.0
    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = volume.clamp(0.0, 1.0);
    }

    /// Effective eat flash (respects reduced_motion)
    pub fn effective_eat_flash(&self) -> bool {
        !self.reduced_motion
    }

    /// Effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0)
        }
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "snake_arcade_settings";

    /// Load settings from storage
    pub fn load() -> Self {
        match storage::load_json::<Self>(Self::STORAGE_KEY) {
            Some(mut settings) => {
                if settings.tick_ms == 0 {
                    settings.tick_ms = DEFAULT_TICK_MS;
                }
                log::info!("Loaded settings from LocalStorage");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to storage
    pub fn save(&self) {
        if storage::save_json(Self::STORAGE_KEY, self) {
            log::info!("Settings saved");
        }
    }
}
