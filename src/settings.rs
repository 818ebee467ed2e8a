//! Game settings and preferences
//!
//! Persisted as JSON next to the game (`settings.json` by default).

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error::SettingsError;
use crate::sim::TrafficConfig;
use crate::tuning::Tuning;

/// Maximum volume level
pub const MAX_VOLUME: u8 = 100;

/// Window resolution presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Resolution {
    #[default]
    #[serde(rename = "Full screen")]
    FullScreen,
    #[serde(rename = "1920x1080")]
    R1920x1080,
    #[serde(rename = "1680x1050")]
    R1680x1050,
    #[serde(rename = "1280x1024")]
    R1280x1024,
    #[serde(rename = "1280x720")]
    R1280x720,
}

impl Resolution {
    pub const ALL: [Resolution; 5] = [
        Resolution::FullScreen,
        Resolution::R1920x1080,
        Resolution::R1680x1050,
        Resolution::R1280x1024,
        Resolution::R1280x720,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::FullScreen => "Full screen",
            Resolution::R1920x1080 => "1920x1080",
            Resolution::R1680x1050 => "1680x1050",
            Resolution::R1280x1024 => "1280x1024",
            Resolution::R1280x720 => "1280x720",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
    }

    /// Fixed size in pixels; full screen follows the monitor
    pub fn size(&self) -> Option<(f32, f32)> {
        match self {
            Resolution::FullScreen => None,
            Resolution::R1920x1080 => Some((1920.0, 1080.0)),
            Resolution::R1680x1050 => Some((1680.0, 1050.0)),
            Resolution::R1280x1024 => Some((1280.0, 1024.0)),
            Resolution::R1280x720 => Some((1280.0, 720.0)),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub resolution: Resolution,
    /// Music volume (0 - 100)
    pub music_volume: u8,
    /// Sound effects volume (0 - 100)
    pub effects_volume: u8,
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            resolution: Resolution::FullScreen,
            music_volume: MAX_VOLUME,
            effects_volume: MAX_VOLUME,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    pub fn set_music_volume(&mut self, volume: u8) {
        self.music_volume = volume.min(MAX_VOLUME);
    }

    pub fn set_effects_volume(&mut self, volume: u8) {
        self.effects_volume = volume.min(MAX_VOLUME);
    }

    /// Screen size, using `monitor` for full screen (default 1920x1080)
    pub fn screen_size(&self, monitor: Option<(f32, f32)>) -> (f32, f32) {
        self.resolution
            .size()
            .or(monitor)
            .unwrap_or((SCREEN_WIDTH, SCREEN_HEIGHT))
    }

    /// Traffic geometry fitted to the chosen resolution
    pub fn traffic_config(&self, monitor: Option<(f32, f32)>) -> TrafficConfig {
        let (width, height) = self.screen_size(monitor);
        self.tuning.traffic.clone().fit_to_screen(width, height)
    }

    /// Tuning with its traffic geometry fitted to the chosen resolution
    pub fn fitted_tuning(&self, monitor: Option<(f32, f32)>) -> Tuning {
        Tuning {
            traffic: self.traffic_config(monitor),
            ..self.tuning.clone()
        }
    }

    /// Load settings; a missing file yields defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let mut settings: Settings = serde_json::from_str(&json)?;
        if settings.music_volume > MAX_VOLUME || settings.effects_volume > MAX_VOLUME {
            log::warn!(
                "Clamping volumes {}/{} to {}",
                settings.music_volume,
                settings.effects_volume,
                MAX_VOLUME
            );
            settings.set_music_volume(settings.music_volume);
            settings.set_effects_volume(settings.effects_volume);
        }
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
