//! Match settings
//!
//! Loaded from a JSON file; every field is optional and falls back to the
//! defaults in `consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::{CharacterKind, MapLayout};

/// Settings for one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchSettings {
    /// RNG seed (layout choice, decoration, target bands)
    pub seed: u64,
    /// Map layout name; picked at random when absent
    pub layout: Option<String>,
    /// Character ids for player 1 and player 2 (1 = Gunner, 2 = Bomber, 3 = Scatter)
    pub characters: [u8; 2],

    // === Turn timers ===
    /// Movement window (ms)
    pub move_time_ms: u64,
    /// Power gauge window (ms)
    pub aim_time_ms: u64,

    // === Gauges ===
    /// Angle gauge speed (degrees per step)
    pub angle_gauge_speed: f32,
    /// Power gauge speed (bar units per step)
    pub power_gauge_speed: f32,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            layout: None,
            characters: [1, 2],

            move_time_ms: MOVE_TIME_MS,
            aim_time_ms: AIM_TIME_MS,

            angle_gauge_speed: ANGLE_GAUGE_SPEED,
            power_gauge_speed: POWER_GAUGE_SPEED,
        }
    }
}

fn check_speed(field: &'static str, value: f32, max: f32) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::InvalidValue {
            field,
            reason: "must be a positive number",
        });
    }
    if value >= max {
        return Err(ConfigError::InvalidValue {
            field,
            reason: "must be smaller than the gauge range",
        });
    }
    Ok(())
}

impl MatchSettings {
    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings from a file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("Using default settings: {err}");
                Self::default()
            }
        }
    }

    pub fn to_json_pretty(&self) -> String {
        // Plain struct of numbers and strings; serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Resolve both character ids
    pub fn character_kinds(&self) -> Result<[CharacterKind; 2], ConfigError> {
        Ok([
            CharacterKind::from_id(self.characters[0])?,
            CharacterKind::from_id(self.characters[1])?,
        ])
    }

    /// Resolve the layout name (None = choose at random)
    pub fn map_layout(&self) -> Result<Option<MapLayout>, ConfigError> {
        match &self.layout {
            None => Ok(None),
            Some(name) => MapLayout::from_str(name)
                .map(Some)
                .ok_or_else(|| ConfigError::UnknownLayout(name.clone())),
        }
    }

    /// Reject settings a match cannot be built from
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.character_kinds()?;
        self.map_layout()?;

        if self.move_time_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "move_time_ms",
                reason: "must be positive",
            });
        }
        if self.aim_time_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "aim_time_ms",
                reason: "must be positive",
            });
        }
        check_speed("angle_gauge_speed", self.angle_gauge_speed, MAX_AIM_ANGLE)?;
        check_speed("power_gauge_speed", self.power_gauge_speed, POWER_BAR_HEIGHT)?;
        Ok(())
    }
}
