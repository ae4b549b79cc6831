//! Configuration for a simulation run.
//!
//! Configurations are plain JSON. Every field is optional and falls back to
//! the stock layout, so `{}` is a valid file:
//!
//! ```json
//! {
//!   "name": "Winter defrost",
//!   "particle_count": 4000,
//!   "seed": 7,
//!   "params": { "blend_door": 0.8, "mode_defrost": true, "mode_face": false }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::params::Params;
use crate::zones::ZoneMap;

/// Window settings for the viewer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "HVAC Airflow".into(),
            width: 1280,
            height: 720,
        }
    }
}

/// Complete simulation configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HvacConfig {
    pub name: String,
    /// Number of pool slots, fixed for the lifetime of the simulation.
    pub particle_count: usize,
    /// Rng seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Sprite diameter in world units.
    pub particle_size: f32,
    pub zones: ZoneMap,
    /// Control settings at startup.
    pub params: Params,
    pub window: WindowConfig,
}

impl Default for HvacConfig {
    fn default() -> Self {
        Self {
            name: "Default cabin".into(),
            particle_count: 2000,
            seed: None,
            particle_size: 0.3,
            zones: ZoneMap::default(),
            params: Params::default(),
            window: WindowConfig::default(),
        }
    }
}

impl HvacConfig {
    /// Parse and validate a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config '{}' from {}", config.name, path.display());
        Ok(config)
    }

    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Check the zone ordering, the pool size and the sprite size.
    ///
    /// Out-of-range control values are not an error; they are clamped every
    /// frame. A warning is logged instead.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.zones.validate()?;
        if self.particle_count == 0 {
            return Err(ConfigError::EmptyPool);
        }
        if !(self.particle_size.is_finite() && self.particle_size > 0.0) {
            return Err(ConfigError::InvalidParticleSize(self.particle_size));
        }
        if self.params.is_out_of_range() {
            log::warn!(
                "Params out of range (blend_door = {}, air_speed = {}); values will be clamped",
                self.params.blend_door,
                self.params.air_speed
            );
        }
        Ok(())
    }
}
