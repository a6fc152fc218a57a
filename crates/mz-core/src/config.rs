//! Session configuration
//!
//! Everything needed to set up a run: which builder and skill level to
//! generate with, which driver steers, and how the robot is equipped. Loaded
//! from JSON; missing fields take their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{INITIAL_BATTERY, SKILL_LEVELS};
use crate::driver::DriverKind;
use crate::errors::ConfigError;
use crate::generation::{Builder, GenerationRequest};

/// Robot equipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotConfig {
    pub initial_battery: f32,
    pub distance_sensor: bool,
    pub room_sensor: bool,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            initial_battery: INITIAL_BATTERY,
            distance_sensor: true,
            room_sensor: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub builder: Builder,
    /// Index into the skill tables, 0 (smallest) to 15
    pub skill: usize,
    pub perfect: bool,
    pub driver: DriverKind,
    pub seed: Option<u64>,
    pub robot: RobotConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            builder: Builder::default(),
            skill: 0,
            perfect: true,
            driver: DriverKind::default(),
            seed: None,
            robot: RobotConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Load and validate a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.skill >= SKILL_LEVELS {
            return Err(ConfigError::InvalidSkill(self.skill));
        }
        Ok(())
    }

    /// Generation request for this configuration
    pub fn generation_request(&self) -> Result<GenerationRequest, ConfigError> {
        let request = GenerationRequest::from_skill(self.builder, self.skill, self.perfect)?;
        Ok(match self.seed {
            Some(seed) => request.with_seed(seed),
            None => request,
        })
    }
}

/// Select a driver by name
pub fn parse_driver(name: &str) -> Result<DriverKind, ConfigError> {
    DriverKind::parse_name(name)
}

/// Select a builder by name
pub fn parse_builder(name: &str) -> Result<Builder, ConfigError> {
    Builder::parse_name(name)
}
