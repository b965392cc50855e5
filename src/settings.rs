//! Steering parameters
//!
//! A flat set of numbers supplied at start-up. Values may be replaced at any
//! time (live tuning) without resetting the session's history. Range hints in
//! the field docs are guidance only; nothing here is clamped or validated.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Which vector the host's arrow overlay should display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum IndicatorMode {
    /// Estimated walking/facing direction
    #[default]
    Direction,
    /// Combined steering vector
    Steering,
}

impl IndicatorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorMode::Direction => "Direction",
            IndicatorMode::Steering => "Steering",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "direction" | "dir" => Some(IndicatorMode::Direction),
            "steering" | "rdw" => Some(IndicatorMode::Steering),
            _ => None,
        }
    }
}

/// Errors from loading a configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Per-session steering parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringConfig {
    /// Global toggle; when false the rotation is computed but never applied
    pub enabled: bool,
    /// Arrow overlay source
    pub indicator: IndicatorMode,

    // === Override ===
    /// In-plane distance to a marker below which the too-close override fires (0 - 1)
    pub min_distance: f32,
    /// Rotation multiplier while inside `min_distance`
    pub too_close_multiplier: f32,
    /// Floor applied to the too-close distance before dividing by it
    pub emergency_distance_floor: f32,

    // === Blended rotation ===
    /// Overall strength of the combined vector
    pub total_strength: f32,
    /// Head rotation speed (deg/s) above which turning injects rotation
    pub rotational_threshold: f32,
    /// Head linear speed (m/s) above which walking injects rotation
    pub linear_threshold: f32,
    pub rotational_multiplier: f32,
    pub linear_multiplier: f32,

    // === Field weights (0 - 1 suggested, not enforced) ===
    pub boundary_weight: f32,
    pub player_weight: f32,
    pub circle_weight: f32,
    /// Drift circle radius as a percentage of the closest boundary (10 - 90)
    pub circle_radius_percent: f32,
    /// Seconds for DriftState to swing across half its range
    pub seconds_to_switch: f32,

    // === Direction estimate ===
    /// Weight of the facing direction against the walking direction
    pub facing_alpha: f32,
    /// Seconds between walking-velocity samples
    pub sample_period: f32,

    // === Curve shape ===
    /// Repulsion weight at zero distance (curve intercept)
    pub intercept: f32,
    /// Distance at which the repulsion weight reaches zero
    pub steepness: f32,
    /// Eagerness of the gain curve to approach its asymptote
    pub eagerness: f32,
    /// Slope of the gain curve asymptote
    pub asymptote_steepness: f32,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            indicator: IndicatorMode::Direction,

            min_distance: 0.3,
            too_close_multiplier: 1.0,
            emergency_distance_floor: 0.05,

            total_strength: 1.0,
            rotational_threshold: 15.0,
            linear_threshold: 0.2,
            rotational_multiplier: 0.2,
            linear_multiplier: 0.05,

            boundary_weight: 0.5,
            player_weight: 0.3,
            circle_weight: 0.2,
            circle_radius_percent: 50.0,
            seconds_to_switch: 0.1,

            facing_alpha: 0.5,
            sample_period: 0.1,

            intercept: 1.0,
            steepness: 1.5,
            eagerness: 1.0,
            asymptote_steepness: 1.0,
        }
    }
}

impl SteeringConfig {
    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded steering config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Load a config file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::from_json_file(path.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{e}; using default steering config");
                Self::default()
            }
        }
    }

    /// Rotation applied this frame, or nothing, given the suspend signal
    pub fn effective_enabled(&self, suspended: bool) -> bool {
        self.enabled && !suspended
    }
}
