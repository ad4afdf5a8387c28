use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Draw order of roofs relative to walls in plan view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderOrder {
    #[default]
    RoofsOverWalls,
    WallsOverRoofs,
}

/// Pitch-related settings of the integration system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchCalculationConfig {
    /// Derive pitch data for each connection.
    pub enabled: bool,
    /// Pitch in degrees assumed when none is given.
    pub default_pitch: f64,
    pub min_pitch: f64,
    pub max_pitch: f64,
    /// Scale overhangs by the pitch category.
    pub auto_adjust_overhang: bool,
}

impl Default for PitchCalculationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_pitch: 30.0,
            min_pitch: 0.0,
            max_pitch: 60.0,
            auto_adjust_overhang: true,
        }
    }
}

/// Settings of [`RoofWallIntegrationSystem2D`](super::RoofWallIntegrationSystem2D).
///
/// Any subset of fields can be supplied; the rest take their defaults,
/// either with struct update syntax or when deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoofWallIntegrationConfig {
    pub default_overhang: f64,
    pub min_overhang: f64,
    pub max_overhang: f64,
    /// Height of the eave above the top of the wall.
    pub eave_height: f64,
    /// Distance within which a roof corner counts as touching a wall.
    pub connection_tolerance: f64,
    /// Write connection ids back onto the returned roofs and walls.
    pub auto_connect: bool,
    pub show_connection_indicators: bool,
    pub render_order: RenderOrder,
    pub pitch_calculation: PitchCalculationConfig,
}

impl Default for RoofWallIntegrationConfig {
    fn default() -> Self {
        Self {
            default_overhang: 0.6,
            min_overhang: 0.3,
            max_overhang: 1.2,
            eave_height: 0.0,
            connection_tolerance: 0.1,
            auto_connect: true,
            show_connection_indicators: true,
            render_order: RenderOrder::default(),
            pitch_calculation: PitchCalculationConfig::default(),
        }
    }
}

impl RoofWallIntegrationConfig {
    /// Checks that overhangs and tolerances are non-negative and the ranges
    /// are ordered.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` for a negative or non-finite value and
    /// `ConfigError::OverhangRange` when `min_overhang > max_overhang`.
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("default_overhang", self.default_overhang),
            ("min_overhang", self.min_overhang),
            ("max_overhang", self.max_overhang),
            ("connection_tolerance", self.connection_tolerance),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("expected a non-negative number, got {value}"),
                }
                .into());
            }
        }

        if self.min_overhang > self.max_overhang {
            return Err(ConfigError::OverhangRange {
                min: self.min_overhang,
                max: self.max_overhang,
            }
            .into());
        }

        let pitch = &self.pitch_calculation;
        if pitch.min_pitch > pitch.max_pitch {
            return Err(ConfigError::Invalid {
                field: "pitch_calculation.min_pitch",
                reason: format!(
                    "minimum pitch {} exceeds maximum pitch {}",
                    pitch.min_pitch, pitch.max_pitch
                ),
            }
            .into());
        }

        Ok(())
    }
}
