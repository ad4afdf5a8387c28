use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Steepness class of a roof pitch.
///
/// Boundaries are inclusive on the lower class: exactly 2° is flat,
/// exactly 45° is steep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PitchCategory {
    Flat,
    Low,
    Conventional,
    Steep,
    VerySteep,
}

impl PitchCategory {
    /// Classifies a pitch given in degrees.
    #[must_use]
    pub fn from_degrees(pitch: f64) -> Self {
        if pitch <= 2.0 {
            Self::Flat
        } else if pitch <= 10.0 {
            Self::Low
        } else if pitch <= 30.0 {
            Self::Conventional
        } else if pitch <= 45.0 {
            Self::Steep
        } else {
            Self::VerySteep
        }
    }

    /// Overhang multiplier applied when overhangs follow the pitch.
    #[must_use]
    pub fn overhang_factor(self) -> f64 {
        match self {
            Self::Flat => 0.5,
            Self::Low => 0.8,
            Self::Conventional => 1.0,
            Self::Steep => 1.2,
            Self::VerySteep => 1.5,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Low => "low",
            Self::Conventional => "conventional",
            Self::Steep => "steep",
            Self::VerySteep => "very_steep",
        }
    }
}

impl fmt::Display for PitchCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PitchCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flat" => Ok(Self::Flat),
            "low" => Ok(Self::Low),
            "conventional" => Ok(Self::Conventional),
            "steep" => Ok(Self::Steep),
            "very_steep" | "very-steep" => Ok(Self::VerySteep),
            other => Err(format!("unknown pitch category '{other}'")),
        }
    }
}

/// Units a pitch value can be expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PitchUnit {
    Degrees,
    Radians,
    /// Rise over run, `tan(angle)`.
    Ratio,
    /// Rise over run times 100.
    Percent,
}

/// A roof pitch in every representation the editor displays.
///
/// Numeric fields are rounded to the calculator's precision when the value
/// is built.
#[derive(Debug, Clone, PartialEq)]
pub struct RoofPitchData {
    /// Angle from horizontal, in degrees.
    pub pitch: f64,
    /// Rise over run.
    pub slope: f64,
    pub rise: f64,
    pub run: f64,
    /// Rise per 12 units of run, e.g. `"6:12"`.
    pub pitch_ratio: String,
    /// Slope snapped to a canonical fraction, e.g. `"1/2"`.
    pub pitch_fraction: String,
    pub category: PitchCategory,
}

/// Roof geometry derived from span and pitch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoofGeometry {
    pub ridge_height: f64,
    pub eave_height: f64,
    pub span: f64,
    /// Rafter length from eave to ridge.
    pub rafter: f64,
    pub ridge_length: f64,
    /// Sloped area of both roof planes.
    pub roof_area: f64,
    /// Plan area, assuming a square footprint.
    pub projected_area: f64,
}

/// Outcome of checking a pitch against the configured range.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PitchValidation {
    pub valid: bool,
    pub errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_boundaries_are_inclusive() {
        assert_eq!(PitchCategory::from_degrees(0.0), PitchCategory::Flat);
        assert_eq!(PitchCategory::from_degrees(2.0), PitchCategory::Flat);
        assert_eq!(PitchCategory::from_degrees(2.01), PitchCategory::Low);
        assert_eq!(PitchCategory::from_degrees(10.0), PitchCategory::Low);
        assert_eq!(PitchCategory::from_degrees(30.0), PitchCategory::Conventional);
        assert_eq!(PitchCategory::from_degrees(45.0), PitchCategory::Steep);
        assert_eq!(PitchCategory::from_degrees(45.0001), PitchCategory::VerySteep);
    }

    #[test]
    fn category_parses_from_name() {
        assert_eq!("very_steep".parse(), Ok(PitchCategory::VerySteep));
        assert_eq!("conventional".parse(), Ok(PitchCategory::Conventional));
        assert!("vertical".parse::<PitchCategory>().is_err());
        assert_eq!(PitchCategory::Low.to_string(), "low");
    }

    #[test]
    fn overhang_factors() {
        assert!((PitchCategory::Flat.overhang_factor() - 0.5).abs() < 1e-12);
        assert!((PitchCategory::VerySteep.overhang_factor() - 1.5).abs() < 1e-12);
    }
}
