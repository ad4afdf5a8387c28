use std::fmt;
use std::str::FromStr;

use crate::pitch::{RoofPitchCalculator, RoofPitchData};

/// Pitch below which snow tends to build up on the roof.
const SNOW_SHED_MIN_PITCH: f64 = 30.0;

/// Pitch below which a non-flat roof drains poorly.
const DRAINAGE_MIN_PITCH: f64 = 2.0;

/// Pitch above which wind uplift becomes a concern.
const WIND_MAX_PITCH: f64 = 45.0;

/// Roof forms with known pitch ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoofType {
    Gable,
    Hip,
    Shed,
    Flat,
    Gambrel,
    Mansard,
    Butterfly,
    Saltbox,
    Monitor,
    Sawtooth,
    ShedDormer,
}

impl RoofType {
    /// Recommended pitch range in degrees.
    #[must_use]
    pub fn pitch_range(self) -> PitchRange {
        let (min, max, optimal) = match self {
            Self::Gable => (18.43, 45.0, 33.69),
            Self::Hip => (18.43, 40.0, 26.57),
            Self::Shed => (4.76, 26.57, 14.04),
            Self::Flat => (0.0, 2.0, 1.0),
            Self::Gambrel => (20.0, 60.0, 45.0),
            Self::Mansard => (30.0, 70.0, 60.0),
            Self::Butterfly => (4.76, 20.0, 9.46),
            Self::Saltbox => (20.0, 45.0, 35.0),
            Self::Monitor => (9.46, 30.0, 18.43),
            Self::Sawtooth => (15.0, 60.0, 30.0),
            Self::ShedDormer => (9.46, 26.57, 14.04),
        };
        PitchRange { min, max, optimal }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gable => "gable",
            Self::Hip => "hip",
            Self::Shed => "shed",
            Self::Flat => "flat",
            Self::Gambrel => "gambrel",
            Self::Mansard => "mansard",
            Self::Butterfly => "butterfly",
            Self::Saltbox => "saltbox",
            Self::Monitor => "monitor",
            Self::Sawtooth => "sawtooth",
            Self::ShedDormer => "shed-dormer",
        }
    }
}

impl fmt::Display for RoofType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoofType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gable" => Ok(Self::Gable),
            "hip" => Ok(Self::Hip),
            "shed" => Ok(Self::Shed),
            "flat" => Ok(Self::Flat),
            "gambrel" => Ok(Self::Gambrel),
            "mansard" => Ok(Self::Mansard),
            "butterfly" => Ok(Self::Butterfly),
            "saltbox" => Ok(Self::Saltbox),
            "monitor" => Ok(Self::Monitor),
            "sawtooth" => Ok(Self::Sawtooth),
            "shed-dormer" | "shed_dormer" => Ok(Self::ShedDormer),
            other => Err(format!("unknown roof type '{other}'")),
        }
    }
}

/// Pitch range in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchRange {
    pub min: f64,
    pub max: f64,
    pub optimal: f64,
}

/// Range used for roof types without a table entry.
pub const DEFAULT_PITCH_RANGE: PitchRange = PitchRange {
    min: 15.0,
    max: 45.0,
    optimal: 30.0,
};

/// Site conditions checked against a recommended pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClimateConditions {
    pub heavy_snow: bool,
    pub high_wind: bool,
}

/// Outcome of the simplified building-code check.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BuildingCodeCheck {
    pub compliant: bool,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Recommended pitches for a roof type.
#[derive(Debug, Clone, PartialEq)]
pub struct PitchRecommendation {
    /// `None` when the requested type is not known.
    pub roof_type: Option<RoofType>,
    pub min: RoofPitchData,
    pub max: RoofPitchData,
    pub optimal: RoofPitchData,
    /// Present when climate conditions were supplied.
    pub code_check: Option<BuildingCodeCheck>,
}

pub(crate) fn recommend(
    calculator: &RoofPitchCalculator,
    roof_type: &str,
    climate: Option<&ClimateConditions>,
) -> PitchRecommendation {
    let known = roof_type.parse::<RoofType>().ok();
    let range = known.map_or(DEFAULT_PITCH_RANGE, RoofType::pitch_range);

    PitchRecommendation {
        roof_type: known,
        min: calculator.pitch_data_from_degrees(range.min),
        max: calculator.pitch_data_from_degrees(range.max),
        optimal: calculator.pitch_data_from_degrees(range.optimal),
        code_check: climate.map(|c| check_building_code(range.optimal, known, c)),
    }
}

fn check_building_code(
    pitch: f64,
    roof_type: Option<RoofType>,
    climate: &ClimateConditions,
) -> BuildingCodeCheck {
    let mut warnings = Vec::new();
    let mut recommendations = Vec::new();

    if climate.heavy_snow && pitch < SNOW_SHED_MIN_PITCH {
        warnings.push(format!(
            "Pitch {pitch}° is below {SNOW_SHED_MIN_PITCH}° and may hold snow load"
        ));
        recommendations.push("Increase pitch or design framing for full snow load".to_owned());
    }
    if roof_type != Some(RoofType::Flat) && pitch < DRAINAGE_MIN_PITCH {
        warnings.push(format!(
            "Pitch {pitch}° is below {DRAINAGE_MIN_PITCH}° and may not drain"
        ));
        recommendations.push("Use a low-slope membrane with positive drainage".to_owned());
    }
    if climate.high_wind && pitch > WIND_MAX_PITCH {
        warnings.push(format!(
            "Pitch {pitch}° exceeds {WIND_MAX_PITCH}° and increases wind exposure"
        ));
        recommendations.push("Add hurricane ties and high-wind fastening".to_owned());
    }

    BuildingCodeCheck {
        compliant: warnings.is_empty(),
        warnings,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch::PitchCategory;

    #[test]
    fn known_type_uses_table() {
        let rec = recommend(&RoofPitchCalculator::default(), "gable", None);
        assert_eq!(rec.roof_type, Some(RoofType::Gable));
        assert_eq!(rec.optimal.pitch_ratio, "8:12");
        assert_eq!(rec.min.pitch_ratio, "4:12");
        assert_eq!(rec.max.pitch_ratio, "12:12");
        assert!((rec.optimal.run - 12.0).abs() < 1e-12);
        assert!(rec.code_check.is_none());
    }

    #[test]
    fn unknown_type_uses_default_range() {
        let rec = recommend(&RoofPitchCalculator::default(), "geodesic", None);
        assert_eq!(rec.roof_type, None);
        assert!((rec.min.pitch - 15.0).abs() < 1e-12);
        assert!((rec.max.pitch - 45.0).abs() < 1e-12);
        assert!((rec.optimal.pitch - 30.0).abs() < 1e-12);
        assert_eq!(rec.optimal.category, PitchCategory::Conventional);
    }

    #[test]
    fn snow_flags_low_pitch() {
        let climate = ClimateConditions {
            heavy_snow: true,
            high_wind: false,
        };
        let rec = recommend(&RoofPitchCalculator::default(), "hip", Some(&climate));
        let check = rec.code_check.unwrap_or_default();
        assert!(!check.compliant);
        assert_eq!(check.warnings.len(), 1);
        assert!(check.warnings[0].contains("snow"));
    }

    #[test]
    fn wind_flags_steep_pitch() {
        let climate = ClimateConditions {
            heavy_snow: true,
            high_wind: true,
        };
        let rec = recommend(&RoofPitchCalculator::default(), "mansard", Some(&climate));
        let check = rec.code_check.unwrap_or_default();
        assert_eq!(check.warnings.len(), 1);
        assert!(check.warnings[0].contains("wind"));
    }

    #[test]
    fn flat_roof_is_exempt_from_drainage_check() {
        let rec = recommend(
            &RoofPitchCalculator::default(),
            "flat",
            Some(&ClimateConditions::default()),
        );
        assert!(rec.code_check.unwrap_or_default().compliant);
    }

    #[test]
    fn low_pitch_non_flat_roof_fails_drainage() {
        let check = check_building_code(1.0, Some(RoofType::Shed), &ClimateConditions::default());
        assert!(!check.compliant);
        assert!(check.warnings[0].contains("drain"));
    }

    #[test]
    fn roof_type_names_round_trip() {
        for name in ["gable", "shed-dormer", "sawtooth"] {
            let parsed: RoofType = name.parse().unwrap_or(RoofType::Flat);
            assert_eq!(parsed.to_string(), name);
        }
    }
}
