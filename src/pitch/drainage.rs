use std::fmt;

use super::data::PitchCategory;

/// Square feet of roof served by one downspout.
const AREA_PER_DOWNSPOUT: f64 = 600.0;

/// Design flow in gallons per minute per unit of roof area.
const FLOW_RATE_PER_AREA: f64 = 0.623;

const FLAT_NOTES: &[&str] = &[
    "Install internal roof drains with overflow scuppers",
    "Taper insulation to at least 1/4 inch per foot toward drains",
];

const LOW_NOTES: &[&str] = &[
    "Install scuppers through the low edge of the roof",
    "Use a membrane roofing system rated for low slopes",
];

const CONVENTIONAL_NOTES: &[&str] = &["Install 5 inch K-style gutters along all eaves"];

const STEEP_NOTES: &[&str] = &[
    "Install 6 inch gutters to handle fast runoff",
    "Add gutter guards or splash diverters at valleys",
];

/// Primary drainage system for a roof.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainageType {
    InternalDrains,
    Scuppers,
    Gutters,
}

impl fmt::Display for DrainageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InternalDrains => "internal drains",
            Self::Scuppers => "scuppers",
            Self::Gutters => "gutters",
        })
    }
}

/// Simplified drainage sizing for a roof.
#[derive(Debug, Clone, PartialEq)]
pub struct DrainageRequirements {
    pub drainage_type: DrainageType,
    /// Gutter width in inches, when gutters are used.
    pub gutter_size: Option<f64>,
    pub downspout_count: u32,
    /// Design flow in gallons per minute.
    pub flow_rate: f64,
    pub recommendations: Vec<String>,
}

/// Sizes drainage for a roof of the given category and area.
#[must_use]
pub(crate) fn drainage_requirements(
    category: PitchCategory,
    roof_area: f64,
    precision: i32,
) -> DrainageRequirements {
    let (drainage_type, gutter_size, recommendations) = match category {
        PitchCategory::Flat => (DrainageType::InternalDrains, None, FLAT_NOTES),
        PitchCategory::Low => (DrainageType::Scuppers, None, LOW_NOTES),
        PitchCategory::Conventional => (DrainageType::Gutters, Some(5.0), CONVENTIONAL_NOTES),
        PitchCategory::Steep | PitchCategory::VerySteep => {
            (DrainageType::Gutters, Some(6.0), STEEP_NOTES)
        }
    };

    let area = roof_area.max(0.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let downspout_count = (area / AREA_PER_DOWNSPOUT).ceil() as u32;

    DrainageRequirements {
        drainage_type,
        gutter_size,
        downspout_count,
        flow_rate: crate::math::round_to(area * FLOW_RATE_PER_AREA, precision),
        recommendations: recommendations.iter().map(|s| (*s).to_owned()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_roof_uses_internal_drains() {
        let req = drainage_requirements(PitchCategory::Flat, 1000.0, 2);
        assert_eq!(req.drainage_type, DrainageType::InternalDrains);
        assert_eq!(req.gutter_size, None);
        assert_eq!(req.downspout_count, 2);
        assert!((req.flow_rate - 623.0).abs() < 1e-9);
    }

    #[test]
    fn low_roof_uses_scuppers() {
        let req = drainage_requirements(PitchCategory::Low, 600.0, 2);
        assert_eq!(req.drainage_type, DrainageType::Scuppers);
        assert_eq!(req.downspout_count, 1);
    }

    #[test]
    fn pitched_roof_uses_gutters() {
        let req = drainage_requirements(PitchCategory::Steep, 1201.0, 2);
        assert_eq!(req.drainage_type, DrainageType::Gutters);
        assert_eq!(req.gutter_size, Some(6.0));
        assert_eq!(req.downspout_count, 3);
        assert_eq!(req.drainage_type.to_string(), "gutters");
    }

    #[test]
    fn zero_area_needs_no_downspouts() {
        let req = drainage_requirements(PitchCategory::Conventional, 0.0, 2);
        assert_eq!(req.downspout_count, 0);
        assert!(req.flow_rate.abs() < 1e-12);
    }
}
