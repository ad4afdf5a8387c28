//! Classification and sizing rules for roof-wall connections.

use super::config::RoofWallIntegrationConfig;
use super::connection::{ConnectionType, IntersectionType, RoofWallIntersection2D};
use crate::model::Roof2D;
use crate::pitch::RoofPitchData;

/// Edge crossings flatter than this angle (degrees) are eaves.
const EAVE_MAX_ANGLE: f64 = 30.0;

/// Roof rise assumed when a roof records no height at all.
const FALLBACK_ROOF_HEIGHT: f64 = 3.0;

/// Classifies a connection from one of its intersections.
#[must_use]
pub fn determine_connection_type(intersection: &RoofWallIntersection2D) -> ConnectionType {
    match intersection.intersection_type {
        IntersectionType::Corner => ConnectionType::Gable,
        IntersectionType::Edge if intersection.angle < EAVE_MAX_ANGLE => ConnectionType::Eave,
        IntersectionType::Edge => ConnectionType::Gable,
        IntersectionType::Surface => ConnectionType::Overhang,
    }
}

/// Overhang for a connection type, scaled by the pitch category when
/// enabled and pitch data is known.
#[must_use]
pub fn calculate_overhang(
    config: &RoofWallIntegrationConfig,
    connection_type: ConnectionType,
    pitch_data: Option<&RoofPitchData>,
) -> f64 {
    let base = match connection_type {
        ConnectionType::Overhang => config.default_overhang,
        ConnectionType::Eave => config.default_overhang * 0.8,
        ConnectionType::Flush => 0.0,
        _ => config.default_overhang * 0.5,
    };

    match pitch_data {
        Some(pitch) if config.pitch_calculation.auto_adjust_overhang => {
            base * pitch.category.overhang_factor()
        }
        _ => base,
    }
}

/// Roof rise used when no pitch data is available: the recorded roof
/// height, else the plan height, else a fixed default. Zero counts as
/// unset.
#[must_use]
pub fn fallback_roof_height(roof: &Roof2D) -> f64 {
    roof.metadata
        .height
        .filter(|h| *h > 0.0)
        .or(Some(roof.dimensions.height).filter(|h| *h > 0.0))
        .unwrap_or(FALLBACK_ROOF_HEIGHT)
}
