//! Roof-wall integration: finds where roof outlines meet walls, classifies
//! the connections and annotates copies of the roofs and walls.

pub mod config;
pub mod connection;
mod detect;
pub mod recommendations;
pub mod rules;
pub mod validate;

pub use config::{PitchCalculationConfig, RenderOrder, RoofWallIntegrationConfig};
pub use connection::{
    ConnectionMetadata, ConnectionType, IntersectionType, RoofWallConnection2D,
    RoofWallIntegrationResult, RoofWallIntersection2D,
};
pub use recommendations::{
    BuildingCodeCheck, ClimateConditions, PitchRange, PitchRecommendation, RoofType,
};

use std::collections::BTreeMap;

use tracing::{debug, error, warn};

use crate::model::{Roof2D, Wall2D};
use crate::pitch::{PitchCalculatorConfig, PitchCategory, RoofPitchCalculator, RoofPitchData};

/// Span assumed when re-pitching a connection without its roof.
const DETACHED_SPAN: f64 = 10.0;

/// Height limits for [`RoofWallIntegrationSystem2D::calculate_optimal_pitch`].
///
/// Unset fields are derived from the wall height and the configured eave
/// height.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PitchConstraints {
    pub max_height: Option<f64>,
    pub min_height: Option<f64>,
    pub preferred_category: Option<PitchCategory>,
}

/// Analyzes how a set of roofs sits on a set of walls.
///
/// Each call to [`analyze_roof_wall_integration`](Self::analyze_roof_wall_integration)
/// recomputes everything from its inputs; the stored connections only serve
/// later lookups.
#[derive(Debug)]
pub struct RoofWallIntegrationSystem2D {
    config: RoofWallIntegrationConfig,
    pitch_calculator: RoofPitchCalculator,
    connections: BTreeMap<String, RoofWallConnection2D>,
    intersections: BTreeMap<String, Vec<RoofWallIntersection2D>>,
}

impl Default for RoofWallIntegrationSystem2D {
    fn default() -> Self {
        Self::new(RoofWallIntegrationConfig::default())
    }
}

impl RoofWallIntegrationSystem2D {
    /// Creates a system with the given settings.
    #[must_use]
    pub fn new(config: RoofWallIntegrationConfig) -> Self {
        let pitch_calculator = RoofPitchCalculator::new(PitchCalculatorConfig {
            min_pitch: config.pitch_calculation.min_pitch,
            max_pitch: config.pitch_calculation.max_pitch,
            ..PitchCalculatorConfig::default()
        });
        Self {
            config,
            pitch_calculator,
            connections: BTreeMap::new(),
            intersections: BTreeMap::new(),
        }
    }

    /// Returns the active settings.
    #[must_use]
    pub fn get_configuration(&self) -> &RoofWallIntegrationConfig {
        &self.config
    }

    /// Changes settings in place and keeps the pitch calculator in step.
    pub fn update_configuration(&mut self, update: impl FnOnce(&mut RoofWallIntegrationConfig)) {
        update(&mut self.config);
        self.pitch_calculator.set_pitch_range(
            self.config.pitch_calculation.min_pitch,
            self.config.pitch_calculation.max_pitch,
        );
    }

    /// The pitch calculator used by this system.
    #[must_use]
    pub fn pitch_calculator(&self) -> &RoofPitchCalculator {
        &self.pitch_calculator
    }

    /// Finds and classifies every roof-wall connection.
    ///
    /// The inputs are never modified; annotated copies are returned in the
    /// result. Problems that do not prevent the analysis are reported in
    /// `warnings`.
    ///
    /// Each connection is built from the roof and wall that produced it.
    /// Ids are expected to be unique: pairs sharing an id yield connections
    /// with the same id, and the stored lookup keeps only the last one.
    pub fn analyze_roof_wall_integration(
        &mut self,
        roofs: &[Roof2D],
        walls: &[Wall2D],
    ) -> RoofWallIntegrationResult {
        self.clear();

        let mut intersections = Vec::new();
        let mut connections = Vec::new();
        for roof in roofs {
            let outline = roof.outline();
            for wall in walls {
                let found = detect::roof_wall_intersections(
                    roof,
                    &outline,
                    wall,
                    self.config.connection_tolerance,
                );
                if found.is_empty() {
                    continue;
                }
                connections.push(self.build_connection(roof, wall, &found));
                intersections.extend(found);
            }
        }

        let (modified_roofs, modified_walls) = if self.config.auto_connect {
            annotate(roofs, walls, &connections)
        } else {
            (roofs.to_vec(), walls.to_vec())
        };

        let warnings = validate::validate_connections(&connections, roofs, walls, &self.config);
        for warning in &warnings {
            warn!("{warning}");
        }

        for connection in &connections {
            self.connections
                .insert(connection.id.clone(), connection.clone());
        }
        for intersection in &intersections {
            self.intersections
                .entry(pair_key(&intersection.roof_id, &intersection.wall_id))
                .or_default()
                .push(intersection.clone());
        }

        debug!(
            roofs = roofs.len(),
            walls = walls.len(),
            intersections = intersections.len(),
            connections = connections.len(),
            "roof-wall analysis complete"
        );

        RoofWallIntegrationResult {
            connections,
            intersections,
            modified_roofs,
            modified_walls,
            warnings,
        }
    }

    /// Roof span used for pitch and ridge calculations.
    ///
    /// Currently the roof width; the wall does not enter into it.
    #[must_use]
    pub fn calculate_roof_span(&self, roof: &Roof2D, _wall: &Wall2D) -> f64 {
        roof.dimensions.width
    }

    /// Picks a standard pitch for a roof resting on a wall.
    #[must_use]
    pub fn calculate_optimal_pitch(
        &self,
        roof: &Roof2D,
        wall: &Wall2D,
        constraints: Option<PitchConstraints>,
    ) -> RoofPitchData {
        let constraints = constraints.unwrap_or_default();
        let span = self.calculate_roof_span(roof, wall);
        let min_height = constraints
            .min_height
            .unwrap_or(wall.height + self.config.eave_height);
        let max_height = constraints
            .max_height
            .unwrap_or(wall.height * 2.0 + self.config.eave_height);
        let category = constraints
            .preferred_category
            .unwrap_or(PitchCategory::Conventional);
        self.pitch_calculator
            .find_optimal_pitch(span, max_height, min_height, category)
    }

    /// Re-pitches a stored connection.
    ///
    /// The roof is not available from the connection alone, so geometry is
    /// recomputed over a fixed span of 10. Returns `false`, leaving the
    /// connection untouched, if it does not exist or the pitch is invalid.
    pub fn update_connection_pitch(&mut self, connection_id: &str, new_pitch: f64) -> bool {
        let Some(existing) = self.connections.get(connection_id) else {
            warn!(connection_id, "no connection to update");
            return false;
        };

        let validation = self.pitch_calculator.validate_pitch(new_pitch);
        if !validation.valid {
            warn!(connection_id, errors = ?validation.errors, "rejected pitch update");
            return false;
        }

        let run = DETACHED_SPAN / 2.0;
        let rise = run * new_pitch.to_radians().tan();
        let pitch_data = match self.pitch_calculator.calculate_pitch_from_rise_run(rise, run) {
            Ok(data) => data,
            Err(err) => {
                error!(connection_id, error = %err, "pitch update failed");
                return false;
            }
        };
        let geometry =
            self.pitch_calculator
                .calculate_roof_geometry(DETACHED_SPAN, new_pitch, existing.eave_height);

        let mut updated = existing.clone();
        updated.ridge_height = geometry.ridge_height;
        if self.config.pitch_calculation.auto_adjust_overhang {
            updated.overhang =
                rules::calculate_overhang(&self.config, updated.connection_type, Some(&pitch_data));
        }
        updated.pitch_data = Some(pitch_data);
        updated.geometry = Some(geometry);
        self.connections.insert(connection_id.to_owned(), updated);
        true
    }

    /// Recommended pitches for a roof type, optionally checked against
    /// climate conditions. Unknown types get a generic 15°–45° range.
    #[must_use]
    pub fn get_pitch_recommendations(
        &self,
        roof_type: &str,
        climate: Option<&ClimateConditions>,
    ) -> PitchRecommendation {
        recommendations::recommend(&self.pitch_calculator, roof_type, climate)
    }

    /// Stored connection by id.
    #[must_use]
    pub fn get_connection(&self, connection_id: &str) -> Option<&RoofWallConnection2D> {
        self.connections.get(connection_id)
    }

    /// All stored connections, ordered by id.
    pub fn get_all_connections(&self) -> impl Iterator<Item = &RoofWallConnection2D> {
        self.connections.values()
    }

    /// Stored connections attached to a roof.
    #[must_use]
    pub fn get_connections_for_roof(&self, roof_id: &str) -> Vec<&RoofWallConnection2D> {
        self.connections
            .values()
            .filter(|c| c.roof_id == roof_id)
            .collect()
    }

    /// Stored connections attached to a wall.
    #[must_use]
    pub fn get_connections_for_wall(&self, wall_id: &str) -> Vec<&RoofWallConnection2D> {
        self.connections
            .values()
            .filter(|c| c.wall_id == wall_id)
            .collect()
    }

    /// Stored intersections between one roof and one wall.
    #[must_use]
    pub fn get_intersections(&self, roof_id: &str, wall_id: &str) -> &[RoofWallIntersection2D] {
        self.intersections
            .get(&pair_key(roof_id, wall_id))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Drops all stored connections and intersections.
    pub fn clear(&mut self) {
        self.connections.clear();
        self.intersections.clear();
    }

    fn build_connection(
        &self,
        roof: &Roof2D,
        wall: &Wall2D,
        group: &[RoofWallIntersection2D],
    ) -> RoofWallConnection2D {
        let first = &group[0];
        let connection_type = rules::determine_connection_type(first);
        let span = self.calculate_roof_span(roof, wall);

        let pitch_data = if self.config.pitch_calculation.enabled {
            match self.pitch_calculator.calculate_pitch_from_roof(roof) {
                Ok(pitches) => pitches.into_iter().next(),
                Err(err) => {
                    warn!(
                        roof_id = %roof.id,
                        wall_id = %wall.id,
                        error = %err,
                        "pitch calculation failed, continuing without pitch data"
                    );
                    None
                }
            }
        } else {
            None
        };

        let overhang = rules::calculate_overhang(&self.config, connection_type, pitch_data.as_ref());
        let eave_height = wall.height + self.config.eave_height;
        let (ridge_height, geometry) = match &pitch_data {
            Some(pitch) => {
                let geometry =
                    self.pitch_calculator
                        .calculate_roof_geometry(span, pitch.pitch, eave_height);
                (geometry.ridge_height, Some(geometry))
            }
            None => (wall.height + rules::fallback_roof_height(roof), None),
        };

        RoofWallConnection2D {
            id: RoofWallConnection2D::connection_id(&roof.id, &wall.id),
            roof_id: roof.id.clone(),
            wall_id: wall.id.clone(),
            connection_type,
            connection_points: group.iter().map(|i| i.point).collect(),
            overhang,
            eave_height,
            ridge_height,
            angle: first.angle,
            priority: connection_type.priority(),
            pitch_data,
            geometry,
            metadata: ConnectionMetadata {
                intersection_count: group.len(),
                span,
                roof_area: roof.footprint_area(),
            },
        }
    }
}

fn pair_key(roof_id: &str, wall_id: &str) -> String {
    format!("{roof_id}-{wall_id}")
}

/// Copies the roofs and walls and records each connection on both ends.
///
/// Overhang connections also widen the roof's overhang to at least the
/// connection's overhang.
fn annotate(
    roofs: &[Roof2D],
    walls: &[Wall2D],
    connections: &[RoofWallConnection2D],
) -> (Vec<Roof2D>, Vec<Wall2D>) {
    let mut roofs = roofs.to_vec();
    let mut walls = walls.to_vec();

    for connection in connections {
        if let Some(roof) = roofs.iter_mut().find(|r| r.id == connection.roof_id) {
            if !roof.metadata.connections.contains(&connection.id) {
                roof.metadata.connections.push(connection.id.clone());
            }
            if connection.connection_type == ConnectionType::Overhang {
                roof.overhang = roof.overhang.max(connection.overhang);
            }
        }
        if let Some(wall) = walls.iter_mut().find(|w| w.id == connection.wall_id) {
            if !wall.metadata.roof_connections.contains(&connection.id) {
                wall.metadata.roof_connections.push(connection.id.clone());
            }
        }
    }

    (roofs, walls)
}
