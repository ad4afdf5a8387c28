use std::collections::HashSet;

use super::config::RoofWallIntegrationConfig;
use super::connection::{ConnectionType, RoofWallConnection2D};
use crate::model::{Roof2D, Wall2D};

/// Collects non-fatal problems with a set of connections.
///
/// Flags overhangs above the configured maximum, overhang-type connections
/// below the minimum, and references to roofs or walls that are not in the
/// analyzed set.
#[must_use]
pub fn validate_connections(
    connections: &[RoofWallConnection2D],
    roofs: &[Roof2D],
    walls: &[Wall2D],
    config: &RoofWallIntegrationConfig,
) -> Vec<String> {
    let roof_ids: HashSet<&str> = roofs.iter().map(|r| r.id.as_str()).collect();
    let wall_ids: HashSet<&str> = walls.iter().map(|w| w.id.as_str()).collect();
    let mut warnings = Vec::new();

    for connection in connections {
        if connection.overhang > config.max_overhang {
            warnings.push(format!(
                "Connection {} overhang {} exceeds maximum {}",
                connection.id, connection.overhang, config.max_overhang
            ));
        }
        if connection.connection_type == ConnectionType::Overhang
            && connection.overhang < config.min_overhang
        {
            warnings.push(format!(
                "Connection {} overhang {} is below minimum {}",
                connection.id, connection.overhang, config.min_overhang
            ));
        }
        if !roof_ids.contains(connection.roof_id.as_str()) {
            warnings.push(format!(
                "Connection {} references missing roof {}",
                connection.id, connection.roof_id
            ));
        }
        if !wall_ids.contains(connection.wall_id.as_str()) {
            warnings.push(format!(
                "Connection {} references missing wall {}",
                connection.id, connection.wall_id
            ));
        }
    }

    warnings
}
