use std::fmt;

use crate::math::Point2;
use crate::model::{Roof2D, Wall2D};
use crate::pitch::{RoofGeometry, RoofPitchData};

/// How a roof meets a wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionType {
    Eave,
    Gable,
    Hip,
    Valley,
    Ridge,
    Overhang,
    Flush,
}

impl ConnectionType {
    /// Draw priority of the connection indicator; higher draws on top.
    #[must_use]
    pub fn priority(self) -> u8 {
        match self {
            Self::Ridge => 6,
            Self::Hip => 5,
            Self::Valley => 4,
            Self::Gable => 3,
            Self::Eave => 2,
            Self::Overhang => 1,
            Self::Flush => 0,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eave => "eave",
            Self::Gable => "gable",
            Self::Hip => "hip",
            Self::Valley => "valley",
            Self::Ridge => "ridge",
            Self::Overhang => "overhang",
            Self::Flush => "flush",
        }
    }
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Where on the roof outline a crossing happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntersectionType {
    /// Along the interior of an outline edge.
    Edge,
    /// At or near an outline vertex or a wall end.
    Corner,
    /// Across the roof surface.
    Surface,
}

/// One crossing of a roof outline with a wall segment.
#[derive(Debug, Clone, PartialEq)]
pub struct RoofWallIntersection2D {
    pub point: Point2,
    pub roof_id: String,
    pub wall_id: String,
    /// Parameter along the roof outline edge, in `[0, 1]`.
    pub roof_parameter: f64,
    /// Parameter along the wall, in `[0, 1]`.
    pub wall_parameter: f64,
    pub intersection_type: IntersectionType,
    /// Acute angle between the roof edge and the wall, in degrees.
    pub angle: f64,
}

/// Extra facts recorded on a connection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionMetadata {
    pub intersection_count: usize,
    pub span: f64,
    /// Plan area enclosed by the roof outline.
    pub roof_area: f64,
}

/// All intersections between one roof and one wall, classified.
#[derive(Debug, Clone, PartialEq)]
pub struct RoofWallConnection2D {
    /// `connection-{roof_id}-{wall_id}`.
    pub id: String,
    pub roof_id: String,
    pub wall_id: String,
    pub connection_type: ConnectionType,
    pub connection_points: Vec<Point2>,
    pub overhang: f64,
    pub eave_height: f64,
    pub ridge_height: f64,
    pub angle: f64,
    pub priority: u8,
    pub pitch_data: Option<RoofPitchData>,
    pub geometry: Option<RoofGeometry>,
    pub metadata: ConnectionMetadata,
}

impl RoofWallConnection2D {
    /// Connection id for a roof/wall pair.
    #[must_use]
    pub fn connection_id(roof_id: &str, wall_id: &str) -> String {
        format!("connection-{roof_id}-{wall_id}")
    }
}

/// Output of a roof-wall analysis.
#[derive(Debug, Clone, Default)]
pub struct RoofWallIntegrationResult {
    pub connections: Vec<RoofWallConnection2D>,
    pub intersections: Vec<RoofWallIntersection2D>,
    /// Copies of the input roofs carrying connection ids.
    /// Left unannotated when `auto_connect` is off.
    pub modified_roofs: Vec<Roof2D>,
    /// Copies of the input walls carrying connection ids.
    /// Left unannotated when `auto_connect` is off.
    pub modified_walls: Vec<Wall2D>,
    pub warnings: Vec<String>,
}
