use crate::math::Point2;

/// Metadata fields the engine writes onto walls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WallMetadata {
    /// Ids of roof connections attached to this wall.
    pub roof_connections: Vec<String>,
}

/// A straight wall segment in plan view.
#[derive(Debug, Clone, PartialEq)]
pub struct Wall2D {
    pub id: String,
    pub start_point: Point2,
    pub end_point: Point2,
    pub height: f64,
    pub metadata: WallMetadata,
}

impl Wall2D {
    /// Creates a wall with empty metadata.
    #[must_use]
    pub fn new(id: impl Into<String>, start_point: Point2, end_point: Point2, height: f64) -> Self {
        Self {
            id: id.into(),
            start_point,
            end_point,
            height,
            metadata: WallMetadata::default(),
        }
    }

    /// Plan length of the wall.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end_point - self.start_point).norm()
    }
}
