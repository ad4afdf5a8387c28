use crate::math::polygon_2d::{centered_rectangle, polygon_area};
use crate::math::Point2;

/// Plan extent of a roof.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

/// Placement of a roof in plan view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    pub position: Point2,
}

/// Metadata fields the engine reads from and writes onto roofs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoofMetadata {
    /// Explicit outline. When `None`, the outline is the rectangle described
    /// by the roof's dimensions and position.
    pub points: Option<Vec<Point2>>,
    /// Elevation of the roof's lowest edge.
    pub base_height: Option<f64>,
    /// Rise of the roof above `base_height`.
    pub height: Option<f64>,
    /// Ids of wall connections attached to this roof.
    pub connections: Vec<String>,
}

/// A roof in plan view.
#[derive(Debug, Clone, PartialEq)]
pub struct Roof2D {
    pub id: String,
    pub dimensions: Dimensions,
    pub transform: Transform2D,
    pub overhang: f64,
    pub metadata: RoofMetadata,
}

impl Roof2D {
    /// Creates a rectangular roof centered at `position`.
    #[must_use]
    pub fn new(id: impl Into<String>, position: Point2, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            dimensions: Dimensions { width, height },
            transform: Transform2D { position },
            overhang: 0.0,
            metadata: RoofMetadata::default(),
        }
    }

    /// Replaces the synthesized rectangle with an explicit outline.
    #[must_use]
    pub fn with_points(mut self, points: Vec<Point2>) -> Self {
        self.metadata.points = Some(points);
        self
    }

    /// Sets the base elevation and rise used for height falloff.
    #[must_use]
    pub fn with_heights(mut self, base_height: f64, height: f64) -> Self {
        self.metadata.base_height = Some(base_height);
        self.metadata.height = Some(height);
        self
    }

    /// Returns the roof outline: the explicit points if present, otherwise
    /// the rectangle from dimensions and position.
    #[must_use]
    pub fn outline(&self) -> Vec<Point2> {
        match &self.metadata.points {
            Some(points) => points.clone(),
            None => centered_rectangle(
                &self.transform.position,
                self.dimensions.width,
                self.dimensions.height,
            ),
        }
    }

    /// Plan area enclosed by the outline.
    #[must_use]
    pub fn footprint_area(&self) -> f64 {
        polygon_area(&self.outline())
    }
}
