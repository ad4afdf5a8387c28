use super::connection::{IntersectionType, RoofWallIntersection2D};
use crate::math::distance_2d::{point_to_line_dist, project_onto_segment};
use crate::math::intersect_2d::{segment_angle_deg, segment_segment_intersect_2d};
use crate::math::Point2;
use crate::model::{Roof2D, Wall2D};

/// Parametric distance from a segment end within which a crossing counts as
/// a corner.
const CORNER_PARAM_TOLERANCE: f64 = 0.1;

/// Finds every crossing of `wall` with the closed outline of `roof`.
///
/// Two passes:
///
/// 1. Each outline edge, including the closing edge, is intersected with the
///    wall segment. Crossings near either segment's end are corners, the
///    rest are edges.
/// 2. Each outline vertex lying within `tolerance` of the wall's line, and
///    projecting onto the wall segment, adds a corner. This catches corners
///    that touch the wall without crossing it.
pub(crate) fn roof_wall_intersections(
    roof: &Roof2D,
    outline: &[Point2],
    wall: &Wall2D,
    tolerance: f64,
) -> Vec<RoofWallIntersection2D> {
    let n = outline.len();
    let mut hits = Vec::new();
    if n < 2 {
        return hits;
    }

    let w0 = &wall.start_point;
    let w1 = &wall.end_point;
    let intersection = |point, roof_parameter, wall_parameter, intersection_type, angle| {
        RoofWallIntersection2D {
            point,
            roof_id: roof.id.clone(),
            wall_id: wall.id.clone(),
            roof_parameter,
            wall_parameter,
            intersection_type,
            angle,
        }
    };

    for i in 0..n {
        let a0 = &outline[i];
        let a1 = &outline[(i + 1) % n];
        if let Some((point, t, u)) = segment_segment_intersect_2d(a0, a1, w0, w1) {
            let kind = if near_end(t) || near_end(u) {
                IntersectionType::Corner
            } else {
                IntersectionType::Edge
            };
            let angle = segment_angle_deg(a0, a1, w0, w1);
            hits.push(intersection(point, t, u, kind, angle));
        }
    }

    for (i, corner) in outline.iter().enumerate() {
        let (Some(dist), Some(t)) = (
            point_to_line_dist(corner, w0, w1),
            project_onto_segment(corner, w0, w1),
        ) else {
            // Zero-length wall.
            break;
        };
        if dist < tolerance && (0.0..=1.0).contains(&t) {
            let next = &outline[(i + 1) % n];
            let angle = segment_angle_deg(corner, next, w0, w1);
            hits.push(intersection(*corner, 0.0, t, IntersectionType::Corner, angle));
        }
    }

    hits
}

fn near_end(param: f64) -> bool {
    param < CORNER_PARAM_TOLERANCE || param > 1.0 - CORNER_PARAM_TOLERANCE
}
