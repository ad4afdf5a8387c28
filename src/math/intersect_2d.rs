use super::{Point2, TOLERANCE};

/// Bounded segment-segment intersection in 2D.
///
/// Segment A runs `a0 → a1`, segment B runs `b0 → b1`. Uses the determinant
/// form of the line-line intersection and rejects near-parallel pairs
/// (`|denom| < TOLERANCE`), so collinear overlaps produce no hit.
///
/// Returns `(point, t, u)` where `t` is the parameter on A and `u` the
/// parameter on B, both in `[0, 1]`.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(Point2, f64, f64)> {
    let denom = (a0.x - a1.x) * (b0.y - b1.y) - (a0.y - a1.y) * (b0.x - b1.x);
    if denom.abs() < TOLERANCE {
        return None;
    }

    let t = ((a0.x - b0.x) * (b0.y - b1.y) - (a0.y - b0.y) * (b0.x - b1.x)) / denom;
    let u = -((a0.x - a1.x) * (a0.y - b0.y) - (a0.y - a1.y) * (a0.x - b0.x)) / denom;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        let pt = Point2::new(a0.x + t * (a1.x - a0.x), a0.y + t * (a1.y - a0.y));
        Some((pt, t, u))
    } else {
        None
    }
}

/// Acute angle in degrees (`[0, 90]`) between segment `a0 → a1` and
/// segment `b0 → b1`.
///
/// Degenerate segments yield `0.0`.
#[must_use]
pub fn segment_angle_deg(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2) -> f64 {
    let da = a1 - a0;
    let db = b1 - b0;
    if da.norm() < TOLERANCE || db.norm() < TOLERANCE {
        return 0.0;
    }
    let cross = da.x * db.y - da.y * db.x;
    let dot = da.dot(&db);
    let angle = cross.abs().atan2(dot).to_degrees();
    if angle > 90.0 {
        180.0 - angle
    } else {
        angle
    }
}
