use super::{Point2, TOLERANCE};

/// Returns the perpendicular distance from `p` to the infinite line through
/// `a` and `b`.
///
/// Returns `None` if `a` and `b` coincide.
#[must_use]
pub fn point_to_line_dist(p: &Point2, a: &Point2, b: &Point2) -> Option<f64> {
    let d = b - a;
    let len = d.norm();
    if len < TOLERANCE {
        return None;
    }
    let cross = d.x * (p.y - a.y) - d.y * (p.x - a.x);
    Some(cross.abs() / len)
}

/// Projects `p` onto the line `a → b` and returns the unclamped parameter
/// `t` such that the foot of the perpendicular is `a + t * (b - a)`.
///
/// Returns `None` if `a` and `b` coincide.
#[must_use]
pub fn project_onto_segment(p: &Point2, a: &Point2, b: &Point2) -> Option<f64> {
    let d = b - a;
    let len_sq = d.norm_squared();
    if len_sq < TOLERANCE * TOLERANCE {
        return None;
    }
    Some((p - a).dot(&d) / len_sq)
}
