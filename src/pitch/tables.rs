/// Standard roof pitches in degrees: flat, 1:12 through 12:12, then the
/// common metric angles.
pub const STANDARD_PITCHES: [f64; 16] = [
    0.0, 4.76, 9.46, 14.04, 18.43, 22.62, 26.57, 30.26, 33.69, 36.87, 39.81, 42.51, 45.0, 30.0,
    35.0, 45.0,
];

/// Canonical slope fractions, `(label, value)`, in ascending order.
pub const PITCH_FRACTIONS: [(&str, f64); 13] = [
    ("0/1", 0.0),
    ("1/12", 1.0 / 12.0),
    ("1/6", 1.0 / 6.0),
    ("1/4", 0.25),
    ("1/3", 1.0 / 3.0),
    ("5/12", 5.0 / 12.0),
    ("1/2", 0.5),
    ("7/12", 7.0 / 12.0),
    ("2/3", 2.0 / 3.0),
    ("3/4", 0.75),
    ("5/6", 5.0 / 6.0),
    ("1/1", 1.0),
    ("2/1", 2.0),
];

/// Snaps a slope to the nearest canonical fraction. Ties go to the earlier
/// table entry.
#[must_use]
pub fn nearest_fraction(slope: f64) -> &'static str {
    let mut best = PITCH_FRACTIONS[0];
    let mut best_diff = (slope - best.1).abs();
    for entry in &PITCH_FRACTIONS[1..] {
        let diff = (slope - entry.1).abs();
        if diff < best_diff {
            best = *entry;
            best_diff = diff;
        }
    }
    best.0
}
