use std::num::FpCategory;

use tracing::warn;

use super::data::{PitchCategory, PitchUnit, PitchValidation, RoofGeometry, RoofPitchData};
use super::drainage::{drainage_requirements, DrainageRequirements};
use super::tables::{nearest_fraction, STANDARD_PITCHES};
use crate::error::{PitchError, Result};
use crate::math::{round_to, Point2, TOLERANCE};
use crate::model::Roof2D;

/// Run used when a pitch is expressed as rise per 12 units.
const STANDARD_RUN: f64 = 12.0;

/// Settings for [`RoofPitchCalculator`].
#[derive(Debug, Clone, PartialEq)]
pub struct PitchCalculatorConfig {
    /// Decimal places kept in computed values.
    pub precision: i32,
    /// Lowest accepted pitch, in degrees.
    pub min_pitch: f64,
    /// Highest accepted pitch, in degrees.
    pub max_pitch: f64,
    /// Pitches (degrees) offered when snapping or searching for an optimum.
    pub standard_pitches: Vec<f64>,
}

impl Default for PitchCalculatorConfig {
    fn default() -> Self {
        Self {
            precision: 2,
            min_pitch: 0.0,
            max_pitch: 60.0,
            standard_pitches: STANDARD_PITCHES.to_vec(),
        }
    }
}

/// Converts between pitch representations and derives roof geometry.
#[derive(Debug, Clone, Default)]
pub struct RoofPitchCalculator {
    config: PitchCalculatorConfig,
}

impl RoofPitchCalculator {
    /// Creates a calculator with the given settings.
    #[must_use]
    pub fn new(config: PitchCalculatorConfig) -> Self {
        Self { config }
    }

    /// Returns the active settings.
    #[must_use]
    pub fn config(&self) -> &PitchCalculatorConfig {
        &self.config
    }

    /// Narrows the accepted pitch range.
    pub fn set_pitch_range(&mut self, min_pitch: f64, max_pitch: f64) {
        self.config.min_pitch = min_pitch;
        self.config.max_pitch = max_pitch;
    }

    /// Builds pitch data from a rise and a run.
    ///
    /// # Errors
    ///
    /// Returns `PitchError::ZeroRun` if `run` is exactly zero (either sign) and
    /// `PitchError::NonFinite` if either input is not finite.
    pub fn calculate_pitch_from_rise_run(&self, rise: f64, run: f64) -> Result<RoofPitchData> {
        if !rise.is_finite() {
            return Err(PitchError::NonFinite {
                parameter: "rise",
                value: rise,
            }
            .into());
        }
        if !run.is_finite() {
            return Err(PitchError::NonFinite {
                parameter: "run",
                value: run,
            }
            .into());
        }
        if run.classify() == FpCategory::Zero {
            return Err(PitchError::ZeroRun.into());
        }

        let slope = rise / run;
        let pitch = slope.atan().to_degrees();
        Ok(self.create_pitch_data(pitch, slope, rise, run))
    }

    /// Builds pitch data for the segment between two plan points with the
    /// given roof heights.
    ///
    /// # Errors
    ///
    /// Returns `PitchError::ZeroRun` if the points coincide.
    pub fn calculate_pitch_from_points(
        &self,
        p1: &Point2,
        p2: &Point2,
        height1: f64,
        height2: f64,
    ) -> Result<RoofPitchData> {
        let run = (p2 - p1).norm();
        let rise = (height2 - height1).abs();
        self.calculate_pitch_from_rise_run(rise, run)
    }

    /// Parses a ratio such as `"6:12"` or `"6/12"` and builds pitch data.
    ///
    /// # Errors
    ///
    /// Returns `PitchError::InvalidRatio` for malformed input and
    /// `PitchError::ZeroRun` for a zero run.
    pub fn calculate_pitch_from_ratio(&self, ratio: &str) -> Result<RoofPitchData> {
        let (rise, run) = ratio
            .split_once([':', '/'])
            .ok_or_else(|| PitchError::InvalidRatio(ratio.to_owned()))?;
        let rise: f64 = rise
            .trim()
            .parse()
            .map_err(|_| PitchError::InvalidRatio(ratio.to_owned()))?;
        let run: f64 = run
            .trim()
            .parse()
            .map_err(|_| PitchError::InvalidRatio(ratio.to_owned()))?;
        self.calculate_pitch_from_rise_run(rise, run)
    }

    /// Pitch data for an angle in degrees, expressed on a 12-unit run.
    #[must_use]
    pub fn pitch_data_from_degrees(&self, pitch: f64) -> RoofPitchData {
        let slope = pitch.to_radians().tan();
        self.create_pitch_data(pitch, slope, slope * STANDARD_RUN, STANDARD_RUN)
    }

    /// Roof height above a plan point.
    ///
    /// Height falls off linearly from the roof center: the full
    /// `base_height + height` at the center, down to `base_height` at half
    /// the roof width and beyond.
    #[must_use]
    pub fn get_roof_height_at_point(&self, roof: &Roof2D, point: &Point2) -> f64 {
        let base = roof.metadata.base_height.unwrap_or(0.0);
        let height = roof.metadata.height.unwrap_or(roof.dimensions.height);
        let half_width = roof.dimensions.width / 2.0;
        if half_width <= TOLERANCE {
            return base;
        }
        let distance = (point - roof.transform.position).norm();
        let normalized = (distance / half_width).min(1.0);
        base + height * (1.0 - normalized)
    }

    /// Pitch of each outline segment of a roof.
    ///
    /// Segments are taken between consecutive outline points; the closing
    /// segment from the last point back to the first is not included.
    /// Segments with coincident endpoints are skipped.
    ///
    /// # Errors
    ///
    /// Returns `PitchError::DegenerateOutline` if the outline has fewer than
    /// two points or contains non-finite coordinates.
    pub fn calculate_pitch_from_roof(&self, roof: &Roof2D) -> Result<Vec<RoofPitchData>> {
        let points = roof.outline();
        if points.len() < 2 {
            return Err(PitchError::DegenerateOutline(format!(
                "roof {} has {} outline point(s)",
                roof.id,
                points.len()
            ))
            .into());
        }
        if points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(PitchError::DegenerateOutline(format!(
                "roof {} has non-finite outline coordinates",
                roof.id
            ))
            .into());
        }

        let mut pitches = Vec::with_capacity(points.len() - 1);
        for (i, pair) in points.windows(2).enumerate() {
            let h1 = self.get_roof_height_at_point(roof, &pair[0]);
            let h2 = self.get_roof_height_at_point(roof, &pair[1]);
            match self.calculate_pitch_from_points(&pair[0], &pair[1], h1, h2) {
                Ok(data) => pitches.push(data),
                Err(err) => {
                    warn!(roof_id = %roof.id, segment = i, error = %err, "skipping roof segment");
                }
            }
        }
        Ok(pitches)
    }

    /// Derives ridge height, rafter length and areas from a span and a pitch
    /// in degrees.
    ///
    /// The projected area and ridge length assume a square footprint of side
    /// `span`.
    #[must_use]
    pub fn calculate_roof_geometry(&self, span: f64, pitch: f64, eave_height: f64) -> RoofGeometry {
        let p = self.config.precision;
        let angle = pitch.to_radians();
        let half_span = span / 2.0;
        let rise = half_span * angle.tan();
        let rafter = half_span / angle.cos();

        RoofGeometry {
            ridge_height: round_to(eave_height + rise, p),
            eave_height: round_to(eave_height, p),
            span: round_to(span, p),
            rafter: round_to(rafter, p),
            ridge_length: round_to(span, p),
            roof_area: round_to(span * rafter * 2.0, p),
            projected_area: round_to(span * span, p),
        }
    }

    /// Picks a standard pitch of the preferred category that fits between
    /// `min_height` and `max_height` over half the span.
    ///
    /// Among the fitting standard pitches the middle one (in table order) is
    /// chosen. When none fits, the result carries the steepest allowed pitch
    /// with zero rise and run.
    #[must_use]
    pub fn find_optimal_pitch(
        &self,
        span: f64,
        max_height: f64,
        min_height: f64,
        preferred_category: PitchCategory,
    ) -> RoofPitchData {
        let max_pitch = ((max_height - min_height) / (span / 2.0)).atan().to_degrees();
        let upper = max_pitch.min(self.config.max_pitch);

        let candidates: Vec<f64> = self
            .config
            .standard_pitches
            .iter()
            .copied()
            .filter(|&p| {
                PitchCategory::from_degrees(p) == preferred_category
                    && p >= self.config.min_pitch
                    && p <= upper
            })
            .collect();

        if candidates.is_empty() {
            let fallback = upper;
            return self.create_pitch_data(fallback, fallback.to_radians().tan(), 0.0, 0.0);
        }

        let chosen = candidates[candidates.len() / 2];
        let rise = chosen.to_radians().tan() * STANDARD_RUN;
        let slope = rise / STANDARD_RUN;
        self.create_pitch_data(slope.atan().to_degrees(), slope, rise, STANDARD_RUN)
    }

    /// Converts a pitch value between units, going through degrees.
    ///
    /// The result is not rounded.
    #[must_use]
    pub fn convert_pitch(&self, value: f64, from: PitchUnit, to: PitchUnit) -> f64 {
        let degrees = match from {
            PitchUnit::Degrees => value,
            PitchUnit::Radians => value.to_degrees(),
            PitchUnit::Ratio => value.atan().to_degrees(),
            PitchUnit::Percent => (value / 100.0).atan().to_degrees(),
        };
        match to {
            PitchUnit::Degrees => degrees,
            PitchUnit::Radians => degrees.to_radians(),
            PitchUnit::Ratio => degrees.to_radians().tan(),
            PitchUnit::Percent => degrees.to_radians().tan() * 100.0,
        }
    }

    /// Closest configured standard pitch. Ties go to the earlier entry.
    #[must_use]
    pub fn get_nearest_standard_pitch(&self, pitch: f64) -> f64 {
        let mut nearest = self.config.standard_pitches.first().copied().unwrap_or(0.0);
        let mut best = (pitch - nearest).abs();
        for &candidate in self.config.standard_pitches.iter().skip(1) {
            let diff = (pitch - candidate).abs();
            if diff < best {
                nearest = candidate;
                best = diff;
            }
        }
        nearest
    }

    /// Checks a pitch against the configured range.
    #[must_use]
    pub fn validate_pitch(&self, pitch: f64) -> PitchValidation {
        let mut errors = Vec::new();
        if !pitch.is_finite() {
            errors.push("Pitch must be a finite number".to_owned());
        } else {
            if pitch < self.config.min_pitch {
                errors.push(format!(
                    "Pitch {pitch}° is below minimum {}°",
                    self.config.min_pitch
                ));
            }
            if pitch > self.config.max_pitch {
                errors.push(format!(
                    "Pitch {pitch}° exceeds maximum {}°",
                    self.config.max_pitch
                ));
            }
        }
        PitchValidation {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Simplified drainage sizing for a roof of the given pitch and area.
    #[must_use]
    pub fn calculate_drainage_requirements(&self, pitch: f64, roof_area: f64) -> DrainageRequirements {
        drainage_requirements(
            PitchCategory::from_degrees(pitch),
            roof_area,
            self.config.precision,
        )
    }

    fn create_pitch_data(&self, pitch: f64, slope: f64, rise: f64, run: f64) -> RoofPitchData {
        let p = self.config.precision;
        let pitch = round_to(pitch, p);
        #[allow(clippy::cast_possible_truncation)]
        let twelfths = (slope * STANDARD_RUN).round() as i64;

        RoofPitchData {
            pitch,
            slope: round_to(slope, p),
            rise: round_to(rise, p),
            run: round_to(run, p),
            pitch_ratio: format!("{twelfths}:12"),
            pitch_fraction: nearest_fraction(slope).to_owned(),
            category: PitchCategory::from_degrees(pitch),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::RooflineError;
    use approx::assert_abs_diff_eq;

    fn calc() -> RoofPitchCalculator {
        RoofPitchCalculator::default()
    }

    #[test]
    fn zero_rise_is_flat() {
        let data = calc().calculate_pitch_from_rise_run(0.0, 10.0).unwrap();
        assert_abs_diff_eq!(data.pitch, 0.0);
        assert_eq!(data.category, PitchCategory::Flat);
        assert_eq!(data.pitch_ratio, "0:12");
        assert_eq!(data.pitch_fraction, "0/1");
    }

    #[test]
    fn twelve_twelve_is_steep() {
        let data = calc().calculate_pitch_from_rise_run(12.0, 12.0).unwrap();
        assert_abs_diff_eq!(data.pitch, 45.0, epsilon = 0.01);
        assert_eq!(data.pitch_ratio, "12:12");
        assert_eq!(data.pitch_fraction, "1/1");
        assert_eq!(data.category, PitchCategory::Steep);
    }

    #[test]
    fn six_twelve() {
        let data = calc().calculate_pitch_from_rise_run(6.0, 12.0).unwrap();
        assert_abs_diff_eq!(data.pitch, 26.57);
        assert_abs_diff_eq!(data.slope, 0.5);
        assert_eq!(data.pitch_ratio, "6:12");
        assert_eq!(data.pitch_fraction, "1/2");
        assert_eq!(data.category, PitchCategory::Conventional);
    }

    #[test]
    fn zero_run_is_rejected() {
        let err = calc().calculate_pitch_from_rise_run(3.0, 0.0).unwrap_err();
        assert!(matches!(err, RooflineError::Pitch(PitchError::ZeroRun)));
        assert_eq!(err.to_string(), "run cannot be zero");
    }

    #[test]
    fn tiny_run_is_not_zero() {
        let data = calc().calculate_pitch_from_rise_run(1e-12, 1e-11).unwrap();
        assert_abs_diff_eq!(data.pitch, 5.71);
        assert!(calc().calculate_pitch_from_rise_run(1.0, -0.0).is_err());
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let err = calc().calculate_pitch_from_rise_run(f64::NAN, 1.0).unwrap_err();
        assert!(matches!(
            err,
            RooflineError::Pitch(PitchError::NonFinite { parameter: "rise", .. })
        ));
    }

    #[test]
    fn slope_round_trips_to_pitch() {
        let c = calc();
        for (rise, run) in [(1.0, 12.0), (4.0, 12.0), (7.5, 10.0), (3.0, 2.0), (0.2, 50.0)] {
            let data = c.calculate_pitch_from_rise_run(rise, run).unwrap();
            assert_abs_diff_eq!(data.pitch.to_radians().tan(), data.slope, epsilon = 0.01);
            let rederived = c.calculate_pitch_from_rise_run(data.rise, data.run).unwrap();
            assert_abs_diff_eq!(rederived.pitch, data.pitch, epsilon = 0.01);
        }
    }

    #[test]
    fn pitch_increases_with_rise() {
        let c = calc();
        let mut last = -1.0;
        for rise in [0.0, 0.5, 1.0, 2.0, 4.0, 8.0, 16.0, 32.0] {
            let data = c.calculate_pitch_from_rise_run(rise, 10.0).unwrap();
            assert!(data.pitch > last, "rise={rise}");
            last = data.pitch;
        }
    }

    #[test]
    fn pitch_from_points_uses_planar_distance() {
        let data = calc()
            .calculate_pitch_from_points(&Point2::new(0.0, 0.0), &Point2::new(3.0, 4.0), 10.0, 5.0)
            .unwrap();
        assert_abs_diff_eq!(data.run, 5.0);
        assert_abs_diff_eq!(data.rise, 5.0);
        assert_abs_diff_eq!(data.pitch, 45.0);
    }

    #[test]
    fn coincident_points_are_rejected() {
        let p = Point2::new(1.0, 1.0);
        assert!(calc().calculate_pitch_from_points(&p, &p, 0.0, 1.0).is_err());
    }

    #[test]
    fn pitch_from_ratio() {
        let c = calc();
        assert_eq!(c.calculate_pitch_from_ratio("4:12").unwrap().pitch_ratio, "4:12");
        assert_eq!(c.calculate_pitch_from_ratio(" 9 / 12 ").unwrap().pitch_fraction, "3/4");
        assert!(matches!(
            c.calculate_pitch_from_ratio("steep").unwrap_err(),
            RooflineError::Pitch(PitchError::InvalidRatio(_))
        ));
        assert!(c.calculate_pitch_from_ratio("4:0").is_err());
    }

    #[test]
    fn height_falls_off_from_center() {
        let roof = Roof2D::new("r", Point2::new(0.0, 0.0), 10.0, 10.0).with_heights(3.0, 2.0);
        let c = calc();
        assert_abs_diff_eq!(c.get_roof_height_at_point(&roof, &Point2::new(0.0, 0.0)), 5.0);
        assert_abs_diff_eq!(c.get_roof_height_at_point(&roof, &Point2::new(2.5, 0.0)), 4.0);
        assert_abs_diff_eq!(c.get_roof_height_at_point(&roof, &Point2::new(9.0, 0.0)), 3.0);
    }

    #[test]
    fn rectangular_roof_corners_are_flat() {
        let roof = Roof2D::new("r", Point2::new(5.0, 5.0), 10.0, 10.0);
        let pitches = calc().calculate_pitch_from_roof(&roof).unwrap();
        // Four corners give three segments: the closing edge is not walked.
        assert_eq!(pitches.len(), 3);
        assert!(pitches.iter().all(|p| p.category == PitchCategory::Flat));
    }

    #[test]
    fn roof_pitch_skips_repeated_points() {
        let roof = Roof2D::new("r", Point2::new(0.0, 0.0), 10.0, 4.0).with_points(vec![
            Point2::new(-5.0, 0.0),
            Point2::new(-5.0, 0.0),
            Point2::new(0.0, 0.0),
        ]);
        let pitches = calc().calculate_pitch_from_roof(&roof).unwrap();
        assert_eq!(pitches.len(), 1);
        // Eave at base height, ridge at the center 4 units up over a 5 unit run.
        assert_abs_diff_eq!(pitches[0].rise, 4.0);
        assert_abs_diff_eq!(pitches[0].run, 5.0);
        assert_abs_diff_eq!(pitches[0].pitch, 38.66);
    }

    #[test]
    fn roof_pitch_rejects_degenerate_outline() {
        let roof =
            Roof2D::new("r", Point2::new(0.0, 0.0), 1.0, 1.0).with_points(vec![Point2::new(0.0, 0.0)]);
        assert!(matches!(
            calc().calculate_pitch_from_roof(&roof).unwrap_err(),
            RooflineError::Pitch(PitchError::DegenerateOutline(_))
        ));
    }

    #[test]
    fn geometry_from_span_and_pitch() {
        let g = calc().calculate_roof_geometry(24.0, 45.0, 8.0);
        assert_abs_diff_eq!(g.ridge_height, 20.0);
        assert_abs_diff_eq!(g.rafter, 16.97);
        assert_abs_diff_eq!(g.roof_area, 814.59);
        assert_abs_diff_eq!(g.projected_area, 576.0);
        assert_abs_diff_eq!(g.span, 24.0);
        assert_abs_diff_eq!(g.eave_height, 8.0);
    }

    #[test]
    fn optimal_pitch_takes_middle_candidate() {
        // Budget of 3 over a 5 unit half span allows up to ~30.96°.
        let data = calc().find_optimal_pitch(10.0, 6.0, 3.0, PitchCategory::Conventional);
        // Conventional candidates: 14.04, 18.43, 22.62, 26.57, 30.0.
        assert_abs_diff_eq!(data.pitch, 22.62);
        assert_abs_diff_eq!(data.run, 12.0);
        assert_eq!(data.pitch_ratio, "5:12");
        assert_eq!(data.category, PitchCategory::Conventional);
    }

    #[test]
    fn optimal_pitch_respects_min_pitch() {
        let c = RoofPitchCalculator::new(PitchCalculatorConfig {
            min_pitch: 20.0,
            ..PitchCalculatorConfig::default()
        });
        // Candidates above 20°: 22.62, 26.57, 30.0.
        let data = c.find_optimal_pitch(10.0, 6.0, 3.0, PitchCategory::Conventional);
        assert_abs_diff_eq!(data.pitch, 26.57);
        assert_eq!(data.pitch_ratio, "6:12");
    }

    #[test]
    fn optimal_pitch_falls_back_when_nothing_fits() {
        let data = calc().find_optimal_pitch(2.0, 0.01, 0.0, PitchCategory::VerySteep);
        let max_pitch = 0.01_f64.atan().to_degrees();
        assert_abs_diff_eq!(data.pitch, round_to(max_pitch.min(60.0), 2));
        assert_abs_diff_eq!(data.rise, 0.0);
        assert_abs_diff_eq!(data.run, 0.0);
    }

    #[test]
    fn convert_between_units() {
        let c = calc();
        let eps = 1e-9;
        assert_abs_diff_eq!(c.convert_pitch(45.0, PitchUnit::Degrees, PitchUnit::Ratio), 1.0, epsilon = eps);
        assert_abs_diff_eq!(c.convert_pitch(45.0, PitchUnit::Degrees, PitchUnit::Percent), 100.0, epsilon = eps);
        assert_abs_diff_eq!(
            c.convert_pitch(50.0, PitchUnit::Percent, PitchUnit::Degrees),
            26.565_051_177,
            epsilon = eps
        );
        assert_abs_diff_eq!(
            c.convert_pitch(1.0, PitchUnit::Ratio, PitchUnit::Radians),
            std::f64::consts::FRAC_PI_4,
            epsilon = eps
        );
        // Small values keep their precision.
        assert_abs_diff_eq!(c.convert_pitch(5.0, PitchUnit::Degrees, PitchUnit::Ratio), 0.087_488_664, epsilon = eps);
    }

    #[test]
    fn nearest_standard_pitch() {
        let c = calc();
        assert_abs_diff_eq!(c.get_nearest_standard_pitch(1.0), 0.0);
        assert_abs_diff_eq!(c.get_nearest_standard_pitch(25.0), 26.57);
        assert_abs_diff_eq!(c.get_nearest_standard_pitch(31.0), 30.26);
        assert_abs_diff_eq!(c.get_nearest_standard_pitch(80.0), 45.0);
    }

    #[test]
    fn nearest_standard_pitch_tie_takes_first() {
        // Halfway between 0 and 4.76.
        assert_abs_diff_eq!(calc().get_nearest_standard_pitch(2.38), 0.0);
    }

    #[test]
    fn validate_pitch_range() {
        let c = calc();
        assert!(c.validate_pitch(30.0).valid);
        let too_steep = c.validate_pitch(75.0);
        assert!(!too_steep.valid);
        assert_eq!(too_steep.errors.len(), 1);
        assert!(!c.validate_pitch(-1.0).valid);
        let nan = c.validate_pitch(f64::NAN);
        assert!(!nan.valid);
        assert_eq!(nan.errors, vec!["Pitch must be a finite number".to_owned()]);
    }

    #[test]
    fn drainage_follows_category() {
        let req = calc().calculate_drainage_requirements(1.0, 1500.0);
        assert_eq!(req.drainage_type, crate::pitch::DrainageType::InternalDrains);
        assert_eq!(req.downspout_count, 3);
        assert_abs_diff_eq!(req.flow_rate, 934.5);
    }
}
