use crate::perf::types::PatternSample;

/// Lazy far-field azimuth pattern.
///
/// Holds only the shape parameters; samples are produced on demand and the
/// pattern can be iterated any number of times. Forward broadside (0 deg)
/// is always 100%.
#[derive(Debug, Clone, Copy)]
pub struct FarFieldPattern {
    beamwidth_deg: f64,
    front_to_side_db: f64,
    front_to_back_db: f64,
    step_deg: f64,
}

impl FarFieldPattern {
    pub fn new(beamwidth_deg: f64, front_to_side_db: f64, front_to_back_db: f64) -> Self {
        FarFieldPattern {
            beamwidth_deg: beamwidth_deg.max(10.0),
            front_to_side_db,
            front_to_back_db,
            step_deg: 5.0,
        }
    }

    /// Relative magnitude (0-100%) at an azimuth off boresight.
    ///
    /// Parabolic main lobe in dB (3 dB down at half the beamwidth), floored
    /// by the side level beyond 90 deg and the back level behind.
    pub fn magnitude_at(&self, angle_deg: f64) -> f64 {
        let theta = angle_deg.rem_euclid(360.0);
        let off = if theta > 180.0 { 360.0 - theta } else { theta };
        let lobe_db = 12.0 * (off / self.beamwidth_deg).powi(2);
        let floor_db = if off <= 90.0 {
            self.front_to_side_db
        } else {
            self.front_to_back_db
        };
        let att_db = lobe_db.min(floor_db);
        100.0 * 10f64.powf(-att_db / 20.0)
    }

    /// Restartable sample iterator around the full circle.
    pub fn samples(&self) -> PatternIter {
        PatternIter {
            pattern: *self,
            next_angle: 0.0,
        }
    }
}

pub struct PatternIter {
    pattern: FarFieldPattern,
    next_angle: f64,
}

impl Iterator for PatternIter {
    type Item = PatternSample;

    fn next(&mut self) -> Option<PatternSample> {
        if self.next_angle >= 360.0 {
            return None;
        }
        let sample = PatternSample {
            angle_deg: self.next_angle,
            magnitude_pct: self.pattern.magnitude_at(self.next_angle),
        };
        self.next_angle += self.pattern.step_deg;
        Some(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_is_full_scale() {
        let p = FarFieldPattern::new(66.0, 18.0, 25.0);
        assert!((p.magnitude_at(0.0) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn half_beamwidth_is_three_db_down() {
        let p = FarFieldPattern::new(66.0, 18.0, 25.0);
        let m = p.magnitude_at(33.0);
        // -3 dB in voltage terms is 70.8%
        assert!((m - 70.8).abs() < 0.5, "got {m}");
    }

    #[test]
    fn rear_sits_at_front_to_back_floor() {
        let p = FarFieldPattern::new(66.0, 18.0, 25.0);
        let back = p.magnitude_at(180.0);
        assert!((back - 100.0 * 10f64.powf(-25.0 / 20.0)).abs() < 1e-6);
        assert!(p.magnitude_at(170.0) >= back);
    }

    #[test]
    fn iterator_is_finite_and_restartable() {
        let p = FarFieldPattern::new(66.0, 18.0, 25.0);
        let first: Vec<_> = p.samples().collect();
        let second: Vec<_> = p.samples().collect();
        assert_eq!(first.len(), 72);
        assert_eq!(first.len(), second.len());
        assert!((first[0].magnitude_pct - second[0].magnitude_pct).abs() < 1e-12);
        // symmetric about boresight
        assert!((first[1].magnitude_pct - first[71].magnitude_pct).abs() < 1e-9);
    }
}
