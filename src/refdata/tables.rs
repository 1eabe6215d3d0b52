use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A frequency band the engine knows about.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Band {
    pub name: String,
    pub start_mhz: f64,
    pub end_mhz: f64,
    pub center_mhz: f64,
    pub channel_spacing_khz: f64,
}

/// Weights for the height optimizer's composite score.
///
/// These are empirically tuned values, not derived quantities; they are kept
/// in one editable table rather than scattered as literals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeightWeights {
    pub swr: f64,
    pub efficiency: f64,
    pub gain: f64,
    pub front_to_back: f64,
    pub takeoff: f64,
    pub boom_ratio: f64,
    pub height_band: f64,
    pub radial_bonus_cap: f64,
}

impl Default for HeightWeights {
    fn default() -> Self {
        HeightWeights {
            swr: 20.0,
            efficiency: 15.0,
            gain: 2.5,
            front_to_back: 0.8,
            takeoff: 10.0,
            boom_ratio: 8.0,
            height_band: 25.0,
            radial_bonus_cap: 6.0,
        }
    }
}

/// Coupling-regime adjustments for the stacking optimizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackingWeights {
    pub close_penalty: f64,
    pub wide_penalty: f64,
    pub full_wave_bonus: f64,
}

impl Default for StackingWeights {
    fn default() -> Self {
        StackingWeights {
            close_penalty: 3.0,
            wide_penalty: 1.5,
            full_wave_bonus: 0.5,
        }
    }
}

/// The static calibrated tables every engine component reads.
///
/// Constructed once (normally via `Default`) and passed by reference; the
/// engine never consults process-global mutable state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceTables {
    pub bands: Vec<Band>,
    /// Free-space gain in dBi for a reflector-backed Yagi, indexed from two
    /// elements upward.
    pub gain_dbi: Vec<f64>,
    /// Typical feedpoint resistance in ohms, indexed from two elements upward.
    pub feedpoint_r: Vec<f64>,
    /// Front-to-back base in dB, indexed from two elements upward.
    pub front_to_back_db: Vec<f64>,
    /// Horizontal half-power beamwidth in degrees, indexed from two elements upward.
    pub beamwidth_h_deg: Vec<f64>,
    /// Standard boom lengths in inches, indexed from two elements upward.
    pub boom_length_in: Vec<f64>,
    /// Gain penalty applied when no reflector is fitted.
    pub no_reflector_penalty_db: f64,
    pub height_weights: HeightWeights,
    pub stacking_weights: StackingWeights,
}

impl Default for ReferenceTables {
    fn default() -> Self {
        ReferenceTables {
            bands: vec![
                band("11m CB", 26.965, 27.405, 27.185, 10.0),
                band("10m", 28.000, 29.700, 28.850, 50.0),
                band("12m", 24.890, 24.990, 24.940, 10.0),
                band("15m", 21.000, 21.450, 21.225, 25.0),
                band("20m", 14.000, 14.350, 14.175, 25.0),
            ],
            gain_dbi: vec![
                5.5, 8.5, 10.5, 12.0, 13.0, 13.8, 14.5, 15.1, 15.6, 16.0, 16.4, 16.7, 17.0, 17.3,
                17.5, 17.7, 17.9, 18.1, 18.3,
            ],
            feedpoint_r: vec![35.0, 25.0, 22.0, 18.0, 16.0, 15.0, 14.0, 13.0, 12.0],
            front_to_back_db: vec![11.0, 20.0, 24.0, 26.0, 27.0, 28.0, 29.0, 30.0, 31.0, 32.0],
            beamwidth_h_deg: vec![78.0, 66.0, 58.0, 52.0, 48.0, 44.0, 41.0, 38.0, 36.0],
            boom_length_in: vec![
                72.0, 96.0, 144.0, 192.0, 216.0, 288.0, 312.0, 360.0, 408.0,
            ],
            no_reflector_penalty_db: 1.2,
            height_weights: HeightWeights::default(),
            stacking_weights: StackingWeights::default(),
        }
    }
}

impl ReferenceTables {
    /// Table lookup indexed by element count, clamped to the table ends.
    fn by_count(table: &[f64], num_elements: usize) -> f64 {
        let idx = num_elements.saturating_sub(2).min(table.len() - 1);
        table[idx]
    }

    pub fn gain_dbi(&self, num_elements: usize) -> f64 {
        Self::by_count(&self.gain_dbi, num_elements)
    }

    pub fn feedpoint_r(&self, num_elements: usize) -> f64 {
        Self::by_count(&self.feedpoint_r, num_elements)
    }

    pub fn front_to_back_db(&self, num_elements: usize) -> f64 {
        Self::by_count(&self.front_to_back_db, num_elements)
    }

    pub fn beamwidth_h_deg(&self, num_elements: usize) -> f64 {
        Self::by_count(&self.beamwidth_h_deg, num_elements)
    }

    pub fn boom_length_in(&self, num_elements: usize) -> f64 {
        Self::by_count(&self.boom_length_in, num_elements)
    }

    /// Band containing `freq_mhz`, or the band whose center is closest.
    pub fn band_for(&self, freq_mhz: f64) -> &Band {
        self.bands
            .iter()
            .find(|b| freq_mhz >= b.start_mhz && freq_mhz <= b.end_mhz)
            .unwrap_or_else(|| {
                self.bands
                    .iter()
                    .min_by(|a, b| {
                        let da = (a.center_mhz - freq_mhz).abs();
                        let db = (b.center_mhz - freq_mhz).abs();
                        da.partial_cmp(&db).unwrap()
                    })
                    .expect("band table is never empty")
            })
    }

    pub fn band_by_name(&self, name: &str) -> Option<&Band> {
        self.bands.iter().find(|b| b.name.eq_ignore_ascii_case(name))
    }
}

fn band(name: &str, start: f64, end: f64, center: f64, spacing_khz: f64) -> Band {
    Band {
        name: name.to_string(),
        start_mhz: start,
        end_mhz: end,
        center_mhz: center,
        channel_spacing_khz: spacing_khz,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calibrated_gain_values() {
        let t = ReferenceTables::default();
        assert_eq!(t.gain_dbi(2), 5.5);
        assert_eq!(t.gain_dbi(3), 8.5);
        assert_eq!(t.gain_dbi(4), 10.5);
        assert_eq!(t.gain_dbi(5), 12.0);
    }

    #[test]
    fn counts_beyond_table_clamp() {
        let t = ReferenceTables::default();
        assert_eq!(t.gain_dbi(50), *t.gain_dbi.last().unwrap());
        assert_eq!(t.feedpoint_r(12), 12.0);
    }

    #[test]
    fn feedpoint_r_decreases_with_elements() {
        let t = ReferenceTables::default();
        for n in 2..10 {
            assert!(t.feedpoint_r(n + 1) <= t.feedpoint_r(n));
        }
    }

    #[test]
    fn band_lookup() {
        let t = ReferenceTables::default();
        assert_eq!(t.band_for(27.185).name, "11m CB");
        assert_eq!(t.band_for(28.4).name, "10m");
        // Out-of-band frequency snaps to the nearest center
        assert_eq!(t.band_for(27.8).name, "11m CB");
        assert!(t.band_by_name("11M cb").is_some());
    }
}
