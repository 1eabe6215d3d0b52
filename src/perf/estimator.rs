use crate::feedline::{self, DrivenDims, FeedpointModel, MatchNetwork};
use crate::geometry::{AntennaGeometry, GroundType, StackingOrientation, ValidationError};
use crate::perf::pattern::FarFieldPattern;
use crate::perf::stacking::stacking_gain;
use crate::perf::types::{GainBreakdown, PerformanceResult, StackedResult};
use crate::refdata::ReferenceTables;

/// Feedpoint model and driven-element dimensions for a validated geometry.
pub(crate) fn feed_model(
    tables: &ReferenceTables,
    geometry: &AntennaGeometry,
) -> (FeedpointModel, DrivenDims) {
    let driven = geometry.driven();
    (
        FeedpointModel {
            r_res: tables.feedpoint_r(geometry.num_elements),
            f_res_mhz: geometry.driven_resonance_mhz(),
        },
        DrivenDims {
            half_length_in: driven.length_in / 2.0,
            diameter_in: driven.diameter_in,
        },
    )
}

/// Takeoff angle above the horizon for a given height in wavelengths.
///
/// Above a quarter wavelength the first ground-reflection lobe sits at
/// `asin(1/(4 h/λ))`; below it the pattern has no clean lobe and a linear
/// extrapolation stands in.
pub fn takeoff_angle_deg(height_wl: f64, ground: GroundType) -> f64 {
    let base = if height_wl >= 0.25 {
        (1.0 / (4.0 * height_wl)).asin().to_degrees().clamp(5.0, 90.0)
    } else {
        70.0 + (0.25 - height_wl) * 80.0
    };
    (base + ground.takeoff_adjustment_deg()).clamp(1.0, 90.0)
}

fn height_bonus_db(height_wl: f64) -> f64 {
    if height_wl < 0.25 {
        0.0
    } else if height_wl < 0.5 {
        0.8
    } else if height_wl < 1.0 {
        1.5
    } else if height_wl < 2.0 {
        2.2
    } else {
        2.5
    }
}

fn boom_bonus_db(boom_wl: f64) -> f64 {
    if boom_wl < 0.2 {
        0.0
    } else if boom_wl < 0.4 {
        0.3
    } else if boom_wl < 0.6 {
        0.6
    } else if boom_wl < 1.0 {
        1.0
    } else {
        1.2
    }
}

fn efficiency_pct(geometry: &AntennaGeometry) -> f64 {
    let mut eff: f64 = 92.0;
    if let Some(radials) = &geometry.radials {
        let count_factor = f64::from(radials.count.min(16)) / 16.0;
        let quarter_wave_ft = geometry.wavelength_ft() / 4.0;
        let length_factor = (radials.length_ft / quarter_wave_ft).min(1.0);
        eff += 6.0 * count_factor * length_factor;
    }
    eff += match geometry.ground {
        GroundType::Wet => 2.0,
        GroundType::Average => 0.0,
        GroundType::Dry => -2.0,
    };
    if geometry.height_wavelengths() < 0.125 {
        eff -= 6.0;
    }
    eff.clamp(50.0, 99.0)
}

/// Predict the electrical performance of a geometry behind a given matching
/// network. Pure: identical inputs produce identical output.
pub fn estimate(
    tables: &ReferenceTables,
    geometry: &AntennaGeometry,
    network: &MatchNetwork,
) -> Result<PerformanceResult, ValidationError> {
    geometry.validate()?;

    let n = geometry.num_elements;
    let height_wl = geometry.height_wavelengths();
    let boom_wl = geometry.boom_wavelengths();

    let base_dbi = tables.gain_dbi(n);
    let reflector_adjustment_db = if geometry.has_reflector() {
        0.0
    } else {
        -tables.no_reflector_penalty_db
    };
    let taper_bonus_db = if geometry.tapered { 0.2 } else { 0.0 };
    let corona_adjustment_db = if geometry.corona_balls { -0.1 } else { 0.0 };
    let height_bonus = height_bonus_db(height_wl);
    let boom_bonus = boom_bonus_db(boom_wl);
    let final_gain_dbi = base_dbi
        + reflector_adjustment_db
        + taper_bonus_db
        + corona_adjustment_db
        + height_bonus
        + boom_bonus;

    let mut front_to_back_db = tables.front_to_back_db(n) + (boom_wl * 2.0).min(2.0);
    if !geometry.has_reflector() {
        front_to_back_db -= 8.0;
    }
    front_to_back_db = front_to_back_db.clamp(3.0, 35.0);
    let front_to_side_db = (front_to_back_db * 0.9 + 8.0).min(40.0);

    let beamwidth_h_deg = tables.beamwidth_h_deg(n);
    let beamwidth_v_deg = beamwidth_h_deg * (1.15 - 0.1 * height_wl.min(1.0));

    let avg_dia = geometry.average_element_diameter_in();
    let mut bandwidth_15_khz = 500.0
        * (avg_dia / 0.5).sqrt()
        * (1.0 - 0.05 * (n as f64 - 2.0)).max(0.3)
        * (geometry.frequency_mhz / 27.185);
    if geometry.tapered {
        bandwidth_15_khz *= 1.1;
    }
    bandwidth_15_khz = bandwidth_15_khz.max(100.0);
    let bandwidth_20_khz = bandwidth_15_khz * 1.8;

    let (feed, driven) = feed_model(tables, geometry);
    let line = feedline::analyze(tables, &feed, driven, network, geometry.frequency_mhz);

    let stacked = geometry.stacking.map(|cfg| {
        let spacing_wl = cfg.spacing_ft / geometry.wavelength_ft();
        let (gain_dbi, increase_db) = match cfg.orientation {
            StackingOrientation::Quad => {
                // vertical pair first, then the horizontal pair of pairs
                let (after_v, inc_v) = stacking_gain(
                    final_gain_dbi,
                    2,
                    spacing_wl,
                    StackingOrientation::Vertical,
                );
                let (after_h, inc_h) =
                    stacking_gain(after_v, 2, spacing_wl, StackingOrientation::Horizontal);
                (after_h, inc_v + inc_h)
            }
            orientation => stacking_gain(final_gain_dbi, cfg.count, spacing_wl, orientation),
        };
        StackedResult {
            antennas: if cfg.orientation == StackingOrientation::Quad {
                4
            } else {
                cfg.count
            },
            spacing_wl,
            gain_dbi,
            increase_db,
        }
    });

    let pattern = FarFieldPattern::new(beamwidth_h_deg, front_to_side_db, front_to_back_db)
        .samples()
        .collect();

    Ok(PerformanceResult {
        swr: line.swr_at_design,
        gain: GainBreakdown {
            base_dbi,
            reflector_adjustment_db,
            taper_bonus_db,
            corona_adjustment_db,
            height_bonus_db: height_bonus,
            boom_bonus_db: boom_bonus,
            final_gain_dbi,
        },
        front_to_back_db,
        front_to_side_db,
        beamwidth_h_deg,
        beamwidth_v_deg,
        bandwidth_15_khz,
        bandwidth_20_khz,
        efficiency_pct: efficiency_pct(geometry),
        takeoff_angle_deg: takeoff_angle_deg(height_wl, geometry.ground),
        stacked,
        pattern,
        line,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{test_geometry, ElementRole, StackingConfig};

    fn tables() -> ReferenceTables {
        ReferenceTables::default()
    }

    #[test]
    fn breakdown_sums_to_final_gain() {
        let g = test_geometry(3, 206.0, 27.185);
        let r = estimate(&tables(), &g, &MatchNetwork::Direct).unwrap();
        let sum = r.gain.base_dbi
            + r.gain.reflector_adjustment_db
            + r.gain.taper_bonus_db
            + r.gain.corona_adjustment_db
            + r.gain.height_bonus_db
            + r.gain.boom_bonus_db;
        assert!((sum - r.gain.final_gain_dbi).abs() < 1e-12);
        assert_eq!(r.gain.base_dbi, 8.5);
    }

    #[test]
    fn missing_reflector_takes_fixed_penalty() {
        let mut g = test_geometry(3, 206.0, 27.185);
        g.elements[0].role = ElementRole::Director;
        g.elements[0].length_in = 195.0;
        let r = estimate(&tables(), &g, &MatchNetwork::Direct).unwrap();
        // base stays the 3-element entry; the penalty is a separate term
        assert_eq!(r.gain.base_dbi, 8.5);
        assert!(r.gain.reflector_adjustment_db < 0.0);
    }

    #[test]
    fn takeoff_angle_branches() {
        // 0.5 wavelengths: asin(1/2) = 30 deg
        assert!((takeoff_angle_deg(0.5, GroundType::Average) - 30.0).abs() < 1e-9);
        // below threshold: linear fallback
        let low = takeoff_angle_deg(0.1, GroundType::Average);
        assert!((low - 82.0).abs() < 1e-9);
        // ground adjustments
        assert!(
            takeoff_angle_deg(0.5, GroundType::Wet) < takeoff_angle_deg(0.5, GroundType::Dry)
        );
    }

    #[test]
    fn estimate_is_deterministic() {
        let g = test_geometry(4, 204.0, 27.185);
        let a = estimate(&tables(), &g, &MatchNetwork::Direct).unwrap();
        let b = estimate(&tables(), &g, &MatchNetwork::Direct).unwrap();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn swr_within_bounds_for_valid_geometry() {
        for n in 2..=8 {
            let g = test_geometry(n, 206.0, 27.185);
            let r = estimate(&tables(), &g, &MatchNetwork::Direct).unwrap();
            assert!((1.0..=10.0).contains(&r.swr), "n={n} swr={}", r.swr);
        }
    }

    #[test]
    fn quad_stacking_composes_two_passes() {
        let mut g = test_geometry(3, 206.0, 27.185);
        g.stacking = Some(StackingConfig {
            count: 4,
            spacing_ft: 25.0,
            orientation: StackingOrientation::Quad,
        });
        let r = estimate(&tables(), &g, &MatchNetwork::Direct).unwrap();
        let stacked = r.stacked.unwrap();
        assert_eq!(stacked.antennas, 4);
        assert!(stacked.increase_db > 4.0 && stacked.increase_db < 6.1);
        assert!(
            (stacked.gain_dbi - r.gain.final_gain_dbi - stacked.increase_db).abs() < 1e-9
        );
    }

    #[test]
    fn invalid_geometry_is_rejected() {
        let mut g = test_geometry(3, 206.0, 27.185);
        g.num_elements = 5;
        assert!(estimate(&tables(), &g, &MatchNetwork::Direct).is_err());
    }
}
