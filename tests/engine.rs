//! End-to-end checks across the engine: geometry in, recipes and
//! performance figures out, with the designers and the estimator agreeing
//! on the same transmission-line model.

use yagicalc::diag::Diagnostic;
use yagicalc::feedline::MatchNetwork;
use yagicalc::geometry::{
    AntennaElement, AntennaGeometry, ElementRole, GroundType, StackingOrientation,
};
use yagicalc::matching::{
    design_gamma, design_hairpin, fine_tune, CustomGammaHardware, GammaRequest, HairpinRequest,
};
use yagicalc::optimize::{
    auto_tune, optimize_height, optimize_stacking, AutoTuneRequest, HeightRequest, SpacingMode,
    StackingRequest,
};
use yagicalc::perf::estimate;
use yagicalc::refdata::{self, ReferenceTables};

fn geometry(num_elements: usize, driven_length_in: f64, freq_mhz: f64) -> AntennaGeometry {
    let wl = refdata::wavelength_in(freq_mhz);
    let mut elements = Vec::new();
    let mut pos = 0.0;
    elements.push(AntennaElement {
        role: ElementRole::Reflector,
        length_in: driven_length_in * 1.05,
        diameter_in: 0.5,
        position_in: pos,
    });
    pos += wl * 0.2;
    elements.push(AntennaElement {
        role: ElementRole::Driven,
        length_in: driven_length_in,
        diameter_in: 0.5,
        position_in: pos,
    });
    for i in 0..num_elements - 2 {
        pos += wl * 0.18;
        elements.push(AntennaElement {
            role: ElementRole::Director,
            length_in: driven_length_in * (0.95 - 0.01 * i as f64),
            diameter_in: 0.5,
            position_in: pos,
        });
    }
    AntennaGeometry {
        num_elements,
        elements,
        boom_diameter_in: 2.0,
        height_ft: 36.0,
        frequency_mhz: freq_mhz,
        band: None,
        ground: GroundType::Average,
        tapered: false,
        corona_balls: false,
        radials: None,
        stacking: None,
    }
}

fn gamma_request(num_elements: usize) -> GammaRequest {
    GammaRequest {
        num_elements,
        driven_length_in: 206.0,
        frequency_mhz: 27.185,
        feedpoint_r: None,
        element_diameter_in: None,
        resonant_freq_mhz: None,
        hardware: None,
    }
}

#[test]
fn calibrated_gain_by_element_count() {
    let tables = ReferenceTables::default();
    for (n, expected) in [(2, 5.5), (3, 8.5), (4, 10.5), (5, 12.0)] {
        let r = estimate(&tables, &geometry(n, 206.0, 27.185), &MatchNetwork::Direct).unwrap();
        assert_eq!(r.gain.base_dbi, expected, "n = {n}");
    }
}

#[test]
fn swr_stays_in_reported_bounds() {
    let tables = ReferenceTables::default();
    // Badly detuned driven element: SWR clamps rather than diverging.
    let r = estimate(&tables, &geometry(3, 170.0, 27.185), &MatchNetwork::Direct).unwrap();
    assert!((1.0..=10.0).contains(&r.swr));
    for p in &r.line.points {
        assert!((1.0..=10.0).contains(&p.swr));
        assert!(p.gamma_mag < 1.0);
    }
}

#[test]
fn swr_curve_points_follow_band_channels() {
    let tables = ReferenceTables::default();
    let r = estimate(&tables, &geometry(3, 206.0, 27.185), &MatchNetwork::Direct).unwrap();
    assert_eq!(r.line.band, "11m CB");
    for w in r.line.points.windows(2) {
        assert!(w[1].freq_mhz > w[0].freq_mhz);
        // 11m channel spacing is 10 kHz
        assert!((w[1].freq_mhz - w[0].freq_mhz - 0.01).abs() < 1e-9);
    }
}

#[test]
fn gamma_design_for_standard_cb_beam() {
    let tables = ReferenceTables::default();
    let recipe = design_gamma(&tables, &gamma_request(3)).unwrap();

    assert!(recipe.null_reachable);
    assert!(recipe.swr_at_null <= 1.15, "swr {}", recipe.swr_at_null);
    // Default hardware for a 3-element beam
    assert_eq!(recipe.hardware.tube_od_in, 0.75);
    assert_eq!(recipe.hardware.rod_diameter_in, 0.5);
    assert_eq!(recipe.hardware.rod_spacing_in, 3.0);
    assert!(recipe
        .diagnostics
        .iter()
        .any(|d| matches!(d, Diagnostic::HardwareDefaultsApplied { .. })));
}

#[test]
fn gamma_recipe_round_trips_through_the_estimator() {
    let tables = ReferenceTables::default();
    let recipe = design_gamma(&tables, &gamma_request(3)).unwrap();

    let r = estimate(
        &tables,
        &geometry(3, 206.0, 27.185),
        &MatchNetwork::Gamma(recipe.hardware.clone()),
    )
    .unwrap();
    assert!(
        (r.swr - recipe.swr_at_null).abs() < 0.5,
        "designed {} vs recalculated {}",
        recipe.swr_at_null,
        r.swr
    );
}

#[test]
fn gamma_bar_moves_out_for_bigger_arrays() {
    let tables = ReferenceTables::default();
    let three = design_gamma(&tables, &gamma_request(3)).unwrap();
    let five = design_gamma(&tables, &gamma_request(5)).unwrap();
    assert!(five.hardware.bar_position_in > three.hardware.bar_position_in);
}

#[test]
fn undersized_gamma_capacitor_reports_unreachable_null() {
    let tables = ReferenceTables::default();
    let mut req = gamma_request(2);
    req.hardware = Some(CustomGammaHardware {
        tube_od_in: Some(1.0),
        rod_od_in: Some(0.5),
        ..Default::default()
    });
    let recipe = design_gamma(&tables, &req).unwrap();
    assert!(!recipe.null_reachable);
    assert!(recipe
        .diagnostics
        .iter()
        .any(|d| matches!(d, Diagnostic::InsertionPinned { .. })));
}

#[test]
fn designers_reject_out_of_range_frequencies() {
    let tables = ReferenceTables::default();
    let mut greq = gamma_request(3);
    greq.frequency_mhz = 1500.0;
    assert!(design_gamma(&tables, &greq).is_err());
    greq.frequency_mhz = 0.0;
    assert!(design_gamma(&tables, &greq).is_err());

    let hreq = HairpinRequest {
        num_elements: 3,
        driven_length_in: 206.0,
        frequency_mhz: 3000.0,
        feedpoint_r: None,
        rod_diameter_in: None,
        rod_spacing_in: None,
    };
    assert!(design_hairpin(&tables, &hreq).is_err());
}

#[test]
fn hairpin_refuses_high_feedpoint_resistance() {
    let tables = ReferenceTables::default();
    let req = HairpinRequest {
        num_elements: 3,
        driven_length_in: 206.0,
        frequency_mhz: 27.185,
        feedpoint_r: Some(62.0),
        rod_diameter_in: None,
        rod_spacing_in: None,
    };
    let design = design_hairpin(&tables, &req).unwrap();
    assert!(design.recipe.is_none());
    assert!(matches!(
        design.topology_note,
        Some(Diagnostic::HairpinUnsuitable { .. })
    ));
}

#[test]
fn fine_tune_never_worsens_a_geometry() {
    let tables = ReferenceTables::default();
    let mut g = geometry(4, 206.0, 27.185);
    g.elements[0].length_in += 5.0;
    g.elements[3].length_in -= 4.0;
    let result = fine_tune(&tables, &g).unwrap();
    assert!(result.optimized_swr <= result.original_swr);
    for s in &result.steps {
        assert!(s.swr_after < s.swr_before);
    }
}

#[test]
fn auto_tune_produces_a_workable_design() {
    let tables = ReferenceTables::default();
    let result = auto_tune(
        &tables,
        &AutoTuneRequest {
            num_elements: 3,
            frequency_mhz: Some(27.185),
            band: None,
            height_ft: 36.0,
            ground: GroundType::Average,
            reflector: true,
            spacing_mode: SpacingMode::Standard,
            spacing_lock_in: None,
            boom_length_limit_in: None,
            element_diameter_in: 0.5,
        },
    )
    .unwrap();
    assert!(result.geometry.validate().is_ok());
    assert!(result.gamma.null_reachable);
    assert!(result.performance.swr < 1.5);
}

#[test]
fn bigger_arrays_want_more_height() {
    let tables = ReferenceTables::default();
    let small = optimize_height(
        &tables,
        &HeightRequest {
            geometry: geometry(3, 206.0, 27.185),
            min_height_ft: 10.0,
            max_height_ft: 80.0,
            step_ft: 2.0,
        },
    )
    .unwrap();
    let large = optimize_height(
        &tables,
        &HeightRequest {
            geometry: geometry(7, 206.0, 27.185),
            min_height_ft: 10.0,
            max_height_ft: 80.0,
            step_ft: 2.0,
        },
    )
    .unwrap();
    assert!(large.optimal_height_ft >= small.optimal_height_ft);
}

#[test]
fn stacking_optimum_lands_near_a_wavelength() {
    let tables = ReferenceTables::default();
    let result = optimize_stacking(
        &tables,
        &StackingRequest {
            geometry: geometry(3, 206.0, 27.185),
            min_spacing_ft: 5.0,
            max_spacing_ft: 60.0,
            step_ft: 1.0,
            antennas: 2,
            orientation: StackingOrientation::Vertical,
        },
    )
    .unwrap();
    let wl_ft = refdata::wavelength_ft(27.185);
    let best_wl = result.optimal_spacing_ft / wl_ft;
    assert!((0.5..=1.3).contains(&best_wl), "optimum at {best_wl} wl");
    assert!(result.optimal_gain_dbi - result.single_gain_dbi > 2.0);
}
