use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::diag::Diagnostic;
use crate::feedline::{
    self, capacitance_pf_per_inch, gamma_section_z0, step_up_k, DrivenDims, GammaHardware,
    Impedance, MatchNetwork, GAMMA_STRAY_PF,
};
use crate::geometry::ValidationError;
use crate::matching::hardware::{resolve_hardware, CustomGammaHardware, GammaDefaults};
use crate::matching::MatchError;
use crate::refdata::{self, ReferenceTables};

/// Bar positions start here; the bar cannot sit on the feedpoint itself.
const MIN_BAR_IN: f64 = 2.0;
/// Sweep granularity for both parameters.
const SWEEP_STEP_IN: f64 = 0.5;
/// Candidates past this electrical length hit the tangent singularity.
const MAX_BETA_L_RAD: f64 = 1.5;
/// A swept minimum at or under this SWR counts as a reachable null.
const NULL_SWR_TOLERANCE: f64 = 1.2;
/// Resonance mismatches beyond this trigger a length correction.
const RESONANCE_TOLERANCE_MHZ: f64 = 0.01;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct GammaRequest {
    pub num_elements: usize,
    pub driven_length_in: f64,
    pub frequency_mhz: f64,
    /// Override for the element-count feedpoint resistance table.
    #[serde(default)]
    pub feedpoint_r: Option<f64>,
    #[serde(default)]
    pub element_diameter_in: Option<f64>,
    /// Known resonant frequency of the driven element, if measured.
    #[serde(default)]
    pub resonant_freq_mhz: Option<f64>,
    #[serde(default)]
    pub hardware: Option<CustomGammaHardware>,
}

/// One candidate from either sweep axis.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct SweepPoint {
    /// Bar position or insertion depth, depending on which sweep this is.
    pub position_in: f64,
    pub swr: f64,
    pub step_up_k: f64,
    pub matched_r: f64,
    pub matched_x: f64,
    pub capacitance_pf: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GammaRecipe {
    /// Chosen hardware including bar position and insertion depth, ready to
    /// feed back into a performance calculation.
    pub hardware: GammaHardware,
    pub rod_length_in: f64,
    pub gamma_z0_ohm: f64,
    pub capacitance_pf_per_in: f64,
    pub capacitance_pf: f64,
    pub step_up_k: f64,
    pub step_up_k2: f64,
    pub feedpoint_r: f64,
    pub driven_length_corrected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_driven_length_in: Option<f64>,
    pub swr_at_null: f64,
    pub null_reachable: bool,
    pub bar_sweep: Vec<SweepPoint>,
    pub insertion_sweep: Vec<SweepPoint>,
    pub diagnostics: Vec<Diagnostic>,
}

struct Candidate {
    bar_in: f64,
    depth_in: f64,
    point: SweepPoint,
}

/// Design a gamma match by exhaustive sweep of shorting-bar position and
/// rod-insertion depth. The objective surface has a tangent singularity and
/// clamped reflection coefficients, so no gradient method is attempted.
pub fn design_gamma(
    tables: &ReferenceTables,
    req: &GammaRequest,
) -> Result<GammaRecipe, MatchError> {
    if req.num_elements < 2 {
        return Err(MatchError::TooFewElements(req.num_elements));
    }
    if req.num_elements > refdata::MAX_ELEMENTS {
        return Err(MatchError::TooManyElements(req.num_elements));
    }
    if req.driven_length_in <= 0.0 {
        return Err(MatchError::BadDrivenLength(req.driven_length_in));
    }
    if !refdata::FREQUENCY_RANGE_MHZ.contains(&req.frequency_mhz) {
        return Err(ValidationError::FrequencyOutOfRange(req.frequency_mhz).into());
    }

    let freq = req.frequency_mhz;
    let r_feed = req
        .feedpoint_r
        .unwrap_or_else(|| tables.feedpoint_r(req.num_elements));
    let element_dia = req.element_diameter_in.unwrap_or(0.5);

    let mut diagnostics = Vec::new();

    // Correct the driven element to resonance before matching; the sweep
    // assumes a resistive feedpoint.
    let resonant_mhz = req
        .resonant_freq_mhz
        .unwrap_or(refdata::RESONANT_K_IN_MHZ / req.driven_length_in);
    let (driven_length, corrected) = if (resonant_mhz - freq).abs() > RESONANCE_TOLERANCE_MHZ {
        let recommended = req.driven_length_in * (resonant_mhz / freq);
        diagnostics.push(Diagnostic::DrivenLengthCorrected {
            from_in: req.driven_length_in,
            to_in: recommended,
            resonant_mhz,
        });
        (recommended, true)
    } else {
        (req.driven_length_in, false)
    };

    let hw = resolve_hardware(req.num_elements, freq, req.hardware.as_ref())?;
    if hw.is_default {
        diagnostics.push(Diagnostic::HardwareDefaultsApplied {
            tube_od_in: hw.tube_od_in,
            rod_od_in: hw.rod_od_in,
        });
    }

    let gamma_z0 = gamma_section_z0(hw.rod_spacing_in, element_dia, hw.rod_od_in);
    let c_per_in = capacitance_pf_per_inch(hw.tube_id_in, hw.rod_od_in);
    let driven = DrivenDims {
        half_length_in: driven_length / 2.0,
        diameter_in: element_dia,
    };
    let beta = 2.0 * std::f64::consts::PI / refdata::wavelength_in(freq);
    let max_depth = hw.tube_length_in - 0.5;

    let evaluate = |bar_in: f64, depth_in: f64| -> SweepPoint {
        let network = network_for(&hw, bar_in, depth_in);
        let z = feedline::transform(Impedance::new(r_feed, 0.0), &network, driven, freq);
        SweepPoint {
            position_in: bar_in,
            swr: feedline::swr_of(z),
            step_up_k: step_up_k(bar_in, driven.half_length_in, gamma_z0),
            matched_r: z.r,
            matched_x: z.x,
            capacitance_pf: c_per_in * depth_in + GAMMA_STRAY_PF,
        }
    };

    // Bar x insertion grid; best depth per bar builds the bar sweep.
    let mut best: Option<Candidate> = None;
    let mut bar_sweep = Vec::new();
    let mut bar_in = MIN_BAR_IN;
    while bar_in <= hw.rod_length_in {
        if beta * bar_in > MAX_BETA_L_RAD {
            break;
        }
        let mut best_at_bar: Option<Candidate> = None;
        let mut depth_in = 0.0;
        while depth_in <= max_depth + 1e-9 {
            let point = evaluate(bar_in, depth_in);
            let candidate = Candidate {
                bar_in,
                depth_in,
                point,
            };
            if best_at_bar
                .as_ref()
                .map(|b| point.swr < b.point.swr)
                .unwrap_or(true)
            {
                best_at_bar = Some(candidate);
            }
            depth_in += SWEEP_STEP_IN;
        }
        if let Some(candidate) = best_at_bar {
            bar_sweep.push(candidate.point);
            if best
                .as_ref()
                .map(|b| candidate.point.swr < b.point.swr)
                .unwrap_or(true)
            {
                best = Some(candidate);
            }
        }
        bar_in += SWEEP_STEP_IN;
    }

    // UHF rod lengths fall below the minimum bar position and leave the
    // sweep empty; that is a hardware limit, not a crash.
    let best = best.ok_or(MatchError::NoSweepCandidates(freq))?;
    let null_reachable = best.point.swr <= NULL_SWR_TOLERANCE;

    let (chosen_bar, chosen_depth) = if null_reachable {
        (best.bar_in, best.depth_in)
    } else {
        // Pin the insertion at the mechanical end of the tube.
        diagnostics.push(Diagnostic::NullUnreachable {
            best_swr: best.point.swr,
        });
        diagnostics.push(Diagnostic::InsertionPinned {
            max_insertion_in: max_depth,
        });
        (best.bar_in, max_depth)
    };

    // Insertion sweep along the chosen bar position, ascending.
    let mut insertion_sweep = Vec::new();
    let mut depth_in = 0.0;
    while depth_in <= max_depth + 1e-9 {
        let mut point = evaluate(chosen_bar, depth_in);
        point.position_in = depth_in;
        insertion_sweep.push(point);
        depth_in += SWEEP_STEP_IN;
    }

    let chosen = evaluate(chosen_bar, chosen_depth);
    let k = chosen.step_up_k;

    log::debug!(
        "gamma design: {} elements, bar {:.1}\" depth {:.1}\" swr {:.3} (null {})",
        req.num_elements,
        chosen_bar,
        chosen_depth,
        chosen.swr,
        null_reachable
    );

    Ok(GammaRecipe {
        hardware: network_hardware(&hw, chosen_bar, chosen_depth),
        rod_length_in: hw.rod_length_in,
        gamma_z0_ohm: gamma_z0,
        capacitance_pf_per_in: c_per_in,
        capacitance_pf: chosen.capacitance_pf,
        step_up_k: k,
        step_up_k2: k * k,
        feedpoint_r: r_feed,
        driven_length_corrected: corrected,
        recommended_driven_length_in: corrected.then_some(driven_length),
        swr_at_null: chosen.swr,
        null_reachable,
        bar_sweep,
        insertion_sweep,
        diagnostics,
    })
}

fn network_hardware(hw: &GammaDefaults, bar_in: f64, depth_in: f64) -> GammaHardware {
    GammaHardware {
        rod_diameter_in: hw.rod_od_in,
        rod_spacing_in: hw.rod_spacing_in,
        bar_position_in: bar_in,
        insertion_depth_in: depth_in,
        tube_od_in: hw.tube_od_in,
        tube_id_in: hw.tube_id_in,
        tube_length_in: hw.tube_length_in,
    }
}

fn network_for(hw: &GammaDefaults, bar_in: f64, depth_in: f64) -> MatchNetwork {
    MatchNetwork::Gamma(network_hardware(hw, bar_in, depth_in))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(num_elements: usize) -> GammaRequest {
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
    fn three_element_cb_reaches_null() {
        let tables = ReferenceTables::default();
        let recipe = design_gamma(&tables, &request(3)).unwrap();
        assert!(recipe.swr_at_null <= 1.15, "swr {}", recipe.swr_at_null);
        assert!(recipe.null_reachable);
        assert_eq!(recipe.feedpoint_r, 25.0);
        // 206" is resonant at 27.184 MHz, within the correction tolerance
        assert!(!recipe.driven_length_corrected);
    }

    #[test]
    fn sweeps_are_ascending_and_bounded() {
        let tables = ReferenceTables::default();
        let recipe = design_gamma(&tables, &request(3)).unwrap();
        for w in recipe.bar_sweep.windows(2) {
            assert!(w[1].position_in > w[0].position_in);
        }
        for w in recipe.insertion_sweep.windows(2) {
            assert!(w[1].position_in > w[0].position_in);
        }
        for p in recipe.bar_sweep.iter().chain(&recipe.insertion_sweep) {
            assert!(p.swr >= 1.0);
            assert!(p.step_up_k >= 1.0);
        }
        let max = recipe.insertion_sweep.last().unwrap().position_in;
        assert!((max - (recipe.hardware.tube_length_in - 0.5)).abs() < 1e-9);
    }

    #[test]
    fn bar_position_grows_with_element_count() {
        let tables = ReferenceTables::default();
        let three = design_gamma(&tables, &request(3)).unwrap();
        let five = design_gamma(&tables, &request(5)).unwrap();
        assert!(
            five.hardware.bar_position_in > three.hardware.bar_position_in,
            "5el bar {} vs 3el bar {}",
            five.hardware.bar_position_in,
            three.hardware.bar_position_in
        );
    }

    #[test]
    fn detuned_driven_gets_correction() {
        let tables = ReferenceTables::default();
        let mut req = request(3);
        req.driven_length_in = 212.0; // resonant at 26.4 MHz
        let recipe = design_gamma(&tables, &req).unwrap();
        assert!(recipe.driven_length_corrected);
        let rec = recipe.recommended_driven_length_in.unwrap();
        assert!(rec < 212.0);
        assert!(recipe
            .diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::DrivenLengthCorrected { .. })));
    }

    #[test]
    fn undersized_custom_hardware_cannot_null() {
        let tables = ReferenceTables::default();
        let mut req = request(2);
        req.hardware = Some(CustomGammaHardware {
            tube_od_in: Some(1.0),
            rod_od_in: Some(0.5),
            ..Default::default()
        });
        let recipe = design_gamma(&tables, &req).unwrap();
        assert!(!recipe.null_reachable, "swr {}", recipe.swr_at_null);
        assert!((recipe.hardware.insertion_depth_in
            - (recipe.hardware.tube_length_in - 0.5))
            .abs()
            < 1e-9);
        assert!(recipe
            .diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::NullUnreachable { .. })));
    }

    #[test]
    fn out_of_range_frequency_is_rejected() {
        let tables = ReferenceTables::default();
        for freq in [0.0, -5.0, 1500.0] {
            let mut req = request(3);
            req.frequency_mhz = freq;
            let err = design_gamma(&tables, &req).unwrap_err();
            assert!(
                matches!(err, MatchError::Validation(_)),
                "freq {freq}: {err}"
            );
        }
    }

    #[test]
    fn uhf_rod_too_short_to_sweep_is_an_error() {
        // At 800 MHz the default rod is 1.1", under the 2" minimum bar
        // position, so there is nothing to sweep.
        let tables = ReferenceTables::default();
        let mut req = request(3);
        req.frequency_mhz = 800.0;
        req.driven_length_in = 7.0;
        let err = design_gamma(&tables, &req).unwrap_err();
        assert!(matches!(err, MatchError::NoSweepCandidates(_)));
        assert!(err.is_infeasible());
    }

    #[test]
    fn excessive_element_count_is_rejected() {
        let tables = ReferenceTables::default();
        let req = request(10_000);
        let err = design_gamma(&tables, &req).unwrap_err();
        assert!(matches!(err, MatchError::TooManyElements(10_000)));
    }

    #[test]
    fn infeasible_hardware_is_an_error_value() {
        let tables = ReferenceTables::default();
        let mut req = request(3);
        req.hardware = Some(CustomGammaHardware {
            tube_od_in: Some(0.5),
            rod_od_in: Some(0.5),
            ..Default::default()
        });
        let err = design_gamma(&tables, &req).unwrap_err();
        assert!(err.is_infeasible());
    }
}
