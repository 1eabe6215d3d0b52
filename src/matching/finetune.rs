use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::diag::Diagnostic;
use crate::feedline::{self, Impedance};
use crate::geometry::{AntennaGeometry, ElementRole, ValidationError};
use crate::matching::hardware::{default_gamma_hardware, GammaDefaults};
use crate::refdata::{self, ReferenceTables};

/// Entry SWR at or below this needs no tuning.
const NEAR_PERFECT_SWR: f64 = 1.02;
/// Length perturbation granularity.
const STEP_IN: f64 = 0.25;
/// Total accepted-adjustment budget across all elements.
const MAX_STEPS: usize = 60;
/// Hill-climb moves allowed per element per pass.
const MOVES_PER_ELEMENT: usize = 12;

/// Reactance contributed per unit fractional deviation from the ideal
/// parasitic length. The reflector couples hardest.
const PARASITIC_SLOPE_OHM: f64 = 1500.0;
const REFLECTOR_WEIGHT: f64 = 1.5;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TuneStep {
    pub element_index: usize,
    pub role: ElementRole,
    pub from_in: f64,
    pub to_in: f64,
    pub swr_before: f64,
    pub swr_after: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FineTuneResult {
    pub original_swr: f64,
    pub optimized_swr: f64,
    pub elements: Vec<crate::geometry::AntennaElement>,
    pub feedpoint: Impedance,
    /// Gamma hardware sized for this element count, for rebuilding the match.
    pub hardware: GammaDefaults,
    pub steps: Vec<TuneStep>,
    pub diagnostics: Vec<Diagnostic>,
}

/// SWR of a geometry through a nominally adjusted gamma match.
///
/// The driven element contributes its detuning reactance; parasitics
/// contribute reactance and resistance error in proportion to their
/// deviation from the ideal length ratios (reflector 1.05, director i
/// 0.95 - 0.01 i relative to the resonant driven length).
fn tune_swr(tables: &ReferenceTables, geometry: &AntennaGeometry) -> (f64, Impedance) {
    let freq = geometry.frequency_mhz;
    let ideal_driven = refdata::RESONANT_K_IN_MHZ / freq;
    let r_table = tables.feedpoint_r(geometry.num_elements);

    let f_res = geometry.driven_resonance_mhz();
    let x_driven = 3000.0 * (freq - f_res) / f_res;

    let mut x_parasitic = 0.0;
    let mut r_error = 0.0;
    let mut director_index = 0usize;
    for element in &geometry.elements {
        let (ideal, weight) = match element.role {
            ElementRole::Reflector => (ideal_driven * 1.05, REFLECTOR_WEIGHT),
            ElementRole::Director => {
                let ideal = ideal_driven * (0.95 - 0.01 * director_index as f64);
                director_index += 1;
                (ideal, 1.0)
            }
            ElementRole::Driven => continue,
        };
        let deviation = (element.length_in - ideal) / ideal;
        x_parasitic += weight * PARASITIC_SLOPE_OHM * deviation;
        r_error += deviation.abs();
    }

    // The gamma is assumed re-nulled to the table value; geometry errors
    // scale the matched resistance away from 50 ohms.
    let r_eff = r_table * (1.0 + r_error);
    let z = Impedance::new(
        r_eff * (crate::refdata::SYSTEM_Z0 / r_table),
        x_driven + x_parasitic,
    );
    (feedline::swr_of(z), z)
}

/// Restore resonance on a detuned geometry by bounded local search over
/// element lengths: reflector first, then driven, then directors.
pub fn fine_tune(
    tables: &ReferenceTables,
    geometry: &AntennaGeometry,
) -> Result<FineTuneResult, ValidationError> {
    geometry.validate()?;

    let (original_swr, feed0) = tune_swr(tables, geometry);
    let hardware = default_gamma_hardware(geometry.num_elements, geometry.frequency_mhz);

    if original_swr <= NEAR_PERFECT_SWR {
        return Ok(FineTuneResult {
            original_swr,
            optimized_swr: original_swr,
            elements: geometry.elements.clone(),
            feedpoint: feed0,
            hardware,
            steps: Vec::new(),
            diagnostics: vec![Diagnostic::NearPerfect { swr: original_swr }],
        });
    }

    let mut work = geometry.clone();
    let mut current_swr = original_swr;
    let mut steps = Vec::new();

    // Largest-impact-first ordering: reflector, driven, directors.
    let mut order: Vec<usize> = Vec::new();
    for role in [ElementRole::Reflector, ElementRole::Driven, ElementRole::Director] {
        for (i, e) in geometry.elements.iter().enumerate() {
            if e.role == role {
                order.push(i);
            }
        }
    }

    // Two passes: adjusting the driven element shifts the ideal operating
    // point of the parasitics.
    'outer: for _ in 0..2 {
        for &idx in &order {
            for _ in 0..MOVES_PER_ELEMENT {
                if steps.len() >= MAX_STEPS {
                    break 'outer;
                }
                let from_in = work.elements[idx].length_in;
                let mut improved = false;
                for delta in [STEP_IN, -STEP_IN] {
                    let candidate_len = from_in + delta;
                    if candidate_len <= 0.0 {
                        continue;
                    }
                    work.elements[idx].length_in = candidate_len;
                    let (swr, _) = tune_swr(tables, &work);
                    if swr < current_swr {
                        steps.push(TuneStep {
                            element_index: idx,
                            role: work.elements[idx].role,
                            from_in,
                            to_in: candidate_len,
                            swr_before: current_swr,
                            swr_after: swr,
                        });
                        current_swr = swr;
                        improved = true;
                        break;
                    }
                    work.elements[idx].length_in = from_in;
                }
                if !improved {
                    break;
                }
            }
        }
    }

    let (optimized_swr, feedpoint) = tune_swr(tables, &work);
    let mut diagnostics = Vec::new();
    if optimized_swr > NEAR_PERFECT_SWR && steps.len() >= MAX_STEPS {
        diagnostics.push(Diagnostic::TuneBudgetExhausted { swr: optimized_swr });
    }

    log::debug!(
        "fine-tune: {:.3} -> {:.3} in {} steps",
        original_swr,
        optimized_swr,
        steps.len()
    );

    Ok(FineTuneResult {
        original_swr,
        optimized_swr,
        elements: work.elements,
        feedpoint,
        hardware,
        steps,
        diagnostics,
    })
}
