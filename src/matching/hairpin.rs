use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::diag::Diagnostic;
use crate::feedline::{self, hairpin_z0, Impedance, MatchNetwork};
use crate::geometry::ValidationError;
use crate::matching::MatchError;
use crate::refdata::{self, ReferenceTables, SYSTEM_Z0};

const SWEEP_START_IN: f64 = 1.0;
const SWEEP_END_IN: f64 = 40.0;
const SWEEP_STEP_IN: f64 = 0.5;
const MAX_BETA_L_RAD: f64 = 1.5;

/// Reactance slope used to convert the required series capacitive reactance
/// into a driven-element shortening. Matches the feedline element model.
const REACTANCE_SLOPE_OHM: f64 = 3000.0;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct HairpinRequest {
    pub num_elements: usize,
    pub driven_length_in: f64,
    pub frequency_mhz: f64,
    #[serde(default)]
    pub feedpoint_r: Option<f64>,
    /// Hairpin rod diameter, default 0.25".
    #[serde(default)]
    pub rod_diameter_in: Option<f64>,
    /// Rod center-to-center spacing, default 1.5".
    #[serde(default)]
    pub rod_spacing_in: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct HairpinSweepPoint {
    pub length_in: f64,
    pub swr: f64,
    pub gamma_mag: f64,
    pub power_transfer_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HairpinRecipe {
    pub rod_diameter_in: f64,
    pub rod_spacing_in: f64,
    pub stub_length_in: f64,
    pub hairpin_z0_ohm: f64,
    /// Distributed inductance of the stub, nH per inch.
    pub inductance_nh_per_in: f64,
    pub q: f64,
    /// Series capacitive reactance the shortened driven element must present.
    pub series_xc_ohm: f64,
    /// Parallel inductive reactance the stub supplies at the feedpoint.
    pub stub_xl_ohm: f64,
    pub driven_shortening_in: f64,
    pub feedpoint_r: f64,
    pub swr_at_best: f64,
    pub sweep: Vec<HairpinSweepPoint>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Designer outcome: either a recipe, or a topology note saying the hairpin
/// is the wrong match for this feedpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HairpinDesign {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe: Option<HairpinRecipe>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topology_note: Option<Diagnostic>,
}

/// Design a hairpin (beta) match by sweeping the stub length.
///
/// A hairpin only adds inductive reactance across the feedpoint, so it can
/// only step a resistance *up* toward the line impedance.
pub fn design_hairpin(
    tables: &ReferenceTables,
    req: &HairpinRequest,
) -> Result<HairpinDesign, MatchError> {
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

    let r_feed = req
        .feedpoint_r
        .unwrap_or_else(|| tables.feedpoint_r(req.num_elements));
    if r_feed >= SYSTEM_Z0 {
        return Ok(HairpinDesign {
            recipe: None,
            topology_note: Some(Diagnostic::HairpinUnsuitable { feedpoint_r: r_feed }),
        });
    }

    let rod_dia = req.rod_diameter_in.unwrap_or(0.25);
    let rod_spacing = req.rod_spacing_in.unwrap_or(1.5);
    let z0h = hairpin_z0(rod_spacing, rod_dia);

    // L-network design: the shortened driven element presents R - jQR,
    // which the parallel stub reactance of 50/Q rotates onto 50 ohms.
    let q = (SYSTEM_Z0 / r_feed - 1.0).sqrt();
    let series_xc = q * r_feed;
    let stub_xl = SYSTEM_Z0 / q;

    let wavelength = refdata::wavelength_in(req.frequency_mhz);
    let beta = 2.0 * std::f64::consts::PI / wavelength;

    // Shortening that detunes the element to present -series_xc.
    let resonant_length = refdata::RESONANT_K_IN_MHZ / req.frequency_mhz;
    let detune = series_xc / REACTANCE_SLOPE_OHM;
    let shortening = resonant_length * detune / (1.0 + detune);

    let feed_z = Impedance::new(r_feed, -series_xc);
    let mut sweep = Vec::new();
    let mut best: Option<HairpinSweepPoint> = None;
    let mut length_in = SWEEP_START_IN;
    while length_in <= SWEEP_END_IN + 1e-9 {
        if beta * length_in > MAX_BETA_L_RAD {
            break;
        }
        let network = MatchNetwork::Hairpin {
            rod_diameter_in: rod_dia,
            rod_spacing_in: rod_spacing,
            stub_length_in: length_in,
        };
        let z = feedline::transform(feed_z, &network, dummy_driven(req), req.frequency_mhz);
        let (_, _, gamma_mag) = feedline::reflection_of(z);
        let point = HairpinSweepPoint {
            length_in,
            swr: feedline::swr_from_gamma(gamma_mag),
            gamma_mag,
            power_transfer_pct: (1.0 - gamma_mag * gamma_mag) * 100.0,
        };
        sweep.push(point);
        if best.map(|b| point.swr < b.swr).unwrap_or(true) {
            best = Some(point);
        }
        length_in += SWEEP_STEP_IN;
    }
    let best = best.ok_or(MatchError::NoSweepCandidates(req.frequency_mhz))?;

    let diagnostics = vec![Diagnostic::DrivenShorteningRequired { by_in: shortening }];

    log::debug!(
        "hairpin design: {} elements, stub {:.1}\" swr {:.3}",
        req.num_elements,
        best.length_in,
        best.swr
    );

    Ok(HairpinDesign {
        recipe: Some(HairpinRecipe {
            rod_diameter_in: rod_dia,
            rod_spacing_in: rod_spacing,
            stub_length_in: best.length_in,
            hairpin_z0_ohm: z0h,
            inductance_nh_per_in: z0h / refdata::WAVELENGTH_IN_MHZ * 1000.0,
            q,
            series_xc_ohm: series_xc,
            stub_xl_ohm: stub_xl,
            driven_shortening_in: shortening,
            feedpoint_r: r_feed,
            swr_at_best: best.swr,
            sweep,
            diagnostics,
        }),
        topology_note: None,
    })
}

/// The hairpin transform does not read driven dimensions, but the shared
/// transform signature wants them.
fn dummy_driven(req: &HairpinRequest) -> feedline::DrivenDims {
    feedline::DrivenDims {
        half_length_in: req.driven_length_in / 2.0,
        diameter_in: 0.5,
    }
}
