use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::refdata::PTFE_DIELECTRIC_K;

/// Gamma-match hardware dimensions, all in inches.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct GammaHardware {
    pub rod_diameter_in: f64,
    pub rod_spacing_in: f64,
    pub bar_position_in: f64,
    pub insertion_depth_in: f64,
    pub tube_od_in: f64,
    pub tube_id_in: f64,
    pub tube_length_in: f64,
}

/// The matching hardware between the feedline and the driven element.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchNetwork {
    Direct,
    Gamma(GammaHardware),
    Hairpin {
        rod_diameter_in: f64,
        rod_spacing_in: f64,
        stub_length_in: f64,
    },
}

/// Stray capacitance of the gamma capacitor at zero insertion, pF.
pub const GAMMA_STRAY_PF: f64 = 0.5;

/// Capacitance per inch of rod inserted into the PTFE-sleeved tube.
///
/// Coaxial-capacitor formula, 24.16 pF/m per unit K over ln(D/d), converted
/// to inches.
pub fn capacitance_pf_per_inch(tube_id_in: f64, rod_od_in: f64) -> f64 {
    24.16 * PTFE_DIELECTRIC_K / (25.4 * (tube_id_in / rod_od_in).ln())
}

/// Characteristic impedance of the gamma section, treated as a two-conductor
/// line between the rod and the driven element.
pub fn gamma_section_z0(rod_spacing_in: f64, element_dia_in: f64, rod_od_in: f64) -> f64 {
    276.0 * (2.0 * rod_spacing_in / (element_dia_in * rod_od_in).sqrt()).log10()
}

/// Characteristic impedance of a hairpin stub of two parallel rods.
pub fn hairpin_z0(rod_spacing_in: f64, rod_dia_in: f64) -> f64 {
    276.0 * (2.0 * rod_spacing_in / rod_dia_in).log10()
}

/// Geometric step-up factor of the gamma tap point.
pub fn step_up_k(bar_position_in: f64, half_element_in: f64, z0_gamma: f64) -> f64 {
    1.0 + (bar_position_in / half_element_in) * (z0_gamma / 75.0)
}

/// Inductive reactance of the shorted gamma/hairpin section, `Z0 tan(βl)`.
/// Clamped near the tangent singularity; sweep code skips those candidates
/// before calling this.
pub fn stub_reactance_ohm(z0: f64, beta_rad_per_in: f64, length_in: f64) -> f64 {
    let bl = beta_rad_per_in * length_in;
    (z0 * bl.tan()).clamp(-5000.0, 5000.0)
}

/// Series reactance of the gamma capacitor, `-1/(ωC)`.
pub fn cap_reactance_ohm(freq_mhz: f64, capacitance_pf: f64) -> f64 {
    let omega = 2.0 * std::f64::consts::PI * freq_mhz * 1.0e6;
    let c_farad = capacitance_pf * 1.0e-12;
    -1.0 / (omega * c_farad)
}
