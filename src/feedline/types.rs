use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Complex impedance in ohms, kept as explicit R/X rather than a complex
/// type since every consumer reads the parts separately.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Impedance {
    pub r: f64,
    pub x: f64,
}

impl Impedance {
    pub fn new(r: f64, x: f64) -> Self {
        Impedance { r, x }
    }

    pub fn magnitude(&self) -> f64 {
        (self.r * self.r + self.x * self.x).sqrt()
    }
}

/// Lumped feedpoint model of the driven element: resonant resistance plus a
/// linear reactance slope off resonance.
#[derive(Debug, Clone, Copy)]
pub struct FeedpointModel {
    pub r_res: f64,
    pub f_res_mhz: f64,
}

/// Driven-element dimensions the gamma transform needs.
#[derive(Debug, Clone, Copy)]
pub struct DrivenDims {
    pub half_length_in: f64,
    pub diameter_in: f64,
}

/// One frequency sample: impedance, reflection coefficient and SWR all
/// derived from the same Γ so the SWR curve and Smith trace agree.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FrequencyPoint {
    pub freq_mhz: f64,
    pub resistance: f64,
    pub reactance: f64,
    pub gamma_re: f64,
    pub gamma_im: f64,
    pub gamma_mag: f64,
    pub swr: f64,
    /// Equivalent series capacitance when the point is capacitive, clamped
    /// so near-resonance samples do not report thousands of pF.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacitance_pf: Option<f64>,
    /// Equivalent series inductance when the point is inductive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inductance_uh: Option<f64>,
}

/// Full band analysis for one feed arrangement.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LineAnalysis {
    pub z0: f64,
    pub band: String,
    pub swr_at_design: f64,
    pub min_swr: f64,
    pub min_swr_freq_mhz: f64,
    /// Usable bandwidth (kHz) where the curve stays at or below 1.5:1.
    pub bandwidth_15_khz: f64,
    /// Usable bandwidth (kHz) where the curve stays at or below 2.0:1.
    pub bandwidth_20_khz: f64,
    pub points: Vec<FrequencyPoint>,
}
