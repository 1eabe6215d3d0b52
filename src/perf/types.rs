use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::feedline::LineAnalysis;

/// Gain accounting, exposed term by term. The terms always sum to
/// `final_gain_dbi`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct GainBreakdown {
    pub base_dbi: f64,
    pub reflector_adjustment_db: f64,
    pub taper_bonus_db: f64,
    pub corona_adjustment_db: f64,
    pub height_bonus_db: f64,
    pub boom_bonus_db: f64,
    pub final_gain_dbi: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct PatternSample {
    pub angle_deg: f64,
    pub magnitude_pct: f64,
}

/// Stacked-array contribution on top of the single-antenna figures.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct StackedResult {
    pub antennas: u32,
    pub spacing_wl: f64,
    pub gain_dbi: f64,
    pub increase_db: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PerformanceResult {
    pub swr: f64,
    pub gain: GainBreakdown,
    pub front_to_back_db: f64,
    pub front_to_side_db: f64,
    pub beamwidth_h_deg: f64,
    pub beamwidth_v_deg: f64,
    pub bandwidth_15_khz: f64,
    pub bandwidth_20_khz: f64,
    pub efficiency_pct: f64,
    pub takeoff_angle_deg: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stacked: Option<StackedResult>,
    /// Far-field pattern, 0 deg = broadside forward = 100%.
    pub pattern: Vec<PatternSample>,
    /// SWR curve and Smith trace over the band, from the same Γ(f) samples.
    pub line: LineAnalysis,
}
