use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::feedline::MatchNetwork;
use crate::geometry::{AntennaGeometry, GroundType, ValidationError};
use crate::perf::{self, estimate};
use crate::refdata::ReferenceTables;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct HeightRequest {
    /// Geometry to mount; its `height_ft` is ignored and swept instead.
    pub geometry: AntennaGeometry,
    pub min_height_ft: f64,
    pub max_height_ft: f64,
    #[serde(default = "default_step")]
    pub step_ft: f64,
}

fn default_step() -> f64 {
    2.0
}

/// The eight weighted sub-scores behind one candidate's total.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct HeightScores {
    pub swr: f64,
    pub efficiency: f64,
    pub gain: f64,
    pub front_to_back: f64,
    pub takeoff: f64,
    pub boom_ratio: f64,
    pub height_band: f64,
    pub radials: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HeightCandidate {
    pub height_ft: f64,
    pub height_wl: f64,
    pub swr: f64,
    pub gain_dbi: f64,
    pub front_to_back_db: f64,
    pub efficiency_pct: f64,
    pub takeoff_angle_deg: f64,
    pub scores: HeightScores,
    pub total_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HeightResult {
    pub optimal_height_ft: f64,
    pub best_score: f64,
    pub heights_tested: Vec<HeightCandidate>,
}

fn swr_score(swr: f64) -> f64 {
    if swr <= 1.2 {
        1.0
    } else if swr <= 1.5 {
        0.85
    } else if swr <= 2.0 {
        0.5
    } else {
        0.2
    }
}

/// Sweep mounting height and pick the best composite score.
pub fn optimize_height(
    tables: &ReferenceTables,
    req: &HeightRequest,
) -> Result<HeightResult, ValidationError> {
    let w = &tables.height_weights;
    let n = req.geometry.num_elements;
    let boom_ft = req.geometry.boom_length_in() / 12.0;

    // Element-count-appropriate height window: bigger antennas want to fly
    // higher, and their acceptable window is wider.
    let window_center_wl = 0.5 + 0.12 * (n as f64 - 2.0);
    let window_half_width_wl = 0.45 + 0.08 * (n as f64 - 2.0);

    let mut heights_tested = Vec::new();
    let mut height_ft = req.min_height_ft.max(1.0);
    let step = req.step_ft.max(0.5);
    // Degenerate ranges still test the starting height.
    let max_height_ft = req.max_height_ft.max(height_ft);

    while height_ft <= max_height_ft + 1e-9 {
        let mut geometry = req.geometry.clone();
        geometry.height_ft = height_ft;
        let result = estimate(tables, &geometry, &MatchNetwork::Direct)?;

        let height_wl = geometry.height_wavelengths();
        let takeoff = perf::takeoff_angle_deg(height_wl, geometry.ground);

        // Efficiency matters most when the antenna is close to ground.
        let eff_weight = if height_wl < 0.5 { 1.3 } else { 1.0 };
        // The takeoff angle starts to dominate once the lobe forms.
        let takeoff_weight = if height_wl > 0.25 {
            1.0 + (height_wl - 0.25).min(1.0)
        } else {
            0.6
        };

        let radial_factor = geometry
            .radials
            .map(|r| f64::from(r.count.min(8)) / 8.0 * w.radial_bonus_cap)
            .unwrap_or(0.0);
        let radial_score = match geometry.ground {
            GroundType::Wet => radial_factor * (1.0 - height_wl / 2.0).clamp(0.0, 1.0),
            GroundType::Dry => radial_factor * (height_wl / 2.0).clamp(0.0, 1.0),
            GroundType::Average => radial_factor * 0.5,
        };

        let scores = HeightScores {
            swr: w.swr * swr_score(result.swr),
            efficiency: w.efficiency * (result.efficiency_pct / 100.0) * eff_weight,
            gain: w.gain * result.gain.final_gain_dbi,
            front_to_back: w.front_to_back * result.front_to_back_db,
            takeoff: w.takeoff * ((90.0 - takeoff) / 90.0) * takeoff_weight,
            boom_ratio: w.boom_ratio * (height_ft / boom_ft.max(1.0) / 3.0).min(1.0),
            height_band: w.height_band
                * (1.0 - (height_wl - window_center_wl).abs() / window_half_width_wl).max(0.0),
            radials: radial_score,
        };
        let total_score = scores.swr
            + scores.efficiency
            + scores.gain
            + scores.front_to_back
            + scores.takeoff
            + scores.boom_ratio
            + scores.height_band
            + scores.radials;

        heights_tested.push(HeightCandidate {
            height_ft,
            height_wl,
            swr: result.swr,
            gain_dbi: result.gain.final_gain_dbi,
            front_to_back_db: result.front_to_back_db,
            efficiency_pct: result.efficiency_pct,
            takeoff_angle_deg: takeoff,
            scores,
            total_score,
        });
        height_ft += step;
    }

    let (optimal_height_ft, best_score) = heights_tested
        .iter()
        .max_by(|a, b| a.total_score.partial_cmp(&b.total_score).unwrap())
        .map(|c| (c.height_ft, c.total_score))
        .expect("sweep tests at least one height");

    log::debug!(
        "height sweep: {} candidates, optimum {:.1} ft (score {:.1})",
        heights_tested.len(),
        optimal_height_ft,
        best_score
    );

    Ok(HeightResult {
        optimal_height_ft,
        best_score,
        heights_tested,
    })
}
