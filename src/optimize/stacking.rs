use serde::{Deserialize, Serialize};
use strum_macros::Display;
use utoipa::ToSchema;

use crate::diag::Diagnostic;
use crate::feedline::MatchNetwork;
use crate::geometry::{AntennaGeometry, StackingOrientation, ValidationError};
use crate::perf::{estimate, stacked_beamwidth, stacking_gain};
use crate::refdata::ReferenceTables;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct StackingRequest {
    pub geometry: AntennaGeometry,
    pub min_spacing_ft: f64,
    pub max_spacing_ft: f64,
    #[serde(default = "default_step")]
    pub step_ft: f64,
    #[serde(default = "default_count")]
    pub antennas: u32,
    pub orientation: StackingOrientation,
}

fn default_step() -> f64 {
    1.0
}

fn default_count() -> u32 {
    2
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SpacingStatus {
    TooClose,
    CouplingRisk,
    Good,
    Optimal,
    Wide,
}

impl SpacingStatus {
    fn classify(spacing_wl: f64) -> Self {
        if spacing_wl < 0.3 {
            SpacingStatus::TooClose
        } else if spacing_wl < 0.5 {
            SpacingStatus::CouplingRisk
        } else if spacing_wl < 0.8 {
            SpacingStatus::Good
        } else if spacing_wl <= 1.2 {
            SpacingStatus::Optimal
        } else if spacing_wl <= 2.0 {
            SpacingStatus::Good
        } else {
            SpacingStatus::Wide
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SpacingCandidate {
    pub spacing_ft: f64,
    pub spacing_wl: f64,
    pub gain_dbi: f64,
    pub increase_db: f64,
    pub beamwidth_deg: f64,
    pub score: f64,
    pub spacing_status: SpacingStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StackingResult {
    pub optimal_spacing_ft: f64,
    pub optimal_gain_dbi: f64,
    pub single_gain_dbi: f64,
    pub results: Vec<SpacingCandidate>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Stacked gain for one candidate spacing, composing two passes for the
/// quad layout.
fn gain_for(base_dbi: f64, antennas: u32, spacing_wl: f64, orientation: StackingOrientation) -> f64 {
    match orientation {
        StackingOrientation::Quad => {
            let (after_v, _) = stacking_gain(base_dbi, 2, spacing_wl, StackingOrientation::Vertical);
            let (after_h, _) =
                stacking_gain(after_v, 2, spacing_wl, StackingOrientation::Horizontal);
            after_h
        }
        o => stacking_gain(base_dbi, antennas, spacing_wl, o).0,
    }
}

/// Sweep array spacing and score stacked gain against the coupling regime.
pub fn optimize_stacking(
    tables: &ReferenceTables,
    req: &StackingRequest,
) -> Result<StackingResult, ValidationError> {
    let single = estimate(tables, &req.geometry, &MatchNetwork::Direct)?;
    let single_gain = single.gain.final_gain_dbi;
    let wavelength_ft = req.geometry.wavelength_ft();
    let w = &tables.stacking_weights;

    let mut results = Vec::new();
    let mut spacing_ft = req.min_spacing_ft.max(0.5);
    let step = req.step_ft.max(0.25);
    let max_spacing_ft = req.max_spacing_ft.max(spacing_ft);

    while spacing_ft <= max_spacing_ft + 1e-9 {
        let spacing_wl = spacing_ft / wavelength_ft;
        let gain_dbi = gain_for(single_gain, req.antennas, spacing_wl, req.orientation);

        let mut score = gain_dbi;
        if spacing_wl < 0.5 {
            score -= w.close_penalty * (0.5 - spacing_wl) / 0.5;
        }
        if spacing_wl > 2.0 {
            score -= w.wide_penalty * (spacing_wl - 2.0);
        }
        if (spacing_wl - 1.0).abs() <= 0.2
            && matches!(
                req.orientation,
                StackingOrientation::Vertical | StackingOrientation::Quad
            )
        {
            score += w.full_wave_bonus;
        }

        results.push(SpacingCandidate {
            spacing_ft,
            spacing_wl,
            gain_dbi,
            increase_db: gain_dbi - single_gain,
            beamwidth_deg: stacked_beamwidth(single.beamwidth_h_deg, req.antennas),
            score,
            spacing_status: SpacingStatus::classify(spacing_wl),
        });
        spacing_ft += step;
    }

    let best = results
        .iter()
        .max_by(|a, b| a.score.partial_cmp(&b.score).unwrap())
        .expect("sweep tests at least one spacing");
    let (optimal_spacing_ft, optimal_gain_dbi, best_wl, best_status) =
        (best.spacing_ft, best.gain_dbi, best.spacing_wl, best.spacing_status);

    let mut diagnostics = Vec::new();
    if matches!(
        best_status,
        SpacingStatus::TooClose | SpacingStatus::CouplingRisk
    ) {
        diagnostics.push(Diagnostic::CouplingRisk {
            spacing_wl: best_wl,
        });
    }

    log::debug!(
        "stacking sweep: optimum {:.1} ft ({:.2} wl, {:.2} dBi)",
        optimal_spacing_ft,
        best_wl,
        optimal_gain_dbi
    );

    Ok(StackingResult {
        optimal_spacing_ft,
        optimal_gain_dbi,
        single_gain_dbi: single_gain,
        results,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::test_geometry;

    fn request(orientation: StackingOrientation) -> StackingRequest {
        StackingRequest {
            geometry: test_geometry(3, 206.0, 27.185),
            min_spacing_ft: 5.0,
            max_spacing_ft: 60.0,
            step_ft: 1.0,
            antennas: 2,
            orientation,
        }
    }

    #[test]
    fn optimum_sits_in_the_good_regime() {
        let tables = ReferenceTables::default();
        let result = optimize_stacking(&tables, &request(StackingOrientation::Vertical)).unwrap();
        let best_wl = result.optimal_spacing_ft / 36.18;
        assert!(
            (0.5..=1.3).contains(&best_wl),
            "optimum at {best_wl} wavelengths"
        );
        assert!(result.optimal_gain_dbi > result.single_gain_dbi + 2.0);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn statuses_follow_spacing() {
        let tables = ReferenceTables::default();
        let mut req = request(StackingOrientation::Vertical);
        req.max_spacing_ft = 80.0;
        let result = optimize_stacking(&tables, &req).unwrap();
        for c in &result.results {
            assert_eq!(c.spacing_status, SpacingStatus::classify(c.spacing_wl));
        }
        // 5 ft at 11m is far inside the coupling region
        assert_eq!(result.results[0].spacing_status, SpacingStatus::TooClose);
        // the widest points are past two wavelengths
        assert_eq!(
            result.results.last().unwrap().spacing_status,
            SpacingStatus::Wide
        );
        assert_eq!(SpacingStatus::Wide.to_string(), "wide");
    }

    #[test]
    fn quad_gains_more_than_a_pair() {
        let tables = ReferenceTables::default();
        let pair = optimize_stacking(&tables, &request(StackingOrientation::Vertical)).unwrap();
        let quad = optimize_stacking(&tables, &request(StackingOrientation::Quad)).unwrap();
        assert!(quad.optimal_gain_dbi > pair.optimal_gain_dbi);
    }
}
