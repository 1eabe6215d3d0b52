use serde::{Deserialize, Serialize};
use strum_macros::Display;
use utoipa::ToSchema;

use crate::diag::Diagnostic;
use crate::feedline::MatchNetwork;
use crate::geometry::{AntennaElement, AntennaGeometry, ElementRole, GroundType};
use crate::matching::{design_gamma, GammaRecipe, GammaRequest, MatchError};
use crate::perf::{estimate, PerformanceResult};
use crate::refdata::{self, ReferenceTables};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SpacingMode {
    Compact,
    Standard,
    Wide,
}

impl Default for SpacingMode {
    fn default() -> Self {
        SpacingMode::Standard
    }
}

impl SpacingMode {
    /// Reflector-to-driven gap in wavelengths.
    fn reflector_gap_wl(self) -> f64 {
        match self {
            SpacingMode::Compact => 0.15,
            SpacingMode::Standard => 0.2,
            SpacingMode::Wide => 0.25,
        }
    }

    /// Driven-to-director and director-to-director gap in wavelengths.
    fn director_gap_wl(self) -> f64 {
        match self {
            SpacingMode::Compact => 0.13,
            SpacingMode::Standard => 0.18,
            SpacingMode::Wide => 0.22,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AutoTuneRequest {
    pub num_elements: usize,
    /// Design frequency; when absent the named band's center is used, and
    /// without either the first reference band applies.
    #[serde(default)]
    pub frequency_mhz: Option<f64>,
    #[serde(default)]
    pub band: Option<String>,
    #[serde(default = "default_height")]
    pub height_ft: f64,
    #[serde(default)]
    pub ground: GroundType,
    #[serde(default = "default_true")]
    pub reflector: bool,
    #[serde(default)]
    pub spacing_mode: SpacingMode,
    /// Fixed gap in inches between every adjacent pair, overriding the mode.
    #[serde(default)]
    pub spacing_lock_in: Option<f64>,
    /// Hard ceiling on boom length; spacing compresses to honor it.
    #[serde(default)]
    pub boom_length_limit_in: Option<f64>,
    #[serde(default = "default_diameter")]
    pub element_diameter_in: f64,
}

fn default_height() -> f64 {
    36.0
}

fn default_true() -> bool {
    true
}

fn default_diameter() -> f64 {
    0.5
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AutoTuneResult {
    pub geometry: AntennaGeometry,
    pub performance: PerformanceResult,
    pub gamma: GammaRecipe,
    pub diagnostics: Vec<Diagnostic>,
}

/// Generate a calibrated starting geometry for the requested element count
/// and report its predicted performance through a designed gamma match.
pub fn auto_tune(
    tables: &ReferenceTables,
    req: &AutoTuneRequest,
) -> Result<AutoTuneResult, MatchError> {
    if req.num_elements < 2 {
        return Err(MatchError::TooFewElements(req.num_elements));
    }
    if req.num_elements > refdata::MAX_ELEMENTS {
        return Err(MatchError::TooManyElements(req.num_elements));
    }

    let freq = req
        .frequency_mhz
        .or_else(|| {
            req.band
                .as_deref()
                .and_then(|name| tables.band_by_name(name))
                .map(|b| b.center_mhz)
        })
        .unwrap_or_else(|| tables.bands[0].center_mhz);

    let wavelength = refdata::wavelength_in(freq);
    let driven_length = refdata::RESONANT_K_IN_MHZ / freq;

    let mut diagnostics = Vec::new();
    let mut elements = Vec::with_capacity(req.num_elements);
    let mut pos = 0.0;

    if req.reflector {
        elements.push(AntennaElement {
            role: ElementRole::Reflector,
            length_in: driven_length * 1.05,
            diameter_in: req.element_diameter_in,
            position_in: pos,
        });
        pos += req
            .spacing_lock_in
            .unwrap_or(req.spacing_mode.reflector_gap_wl() * wavelength);
    }
    elements.push(AntennaElement {
        role: ElementRole::Driven,
        length_in: driven_length,
        diameter_in: req.element_diameter_in,
        position_in: pos,
    });
    let director_count = req.num_elements - elements.len();
    for i in 0..director_count {
        pos += req
            .spacing_lock_in
            .unwrap_or(req.spacing_mode.director_gap_wl() * wavelength);
        elements.push(AntennaElement {
            role: ElementRole::Director,
            length_in: driven_length * (0.95 - 0.01 * i as f64),
            diameter_in: req.element_diameter_in,
            position_in: pos,
        });
    }

    // A boom lock compresses all gaps proportionally.
    if let Some(limit) = req.boom_length_limit_in {
        let boom = pos;
        if boom > limit && limit > 0.0 {
            let scale = limit / boom;
            for e in &mut elements {
                e.position_in *= scale;
            }
            diagnostics.push(Diagnostic::BoomLimited { boom_in: limit });
        }
    }

    let geometry = AntennaGeometry {
        num_elements: req.num_elements,
        elements,
        boom_diameter_in: 2.0,
        height_ft: req.height_ft,
        frequency_mhz: freq,
        band: Some(tables.band_for(freq).name.clone()),
        ground: req.ground,
        tapered: false,
        corona_balls: false,
        radials: None,
        stacking: None,
    };
    geometry.validate()?;

    let gamma = design_gamma(
        tables,
        &GammaRequest {
            num_elements: req.num_elements,
            driven_length_in: driven_length,
            frequency_mhz: freq,
            feedpoint_r: None,
            element_diameter_in: Some(req.element_diameter_in),
            resonant_freq_mhz: None,
            hardware: None,
        },
    )?;

    let performance = estimate(
        tables,
        &geometry,
        &MatchNetwork::Gamma(gamma.hardware.clone()),
    )?;

    log::debug!(
        "auto-tune: {} elements at {:.3} MHz, boom {:.0}\", swr {:.2}, gain {:.1} dBi",
        req.num_elements,
        freq,
        geometry.boom_length_in(),
        performance.swr,
        performance.gain.final_gain_dbi
    );

    Ok(AutoTuneResult {
        geometry,
        performance,
        gamma,
        diagnostics,
    })
}
