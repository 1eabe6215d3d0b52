use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::matching::MatchError;
use crate::refdata::{self, STANDARD_WALL_IN};

/// Caller-supplied hardware overrides for the gamma designer. Anything left
/// out falls back to the element-count defaults.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ToSchema)]
pub struct CustomGammaHardware {
    #[serde(default)]
    pub tube_od_in: Option<f64>,
    #[serde(default)]
    pub rod_od_in: Option<f64>,
    #[serde(default)]
    pub rod_spacing_in: Option<f64>,
    #[serde(default)]
    pub tube_length_in: Option<f64>,
}

/// Resolved gamma hardware dimensions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct GammaDefaults {
    pub tube_od_in: f64,
    pub tube_id_in: f64,
    pub rod_od_in: f64,
    pub rod_spacing_in: f64,
    pub rod_length_in: f64,
    pub tube_length_in: f64,
    pub insertion_start_in: f64,
    pub is_default: bool,
}

pub fn tube_inner_diameter(tube_od_in: f64) -> f64 {
    tube_od_in - 2.0 * STANDARD_WALL_IN
}

/// Default gamma hardware sized by element count.
///
/// Fewer elements mean a higher feedpoint impedance and a heavier driven
/// element, so the hardware gets larger.
pub fn default_gamma_hardware(num_elements: usize, freq_mhz: f64) -> GammaDefaults {
    let (tube_od_in, rod_od_in) = if num_elements <= 3 {
        (0.75, 0.5)
    } else {
        (0.625, 0.375)
    };
    GammaDefaults {
        tube_od_in,
        tube_id_in: tube_inner_diameter(tube_od_in),
        rod_od_in,
        rod_spacing_in: 3.0,
        rod_length_in: 0.075 * refdata::wavelength_in(freq_mhz),
        tube_length_in: 24.0,
        insertion_start_in: 0.125,
        is_default: true,
    }
}

/// Merge caller overrides with defaults and check physical feasibility.
pub fn resolve_hardware(
    num_elements: usize,
    freq_mhz: f64,
    custom: Option<&CustomGammaHardware>,
) -> Result<GammaDefaults, MatchError> {
    let mut hw = default_gamma_hardware(num_elements, freq_mhz);
    if let Some(c) = custom {
        let overridden = c.tube_od_in.is_some()
            || c.rod_od_in.is_some()
            || c.rod_spacing_in.is_some()
            || c.tube_length_in.is_some();
        if let Some(od) = c.tube_od_in {
            hw.tube_od_in = od;
            hw.tube_id_in = tube_inner_diameter(od);
        }
        if let Some(rod) = c.rod_od_in {
            hw.rod_od_in = rod;
        }
        if let Some(spacing) = c.rod_spacing_in {
            hw.rod_spacing_in = spacing;
        }
        if let Some(len) = c.tube_length_in {
            hw.tube_length_in = len;
        }
        hw.is_default = !overridden;
    }
    if hw.tube_id_in <= hw.rod_od_in {
        return Err(MatchError::InfeasibleHardware {
            tube_id_in: hw.tube_id_in,
            rod_od_in: hw.rod_od_in,
        });
    }
    Ok(hw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rod_length_near_32_inches_at_cb() {
        let hw = default_gamma_hardware(3, 27.185);
        assert!((hw.rod_length_in - 32.0).abs() <= 2.0, "rod {}", hw.rod_length_in);
        assert_eq!(hw.rod_spacing_in, 3.0);
        assert_eq!(hw.insertion_start_in, 0.125);
    }

    #[test]
    fn more_elements_get_smaller_hardware() {
        let small = default_gamma_hardware(6, 27.185);
        let big = default_gamma_hardware(2, 27.185);
        assert!(small.tube_od_in < big.tube_od_in);
        assert!(small.rod_od_in < big.rod_od_in);
    }

    #[test]
    fn rod_thicker_than_tube_id_is_infeasible() {
        let custom = CustomGammaHardware {
            tube_od_in: Some(0.5),
            rod_od_in: Some(0.5),
            ..Default::default()
        };
        let err = resolve_hardware(3, 27.185, Some(&custom)).unwrap_err();
        assert!(err.is_infeasible());
    }
}
