use serde::{Deserialize, Serialize};
use strum_macros::Display;
use utoipa::ToSchema;

use crate::geometry::ValidationError;
use crate::refdata;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ElementRole {
    Reflector,
    Driven,
    Director,
}

/// One element on the boom. Lengths, diameters and positions are in inches;
/// positions run from the reflector end toward the last director.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AntennaElement {
    pub role: ElementRole,
    pub length_in: f64,
    pub diameter_in: f64,
    pub position_in: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GroundType {
    Wet,
    Average,
    Dry,
}

impl GroundType {
    /// Takeoff-angle correction in degrees.
    pub fn takeoff_adjustment_deg(self) -> f64 {
        match self {
            GroundType::Wet => -3.0,
            GroundType::Average => 0.0,
            GroundType::Dry => 5.0,
        }
    }
}

impl Default for GroundType {
    fn default() -> Self {
        GroundType::Average
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct GroundRadials {
    pub count: u32,
    pub length_ft: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StackingOrientation {
    Vertical,
    Horizontal,
    /// 2x2 square: a vertical pair of horizontal pairs.
    Quad,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct StackingConfig {
    pub count: u32,
    pub spacing_ft: f64,
    pub orientation: StackingOrientation,
}

/// A validated antenna description: the ordered element list plus mounting
/// and accessory parameters.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AntennaGeometry {
    pub num_elements: usize,
    pub elements: Vec<AntennaElement>,
    #[serde(default = "default_boom_diameter")]
    pub boom_diameter_in: f64,
    pub height_ft: f64,
    pub frequency_mhz: f64,
    #[serde(default)]
    pub band: Option<String>,
    #[serde(default)]
    pub ground: GroundType,
    #[serde(default)]
    pub tapered: bool,
    #[serde(default)]
    pub corona_balls: bool,
    #[serde(default)]
    pub radials: Option<GroundRadials>,
    #[serde(default)]
    pub stacking: Option<StackingConfig>,
}

fn default_boom_diameter() -> f64 {
    2.0
}

impl AntennaGeometry {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.elements.len() != self.num_elements {
            return Err(ValidationError::ElementCountMismatch {
                declared: self.num_elements,
                actual: self.elements.len(),
            });
        }
        let driven = self
            .elements
            .iter()
            .filter(|e| e.role == ElementRole::Driven)
            .count();
        match driven {
            0 => return Err(ValidationError::MissingDriven),
            1 => {}
            n => return Err(ValidationError::MultipleDriven(n)),
        }
        for (index, pair) in self.elements.windows(2).enumerate() {
            if pair[1].position_in < pair[0].position_in {
                return Err(ValidationError::NonMonotonicPositions {
                    index: index + 1,
                    position: pair[1].position_in,
                });
            }
        }
        for (index, e) in self.elements.iter().enumerate() {
            if e.length_in <= 0.0 {
                return Err(ValidationError::NonPositiveDimension {
                    index,
                    field: "length_in",
                });
            }
            if e.diameter_in <= 0.0 {
                return Err(ValidationError::NonPositiveDimension {
                    index,
                    field: "diameter_in",
                });
            }
        }
        if !refdata::FREQUENCY_RANGE_MHZ.contains(&self.frequency_mhz) {
            return Err(ValidationError::FrequencyOutOfRange(self.frequency_mhz));
        }
        if self.height_ft < 0.0 {
            return Err(ValidationError::NegativeHeight(self.height_ft));
        }
        Ok(())
    }

    /// The driven element. Call only on a validated geometry.
    pub fn driven(&self) -> &AntennaElement {
        self.elements
            .iter()
            .find(|e| e.role == ElementRole::Driven)
            .expect("validated geometry has a driven element")
    }

    pub fn has_reflector(&self) -> bool {
        self.elements.iter().any(|e| e.role == ElementRole::Reflector)
    }

    pub fn directors(&self) -> impl Iterator<Item = (usize, &AntennaElement)> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.role == ElementRole::Director)
    }

    pub fn boom_length_in(&self) -> f64 {
        match (self.elements.first(), self.elements.last()) {
            (Some(first), Some(last)) => last.position_in - first.position_in,
            _ => 0.0,
        }
    }

    pub fn wavelength_in(&self) -> f64 {
        refdata::wavelength_in(self.frequency_mhz)
    }

    pub fn wavelength_ft(&self) -> f64 {
        refdata::wavelength_ft(self.frequency_mhz)
    }

    pub fn height_wavelengths(&self) -> f64 {
        self.height_ft / self.wavelength_ft()
    }

    pub fn boom_wavelengths(&self) -> f64 {
        self.boom_length_in() / self.wavelength_in()
    }

    /// Resonant frequency of the driven element in MHz.
    pub fn driven_resonance_mhz(&self) -> f64 {
        refdata::RESONANT_K_IN_MHZ / self.driven().length_in
    }

    pub fn average_element_diameter_in(&self) -> f64 {
        let sum: f64 = self.elements.iter().map(|e| e.diameter_in).sum();
        sum / self.elements.len() as f64
    }
}

#[cfg(test)]
pub(crate) fn test_geometry(num_elements: usize, driven_length_in: f64, freq_mhz: f64) -> AntennaGeometry {
    let wl = refdata::wavelength_in(freq_mhz);
    let mut elements = Vec::new();
    let mut pos = 0.0;
    if num_elements >= 2 {
        elements.push(AntennaElement {
            role: ElementRole::Reflector,
            length_in: driven_length_in * 1.05,
            diameter_in: 0.5,
            position_in: pos,
        });
        pos += wl * 0.2;
    }
    elements.push(AntennaElement {
        role: ElementRole::Driven,
        length_in: driven_length_in,
        diameter_in: 0.5,
        position_in: pos,
    });
    for i in 0..num_elements.saturating_sub(2) {
        pos += wl * 0.18;
        elements.push(AntennaElement {
            role: ElementRole::Director,
            length_in: driven_length_in * (0.95 - 0.01 * i as f64),
            diameter_in: 0.5,
            position_in: pos,
        });
    }
    AntennaGeometry {
        num_elements,
        elements,
        boom_diameter_in: 2.0,
        height_ft: 36.0,
        frequency_mhz: freq_mhz,
        band: None,
        ground: GroundType::Average,
        tapered: false,
        corona_balls: false,
        radials: None,
        stacking: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_three_element() {
        let g = test_geometry(3, 206.0, 27.185);
        assert!(g.validate().is_ok());
        assert!(g.has_reflector());
        assert_eq!(g.directors().count(), 1);
        assert!((g.driven_resonance_mhz() - 27.184).abs() < 0.01);
    }

    #[test]
    fn element_count_mismatch() {
        let mut g = test_geometry(3, 206.0, 27.185);
        g.num_elements = 4;
        assert_eq!(
            g.validate(),
            Err(ValidationError::ElementCountMismatch {
                declared: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn missing_driven() {
        let mut g = test_geometry(3, 206.0, 27.185);
        g.elements[1].role = ElementRole::Director;
        assert_eq!(g.validate(), Err(ValidationError::MissingDriven));
    }

    #[test]
    fn positions_must_not_decrease() {
        let mut g = test_geometry(3, 206.0, 27.185);
        g.elements[2].position_in = 1.0;
        assert!(matches!(
            g.validate(),
            Err(ValidationError::NonMonotonicPositions { index: 2, .. })
        ));
    }

    #[test]
    fn equal_positions_allowed() {
        let mut g = test_geometry(3, 206.0, 27.185);
        g.elements[2].position_in = g.elements[1].position_in;
        assert!(g.validate().is_ok());
    }
}
