//! Structured diagnostics emitted by the designers and optimizers.
//!
//! Machine-checkable (tagged code + parameters) with a human rendering via
//! `Display`, so the boundary can show text while tests match on variants.

use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::Display;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The driven element was resonant away from the operating frequency and
    /// a corrected length is recommended.
    DrivenLengthCorrected {
        from_in: f64,
        to_in: f64,
        resonant_mhz: f64,
    },
    /// No custom hardware was supplied; element-count defaults were used.
    HardwareDefaultsApplied { tube_od_in: f64, rod_od_in: f64 },
    /// The sweep could not bring the reactance null inside hardware limits.
    NullUnreachable { best_swr: f64 },
    /// Optimal insertion sits at the mechanical end of the tube.
    InsertionPinned { max_insertion_in: f64 },
    /// Feedpoint resistance is at or above the line impedance; a hairpin
    /// cannot step it up. A gamma match is the right topology.
    HairpinUnsuitable { feedpoint_r: f64 },
    /// The hairpin requires the driven element shortened to present the
    /// series capacitive reactance the match consumes.
    DrivenShorteningRequired { by_in: f64 },
    /// Fine-tune entry SWR was already at or below threshold.
    NearPerfect { swr: f64 },
    /// Fine-tune stopped because its perturbation budget ran out.
    TuneBudgetExhausted { swr: f64 },
    /// Auto-tune compressed element spacing to honor a boom-length lock.
    BoomLimited { boom_in: f64 },
    /// Stacking spacing is inside the strong mutual-coupling region.
    CouplingRisk { spacing_wl: f64 },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::NullUnreachable { .. }
            | Diagnostic::InsertionPinned { .. }
            | Diagnostic::HairpinUnsuitable { .. }
            | Diagnostic::TuneBudgetExhausted { .. }
            | Diagnostic::CouplingRisk { .. } => Severity::Warning,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::DrivenLengthCorrected {
                from_in,
                to_in,
                resonant_mhz,
            } => write!(
                f,
                "driven element is resonant at {resonant_mhz:.3} MHz; \
                 recommend changing length {from_in:.2}\" -> {to_in:.2}\""
            ),
            Diagnostic::HardwareDefaultsApplied {
                tube_od_in,
                rod_od_in,
            } => write!(
                f,
                "using default hardware: {tube_od_in:.3}\" tube, {rod_od_in:.3}\" rod"
            ),
            Diagnostic::NullUnreachable { best_swr } => write!(
                f,
                "reactance null not reachable with this hardware; best SWR {best_swr:.2}"
            ),
            Diagnostic::InsertionPinned { max_insertion_in } => write!(
                f,
                "optimal rod insertion pinned at the {max_insertion_in:.1}\" mechanical limit; \
                 consider a longer tube or larger capacitance"
            ),
            Diagnostic::HairpinUnsuitable { feedpoint_r } => write!(
                f,
                "feedpoint resistance {feedpoint_r:.0} ohm is not below 50 ohm; \
                 a hairpin cannot step it up - use a gamma match"
            ),
            Diagnostic::DrivenShorteningRequired { by_in } => {
                write!(f, "shorten the driven element by {by_in:.2}\" for hairpin resonance")
            }
            Diagnostic::NearPerfect { swr } => {
                write!(f, "SWR {swr:.3} is near-perfect, no tuning needed")
            }
            Diagnostic::TuneBudgetExhausted { swr } => {
                write!(f, "adjustment budget exhausted at SWR {swr:.2}")
            }
            Diagnostic::BoomLimited { boom_in } => {
                write!(f, "element spacing compressed to fit the {boom_in:.0}\" boom")
            }
            Diagnostic::CouplingRisk { spacing_wl } => write!(
                f,
                "{spacing_wl:.2} wavelength spacing risks strong mutual coupling"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_classification() {
        let d = Diagnostic::NullUnreachable { best_swr: 1.8 };
        assert_eq!(d.severity(), Severity::Warning);
        let d = Diagnostic::NearPerfect { swr: 1.01 };
        assert_eq!(d.severity(), Severity::Info);
    }

    #[test]
    fn serializes_with_code_tag() {
        let d = Diagnostic::InsertionPinned {
            max_insertion_in: 23.5,
        };
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["code"], "insertion_pinned");
        assert_eq!(json["max_insertion_in"], 23.5);
    }
}
