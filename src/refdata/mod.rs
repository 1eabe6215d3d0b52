mod tables;

pub use tables::{Band, HeightWeights, ReferenceTables, StackingWeights};

/// Speed of light in m/s.
pub const SPEED_OF_LIGHT_M_S: f64 = 299_792_458.0;

/// Speed of light expressed in inch·MHz (divide by MHz to get a wavelength in inches).
pub const WAVELENGTH_IN_MHZ: f64 = 11_802.853;

/// Dielectric constant of PTFE, used in the gamma capacitor model.
pub const PTFE_DIELECTRIC_K: f64 = 2.1;

/// Standard tubing wall thickness in inches (0.058" aluminum stock).
pub const STANDARD_WALL_IN: f64 = 0.058;

/// System characteristic impedance in ohms.
pub const SYSTEM_Z0: f64 = 50.0;

/// Half-wave resonance constant: a driven element of length L inches is
/// resonant at `5600 / L` MHz (includes end-effect shortening).
pub const RESONANT_K_IN_MHZ: f64 = 5600.0;

/// Largest element count the calibrated tables cover.
pub const MAX_ELEMENTS: usize = 20;

/// Frequency range the engine models, MHz.
pub const FREQUENCY_RANGE_MHZ: std::ops::RangeInclusive<f64> = 1.0..=1000.0;

/// Wavelength in inches at `freq_mhz`.
pub fn wavelength_in(freq_mhz: f64) -> f64 {
    WAVELENGTH_IN_MHZ / freq_mhz
}

/// Wavelength in feet at `freq_mhz`.
pub fn wavelength_ft(freq_mhz: f64) -> f64 {
    wavelength_in(freq_mhz) / 12.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wavelength_at_cb_center() {
        let wl = wavelength_in(27.185);
        assert!((wl - 434.17).abs() < 0.5, "wavelength was {wl}");
    }
}
