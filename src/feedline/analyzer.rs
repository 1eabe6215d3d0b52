use crate::feedline::network::{
    cap_reactance_ohm, capacitance_pf_per_inch, gamma_section_z0, hairpin_z0, step_up_k,
    stub_reactance_ohm, MatchNetwork, GAMMA_STRAY_PF,
};
use crate::feedline::types::{DrivenDims, FeedpointModel, FrequencyPoint, Impedance, LineAnalysis};
use crate::refdata::{self, ReferenceTables, SYSTEM_Z0};

/// Reactance slope of the driven element off resonance, ohms per unit
/// fractional detuning. Calibrated against typical tubing-element Q.
const REACTANCE_SLOPE_OHM: f64 = 3000.0;

/// |Γ| ceiling applied before the SWR formula.
const GAMMA_MAG_LIMIT: f64 = 0.999;

/// Annotation clamps for Smith-chart points near the reactance zero crossing.
const MAX_ANNOTATED_PF: f64 = 500.0;
const MAX_ANNOTATED_UH: f64 = 100.0;

/// Raw feedpoint impedance of the driven element at `freq_mhz`.
pub fn impedance_at(feed: &FeedpointModel, freq_mhz: f64) -> Impedance {
    let delta = (freq_mhz - feed.f_res_mhz) / feed.f_res_mhz;
    Impedance::new(
        feed.r_res * (1.0 + 200.0 * delta * delta),
        REACTANCE_SLOPE_OHM * delta,
    )
}

/// Impedance seen by the feedline after the matching network.
pub fn transform(
    feed_z: Impedance,
    network: &MatchNetwork,
    driven: DrivenDims,
    freq_mhz: f64,
) -> Impedance {
    let beta = 2.0 * std::f64::consts::PI / refdata::wavelength_in(freq_mhz);
    match network {
        MatchNetwork::Direct => feed_z,
        MatchNetwork::Gamma(hw) => {
            let z0g = gamma_section_z0(hw.rod_spacing_in, driven.diameter_in, hw.rod_diameter_in);
            let k = step_up_k(hw.bar_position_in, driven.half_length_in, z0g);
            let x_stub = stub_reactance_ohm(z0g, beta, hw.bar_position_in);
            let c_pf =
                capacitance_pf_per_inch(hw.tube_id_in, hw.rod_diameter_in) * hw.insertion_depth_in
                    + GAMMA_STRAY_PF;
            let x_cap = cap_reactance_ohm(freq_mhz, c_pf);
            Impedance::new(
                feed_z.r * k * k,
                feed_z.x * k * k + x_stub + x_cap,
            )
        }
        MatchNetwork::Hairpin {
            rod_diameter_in,
            rod_spacing_in,
            stub_length_in,
        } => {
            let z0h = hairpin_z0(*rod_spacing_in, *rod_diameter_in);
            let x_l = stub_reactance_ohm(z0h, beta, *stub_length_in);
            shunt_reactance(feed_z, x_l)
        }
    }
}

/// Parallel combination of `z` with a shunt reactance `jx`.
fn shunt_reactance(z: Impedance, x_shunt: f64) -> Impedance {
    if x_shunt.abs() < 1e-9 {
        // Shorted feedpoint; report it as such rather than dividing by zero.
        return Impedance::new(0.001, 0.0);
    }
    let denom = z.r * z.r + z.x * z.x;
    if denom < 1e-12 {
        return Impedance::new(0.001, 0.0);
    }
    // Admittances: Y = G + jB
    let g = z.r / denom;
    let b = -z.x / denom - 1.0 / x_shunt;
    let y_mag2 = g * g + b * b;
    Impedance::new(g / y_mag2, -b / y_mag2)
}

/// Reflection coefficient against the 50-ohm system, magnitude-limited.
fn reflection(z: Impedance) -> (f64, f64, f64) {
    let dr = z.r - SYSTEM_Z0;
    let sr = z.r + SYSTEM_Z0;
    let den = sr * sr + z.x * z.x;
    if den < 1e-12 {
        return (GAMMA_MAG_LIMIT, 0.0, GAMMA_MAG_LIMIT);
    }
    let mut re = (dr * sr + z.x * z.x) / den;
    let mut im = (z.x * sr - dr * z.x) / den;
    let mag = (re * re + im * im).sqrt();
    if mag > GAMMA_MAG_LIMIT {
        let scale = GAMMA_MAG_LIMIT / mag;
        re *= scale;
        im *= scale;
        return (re, im, GAMMA_MAG_LIMIT);
    }
    (re, im, mag)
}

/// Reflection coefficient of an impedance against the 50-ohm system.
pub fn reflection_of(z: Impedance) -> (f64, f64, f64) {
    reflection(z)
}

/// SWR of an impedance against the 50-ohm system.
pub fn swr_of(z: Impedance) -> f64 {
    let (_, _, mag) = reflection(z);
    swr_from_gamma(mag)
}

/// SWR from a reflection-coefficient magnitude, clamped to [1, 10].
pub fn swr_from_gamma(gamma_mag: f64) -> f64 {
    let mag = gamma_mag.min(GAMMA_MAG_LIMIT);
    ((1.0 + mag) / (1.0 - mag)).clamp(1.0, 10.0)
}

fn sample(
    feed: &FeedpointModel,
    network: &MatchNetwork,
    driven: DrivenDims,
    freq_mhz: f64,
) -> FrequencyPoint {
    let z = transform(impedance_at(feed, freq_mhz), network, driven, freq_mhz);
    let (gamma_re, gamma_im, gamma_mag) = reflection(z);
    let swr = swr_from_gamma(gamma_mag);
    let (capacitance_pf, inductance_uh) = annotate(z.x, freq_mhz);
    FrequencyPoint {
        freq_mhz,
        resistance: z.r,
        reactance: z.x,
        gamma_re,
        gamma_im,
        gamma_mag,
        swr,
        capacitance_pf,
        inductance_uh,
    }
}

/// Equivalent-component annotation for a Smith-chart point. Reactances under
/// one ohm get no annotation at all; the equivalent capacitance there runs
/// into thousands of pF and is meaningless.
fn annotate(x: f64, freq_mhz: f64) -> (Option<f64>, Option<f64>) {
    let omega_mhz = 2.0 * std::f64::consts::PI * freq_mhz;
    if x <= -1.0 {
        let pf = (1.0e6 / (omega_mhz * x.abs())).min(MAX_ANNOTATED_PF);
        (Some(pf), None)
    } else if x >= 1.0 {
        let uh = (x / omega_mhz).min(MAX_ANNOTATED_UH);
        (None, Some(uh))
    } else {
        (None, None)
    }
}

/// Sweep the band containing `design_mhz` at its channel spacing and derive
/// the SWR curve, Smith trace and usable bandwidths from one set of Γ(f)
/// samples.
pub fn analyze(
    tables: &ReferenceTables,
    feed: &FeedpointModel,
    driven: DrivenDims,
    network: &MatchNetwork,
    design_mhz: f64,
) -> LineAnalysis {
    let band = tables.band_for(design_mhz);
    let step_mhz = band.channel_spacing_khz / 1000.0;
    let steps = ((band.end_mhz - band.start_mhz) / step_mhz).round() as usize;

    let mut points = Vec::with_capacity(steps + 1);
    for i in 0..=steps {
        let f = band.start_mhz + i as f64 * step_mhz;
        points.push(sample(feed, network, driven, f));
    }

    let design_point = sample(feed, network, driven, design_mhz);
    let min_idx = points
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.swr.partial_cmp(&b.swr).unwrap())
        .map(|(i, _)| i)
        .unwrap_or(0);

    let bandwidth = |limit: f64| -> f64 {
        if points[min_idx].swr > limit {
            return 0.0;
        }
        let mut lo = min_idx;
        while lo > 0 && points[lo - 1].swr <= limit {
            lo -= 1;
        }
        let mut hi = min_idx;
        while hi + 1 < points.len() && points[hi + 1].swr <= limit {
            hi += 1;
        }
        (hi - lo) as f64 * band.channel_spacing_khz
    };

    LineAnalysis {
        z0: SYSTEM_Z0,
        band: band.name.clone(),
        swr_at_design: design_point.swr,
        min_swr: points[min_idx].swr,
        min_swr_freq_mhz: points[min_idx].freq_mhz,
        bandwidth_15_khz: bandwidth(1.5),
        bandwidth_20_khz: bandwidth(2.0),
        points,
    }
}
