mod analyzer;
mod network;
mod types;

pub use analyzer::{analyze, impedance_at, reflection_of, swr_from_gamma, swr_of, transform};
pub use network::{
    cap_reactance_ohm, capacitance_pf_per_inch, gamma_section_z0, hairpin_z0, step_up_k,
    stub_reactance_ohm, GammaHardware, MatchNetwork, GAMMA_STRAY_PF,
};
pub use types::{DrivenDims, FeedpointModel, FrequencyPoint, Impedance, LineAnalysis};
