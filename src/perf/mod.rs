mod estimator;
mod pattern;
mod stacking;
mod types;

pub use estimator::{estimate, takeoff_angle_deg};
pub use pattern::FarFieldPattern;
pub use stacking::{stacked_beamwidth, stacking_gain};
pub use types::{GainBreakdown, PatternSample, PerformanceResult, StackedResult};
