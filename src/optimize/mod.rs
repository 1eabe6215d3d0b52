mod autotune;
mod height;
mod stacking;

pub use autotune::{auto_tune, AutoTuneRequest, AutoTuneResult, SpacingMode};
pub use height::{optimize_height, HeightCandidate, HeightRequest, HeightResult, HeightScores};
pub use stacking::{
    optimize_stacking, SpacingCandidate, SpacingStatus, StackingRequest, StackingResult,
};
