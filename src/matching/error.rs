use thiserror::Error;

use crate::geometry::ValidationError;

#[derive(Debug, Error)]
pub enum MatchError {
    /// The rod cannot physically fit inside the tube. Reported as a
    /// structured designer outcome, never a panic.
    #[error("tube ID {tube_id_in:.3}\" must exceed rod OD {rod_od_in:.3}\"")]
    InfeasibleHardware { tube_id_in: f64, rod_od_in: f64 },
    #[error("a Yagi needs at least 2 elements, got {0}")]
    TooFewElements(usize),
    #[error("element count {0} exceeds the supported maximum of 20")]
    TooManyElements(usize),
    #[error("driven length {0}\" must be positive")]
    BadDrivenLength(f64),
    /// The hardware leaves no electrically short sweep position at this
    /// frequency, so the designer has nothing to evaluate.
    #[error("no feasible sweep position at {0} MHz with this hardware")]
    NoSweepCandidates(f64),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl MatchError {
    /// Hardware feasibility outcomes of a well-formed request; everything
    /// else is a malformed request.
    pub fn is_infeasible(&self) -> bool {
        matches!(
            self,
            MatchError::InfeasibleHardware { .. } | MatchError::NoSweepCandidates(_)
        )
    }
}
