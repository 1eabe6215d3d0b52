use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("declared {declared} elements but geometry contains {actual}")]
    ElementCountMismatch { declared: usize, actual: usize },
    #[error("geometry has no driven element")]
    MissingDriven,
    #[error("geometry has {0} driven elements, expected exactly one")]
    MultipleDriven(usize),
    #[error("element {index} position {position}\" is behind its predecessor")]
    NonMonotonicPositions { index: usize, position: f64 },
    #[error("element {index} has non-positive {field}")]
    NonPositiveDimension { index: usize, field: &'static str },
    #[error("frequency {0} MHz is outside the supported 1-1000 MHz range")]
    FrequencyOutOfRange(f64),
    #[error("mounting height {0} ft must be non-negative")]
    NegativeHeight(f64),
}
