mod error;
mod types;

pub use error::ValidationError;
#[cfg(test)]
pub(crate) use types::test_geometry;
pub use types::{
    AntennaElement, AntennaGeometry, ElementRole, GroundRadials, GroundType, StackingConfig,
    StackingOrientation,
};
