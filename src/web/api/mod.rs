pub mod calculate;
pub mod error;
pub mod matching;
pub mod optimize;
