mod error;
mod finetune;
mod gamma;
mod hairpin;
mod hardware;

pub use error::MatchError;
pub use finetune::{fine_tune, FineTuneResult, TuneStep};
pub use gamma::{design_gamma, GammaRecipe, GammaRequest, SweepPoint};
pub use hairpin::{design_hairpin, HairpinDesign, HairpinRecipe, HairpinRequest, HairpinSweepPoint};
pub use hardware::{default_gamma_hardware, tube_inner_diameter, CustomGammaHardware, GammaDefaults};
