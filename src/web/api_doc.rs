use utoipa::OpenApi;

use super::api::calculate::CalculateRequest;
use super::api::error::ErrorResponse;
use super::api::matching::GammaResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::calculate::calculate,
        super::api::calculate::bands,
        super::api::optimize::autotune,
        super::api::matching::gamma,
        super::api::matching::hairpin,
        super::api::matching::finetune,
        super::api::optimize::height,
        super::api::optimize::stacking,
    ),
    components(
        schemas(
            CalculateRequest,
            GammaResponse,
            ErrorResponse,
            crate::refdata::Band,
            crate::geometry::AntennaGeometry,
            crate::geometry::AntennaElement,
            crate::geometry::ElementRole,
            crate::geometry::GroundType,
            crate::geometry::GroundRadials,
            crate::geometry::StackingConfig,
            crate::geometry::StackingOrientation,
            crate::feedline::MatchNetwork,
            crate::feedline::GammaHardware,
            crate::feedline::Impedance,
            crate::feedline::LineAnalysis,
            crate::feedline::FrequencyPoint,
            crate::perf::PerformanceResult,
            crate::perf::GainBreakdown,
            crate::perf::PatternSample,
            crate::perf::StackedResult,
            crate::matching::GammaRequest,
            crate::matching::GammaRecipe,
            crate::matching::SweepPoint,
            crate::matching::CustomGammaHardware,
            crate::matching::GammaDefaults,
            crate::matching::HairpinRequest,
            crate::matching::HairpinDesign,
            crate::matching::HairpinRecipe,
            crate::matching::HairpinSweepPoint,
            crate::matching::FineTuneResult,
            crate::matching::TuneStep,
            crate::optimize::AutoTuneRequest,
            crate::optimize::AutoTuneResult,
            crate::optimize::SpacingMode,
            crate::optimize::HeightRequest,
            crate::optimize::HeightResult,
            crate::optimize::HeightCandidate,
            crate::optimize::HeightScores,
            crate::optimize::StackingRequest,
            crate::optimize::StackingResult,
            crate::optimize::SpacingCandidate,
            crate::optimize::SpacingStatus,
            crate::diag::Diagnostic,
            crate::diag::Severity,
        )
    ),
    info(
        title = "Yagicalc API",
        description = "Yagi-Uda antenna design and evaluation",
        version = "0.1.0"
    ),
    tags(
        (name = "calculate", description = "Performance estimation"),
        (name = "matching", description = "Matching-network designers"),
        (name = "optimize", description = "Geometry, height and stacking optimizers")
    )
)]
pub struct ApiDoc;
