use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::geometry::AntennaGeometry;
use crate::matching::{
    design_gamma, design_hairpin, fine_tune, FineTuneResult, GammaRecipe, GammaRequest,
    HairpinDesign, HairpinRequest,
};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::server::AppState;

/// Gamma designer outcome. Hardware that cannot realize the match (rod too
/// fat for the tube, or nothing to sweep at this frequency) is reported here
/// as a structured error rather than an HTTP failure, since the request
/// itself was well-formed.
#[derive(Debug, Serialize, ToSchema)]
pub struct GammaResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe: Option<GammaRecipe>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/match/gamma",
    request_body = GammaRequest,
    responses(
        (status = 200, description = "Gamma match recipe or infeasibility report", body = GammaResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    ),
    tag = "matching"
)]
pub async fn gamma(
    State(state): State<AppState>,
    Json(request): Json<GammaRequest>,
) -> ApiResult<Json<GammaResponse>> {
    match design_gamma(&state.tables, &request) {
        Ok(recipe) => Ok(Json(GammaResponse {
            recipe: Some(recipe),
            error: None,
        })),
        Err(e) if e.is_infeasible() => Ok(Json(GammaResponse {
            recipe: None,
            error: Some(e.to_string()),
        })),
        Err(e) => Err(ApiError::from(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/match/hairpin",
    request_body = HairpinRequest,
    responses(
        (status = 200, description = "Hairpin recipe or topology note", body = HairpinDesign),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    ),
    tag = "matching"
)]
pub async fn hairpin(
    State(state): State<AppState>,
    Json(request): Json<HairpinRequest>,
) -> ApiResult<Json<HairpinDesign>> {
    let design = design_hairpin(&state.tables, &request)?;
    Ok(Json(design))
}

#[utoipa::path(
    post,
    path = "/api/finetune",
    request_body = AntennaGeometry,
    responses(
        (status = 200, description = "Tuned element lengths with step log", body = FineTuneResult),
        (status = 400, description = "Invalid geometry", body = ErrorResponse)
    ),
    tag = "matching"
)]
pub async fn finetune(
    State(state): State<AppState>,
    Json(geometry): Json<AntennaGeometry>,
) -> ApiResult<Json<FineTuneResult>> {
    let result = fine_tune(&state.tables, &geometry)?;
    Ok(Json(result))
}
