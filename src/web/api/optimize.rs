use axum::{extract::State, Json};

use crate::optimize::{
    auto_tune, optimize_height, optimize_stacking, AutoTuneRequest, AutoTuneResult, HeightRequest,
    HeightResult, StackingRequest, StackingResult,
};
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::server::AppState;

#[utoipa::path(
    post,
    path = "/api/autotune",
    request_body = AutoTuneRequest,
    responses(
        (status = 200, description = "Generated geometry with predicted performance", body = AutoTuneResult),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    ),
    tag = "optimize"
)]
pub async fn autotune(
    State(state): State<AppState>,
    Json(request): Json<AutoTuneRequest>,
) -> ApiResult<Json<AutoTuneResult>> {
    let result = auto_tune(&state.tables, &request)?;
    Ok(Json(result))
}

#[utoipa::path(
    post,
    path = "/api/optimize/height",
    request_body = HeightRequest,
    responses(
        (status = 200, description = "Height sweep with per-candidate scores", body = HeightResult),
        (status = 400, description = "Invalid geometry", body = ErrorResponse)
    ),
    tag = "optimize"
)]
pub async fn height(
    State(state): State<AppState>,
    Json(request): Json<HeightRequest>,
) -> ApiResult<Json<HeightResult>> {
    let result = optimize_height(&state.tables, &request)?;
    Ok(Json(result))
}

#[utoipa::path(
    post,
    path = "/api/optimize/stacking",
    request_body = StackingRequest,
    responses(
        (status = 200, description = "Spacing sweep with coupling-regime scores", body = StackingResult),
        (status = 400, description = "Invalid geometry", body = ErrorResponse)
    ),
    tag = "optimize"
)]
pub async fn stacking(
    State(state): State<AppState>,
    Json(request): Json<StackingRequest>,
) -> ApiResult<Json<StackingResult>> {
    let result = optimize_stacking(&state.tables, &request)?;
    Ok(Json(result))
}
