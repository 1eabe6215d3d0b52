use axum::{extract::State, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::feedline::MatchNetwork;
use crate::geometry::AntennaGeometry;
use crate::perf::{estimate, PerformanceResult};
use crate::refdata::Band;
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::server::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CalculateRequest {
    pub geometry: AntennaGeometry,
    /// Feed arrangement; a direct 50-ohm feed when omitted.
    #[serde(default)]
    pub network: Option<MatchNetwork>,
}

#[utoipa::path(
    post,
    path = "/api/calculate",
    request_body = CalculateRequest,
    responses(
        (status = 200, description = "Performance estimate", body = PerformanceResult),
        (status = 400, description = "Invalid geometry", body = ErrorResponse)
    ),
    tag = "calculate"
)]
pub async fn calculate(
    State(state): State<AppState>,
    Json(request): Json<CalculateRequest>,
) -> ApiResult<Json<PerformanceResult>> {
    let network = request.network.unwrap_or(MatchNetwork::Direct);
    let result = estimate(&state.tables, &request.geometry, &network)?;
    Ok(Json(result))
}

#[utoipa::path(
    get,
    path = "/api/bands",
    responses(
        (status = 200, description = "Known frequency bands", body = Vec<Band>)
    ),
    tag = "calculate"
)]
pub async fn bands(State(state): State<AppState>) -> Json<Vec<Band>> {
    Json(state.tables.bands.clone())
}
