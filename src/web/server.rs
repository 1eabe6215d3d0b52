use axum::{routing::get, routing::post, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::refdata::ReferenceTables;

use super::api::calculate as calculate_handlers;
use super::api::matching as matching_handlers;
use super::api::optimize as optimize_handlers;
use super::api_doc::ApiDoc;
use super::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub tables: Arc<ReferenceTables>,
}

pub fn router(tables: ReferenceTables) -> Router {
    let state = AppState {
        tables: Arc::new(tables),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/calculate", post(calculate_handlers::calculate))
        .route("/api/bands", get(calculate_handlers::bands))
        .route("/api/autotune", post(optimize_handlers::autotune))
        .route("/api/match/gamma", post(matching_handlers::gamma))
        .route("/api/match/hairpin", post(matching_handlers::hairpin))
        .route("/api/finetune", post(matching_handlers::finetune))
        .route("/api/optimize/height", post(optimize_handlers::height))
        .route("/api/optimize/stacking", post(optimize_handlers::stacking))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();
    let tables = config
        .load_tables()
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    let app = router(tables);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await
}
