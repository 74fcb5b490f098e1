pub mod health;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::usecase::GetHealthReportUseCase;

/// AppState はアプリケーション全体の共有状態を表す。
#[derive(Clone)]
pub struct AppState {
    pub health_uc: Arc<GetHealthReportUseCase>,
}

impl AppState {
    pub fn new(health_uc: Arc<GetHealthReportUseCase>) -> Self {
        Self { health_uc }
    }
}

/// REST API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health::healthz))
        .route(
            "/api/health",
            get(health::health_report).head(health::liveness),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
