use std::time::Instant;

use axum::body::Body;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use super::AppState;
use crate::domain::entity::HealthFailure;

/// GET /healthz
pub async fn healthz() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

/// GET /api/health
///
/// チェック単位の失敗は use case 内で unhealthy に変換される。ここで捕捉するのは
/// レポート組み立て自体の失敗（タスクの panic）のみで、その場合は 503 を返す。
pub async fn health_report(State(state): State<AppState>) -> Response {
    let started = Instant::now();
    let uc = state.health_uc.clone();

    match tokio::spawn(async move { uc.execute().await }).await {
        Ok(report) => {
            let status = StatusCode::from_u16(report.status.http_status_code())
                .unwrap_or(StatusCode::SERVICE_UNAVAILABLE);
            (status, Json(report)).into_response()
        }
        Err(e) => {
            error!(error = %e, "health report assembly failed");
            let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
            let failure = HealthFailure::new(chrono::Utc::now().to_rfc3339(), elapsed);
            (StatusCode::SERVICE_UNAVAILABLE, Json(failure)).into_response()
        }
    }
}

/// HEAD /api/health
///
/// チェックは実行しない。レスポンス生成に失敗しても素の 503 を返す。
pub async fn liveness() -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .body(Body::empty())
        .unwrap_or_else(|e| {
            error!(error = %e, "failed to build liveness response");
            StatusCode::SERVICE_UNAVAILABLE.into_response()
        })
}
