//! REST API統合テスト（スタブのチェックとダッシュボードを使用）
//!
//! tower::ServiceExt + oneshot で Router を直接呼び出す。

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use tower::ServiceExt;

use portal_health::HealthCheck;
use portal_server::adapter::handler;
use portal_server::adapter::repository::InMemorySecurityMonitor;
use portal_server::domain::entity::AlertSeverity;
use portal_server::domain::repository::SecurityDashboardProvider;
use portal_server::test_support::{
    make_test_app_state, CountingCheck, StaticSecurityDashboard, UnavailableSecurityDashboard,
};

fn make_app(
    database: Option<Arc<dyn HealthCheck>>,
    security: Arc<dyn SecurityDashboardProvider>,
) -> axum::Router {
    handler::router(make_test_app_state(database, security))
}

async fn get_health(app: axum::Router) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

// ---------------------------------------------------------------------------
// GET /api/health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_all_checks_healthy_returns_200() {
    let app = make_app(
        Some(Arc::new(CountingCheck::healthy("database"))),
        Arc::new(StaticSecurityDashboard::new(0, 0)),
    );

    let (status, json) = get_health(app).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    for name in ["database", "reporting", "cache", "security"] {
        assert_eq!(json["checks"][name]["status"], "healthy", "check {name}");
        assert!(json["checks"][name]["responseTimeMs"].is_u64());
    }
    assert_eq!(json["environment"], "test");
    assert_eq!(json["version"], "0.1.0");
    assert!(json["timestamp"].is_string());
    assert!(json["uptime"].is_number());
    assert!(json["memory"]["rss"].is_u64());
    assert!(json["responseTime"].is_u64());
}

#[tokio::test]
async fn test_database_failure_returns_207() {
    let app = make_app(
        Some(Arc::new(CountingCheck::failing("database"))),
        Arc::new(StaticSecurityDashboard::new(0, 0)),
    );

    let (status, json) = get_health(app).await;

    assert_eq!(status, StatusCode::MULTI_STATUS);
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["database"]["status"], "unhealthy");
    assert_eq!(
        json["checks"]["database"]["error"],
        "health check failed: database unreachable"
    );
    assert_eq!(json["checks"]["reporting"]["status"], "healthy");
    assert_eq!(json["checks"]["cache"]["status"], "healthy");
    assert_eq!(json["checks"]["security"]["status"], "healthy");
}

#[tokio::test]
async fn test_security_dashboard_counters() {
    let app = make_app(
        Some(Arc::new(CountingCheck::healthy("database"))),
        Arc::new(StaticSecurityDashboard::new(0, 2)),
    );

    let (status, json) = get_health(app).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["security"]["recentAlerts"], 0);
    assert_eq!(json["security"]["activeSessions"], 2);
    assert_eq!(json["checks"]["security"]["status"], "healthy");
}

#[tokio::test]
async fn test_security_dashboard_unavailable_degrades() {
    let app = make_app(
        Some(Arc::new(CountingCheck::healthy("database"))),
        Arc::new(UnavailableSecurityDashboard),
    );

    let (status, json) = get_health(app).await;

    assert_eq!(status, StatusCode::MULTI_STATUS);
    assert_eq!(json["checks"]["security"]["status"], "unhealthy");
    assert_eq!(json["security"]["recentAlerts"], 0);
    assert_eq!(json["security"]["activeSessions"], 0);
}

#[tokio::test]
async fn test_in_memory_monitor_feeds_report() {
    let monitor = Arc::new(InMemorySecurityMonitor::new());
    let resolved = monitor
        .raise_alert(AlertSeverity::High, "credential stuffing")
        .await;
    monitor
        .raise_alert(AlertSeverity::Medium, "token replay")
        .await;
    monitor.resolve_alert(&resolved.id).await.unwrap();
    monitor.session_started();
    monitor.session_started();
    monitor.session_started();
    monitor.session_ended();

    let app = make_app(Some(Arc::new(CountingCheck::healthy("database"))), monitor);

    let (status, json) = get_health(app).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["security"]["recentAlerts"], 1);
    assert_eq!(json["security"]["activeSessions"], 2);
}

#[tokio::test]
async fn test_database_not_configured_reports_unknown() {
    let app = make_app(None, Arc::new(StaticSecurityDashboard::new(0, 0)));

    let (status, json) = get_health(app).await;

    assert_eq!(status, StatusCode::MULTI_STATUS);
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["database"]["status"], "unknown");
    assert_eq!(
        json["checks"]["database"]["message"],
        "database not configured"
    );
}

// ---------------------------------------------------------------------------
// HEAD /api/health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_head_returns_200_even_when_checks_fail() {
    let database = Arc::new(CountingCheck::failing("database"));
    let app = make_app(
        Some(database.clone()),
        Arc::new(UnavailableSecurityDashboard),
    );

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::HEAD)
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(database.calls(), 0);
}

#[tokio::test]
async fn test_healthz_returns_ok() {
    let app = make_app(None, Arc::new(StaticSecurityDashboard::new(0, 0)));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
