use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use portal_health::checks::{CacheHealthCheck, EmbeddedReportingHealthCheck, PostgresHealthCheck};
use portal_health::SystemHostInfo;
use portal_server::adapter::handler::{self, AppState};
use portal_server::adapter::repository::InMemorySecurityMonitor;
use portal_server::infrastructure::config::Config;
use portal_server::infrastructure::{database, telemetry};
use portal_server::usecase::GetHealthReportUseCase;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path =
        std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/config.yaml".to_string());
    let cfg = Config::load(&config_path)?;

    telemetry::init_telemetry(&cfg.log)?;

    info!(
        app_name = %cfg.app.name,
        version = %cfg.app.version,
        environment = %cfg.app.environment,
        port = cfg.server.port,
        "starting portal server"
    );

    let security_monitor = Arc::new(InMemorySecurityMonitor::new());

    let mut health_uc = GetHealthReportUseCase::new(
        Arc::new(EmbeddedReportingHealthCheck::new("reporting")),
        Arc::new(CacheHealthCheck::new("cache")),
        security_monitor,
        Arc::new(SystemHostInfo::new()),
        cfg.app.environment.clone(),
        cfg.app.version.clone(),
    )
    .with_probe_timeout(Duration::from_millis(cfg.health.probe_timeout_ms));

    // --- Database: PostgreSQL（遅延接続）or 未設定 ---
    if let Some(ref db_cfg) = cfg.database {
        let pool = database::create_lazy_pool(db_cfg)?;
        info!(
            max_connections = db_cfg.max_connections,
            "PostgreSQL pool configured for health checks"
        );
        health_uc = health_uc.with_database(Arc::new(PostgresHealthCheck::new("database", pool)));
    } else {
        info!("database not configured, database check will report unknown");
    }

    let state = AppState::new(Arc::new(health_uc));
    let app = handler::router(state);

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!("REST server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("portal server exited");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("shutdown signal received");
}
