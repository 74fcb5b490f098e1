use std::sync::Arc;
use std::time::{Duration, Instant};

use portal_health::{
    probe, run_check, CheckResult, CheckStatus, HealthCheck, HealthError, HostInfoProvider,
    OverallStatus,
};
use tracing::{debug, warn};

use crate::domain::entity::{HealthChecks, HealthReport, SecuritySummary};
use crate::domain::repository::SecurityDashboardProvider;

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(3000);

/// GetHealthReportUseCase は 4 種のチェックを並列実行し、HealthReport に集約する。
pub struct GetHealthReportUseCase {
    database: Option<Arc<dyn HealthCheck>>,
    reporting: Arc<dyn HealthCheck>,
    cache: Arc<dyn HealthCheck>,
    security: Arc<dyn SecurityDashboardProvider>,
    host: Arc<dyn HostInfoProvider>,
    environment: String,
    version: String,
    probe_timeout: Duration,
}

impl GetHealthReportUseCase {
    pub fn new(
        reporting: Arc<dyn HealthCheck>,
        cache: Arc<dyn HealthCheck>,
        security: Arc<dyn SecurityDashboardProvider>,
        host: Arc<dyn HostInfoProvider>,
        environment: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            database: None,
            reporting,
            cache,
            security,
            host,
            environment: environment.into(),
            version: version.into(),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    /// データベースチェックを設定する。未設定の場合 database は unknown になる。
    #[must_use]
    pub fn with_database(mut self, check: Arc<dyn HealthCheck>) -> Self {
        self.database = Some(check);
        self
    }

    #[must_use]
    pub fn with_host(mut self, host: Arc<dyn HostInfoProvider>) -> Self {
        self.host = host;
        self
    }

    #[must_use]
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    pub async fn execute(&self) -> HealthReport {
        let started = Instant::now();
        let timeout = self.probe_timeout;

        let database = async {
            match &self.database {
                Some(check) => run_check(check.clone(), timeout).await,
                None => CheckResult::unknown("database not configured"),
            }
        };
        let reporting = run_check(self.reporting.clone(), timeout);
        let cache = run_check(self.cache.clone(), timeout);
        let security = self.check_security(timeout);

        let (database, reporting, cache, (security, summary)) =
            tokio::join!(database, reporting, cache, security);

        // healthy 以外のチェックごとに格下げする。Degraded から Healthy には戻らない。
        // unknown は格下げのみ行い、unhealthy の件数には含めない。
        let mut status = OverallStatus::Healthy;
        for result in [&database, &reporting, &cache, &security] {
            if result.status != CheckStatus::Healthy {
                status = status.downgrade();
            }
        }

        let checks = HealthChecks {
            database,
            reporting,
            cache,
            security,
        };
        let status = OverallStatus::aggregate(status, &checks.statuses());
        let response_time = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        debug!(
            status = status.as_str(),
            unhealthy = checks.unhealthy_count(),
            response_time_ms = response_time,
            "health report generated"
        );

        HealthReport {
            status,
            timestamp: chrono::Utc::now().to_rfc3339(),
            uptime: self.host.uptime_seconds(),
            environment: self.environment.clone(),
            version: self.version.clone(),
            memory: self.host.memory_usage(),
            response_time,
            checks,
            security: summary,
        }
    }

    async fn check_security(&self, timeout: Duration) -> (CheckResult, SecuritySummary) {
        let provider = self.security.clone();
        let outcome = probe(timeout, async move {
            provider
                .get_security_dashboard()
                .await
                .map_err(|e| HealthError::CheckFailed(e.to_string()))
        })
        .await;
        let elapsed_ms = outcome.elapsed_ms();

        match outcome.result {
            Ok(dashboard) => (
                CheckResult::healthy(elapsed_ms),
                SecuritySummary {
                    recent_alerts: u64::try_from(dashboard.active_alerts.len())
                        .unwrap_or(u64::MAX),
                    active_sessions: dashboard.active_sessions,
                },
            ),
            Err(e) => {
                warn!(check = "security", error = %e, elapsed_ms, "health check failed");
                (
                    CheckResult::unhealthy(elapsed_ms, e.to_string()),
                    SecuritySummary::default(),
                )
            }
        }
    }
}
