use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use portal_health::checks::{CacheHealthCheck, EmbeddedReportingHealthCheck};
use portal_health::{HealthCheck, HealthError, HostInfoProvider, MemoryUsage};

use crate::adapter::handler::AppState;
use crate::domain::repository::{SecurityDashboard, SecurityDashboardProvider};
use crate::error::PortalError;
use crate::usecase::GetHealthReportUseCase;

/// CountingCheck は呼び出し回数を記録する HealthCheck。
pub struct CountingCheck {
    name: String,
    fail: bool,
    calls: AtomicUsize,
}

impl CountingCheck {
    pub fn healthy(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(name: &str) -> Self {
        Self {
            fail: true,
            ..Self::healthy(name)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HealthCheck for CountingCheck {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self) -> Result<Option<String>, HealthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(HealthError::CheckFailed(format!("{} unreachable", self.name)))
        } else {
            Ok(None)
        }
    }
}

/// StaticSecurityDashboard は固定値を返すダッシュボード。
pub struct StaticSecurityDashboard {
    alerts: usize,
    sessions: u64,
}

impl StaticSecurityDashboard {
    pub fn new(alerts: usize, sessions: u64) -> Self {
        Self { alerts, sessions }
    }
}

#[async_trait]
impl SecurityDashboardProvider for StaticSecurityDashboard {
    async fn get_security_dashboard(&self) -> Result<SecurityDashboard, PortalError> {
        Ok(SecurityDashboard {
            active_alerts: (0..self.alerts)
                .map(|i| {
                    crate::domain::entity::SecurityAlert::new(
                        crate::domain::entity::AlertSeverity::Medium,
                        format!("alert-{i}"),
                    )
                })
                .collect(),
            active_sessions: self.sessions,
        })
    }
}

/// UnavailableSecurityDashboard は常に失敗するダッシュボード。
pub struct UnavailableSecurityDashboard;

#[async_trait]
impl SecurityDashboardProvider for UnavailableSecurityDashboard {
    async fn get_security_dashboard(&self) -> Result<SecurityDashboard, PortalError> {
        Err(PortalError::DashboardUnavailable(
            "security monitor offline".to_string(),
        ))
    }
}

pub struct FixedHost;

impl HostInfoProvider for FixedHost {
    fn uptime_seconds(&self) -> f64 {
        120.0
    }

    fn memory_usage(&self) -> MemoryUsage {
        MemoryUsage {
            rss: 64 * 1024 * 1024,
            virtual_memory: 256 * 1024 * 1024,
            system_total: 8 * 1024 * 1024 * 1024,
            system_used: 2 * 1024 * 1024 * 1024,
        }
    }
}

/// PanickingHost はレポート組み立て中の想定外の失敗を再現する。
pub struct PanickingHost;

impl HostInfoProvider for PanickingHost {
    fn uptime_seconds(&self) -> f64 {
        panic!("host info unavailable");
    }

    fn memory_usage(&self) -> MemoryUsage {
        panic!("host info unavailable");
    }
}

pub fn make_health_use_case(
    database: Option<Arc<dyn HealthCheck>>,
    security: Arc<dyn SecurityDashboardProvider>,
) -> GetHealthReportUseCase {
    let uc = GetHealthReportUseCase::new(
        Arc::new(EmbeddedReportingHealthCheck::new("reporting")),
        Arc::new(CacheHealthCheck::new("cache")),
        security,
        Arc::new(FixedHost),
        "test",
        "0.1.0",
    );
    match database {
        Some(check) => uc.with_database(check),
        None => uc,
    }
}

pub fn make_test_app_state(
    database: Option<Arc<dyn HealthCheck>>,
    security: Arc<dyn SecurityDashboardProvider>,
) -> AppState {
    AppState::new(Arc::new(make_health_use_case(database, security)))
}
