use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entity::{AlertSeverity, SecurityAlert};
use crate::domain::repository::{SecurityDashboard, SecurityDashboardProvider};
use crate::error::PortalError;

/// InMemorySecurityMonitor はプロセス内でアラートとセッション数を保持するセキュリティ監視。
///
/// ヘルスチェック側は読み取り専用で、アラートとセッションの記録は認証・セッション管理など
/// 同じ `Arc` を共有する呼び出し元が `raise_alert` / `session_started` 等で行う。
/// 記録元が接続されていない構成では、ダッシュボードは常に 0 件 / 0 セッションを返す。
pub struct InMemorySecurityMonitor {
    alerts: RwLock<Vec<SecurityAlert>>,
    active_sessions: AtomicU64,
}

impl InMemorySecurityMonitor {
    pub fn new() -> Self {
        Self {
            alerts: RwLock::new(Vec::new()),
            active_sessions: AtomicU64::new(0),
        }
    }

    pub async fn raise_alert(
        &self,
        severity: AlertSeverity,
        message: impl Into<String>,
    ) -> SecurityAlert {
        let alert = SecurityAlert::new(severity, message);
        tracing::warn!(
            alert_id = %alert.id,
            severity = alert.severity.as_str(),
            message = %alert.message,
            "security alert raised"
        );
        let mut alerts = self.alerts.write().await;
        alerts.push(alert.clone());
        alert
    }

    pub async fn resolve_alert(&self, id: &Uuid) -> Result<(), PortalError> {
        let mut alerts = self.alerts.write().await;
        let alert = alerts
            .iter_mut()
            .find(|a| a.id == *id)
            .ok_or_else(|| PortalError::AlertNotFound(id.to_string()))?;
        alert.resolve();
        Ok(())
    }

    pub fn session_started(&self) {
        self.active_sessions.fetch_add(1, Ordering::Relaxed);
    }

    /// セッション終了を記録する。0 未満にはならない。
    pub fn session_ended(&self) {
        let _ = self
            .active_sessions
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1));
    }
}

impl Default for InMemorySecurityMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SecurityDashboardProvider for InMemorySecurityMonitor {
    async fn get_security_dashboard(&self) -> Result<SecurityDashboard, PortalError> {
        let alerts = self.alerts.read().await;
        Ok(SecurityDashboard {
            active_alerts: alerts.iter().filter(|a| a.is_active()).cloned().collect(),
            active_sessions: self.active_sessions.load(Ordering::Relaxed),
        })
    }
}
