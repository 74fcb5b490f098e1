use async_trait::async_trait;

use crate::domain::entity::SecurityAlert;
use crate::error::PortalError;

/// SecurityDashboard はセキュリティ監視のダッシュボード状態。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecurityDashboard {
    pub active_alerts: Vec<SecurityAlert>,
    pub active_sessions: u64,
}

/// SecurityDashboardProvider はヘルスチェックが読み取り専用で参照するセキュリティ監視。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SecurityDashboardProvider: Send + Sync {
    async fn get_security_dashboard(&self) -> Result<SecurityDashboard, PortalError>;
}
