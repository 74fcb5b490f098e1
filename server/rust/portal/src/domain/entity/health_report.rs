use portal_health::{CheckResult, CheckStatus, MemoryUsage, OverallStatus};
use serde::{Deserialize, Serialize};

/// HealthChecks は固定 4 種のチェック結果。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthChecks {
    pub database: CheckResult,
    pub reporting: CheckResult,
    pub cache: CheckResult,
    pub security: CheckResult,
}

impl HealthChecks {
    pub fn statuses(&self) -> [CheckStatus; 4] {
        [
            self.database.status,
            self.reporting.status,
            self.cache.status,
            self.security.status,
        ]
    }

    pub fn unhealthy_count(&self) -> usize {
        self.statuses()
            .iter()
            .filter(|s| **s == CheckStatus::Unhealthy)
            .count()
    }
}

/// SecuritySummary はセキュリティダッシュボードから取得したカウンタ。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecuritySummary {
    pub recent_alerts: u64,
    pub active_sessions: u64,
}

/// HealthReport は GET /api/health のレスポンス本体。
/// リクエストごとに生成され、保存はしない。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: OverallStatus,
    pub timestamp: String,
    pub uptime: f64,
    pub environment: String,
    pub version: String,
    pub memory: MemoryUsage,
    pub response_time: u64,
    pub checks: HealthChecks,
    pub security: SecuritySummary,
}

/// HealthFailure はレポート組み立て自体が失敗したときの最小レスポンス。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthFailure {
    pub status: OverallStatus,
    pub error: String,
    pub timestamp: String,
    pub response_time: u64,
}

impl HealthFailure {
    pub fn new(timestamp: String, response_time: u64) -> Self {
        Self {
            status: OverallStatus::Unhealthy,
            error: "Health check failed".to_string(),
            timestamp,
            response_time,
        }
    }
}
