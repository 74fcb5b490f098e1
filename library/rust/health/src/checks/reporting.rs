use async_trait::async_trait;

use crate::checker::HealthCheck;
use crate::error::HealthError;

pub const EMBEDDED_REPORTING_MESSAGE: &str =
    "Reports are embedded via iframe; no server-side dependency";

/// EmbeddedReportingHealthCheck は埋め込みレポート連携のチェック。
/// レポートはブラウザ側の iframe で描画されるため、常に healthy を返す。
pub struct EmbeddedReportingHealthCheck {
    name: String,
}

impl EmbeddedReportingHealthCheck {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl HealthCheck for EmbeddedReportingHealthCheck {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self) -> Result<Option<String>, HealthError> {
        Ok(Some(EMBEDDED_REPORTING_MESSAGE.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reporting_check_returns_message() {
        let check = EmbeddedReportingHealthCheck::new("reporting");
        let message = check.check().await.unwrap();
        assert_eq!(message.as_deref(), Some(EMBEDDED_REPORTING_MESSAGE));
    }
}
