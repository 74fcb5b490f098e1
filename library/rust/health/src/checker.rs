use std::any::Any;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::warn;

use crate::error::HealthError;
use crate::response::CheckResult;

/// HealthCheck は依存先 1 つ分のヘルスチェックを表す。
///
/// 成功時は任意の情報メッセージを返せる。メッセージは `CheckResult.message` にそのまま入る。
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait HealthCheck: Send + Sync {
    fn name(&self) -> &str;
    async fn check(&self) -> Result<Option<String>, HealthError>;
}

/// ProbeOutcome は probe 1 回分の結果と所要時間。
#[derive(Debug)]
pub struct ProbeOutcome<T> {
    pub result: Result<T, HealthError>,
    pub elapsed: Duration,
}

impl<T> ProbeOutcome<T> {
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX)
    }
}

/// probe は future を専用タスク上で timeout 付きで実行する。
///
/// エラー・タイムアウト・panic はすべて `HealthError` に変換され、呼び出し側には伝播しない。
pub async fn probe<T, F>(timeout: Duration, fut: F) -> ProbeOutcome<T>
where
    T: Send + 'static,
    F: Future<Output = Result<T, HealthError>> + Send + 'static,
{
    let started = Instant::now();
    let handle = tokio::spawn(async move { tokio::time::timeout(timeout, fut).await });

    let result = match handle.await {
        Ok(Ok(result)) => result,
        Ok(Err(_)) => Err(HealthError::Timeout(format!(
            "probe exceeded {}ms",
            timeout.as_millis()
        ))),
        Err(e) if e.is_panic() => Err(HealthError::Panicked(panic_message(e.into_panic()))),
        Err(e) => Err(HealthError::CheckFailed(format!("probe task aborted: {e}"))),
    };

    ProbeOutcome {
        result,
        elapsed: started.elapsed(),
    }
}

/// run_check は HealthCheck を probe で実行し、`CheckResult` に変換する。
pub async fn run_check(check: Arc<dyn HealthCheck>, timeout: Duration) -> CheckResult {
    let name = check.name().to_string();
    let outcome = probe(timeout, async move { check.check().await }).await;
    let elapsed_ms = outcome.elapsed_ms();

    match outcome.result {
        Ok(Some(message)) => CheckResult::healthy(elapsed_ms).with_message(message),
        Ok(None) => CheckResult::healthy(elapsed_ms),
        Err(e) => {
            warn!(check = %name, error = %e, elapsed_ms, "health check failed");
            CheckResult::unhealthy(elapsed_ms, e.to_string())
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::CheckStatus;

    struct AlwaysHealthy;

    #[async_trait]
    impl HealthCheck for AlwaysHealthy {
        fn name(&self) -> &str {
            "always-healthy"
        }
        async fn check(&self) -> Result<Option<String>, HealthError> {
            Ok(None)
        }
    }

    struct AlwaysUnhealthy;

    #[async_trait]
    impl HealthCheck for AlwaysUnhealthy {
        fn name(&self) -> &str {
            "always-unhealthy"
        }
        async fn check(&self) -> Result<Option<String>, HealthError> {
            Err(HealthError::CheckFailed("down".to_string()))
        }
    }

    struct Slow;

    #[async_trait]
    impl HealthCheck for Slow {
        fn name(&self) -> &str {
            "slow"
        }
        async fn check(&self) -> Result<Option<String>, HealthError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(None)
        }
    }

    struct Panicking;

    #[async_trait]
    impl HealthCheck for Panicking {
        fn name(&self) -> &str {
            "panicking"
        }
        async fn check(&self) -> Result<Option<String>, HealthError> {
            panic!("probe blew up");
        }
    }

    #[tokio::test]
    async fn test_run_check_healthy() {
        let result = run_check(Arc::new(AlwaysHealthy), Duration::from_secs(1)).await;
        assert_eq!(result.status, CheckStatus::Healthy);
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn test_run_check_unhealthy_carries_error() {
        let result = run_check(Arc::new(AlwaysUnhealthy), Duration::from_secs(1)).await;
        assert_eq!(result.status, CheckStatus::Unhealthy);
        assert_eq!(result.error.as_deref(), Some("health check failed: down"));
    }

    #[tokio::test]
    async fn test_run_check_timeout() {
        let result = run_check(Arc::new(Slow), Duration::from_millis(20)).await;
        assert_eq!(result.status, CheckStatus::Unhealthy);
        assert!(result.error.unwrap().starts_with("timeout:"));
    }

    #[tokio::test]
    async fn test_run_check_panic_is_isolated() {
        let result = run_check(Arc::new(Panicking), Duration::from_secs(1)).await;
        assert_eq!(result.status, CheckStatus::Unhealthy);
        assert_eq!(
            result.error.as_deref(),
            Some("check panicked: probe blew up")
        );
    }

    #[tokio::test]
    async fn test_probe_returns_value() {
        let outcome = probe(Duration::from_secs(1), async { Ok::<_, HealthError>(42u32) }).await;
        assert_eq!(outcome.result.unwrap(), 42);
    }
}
