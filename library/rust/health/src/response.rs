use serde::{Deserialize, Serialize};

/// CheckStatus は単一チェックの結果ステータスを表す。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Healthy,
    Unhealthy,
    /// チェック対象が未設定などで判定できなかった状態。失敗としては数えない。
    Unknown,
}

/// OverallStatus は全チェックを集約した結果ステータスを表す。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl OverallStatus {
    /// 対応する HTTP ステータスコードを返す。
    pub fn http_status_code(self) -> u16 {
        match self {
            OverallStatus::Healthy => 200,
            OverallStatus::Degraded => 207,
            OverallStatus::Unhealthy => 503,
        }
    }

    /// チェック失敗時の格下げ。Healthy は Degraded になり、それ以外は変わらない。
    #[must_use]
    pub fn downgrade(self) -> Self {
        match self {
            OverallStatus::Healthy => OverallStatus::Degraded,
            other => other,
        }
    }

    /// 全チェック完了後の最終判定。
    ///
    /// `current` はチェック実行中に格下げされた途中経過。unhealthy が 0 件なら
    /// `current` をそのまま返すため、一度 Degraded になったものが Healthy に
    /// 戻ることはない。
    pub fn aggregate<'a, I>(current: Self, statuses: I) -> Self
    where
        I: IntoIterator<Item = &'a CheckStatus>,
    {
        let mut total = 0usize;
        let mut unhealthy = 0usize;
        for status in statuses {
            total += 1;
            if *status == CheckStatus::Unhealthy {
                unhealthy += 1;
            }
        }

        if unhealthy == 0 {
            current
        } else if unhealthy == total {
            OverallStatus::Unhealthy
        } else {
            OverallStatus::Degraded
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OverallStatus::Healthy => "healthy",
            OverallStatus::Degraded => "degraded",
            OverallStatus::Unhealthy => "unhealthy",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub status: CheckStatus,
    pub response_time_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckResult {
    pub fn healthy(response_time_ms: u64) -> Self {
        Self {
            status: CheckStatus::Healthy,
            response_time_ms,
            error: None,
            message: None,
        }
    }

    pub fn unhealthy(response_time_ms: u64, error: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Unhealthy,
            response_time_ms,
            error: Some(error.into()),
            message: None,
        }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Unknown,
            response_time_ms: 0,
            error: None,
            message: Some(message.into()),
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn is_unhealthy(&self) -> bool {
        self.status == CheckStatus::Unhealthy
    }
}
