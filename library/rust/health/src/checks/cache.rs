use async_trait::async_trait;

use crate::checker::HealthCheck;
use crate::error::HealthError;

/// CacheHealthCheck はキャッシュのラウンドトリップ確認用プレースホルダ。
///
/// 現状は何もせず成功を返すため、実際のキャッシュ障害は検知できない。
pub struct CacheHealthCheck {
    name: String,
}

impl CacheHealthCheck {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl HealthCheck for CacheHealthCheck {
    fn name(&self) -> &str {
        &self.name
    }

    // TODO: キャッシュ層が導入されたら set/get のラウンドトリップに置き換える
    async fn check(&self) -> Result<Option<String>, HealthError> {
        Ok(None)
    }
}
