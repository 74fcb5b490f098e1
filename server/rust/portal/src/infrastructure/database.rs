use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::config::DatabaseConfig;

/// create_lazy_pool は接続を遅延させた PostgreSQL プールを作成する。
///
/// 起動時には接続しないため、データベース停止中でもサーバーは起動し、
/// ヘルスチェックで unhealthy として報告される。
pub fn create_lazy_pool(cfg: &DatabaseConfig) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(cfg.max_connections)
        .acquire_timeout(Duration::from_secs(cfg.connect_timeout_seconds))
        .connect_lazy(cfg.url.expose_secret())?;
    Ok(pool)
}
