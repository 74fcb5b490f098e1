pub mod cache;
pub mod reporting;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use cache::CacheHealthCheck;
pub use reporting::EmbeddedReportingHealthCheck;

#[cfg(feature = "postgres")]
pub use postgres::PostgresHealthCheck;
