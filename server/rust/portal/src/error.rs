use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortalError {
    #[error("security alert not found: {0}")]
    AlertNotFound(String),
    #[error("security dashboard unavailable: {0}")]
    DashboardUnavailable(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
