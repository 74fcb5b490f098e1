pub mod health_report;
pub mod security_alert;

pub use health_report::{HealthChecks, HealthFailure, HealthReport, SecuritySummary};
pub use security_alert::{AlertSeverity, SecurityAlert};
