pub mod checker;
pub mod checks;
pub mod error;
pub mod host;
pub mod response;

pub use checker::{probe, run_check, HealthCheck, ProbeOutcome};
pub use error::HealthError;
pub use host::{HostInfoProvider, MemoryUsage, SystemHostInfo};
pub use response::{CheckResult, CheckStatus, OverallStatus};

#[cfg(feature = "mock")]
pub use checker::MockHealthCheck;
