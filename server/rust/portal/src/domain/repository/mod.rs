pub mod security_dashboard_provider;

pub use security_dashboard_provider::{SecurityDashboard, SecurityDashboardProvider};

#[cfg(test)]
pub use security_dashboard_provider::MockSecurityDashboardProvider;
