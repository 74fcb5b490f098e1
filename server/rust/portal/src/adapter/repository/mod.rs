pub mod security_monitor_in_memory;

pub use security_monitor_in_memory::InMemorySecurityMonitor;
