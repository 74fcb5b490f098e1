pub mod get_health_report;

pub use get_health_report::GetHealthReportUseCase;
