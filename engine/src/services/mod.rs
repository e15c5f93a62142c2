pub mod dashboard_service;

pub use dashboard_service::{build_snapshot, DashboardService};
