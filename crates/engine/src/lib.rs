pub mod dashboards;
pub mod shared;

pub use shared::error::DashboardError;
