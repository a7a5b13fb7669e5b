pub mod aggregation;
pub mod generator;
pub mod service;

pub use aggregation::{aggregate, aggregate_with_top, DEFAULT_TOP_N};
pub use generator::DatasetGenerator;
pub use service::DashboardService;
