pub mod dashboard_state_manager;
pub mod series_cache;

pub use dashboard_state_manager::DashboardStateManager;
pub use series_cache::SeriesCache;
