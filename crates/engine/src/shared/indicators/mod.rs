pub mod metadata;
pub mod registry;
pub mod trend;

pub use registry::IndicatorRegistry;
pub use trend::{calculate_trend, status_by_trend};
