use thiserror::Error;

/// Errors of the dataset generation and aggregation pipeline
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Invalid date range: {days} days (must be positive)")]
    InvalidRange { days: i64 },

    #[error("Unknown date range token: {0}")]
    UnknownRangeToken(String),

    #[error("Aggregation error: {0}")]
    Aggregation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DashboardError {
    /// Whether the UI should offer a retry button for this error.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DashboardError::Aggregation(_))
    }
}
