//! Contract of the metric insight modal.

use crate::shared::indicators::MetricKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// AI-style insight generated for one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightPayload {
    pub metric_key: MetricKey,
    pub title: String,
    pub summary: String,
    pub highlights: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

/// Lifecycle of the insight request of one modal instance.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(
    tag = "state",
    content = "data",
    rename_all = "lowercase",
    rename_all_fields = "camelCase"
)]
pub enum InsightStatus {
    #[default]
    Idle,
    Loading { metric_key: MetricKey },
    Resolved(InsightPayload),
    /// Error text for the empty-state body; no payload is kept
    Failed { metric_key: MetricKey, message: String },
}

impl InsightStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, InsightStatus::Loading { .. })
    }

    pub fn payload(&self) -> Option<&InsightPayload> {
        match self {
            InsightStatus::Resolved(payload) => Some(payload),
            _ => None,
        }
    }
}

/// Failure of an insight fetch, shown in the modal's error state
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "camelCase")]
pub enum InsightFetchError {
    #[error("insight service unavailable: {0}")]
    Unavailable(String),

    #[error("no insight for metric '{0}'")]
    UnknownMetric(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        let loading = InsightStatus::Loading {
            metric_key: MetricKey::new("revenue"),
        };
        assert_eq!(
            serde_json::to_string(&loading).unwrap(),
            r#"{"state":"loading","data":{"metricKey":"revenue"}}"#
        );
        let failed = InsightStatus::Failed {
            metric_key: MetricKey::new("orders"),
            message: "timeout".into(),
        };
        assert_eq!(
            serde_json::to_string(&failed).unwrap(),
            r#"{"state":"failed","data":{"metricKey":"orders","message":"timeout"}}"#
        );
        let parsed: InsightStatus = serde_json::from_str(
            r#"{"state":"failed","data":{"metricKey":"orders","message":"timeout"}}"#,
        )
        .unwrap();
        assert_eq!(parsed, failed);
        assert_eq!(
            serde_json::to_string(&InsightStatus::Idle).unwrap(),
            r#"{"state":"idle"}"#
        );
        assert!(loading.is_loading());
        assert!(loading.payload().is_none());
    }

    #[test]
    fn test_fetch_error_message() {
        let err = InsightFetchError::UnknownMetric("churn".into());
        assert_eq!(err.to_string(), "no insight for metric 'churn'");
        assert_eq!(
            serde_json::to_string(&err).unwrap(),
            r#"{"kind":"unknownMetric","message":"churn"}"#
        );
    }
}
