use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Metric identity & display metadata
// ---------------------------------------------------------------------------

/// Stable metric key, used to key caches, variants and trend lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricKey(pub String);

impl MetricKey {
    pub fn new(s: &str) -> Self {
        Self(s.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MetricKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for MetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Well-known metric keys (constants to avoid typos).
pub mod keys {
    pub const REVENUE: &str = "revenue";
    pub const ORDERS: &str = "orders";
    pub const CUSTOMERS: &str = "customers";
    pub const AVG_ORDER: &str = "avgOrder";
    pub const MARKETPLACE: &str = "marketplace";
    pub const INVOICES: &str = "invoices";

    /// Keys the series cache is filled for on every aggregation run.
    pub const CACHED: [&str; 5] = [REVENUE, ORDERS, AVG_ORDER, MARKETPLACE, INVOICES];
}

/// How a widget formats the numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatHint {
    Currency,
    Number,
    Percentage,
}

/// Visual status of the indicator (drives colour).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndicatorStatus {
    Good,
    Bad,
    Neutral,
}

/// Static metadata describing one metric card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorMeta {
    pub key: MetricKey,
    pub label: String,
    pub short_label: Option<String>,
    pub icon: String,
    pub format: FormatHint,
    /// Whether growth is good news (false for outstanding invoices).
    pub higher_is_good: bool,
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Computed values
// ---------------------------------------------------------------------------

/// Percentage change against a baseline, rounded to whole percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendIndicator {
    /// Absolute change in percent
    pub value: f64,
    pub is_positive: bool,
}

/// A single computed indicator for the current aggregation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorValue {
    pub key: MetricKey,
    pub value: f64,
    /// Baseline of the comparison period, `None` when the metric has none.
    pub previous_value: Option<f64>,
    pub trend: Option<TrendIndicator>,
    pub status: IndicatorStatus,
}

/// One point of a pre-sliced chart series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChartPoint {
    Dated { date: String, value: f64 },
    Named { name: String, value: f64 },
}

impl ChartPoint {
    pub fn value(&self) -> f64 {
        match self {
            ChartPoint::Dated { value, .. } | ChartPoint::Named { value, .. } => *value,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ChartPoint::Dated { date, .. } => date,
            ChartPoint::Named { name, .. } => name,
        }
    }
}

/// Everything a widget receives; widgets never recompute aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetData {
    pub key: MetricKey,
    pub value: f64,
    pub trend: Option<TrendIndicator>,
    pub status: IndicatorStatus,
    pub series: Option<Vec<ChartPoint>>,
    pub format: FormatHint,
    /// Variant token, `None` when the widget keeps its own default
    pub variant: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_point_shapes() {
        let dated = ChartPoint::Dated {
            date: "2025-01-01".into(),
            value: 10.0,
        };
        let named = ChartPoint::Named {
            name: "Nordic".into(),
            value: 5.0,
        };
        assert_eq!(
            serde_json::to_string(&dated).unwrap(),
            r#"{"date":"2025-01-01","value":10.0}"#
        );
        assert_eq!(
            serde_json::to_string(&named).unwrap(),
            r#"{"name":"Nordic","value":5.0}"#
        );
        assert_eq!(named.label(), "Nordic");
        assert_eq!(dated.value(), 10.0);
    }

    #[test]
    fn test_format_hint_tokens() {
        let hint: FormatHint = serde_json::from_str("\"percentage\"").unwrap();
        assert_eq!(hint, FormatHint::Percentage);
    }
}
