use contracts::dashboards::d400_sales_overview::DashboardMetrics;
use contracts::shared::indicators::*;
use std::collections::HashMap;

use super::metadata::build_catalog;
use super::trend::{calculate_trend, status_by_trend};

/// Current value and optional baseline of one metric
type ComputeFn = fn(&DashboardMetrics) -> (f64, Option<f64>);

/// Central registry: maps a metric key to the function reading it from
/// [`DashboardMetrics`].
pub struct IndicatorRegistry {
    fns: HashMap<String, ComputeFn>,
    higher_is_good: HashMap<String, bool>,
}

impl IndicatorRegistry {
    pub fn new() -> Self {
        let mut fns: HashMap<String, ComputeFn> = HashMap::new();

        fns.insert(keys::REVENUE.into(), |m| {
            (m.total_revenue, Some(m.previous_period_revenue))
        });
        fns.insert(keys::ORDERS.into(), |m| {
            (
                f64::from(m.total_orders),
                Some(f64::from(m.previous_period_orders)),
            )
        });
        fns.insert(keys::CUSTOMERS.into(), |m| {
            (
                f64::from(m.total_customers),
                Some(f64::from(m.previous_period_customers)),
            )
        });
        fns.insert(keys::AVG_ORDER.into(), |m| {
            (
                m.average_order_value,
                Some(m.previous_period_average_order_value),
            )
        });
        fns.insert(keys::MARKETPLACE.into(), |m| (m.marketplace_revenue, None));
        fns.insert(keys::INVOICES.into(), |m| (m.outstanding_amount, None));

        let higher_is_good = build_catalog()
            .into_iter()
            .map(|meta| (meta.key.0, meta.higher_is_good))
            .collect();

        Self {
            fns,
            higher_is_good,
        }
    }

    /// Compute one indicator, `None` for unknown keys.
    pub fn compute_one(&self, key: &str, metrics: &DashboardMetrics) -> Option<IndicatorValue> {
        let compute_fn = self.fns.get(key)?;
        let (value, previous_value) = compute_fn(metrics);
        let trend = calculate_trend(value, previous_value);
        let higher_is_good = self.higher_is_good.get(key).copied().unwrap_or(true);

        Some(IndicatorValue {
            key: MetricKey::new(key),
            value,
            previous_value,
            trend,
            status: status_by_trend(trend, higher_is_good),
        })
    }

    /// Compute a batch of indicators; unknown keys are skipped.
    pub fn compute(&self, keys: &[MetricKey], metrics: &DashboardMetrics) -> Vec<IndicatorValue> {
        let mut results = Vec::with_capacity(keys.len());

        for key in keys {
            match self.compute_one(key.as_str(), metrics) {
                Some(value) => results.push(value),
                None => tracing::warn!("indicator {} not found in registry", key),
            }
        }

        results
    }
}

impl Default for IndicatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> DashboardMetrics {
        DashboardMetrics {
            total_revenue: 1000.0,
            total_orders: 10,
            total_customers: 8,
            average_order_value: 100.0,
            previous_period_revenue: 880.0,
            previous_period_orders: 9,
            previous_period_customers: 8,
            previous_period_average_order_value: 97.0,
            outstanding_invoices: 2,
            outstanding_amount: 250.0,
            marketplace_orders: 3,
            marketplace_revenue: 330.0,
        }
    }

    #[test]
    fn test_revenue_trend() {
        let registry = IndicatorRegistry::new();
        let value = registry.compute_one(keys::REVENUE, &metrics()).unwrap();
        assert_eq!(value.value, 1000.0);
        assert_eq!(value.previous_value, Some(880.0));
        assert_eq!(value.trend.unwrap().value, 14.0);
        assert!(value.trend.unwrap().is_positive);
        assert_eq!(value.status, IndicatorStatus::Good);
    }

    #[test]
    fn test_metrics_without_baseline_have_no_trend() {
        let registry = IndicatorRegistry::new();
        let value = registry.compute_one(keys::INVOICES, &metrics()).unwrap();
        assert_eq!(value.value, 250.0);
        assert!(value.trend.is_none());
        assert_eq!(value.status, IndicatorStatus::Neutral);
    }

    #[test]
    fn test_batch_skips_unknown_keys() {
        let registry = IndicatorRegistry::new();
        let values = registry.compute(
            &[MetricKey::new(keys::ORDERS), MetricKey::new("bogus")],
            &metrics(),
        );
        assert_eq!(values.len(), 1);
        assert_eq!(values[0].key.as_str(), keys::ORDERS);
    }
}
