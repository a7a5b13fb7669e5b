use contracts::dashboards::d400_sales_overview::DashboardSnapshot;
use contracts::shared::indicators::{IndicatorMeta, IndicatorValue, MetricKey};

use super::aggregation;
use super::generator::DatasetGenerator;
use crate::shared::config::Config;
use crate::shared::date_range::parse_range_token;
use crate::shared::error::DashboardError;
use crate::shared::indicators::metadata::build_catalog;
use crate::shared::indicators::IndicatorRegistry;

/// Generate -> aggregate pipeline behind the overview dashboard.
pub struct DashboardService {
    generator: DatasetGenerator,
    registry: IndicatorRegistry,
    top_n: usize,
}

impl DashboardService {
    pub fn new(config: &Config) -> Self {
        Self::with_generator(DatasetGenerator::new(config.generator.clone()))
    }

    pub fn with_generator(generator: DatasetGenerator) -> Self {
        Self {
            generator,
            registry: IndicatorRegistry::new(),
            top_n: aggregation::DEFAULT_TOP_N,
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Fresh snapshot for a number of days.
    pub fn load_snapshot(&mut self, date_range_days: i64) -> Result<DashboardSnapshot, DashboardError> {
        let bundle = self.generator.generate(date_range_days)?;
        let aggregate = aggregation::aggregate_with_top(&bundle, self.top_n)?;

        tracing::info!(
            "dashboard snapshot: {} days, revenue {:.2}, {} orders",
            date_range_days,
            aggregate.metrics.total_revenue,
            aggregate.metrics.total_orders
        );

        Ok(DashboardSnapshot { bundle, aggregate })
    }

    /// Fresh snapshot for a range token such as "30d".
    pub fn load_snapshot_for(&mut self, range_token: &str) -> Result<DashboardSnapshot, DashboardError> {
        let days = parse_range_token(range_token)?;
        self.load_snapshot(days)
    }

    /// Card values of every catalogue metric for a snapshot.
    pub fn indicators(&self, snapshot: &DashboardSnapshot) -> Vec<IndicatorValue> {
        let keys: Vec<MetricKey> = build_catalog().into_iter().map(|m| m.key).collect();
        self.registry.compute(&keys, &snapshot.aggregate.metrics)
    }

    pub fn catalog(&self) -> Vec<IndicatorMeta> {
        build_catalog()
    }
}
