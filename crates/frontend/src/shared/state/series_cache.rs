use chrono::{DateTime, Utc};
use contracts::dashboards::d400_sales_overview::{
    DashboardSnapshot, DateRange, RankingEntry, TrendPoint,
};
use contracts::domain::common::round_money;
use contracts::shared::indicators::{keys, ChartPoint, MetricKey};
use engine::dashboards::d400_sales_overview::aggregation::{
    MARKETPLACE_ORDER_SHARE, MARKETPLACE_REVENUE_UPLIFT,
};
use std::collections::{BTreeMap, HashMap};

/// Ranking series keys
pub mod ranking_keys {
    pub const TOP_AGENTS: &str = "topAgents";
    pub const TOP_BRANDS: &str = "topBrands";
    pub const TOP_ITEMS: &str = "topItems";
    pub const TOP_CUSTOMERS: &str = "topCustomers";
}

/// Which aggregation run the cached series were built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CacheIdentity {
    range: DateRange,
    generated_at: DateTime<Utc>,
}

impl CacheIdentity {
    fn of(snapshot: &DashboardSnapshot) -> Self {
        Self {
            range: snapshot.bundle.range,
            generated_at: snapshot.bundle.generated_at,
        }
    }
}

/// Derived chart series keyed by metric.
///
/// Built once per aggregation run; preference changes never touch it.
#[derive(Debug, Default)]
pub struct SeriesCache {
    identity: Option<CacheIdentity>,
    series: HashMap<MetricKey, Vec<ChartPoint>>,
    builds: u32,
}

impl SeriesCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from `snapshot` unless it is the run already cached.
    ///
    /// Returns `true` when the series were rebuilt.
    pub fn refresh(&mut self, snapshot: &DashboardSnapshot) -> bool {
        let identity = CacheIdentity::of(snapshot);
        if self.identity == Some(identity) {
            return false;
        }

        self.series.clear();
        let trend = &snapshot.aggregate.trend;
        for key in keys::CACHED.iter().chain(std::iter::once(&keys::CUSTOMERS)) {
            if let Some(points) = slice_trend(trend, key) {
                self.series.insert(MetricKey::new(key), points);
            }
        }
        self.series.insert(
            MetricKey::new(keys::INVOICES),
            outstanding_by_day(snapshot),
        );

        let rankings = &snapshot.aggregate.rankings;
        for (key, entries) in [
            (ranking_keys::TOP_AGENTS, &rankings.agents),
            (ranking_keys::TOP_BRANDS, &rankings.brands),
            (ranking_keys::TOP_ITEMS, &rankings.items),
            (ranking_keys::TOP_CUSTOMERS, &rankings.customers),
        ] {
            self.series.insert(MetricKey::new(key), named_points(entries));
        }

        self.identity = Some(identity);
        self.builds += 1;
        log::debug!(
            "series cache rebuilt ({} series, build #{})",
            self.series.len(),
            self.builds
        );
        true
    }

    pub fn get(&self, key: &str) -> Option<&[ChartPoint]> {
        self.series.get(&MetricKey::new(key)).map(Vec::as_slice)
    }

    pub fn invalidate(&mut self) {
        self.identity = None;
        self.series.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// How many times the series were rebuilt.
    pub fn build_count(&self) -> u32 {
        self.builds
    }
}

/// `{date, value}` series of one metric from the daily trend.
pub fn slice_trend(trend: &[TrendPoint], key: &str) -> Option<Vec<ChartPoint>> {
    let value: fn(&TrendPoint) -> f64 = match key {
        keys::REVENUE => |p| p.revenue,
        keys::ORDERS => |p| f64::from(p.orders),
        keys::CUSTOMERS => |p| f64::from(p.customers),
        keys::AVG_ORDER => |p| p.average_order_value,
        keys::MARKETPLACE => |p| {
            round_money(p.revenue * MARKETPLACE_ORDER_SHARE * MARKETPLACE_REVENUE_UPLIFT)
        },
        _ => return None,
    };

    Some(
        trend
            .iter()
            .map(|p| ChartPoint::Dated {
                date: p.date.clone(),
                value: value(p),
            })
            .collect(),
    )
}

/// Unpaid order amount per calendar day, zero-filled over the range.
fn outstanding_by_day(snapshot: &DashboardSnapshot) -> Vec<ChartPoint> {
    let mut by_day: BTreeMap<String, f64> = snapshot
        .bundle
        .range
        .iter_days()
        .map(|d| (d.format("%Y-%m-%d").to_string(), 0.0))
        .collect();

    for order in snapshot.bundle.orders.iter().filter(|o| o.is_unpaid()) {
        if let Some(amount) = by_day.get_mut(&order.day_key()) {
            *amount += order.total;
        }
    }

    by_day
        .into_iter()
        .map(|(date, value)| ChartPoint::Dated {
            date,
            value: round_money(value),
        })
        .collect()
}

fn named_points(entries: &[RankingEntry]) -> Vec<ChartPoint> {
    entries
        .iter()
        .map(|e| ChartPoint::Named {
            name: e.name.clone(),
            value: e.total_revenue,
        })
        .collect()
}
