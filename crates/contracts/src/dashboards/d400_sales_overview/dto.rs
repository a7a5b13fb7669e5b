use crate::domain::a001_order::Order;
use crate::domain::a002_customer::Customer;
use crate::domain::a003_agent::Agent;
use crate::domain::a004_brand::Brand;
use crate::domain::a005_item::Item;
use crate::domain::a006_invoice::Invoice;
use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Inclusive calendar range covered by a bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

impl DateRange {
    /// Range of `days` calendar days ending at `date_to` (inclusive).
    ///
    /// `None` when the first day falls before the earliest representable date.
    pub fn ending_at(date_to: NaiveDate, days: u32) -> Option<Self> {
        let span = u64::from(days.max(1)) - 1;
        let date_from = date_to.checked_sub_days(Days::new(span))?;
        Some(Self { date_from, date_to })
    }

    /// Number of calendar days in the range, 0 when inverted.
    pub fn days(&self) -> u32 {
        let diff = (self.date_to - self.date_from).num_days();
        if diff < 0 {
            0
        } else {
            diff as u32 + 1
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.date_from && date <= self.date_to
    }

    /// Every day of the range in ascending order.
    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> {
        let from = self.date_from;
        (0..self.days()).map(move |offset| from + chrono::Duration::days(i64::from(offset)))
    }
}

/// Full generated dataset for one session.
///
/// The generator is the only owner; the aggregation reads it and never
/// mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetBundle {
    pub range: DateRange,
    pub generated_at: DateTime<Utc>,
    pub orders: Vec<Order>,
    pub customers: Vec<Customer>,
    pub agents: Vec<Agent>,
    pub brands: Vec<Brand>,
    pub items: Vec<Item>,
    pub invoices: Vec<Invoice>,
}

/// Flat aggregate record behind the metric cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_revenue: f64,
    pub total_orders: u32,
    pub total_customers: u32,
    pub average_order_value: f64,
    pub previous_period_revenue: f64,
    pub previous_period_orders: u32,
    pub previous_period_customers: u32,
    pub previous_period_average_order_value: f64,
    pub outstanding_invoices: u32,
    pub outstanding_amount: f64,
    pub marketplace_orders: u32,
    pub marketplace_revenue: f64,
}

/// One calendar day of the trend series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// "YYYY-MM-DD"
    pub date: String,
    pub revenue: f64,
    pub orders: u32,
    pub customers: u32,
    pub average_order_value: f64,
}

impl TrendPoint {
    pub fn empty(date: String) -> Self {
        Self {
            date,
            revenue: 0.0,
            orders: 0,
            customers: 0,
            average_order_value: 0.0,
        }
    }
}

/// Ranked entry of a top-N list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    /// Record id as string
    pub id: String,
    pub name: String,
    pub total_revenue: f64,
    /// Orders for agents/brands/customers, quantity for items
    pub count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rankings {
    pub agents: Vec<RankingEntry>,
    pub brands: Vec<RankingEntry>,
    pub items: Vec<RankingEntry>,
    pub customers: Vec<RankingEntry>,
}

/// Result of one aggregation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardAggregate {
    pub metrics: DashboardMetrics,
    pub trend: Vec<TrendPoint>,
    pub rankings: Rankings,
}

/// Bundle plus its aggregate, handed to the client state in one piece.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub bundle: DatasetBundle,
    pub aggregate: DashboardAggregate,
}

impl DashboardSnapshot {
    pub fn range(&self) -> DateRange {
        self.bundle.range
    }
}
