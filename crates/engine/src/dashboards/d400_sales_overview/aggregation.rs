use contracts::dashboards::d400_sales_overview::{
    DashboardAggregate, DashboardMetrics, DatasetBundle, DateRange, RankingEntry, Rankings,
    TrendPoint,
};
use contracts::domain::a001_order::Order;
use contracts::domain::a002_customer::CustomerId;
use contracts::domain::common::AggregateId;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::shared::error::DashboardError;

/// Length of the ranked lists unless the caller asks otherwise
pub const DEFAULT_TOP_N: usize = 5;

/// Synthetic previous-period ratios.
///
/// These are illustrative stand-ins, not a historical comparison. A live
/// system must replace them with a second aggregation over the shifted date
/// window.
pub mod baseline {
    pub const REVENUE: f64 = 0.88;
    pub const ORDERS: f64 = 0.92;
    pub const CUSTOMERS: f64 = 0.95;
    pub const AVG_ORDER_VALUE: f64 = 0.97;
}

/// Share of orders attributed to marketplaces
pub const MARKETPLACE_ORDER_SHARE: f64 = 0.3;
/// Marketplace orders carry a higher average check
pub const MARKETPLACE_REVENUE_UPLIFT: f64 = 1.1;

/// Aggregate a bundle with the default top-N.
pub fn aggregate(bundle: &DatasetBundle) -> Result<DashboardAggregate, DashboardError> {
    aggregate_with_top(bundle, DEFAULT_TOP_N)
}

/// Turn the raw bundle into metrics, a daily trend series and rankings.
///
/// An empty order set is valid and yields zeroed metrics. Orders with a
/// non-finite or non-positive total, or outside the bundle range, are skipped
/// with a warning. Only an inverted range is an error.
pub fn aggregate_with_top(
    bundle: &DatasetBundle,
    top_n: usize,
) -> Result<DashboardAggregate, DashboardError> {
    if bundle.range.days() == 0 {
        return Err(DashboardError::Aggregation(format!(
            "date range {}..{} is inverted",
            bundle.range.date_from, bundle.range.date_to
        )));
    }

    let orders: Vec<&Order> = bundle
        .orders
        .iter()
        .filter(|order| {
            let valid = order.total.is_finite() && order.total > 0.0;
            let in_range = bundle.range.contains(order.local_date());
            if !valid || !in_range {
                tracing::warn!(
                    "skipping order {} (total {}, date {})",
                    order.code,
                    order.total,
                    order.day_key()
                );
            }
            valid && in_range
        })
        .collect();

    let metrics = compute_metrics(&orders);
    let trend = build_trend(&bundle.range, &orders);
    let rankings = build_rankings(bundle, top_n);

    tracing::debug!(
        "aggregated {} orders into {} trend points",
        metrics.total_orders,
        trend.len()
    );

    Ok(DashboardAggregate {
        metrics,
        trend,
        rankings,
    })
}

/// Amount in whole cents; sums are kept in cents so day buckets add up to
/// the overall total exactly.
fn cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

fn from_cents(cents: i64) -> f64 {
    cents as f64 / 100.0
}

fn average(total_cents: i64, count: u32) -> f64 {
    if count == 0 {
        0.0
    } else {
        (total_cents as f64 / f64::from(count)).round() / 100.0
    }
}

fn scale(value: u32, ratio: f64) -> u32 {
    (f64::from(value) * ratio).round() as u32
}

pub fn compute_metrics(orders: &[&Order]) -> DashboardMetrics {
    let revenue_cents: i64 = orders.iter().map(|o| cents(o.total)).sum();
    let total_orders = orders.len() as u32;
    let total_customers = orders
        .iter()
        .map(|o| o.customer_id)
        .collect::<HashSet<CustomerId>>()
        .len() as u32;
    let total_revenue = from_cents(revenue_cents);
    let average_order_value = average(revenue_cents, total_orders);

    let unpaid: Vec<&&Order> = orders.iter().filter(|o| o.is_unpaid()).collect();
    let outstanding_amount = from_cents(unpaid.iter().map(|o| cents(o.total)).sum());

    let marketplace_orders = scale(total_orders, MARKETPLACE_ORDER_SHARE);
    let marketplace_revenue = round2(
        f64::from(marketplace_orders) * average_order_value * MARKETPLACE_REVENUE_UPLIFT,
    );

    DashboardMetrics {
        total_revenue,
        total_orders,
        total_customers,
        average_order_value,
        previous_period_revenue: round2(total_revenue * baseline::REVENUE),
        previous_period_orders: scale(total_orders, baseline::ORDERS),
        previous_period_customers: scale(total_customers, baseline::CUSTOMERS),
        previous_period_average_order_value: round2(
            average_order_value * baseline::AVG_ORDER_VALUE,
        ),
        outstanding_invoices: unpaid.len() as u32,
        outstanding_amount,
        marketplace_orders,
        marketplace_revenue,
    }
}

fn round2(value: f64) -> f64 {
    contracts::domain::common::round_money(value)
}

#[derive(Default)]
struct DayBucket<'a> {
    revenue_cents: i64,
    orders: u32,
    customers: HashSet<&'a CustomerId>,
}

/// One point per calendar day of `range`, zero-filled where nothing was sold.
///
/// Orders are matched by their local "YYYY-MM-DD" day key, not by 24h windows.
pub fn build_trend(range: &DateRange, orders: &[&Order]) -> Vec<TrendPoint> {
    let mut buckets: HashMap<String, DayBucket> = HashMap::new();
    for order in orders {
        let bucket = buckets.entry(order.day_key()).or_default();
        bucket.revenue_cents += cents(order.total);
        bucket.orders += 1;
        bucket.customers.insert(&order.customer_id);
    }

    range
        .iter_days()
        .map(|day| {
            let date = day.format("%Y-%m-%d").to_string();
            match buckets.get(&date) {
                Some(bucket) => TrendPoint {
                    revenue: from_cents(bucket.revenue_cents),
                    orders: bucket.orders,
                    customers: bucket.customers.len() as u32,
                    average_order_value: average(bucket.revenue_cents, bucket.orders),
                    date,
                },
                None => TrendPoint::empty(date),
            }
        })
        .collect()
}

/// Stable descending sort by revenue, truncated to `top_n`.
///
/// Entries with equal revenue keep their input order.
pub fn rank_by_revenue<T>(
    records: &[T],
    top_n: usize,
    revenue: impl Fn(&T) -> f64,
    to_entry: impl Fn(&T) -> RankingEntry,
) -> Vec<RankingEntry> {
    let mut sorted: Vec<&T> = records.iter().collect();
    sorted.sort_by(|a, b| {
        revenue(b)
            .partial_cmp(&revenue(a))
            .unwrap_or(Ordering::Equal)
    });
    sorted.into_iter().take(top_n).map(to_entry).collect()
}

pub fn build_rankings(bundle: &DatasetBundle, top_n: usize) -> Rankings {
    Rankings {
        agents: rank_by_revenue(
            &bundle.agents,
            top_n,
            |a| a.total_revenue,
            |a| RankingEntry {
                id: a.id.as_string(),
                name: a.name.clone(),
                total_revenue: a.total_revenue,
                count: a.total_orders,
            },
        ),
        brands: rank_by_revenue(
            &bundle.brands,
            top_n,
            |b| b.total_revenue,
            |b| RankingEntry {
                id: b.id.as_string(),
                name: b.name.clone(),
                total_revenue: b.total_revenue,
                count: b.total_orders,
            },
        ),
        items: rank_by_revenue(
            &bundle.items,
            top_n,
            |i| i.total_revenue,
            |i| RankingEntry {
                id: i.id.as_string(),
                name: i.name.clone(),
                total_revenue: i.total_revenue,
                count: i.total_quantity,
            },
        ),
        customers: rank_by_revenue(
            &bundle.customers,
            top_n,
            |c| c.total_spent,
            |c| RankingEntry {
                id: c.id.as_string(),
                name: c.name.clone(),
                total_revenue: c.total_spent,
                count: c.order_count,
            },
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, NaiveDate, TimeZone, Utc};
    use contracts::domain::a001_order::{FulfillmentStatus, InvoiceStatus, OrderId};
    use contracts::domain::a003_agent::AgentId;
    use contracts::domain::a004_brand::{Brand, BrandId};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, d).unwrap()
    }

    fn order(d: u32, hour: u32, total: f64, customer: CustomerId, unpaid: bool) -> Order {
        order_at(d, hour, 0, total, customer, unpaid)
    }

    fn order_at(
        d: u32,
        hour: u32,
        minute: u32,
        total: f64,
        customer: CustomerId,
        unpaid: bool,
    ) -> Order {
        let created_at = Local
            .from_local_datetime(&day(d).and_hms_opt(hour, minute, 0).unwrap())
            .earliest()
            .unwrap()
            .with_timezone(&Utc);
        Order {
            id: OrderId::new_v4(),
            code: format!("ORD-{d}-{hour}{minute:02}"),
            created_at,
            total,
            customer_id: customer,
            agent_id: AgentId::new_v4(),
            brand_id: BrandId::new_v4(),
            status: FulfillmentStatus::Completed,
            invoice_status: if unpaid {
                InvoiceStatus::Unpaid
            } else {
                InvoiceStatus::Paid
            },
            line_items: Vec::new(),
        }
    }

    fn bundle(range: DateRange, orders: Vec<Order>) -> DatasetBundle {
        DatasetBundle {
            range,
            generated_at: Utc::now(),
            orders,
            customers: Vec::new(),
            agents: Vec::new(),
            brands: Vec::new(),
            items: Vec::new(),
            invoices: Vec::new(),
        }
    }

    fn brand(name: &str, revenue: f64) -> Brand {
        Brand {
            id: BrandId::new_v4(),
            name: name.into(),
            total_revenue: revenue,
            total_orders: 1,
            growth: 0.0,
        }
    }

    #[test]
    fn test_empty_dataset_is_zeroed() {
        let range = DateRange::ending_at(day(10), 7).unwrap();
        let result = aggregate(&bundle(range, Vec::new())).unwrap();
        assert_eq!(result.metrics, DashboardMetrics::default());
        assert_eq!(result.trend.len(), 7);
        assert!(result.trend.iter().all(|p| p.orders == 0 && p.revenue == 0.0));
        assert!(result.trend.iter().all(|p| p.average_order_value == 0.0));
    }

    #[test]
    fn test_metrics_and_trend() {
        let alice = CustomerId::new_v4();
        let bob = CustomerId::new_v4();
        let orders = vec![
            order(8, 9, 100.10, alice, false),
            order(8, 15, 50.20, bob, true),
            order(10, 11, 30.00, alice, true),
        ];
        let range = DateRange::ending_at(day(10), 3).unwrap();
        let result = aggregate(&bundle(range, orders)).unwrap();
        let m = &result.metrics;

        assert_eq!(m.total_revenue, 180.30);
        assert_eq!(m.total_orders, 3);
        assert_eq!(m.total_customers, 2);
        assert_eq!(m.average_order_value, 60.10);
        assert_eq!(m.outstanding_invoices, 2);
        assert_eq!(m.outstanding_amount, 80.20);
        assert_eq!(m.previous_period_revenue, 158.66);
        assert_eq!(m.previous_period_orders, 3);
        assert_eq!(m.previous_period_customers, 2);
        assert_eq!(m.marketplace_orders, 1);
        assert_eq!(m.marketplace_revenue, 66.11);

        let dates: Vec<&str> = result.trend.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(dates, vec!["2025-05-08", "2025-05-09", "2025-05-10"]);
        assert_eq!(result.trend[0].revenue, 150.30);
        assert_eq!(result.trend[0].orders, 2);
        assert_eq!(result.trend[0].customers, 2);
        assert_eq!(result.trend[0].average_order_value, 75.15);
        assert_eq!(result.trend[1], TrendPoint::empty("2025-05-09".into()));
        assert_eq!(result.trend[2].customers, 1);
    }

    #[test]
    fn test_orders_around_midnight_use_local_day() {
        let alice = CustomerId::new_v4();
        let bob = CustomerId::new_v4();
        let orders = vec![
            order_at(8, 23, 59, 40.25, alice, false),
            order_at(9, 0, 1, 10.50, bob, false),
            order_at(9, 23, 59, 5.00, alice, true),
            order_at(10, 0, 1, 7.75, bob, false),
        ];
        let range = DateRange::ending_at(day(10), 3).unwrap();
        let result = aggregate(&bundle(range, orders)).unwrap();

        let per_day: Vec<(&str, u32, f64)> = result
            .trend
            .iter()
            .map(|p| (p.date.as_str(), p.orders, p.revenue))
            .collect();
        assert_eq!(
            per_day,
            vec![
                ("2025-05-08", 1, 40.25),
                ("2025-05-09", 2, 15.50),
                ("2025-05-10", 1, 7.75),
            ]
        );

        let revenue: f64 = result.trend.iter().map(|p| p.revenue).sum();
        let orders: u32 = result.trend.iter().map(|p| p.orders).sum();
        assert_eq!(revenue, result.metrics.total_revenue);
        assert_eq!(orders, result.metrics.total_orders);
        assert_eq!(result.metrics.total_revenue, 63.50);
    }

    #[test]
    fn test_invalid_orders_are_skipped() {
        let alice = CustomerId::new_v4();
        let orders = vec![
            order(9, 10, 20.0, alice, false),
            order(9, 11, f64::NAN, alice, false),
            order(9, 12, -5.0, alice, true),
            order(1, 12, 99.0, alice, true),
        ];
        let range = DateRange::ending_at(day(10), 2).unwrap();
        let result = aggregate(&bundle(range, orders)).unwrap();
        assert_eq!(result.metrics.total_orders, 1);
        assert_eq!(result.metrics.total_revenue, 20.0);
        assert_eq!(result.metrics.outstanding_invoices, 0);
    }

    #[test]
    fn test_inverted_range_is_an_error() {
        let range = DateRange {
            date_from: day(10),
            date_to: day(1),
        };
        assert!(matches!(
            aggregate(&bundle(range, Vec::new())),
            Err(DashboardError::Aggregation(_))
        ));
    }

    #[test]
    fn test_rankings_are_stable_on_ties() {
        let mut b = bundle(DateRange::ending_at(day(10), 1).unwrap(), Vec::new());
        b.brands = vec![
            brand("First", 500.0),
            brand("Top", 900.0),
            brand("Second", 500.0),
            brand("Third", 500.0),
        ];
        let rankings = build_rankings(&b, DEFAULT_TOP_N);
        let names: Vec<&str> = rankings.brands.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Top", "First", "Second", "Third"]);
    }

    #[test]
    fn test_top_n_truncates() {
        let mut b = bundle(DateRange::ending_at(day(10), 1).unwrap(), Vec::new());
        b.brands = (0..8).map(|i| brand(&format!("B{i}"), i as f64)).collect();
        assert_eq!(build_rankings(&b, DEFAULT_TOP_N).brands.len(), 5);
        let top2 = aggregate_with_top(&b, 2).unwrap().rankings.brands;
        let names: Vec<&str> = top2.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["B7", "B6"]);
    }
}
