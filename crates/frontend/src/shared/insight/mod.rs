//! Insight modal workflow: `idle -> loading -> resolved | failed`.
//!
//! One [`InsightRequest`] belongs to one modal instance. Only the latest
//! request may publish its result; closing the modal drops whatever is still
//! in flight.

use async_trait::async_trait;
use chrono::Utc;
use contracts::shared::indicators::{keys, MetricKey};
use contracts::shared::insight::{InsightFetchError, InsightPayload, InsightStatus};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use std::time::Duration;

#[async_trait(?Send)]
pub trait InsightSource {
    async fn fetch_insight(&self, metric_key: &MetricKey)
        -> Result<InsightPayload, InsightFetchError>;

    fn source_name(&self) -> &str;
}

#[cfg(target_arch = "wasm32")]
async fn sleep(duration: Duration) {
    gloo_timers::future::sleep(duration).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

/// Canned insights behind an artificial delay.
pub struct SimulatedInsightSource {
    latency: Duration,
    failure_rate: f64,
    rng: RefCell<StdRng>,
    failing: RefCell<HashSet<MetricKey>>,
}

impl SimulatedInsightSource {
    pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1200);

    pub fn new() -> Self {
        Self {
            latency: Self::DEFAULT_LATENCY,
            failure_rate: 0.0,
            rng: RefCell::new(StdRng::from_entropy()),
            failing: RefCell::new(HashSet::new()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: RefCell::new(StdRng::seed_from_u64(seed)),
            ..Self::new()
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Share of requests that fail at random, clamped to `0.0..=1.0`.
    pub fn with_failure_rate(mut self, rate: f64) -> Self {
        self.failure_rate = if rate.is_finite() {
            rate.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self
    }

    /// Make every request for `metric_key` fail.
    pub fn fail_for(&self, metric_key: &str) {
        self.failing.borrow_mut().insert(MetricKey::new(metric_key));
    }

    fn should_fail(&self, metric_key: &MetricKey) -> bool {
        self.failing.borrow().contains(metric_key)
            || self.rng.borrow_mut().gen_bool(self.failure_rate)
    }
}

impl Default for SimulatedInsightSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl InsightSource for SimulatedInsightSource {
    async fn fetch_insight(
        &self,
        metric_key: &MetricKey,
    ) -> Result<InsightPayload, InsightFetchError> {
        if !self.latency.is_zero() {
            sleep(self.latency).await;
        }

        if self.should_fail(metric_key) {
            return Err(InsightFetchError::Unavailable(format!(
                "{} did not answer for '{}'",
                self.source_name(),
                metric_key
            )));
        }

        let (title, summary, highlights) = canned_insight(metric_key.as_str())
            .ok_or_else(|| InsightFetchError::UnknownMetric(metric_key.to_string()))?;

        Ok(InsightPayload {
            metric_key: metric_key.clone(),
            title: title.to_string(),
            summary: summary.to_string(),
            highlights: highlights.iter().map(|h| h.to_string()).collect(),
            generated_at: Utc::now(),
        })
    }

    fn source_name(&self) -> &str {
        "simulated insights"
    }
}

type Canned = (&'static str, &'static str, &'static [&'static str]);

fn canned_insight(metric_key: &str) -> Option<Canned> {
    let canned: Canned = match metric_key {
        keys::REVENUE => (
            "Revenue is trending up",
            "Revenue grew against the previous period, driven by larger baskets rather than more orders.",
            &[
                "Weekday afternoons bring the largest orders",
                "The top brand accounts for roughly a quarter of sales",
            ],
        ),
        keys::ORDERS => (
            "Order volume is steady",
            "Daily order counts stay within a narrow band with a mild weekly rhythm.",
            &[
                "Monday is the busiest day",
                "Few days pass without any orders",
            ],
        ),
        keys::CUSTOMERS => (
            "Returning customers dominate",
            "Most orders come from customers who already bought in this period.",
            &["Repeat buyers place about two orders each"],
        ),
        keys::AVG_ORDER => (
            "Average check is climbing",
            "The average order value rose slightly as multi-item orders became more common.",
            &[
                "Orders with three or more lines lift the average",
                "Small single-item orders are stable",
            ],
        ),
        keys::MARKETPLACE => (
            "Marketplace share holds at about a third",
            "Marketplace orders carry a higher average check than direct sales.",
            &["Marketplace checks run about 10% above direct ones"],
        ),
        keys::INVOICES => (
            "Outstanding invoices need attention",
            "A quarter of orders remain unpaid; the oldest are past their due date.",
            &[
                "Follow up on invoices overdue by more than a week",
                "Large unpaid orders concentrate in a few customers",
            ],
        ),
        _ => return None,
    };
    Some(canned)
}

#[derive(Debug, Default)]
struct Slot {
    status: InsightStatus,
    generation: u64,
    closed: bool,
}

/// Insight state of one modal. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct InsightRequest {
    slot: Rc<RefCell<Slot>>,
}

impl InsightRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> InsightStatus {
        self.slot.borrow().status.clone()
    }

    pub fn is_open(&self) -> bool {
        !self.slot.borrow().closed
    }

    /// Fetch an insight for `metric_key` and publish it, unless a newer
    /// request or a close happened meanwhile. Returns the status visible
    /// once this call completes.
    pub async fn request_insight(
        &self,
        source: &dyn InsightSource,
        metric_key: &str,
    ) -> InsightStatus {
        let metric_key = MetricKey::new(metric_key);
        let generation = {
            let mut slot = self.slot.borrow_mut();
            slot.generation += 1;
            slot.closed = false;
            slot.status = InsightStatus::Loading {
                metric_key: metric_key.clone(),
            };
            slot.generation
        };

        let result = source.fetch_insight(&metric_key).await;

        let mut slot = self.slot.borrow_mut();
        if slot.closed || slot.generation != generation {
            log::debug!("dropping superseded insight for '{}'", metric_key);
            return slot.status.clone();
        }

        slot.status = match result {
            Ok(payload) => InsightStatus::Resolved(payload),
            Err(e) => {
                log::warn!("insight request for '{}' failed: {}", metric_key, e);
                InsightStatus::Failed {
                    metric_key,
                    message: e.to_string(),
                }
            }
        };
        slot.status.clone()
    }

    /// Modal closed: back to idle, in-flight results are discarded.
    pub fn close(&self) {
        let mut slot = self.slot.borrow_mut();
        slot.generation += 1;
        slot.closed = true;
        slot.status = InsightStatus::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> SimulatedInsightSource {
        SimulatedInsightSource::with_seed(7).with_latency(Duration::from_millis(100))
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolves_payload() {
        let request = InsightRequest::new();
        let status = request.request_insight(&source(), "revenue").await;

        let payload = status.payload().unwrap();
        assert_eq!(payload.metric_key.as_str(), "revenue");
        assert!(!payload.highlights.is_empty());
        assert_eq!(request.status(), status);
    }

    #[tokio::test(start_paused = true)]
    async fn test_last_request_wins() {
        let source = source();
        let request = InsightRequest::new();
        let second = request.clone();

        let (first_status, second_status) = tokio::join!(
            request.request_insight(&source, "revenue"),
            async {
                tokio::time::sleep(Duration::from_millis(10)).await;
                second.request_insight(&source, "orders").await
            }
        );

        assert_ne!(
            first_status.payload().map(|p| p.metric_key.as_str()),
            Some("revenue")
        );
        assert_eq!(second_status.payload().unwrap().metric_key.as_str(), "orders");
        assert_eq!(
            request.status().payload().unwrap().metric_key.as_str(),
            "orders"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_clears_payload() {
        let source = source();
        let request = InsightRequest::new();
        request.request_insight(&source, "orders").await;
        assert!(request.status().payload().is_some());

        source.fail_for("orders");
        let status = request.request_insight(&source, "orders").await;
        assert!(matches!(status, InsightStatus::Failed { .. }));
        assert!(request.status().payload().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_discards_in_flight() {
        let source = source();
        let request = InsightRequest::new();
        let modal = request.clone();

        let (status, _) = tokio::join!(request.request_insight(&source, "revenue"), async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            modal.close();
        });

        assert_eq!(status, InsightStatus::Idle);
        assert_eq!(request.status(), InsightStatus::Idle);
        assert!(!request.is_open());
    }

    #[tokio::test]
    async fn test_unknown_metric_fails() {
        let source = SimulatedInsightSource::new().with_latency(Duration::ZERO);
        let err = source
            .fetch_insight(&MetricKey::new("churn"))
            .await
            .unwrap_err();
        assert_eq!(err, InsightFetchError::UnknownMetric("churn".into()));
    }

    #[tokio::test]
    async fn test_full_failure_rate() {
        let source = SimulatedInsightSource::with_seed(1)
            .with_latency(Duration::ZERO)
            .with_failure_rate(1.0);
        let status = InsightRequest::new()
            .request_insight(&source, "revenue")
            .await;
        assert!(matches!(status, InsightStatus::Failed { .. }));
    }
}
