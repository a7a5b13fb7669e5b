use crate::domain::a002_customer::CustomerId;
use crate::domain::a003_agent::AgentId;
use crate::domain::a004_brand::BrandId;
use crate::domain::a005_item::ItemId;
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

crate::uuid_id!(
    /// Order identifier
    OrderId
);

/// Fulfillment state of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FulfillmentStatus {
    Pending,
    Completed,
}

/// Payment state of the invoice attached to an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Paid,
    Unpaid,
}

/// Order line (position)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Catalogue item reference
    pub product_id: ItemId,
    /// Quantity, always >= 1
    pub quantity: u32,
    /// Unit price, always > 0
    pub price: f64,
    /// Brand name tag, taken from the same set as the brand records
    pub brand: String,
}

impl LineItem {
    pub fn amount(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

/// A single customer order.
///
/// `total` is generated independently of the line amounts and is never
/// changed after the bundle is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    /// Human readable number, e.g. "ORD-00042"
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub total: f64,
    pub customer_id: CustomerId,
    pub agent_id: AgentId,
    pub brand_id: BrandId,
    pub status: FulfillmentStatus,
    pub invoice_status: InvoiceStatus,
    pub line_items: Vec<LineItem>,
}

impl Order {
    /// Calendar day of the order in local time.
    pub fn local_date(&self) -> NaiveDate {
        self.created_at.with_timezone(&Local).date_naive()
    }

    /// Calendar day key in "YYYY-MM-DD" format, used for trend bucketing.
    pub fn day_key(&self) -> String {
        self.local_date().format("%Y-%m-%d").to_string()
    }

    pub fn is_unpaid(&self) -> bool {
        self.invoice_status == InvoiceStatus::Unpaid
    }
}
