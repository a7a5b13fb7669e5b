use crate::domain::a001_order::{InvoiceStatus, OrderId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

crate::uuid_id!(
    /// Invoice identifier
    InvoiceId
);

/// Outstanding invoice, one per unpaid order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: InvoiceId,
    pub order_id: OrderId,
    pub customer_name: String,
    /// Copy of the order total
    pub amount: f64,
    pub due_date: DateTime<Utc>,
    /// Always `Unpaid` for generated invoices
    pub status: InvoiceStatus,
    /// Illustrative only, 0..=30
    pub days_overdue: u32,
}
