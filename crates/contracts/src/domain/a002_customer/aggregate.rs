use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

crate::uuid_id!(
    /// Customer identifier
    CustomerId
);

/// Customer record.
///
/// `total_spent`, `order_count` and `last_order_date` are derived from the
/// order set of the same bundle and must be recomputed, never set by hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub total_spent: f64,
    pub order_count: u32,
    pub last_order_date: Option<DateTime<Utc>>,
}

impl Customer {
    pub fn new(id: CustomerId, name: String, email: String) -> Self {
        Self {
            id,
            name,
            email,
            total_spent: 0.0,
            order_count: 0,
            last_order_date: None,
        }
    }
}
