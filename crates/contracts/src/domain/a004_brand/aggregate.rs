use serde::{Deserialize, Serialize};

crate::uuid_id!(
    /// Brand identifier
    BrandId
);

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: BrandId,
    pub name: String,
    pub total_revenue: f64,
    pub total_orders: u32,
    /// Signed growth in percent, roughly -20..=20
    pub growth: f64,
}
