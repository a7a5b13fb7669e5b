use crate::domain::a004_brand::BrandId;
use serde::{Deserialize, Serialize};

crate::uuid_id!(
    /// Catalogue item identifier
    ItemId
);

/// Catalogue item; totals are summed from the generated line items.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub sku: String,
    pub total_revenue: f64,
    pub total_quantity: u32,
    pub brand_id: BrandId,
}
