use serde::{Deserialize, Serialize};

crate::uuid_id!(
    /// Sales agent identifier
    AgentId
);

/// Sales agent with session-level performance figures.
///
/// The figures are generated on their own and are not reconciled with the
/// orders that reference the agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub total_revenue: f64,
    pub total_orders: u32,
    pub average_order_value: f64,
    /// Share of leads converted, 0..=1
    pub conversion_rate: f64,
}
