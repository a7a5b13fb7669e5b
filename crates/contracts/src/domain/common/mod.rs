//! Common types and traits for all generated records

pub mod aggregate_id;
pub mod money;

pub use aggregate_id::AggregateId;
pub use money::round_money;
