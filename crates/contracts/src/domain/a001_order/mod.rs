pub mod aggregate;

pub use aggregate::{FulfillmentStatus, InvoiceStatus, LineItem, Order, OrderId};
