pub mod common;

pub mod a001_order;
pub mod a002_customer;
pub mod a003_agent;
pub mod a004_brand;
pub mod a005_item;
pub mod a006_invoice;
