pub mod config;
pub mod date_range;
pub mod error;
pub mod indicators;
pub mod logger;
