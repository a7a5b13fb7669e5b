pub mod insight;
pub mod number_format;
pub mod state;
pub mod storage;
pub mod theme;
