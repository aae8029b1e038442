//! Core domain types and logic.

pub mod ohlcv;
pub mod series;
pub mod indicator;
pub mod metrics;
pub mod scan;
pub mod config_validation;
pub mod error;
