//! Concrete adapter implementations for ports.

pub mod csv_adapter;
pub mod file_config_adapter;
pub mod report_format;
pub mod text_report;
#[cfg(feature = "web")]
pub mod web;
#[cfg(feature = "yahoo")]
pub mod yahoo_adapter;
