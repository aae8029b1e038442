//! Technical indicator implementations.
//!
//! This module provides types for representing indicator values and series:
//! - `IndicatorPoint`: A single point in an indicator time series
//! - `IndicatorType`: Enum for indicator identity + parameters
//! - `IndicatorSeries`: A date-aligned time series of indicator values
//!
//! Points inside an indicator's warm-up window carry `None`.

pub mod attach;
pub mod dmi;
pub mod ema;
pub mod sma;

use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Ema(usize),
    Adx(usize),
    PlusDi(usize),
    MinusDi(usize),
}

#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    pub fn empty(indicator_type: IndicatorType) -> Self {
        Self {
            indicator_type,
            values: Vec::new(),
        }
    }

    /// Value at bar index `i`, `None` during warm-up or past the end.
    pub fn value_at(&self, i: usize) -> Option<f64> {
        self.values.get(i).and_then(|p| p.value)
    }

    /// Index of the first defined value.
    pub fn first_valid(&self) -> Option<usize> {
        self.values.iter().position(|p| p.value.is_some())
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Ema(period) => write!(f, "EMA({})", period),
            IndicatorType::Adx(period) => write!(f, "ADX({})", period),
            IndicatorType::PlusDi(period) => write!(f, "+DI({})", period),
            IndicatorType::MinusDi(period) => write!(f, "-DI({})", period),
        }
    }
}
