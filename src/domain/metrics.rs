//! Derived metrics computed from an indicator-augmented series.
//!
//! Everything presented to the user comes out of [`compute_report`]: lookback
//! returns, per-bar range and color, price-vs-average flags and the latest
//! indicator snapshot.

use chrono::{Duration, NaiveDate};
use std::fmt;

use crate::domain::error::ScannerError;
use crate::domain::indicator::attach::IndicatorRow;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::series::MIN_BARS;

/// Calendar-day windows for the week, month and quarter returns.
pub const RETURN_WINDOWS: [i64; 3] = [7, 30, 90];

/// Number of trailing rows carried into the report table.
pub const RECENT_ROWS: usize = 10;

/// Round half away from zero to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReturnMetric {
    Percent(f64),
    Unavailable,
}

impl ReturnMetric {
    pub fn percent(&self) -> Option<f64> {
        match self {
            ReturnMetric::Percent(v) => Some(*v),
            ReturnMetric::Unavailable => None,
        }
    }
}

impl fmt::Display for ReturnMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnMetric::Percent(v) => write!(f, "{:.2}%", v),
            ReturnMetric::Unavailable => write!(f, "N/A"),
        }
    }
}

/// Percent change from the close of the latest bar dated on or before
/// `last date - days` to the last close.
///
/// `bars` must be sorted by date. The anchor is the nearest earlier bar, not
/// an exact date match; only when no bar exists at or before the anchor date
/// is the result unavailable.
pub fn lookback_return(bars: &[OhlcvBar], days: i64) -> ReturnMetric {
    let Some(today) = bars.last() else {
        return ReturnMetric::Unavailable;
    };
    let anchor = today.date - Duration::days(days);
    let idx = bars.partition_point(|b| b.date <= anchor);
    if idx == 0 {
        return ReturnMetric::Unavailable;
    }
    let past_close = bars[idx - 1].close;
    ReturnMetric::Percent(round2((today.close - past_close) / past_close * 100.0))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Up,
    Down,
}

impl Color {
    /// Up iff close > open; unchanged sessions count as down.
    pub fn of(bar: &OhlcvBar) -> Self {
        if bar.is_up() { Color::Up } else { Color::Down }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Color::Up => "Green",
            Color::Down => "Red",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DerivedRow {
    pub row: IndicatorRow,
    pub range: f64,
    pub color: Color,
}

impl DerivedRow {
    pub fn from_row(row: IndicatorRow) -> Self {
        let range = row.bar.range();
        let color = Color::of(&row.bar);
        Self { row, range, color }
    }

    pub fn bar(&self) -> &OhlcvBar {
        &self.row.bar
    }
}

pub fn derive_rows(rows: Vec<IndicatorRow>) -> Vec<DerivedRow> {
    rows.into_iter().map(DerivedRow::from_row).collect()
}

/// `close < average`, false when the average is undefined.
pub fn below(close: f64, average: Option<f64>) -> bool {
    match average {
        Some(avg) => close < avg,
        None => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IndicatorSnapshot {
    pub ema10: Option<f64>,
    pub ema20: Option<f64>,
    pub sma50: Option<f64>,
    pub adx14: Option<f64>,
    pub plus_di14: Option<f64>,
    pub minus_di14: Option<f64>,
}

impl IndicatorSnapshot {
    pub fn from_row(row: &IndicatorRow) -> Self {
        Self {
            ema10: row.ema10,
            ema20: row.ema20,
            sma50: row.sma50,
            adx14: row.adx14,
            plus_di14: row.plus_di14,
            minus_di14: row.minus_di14,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodReturns {
    pub week: ReturnMetric,
    pub month: ReturnMetric,
    pub quarter: ReturnMetric,
}

impl PeriodReturns {
    pub fn compute(bars: &[OhlcvBar]) -> Self {
        let [week, month, quarter] = RETURN_WINDOWS.map(|days| lookback_return(bars, days));
        Self {
            week,
            month,
            quarter,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceFlags {
    pub below_ema20: bool,
    pub below_sma50: bool,
}

/// Everything a presenter needs for one ticker query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanReport {
    pub ticker: String,
    pub as_of: NaiveDate,
    pub current_price: f64,
    pub snapshot: IndicatorSnapshot,
    pub returns: PeriodReturns,
    pub flags: PriceFlags,
    /// Trailing rows in ascending date order.
    pub recent: Vec<DerivedRow>,
}

pub fn compute_report(ticker: &str, rows: Vec<IndicatorRow>) -> Result<ScanReport, ScannerError> {
    let Some(last) = rows.last() else {
        return Err(ScannerError::InsufficientData {
            ticker: ticker.to_string(),
            bars: 0,
            minimum: MIN_BARS,
        });
    };

    let close_today = last.bar.close;
    let as_of = last.bar.date;
    let snapshot = IndicatorSnapshot::from_row(last);
    let flags = PriceFlags {
        below_ema20: below(close_today, snapshot.ema20),
        below_sma50: below(close_today, snapshot.sma50),
    };

    let bars: Vec<OhlcvBar> = rows.iter().map(|r| r.bar.clone()).collect();
    let returns = PeriodReturns::compute(&bars);

    let skip = rows.len().saturating_sub(RECENT_ROWS);
    let recent = derive_rows(rows.into_iter().skip(skip).collect());

    Ok(ScanReport {
        ticker: ticker.to_string(),
        as_of,
        current_price: close_today,
        snapshot,
        returns,
        flags,
        recent,
    })
}
