//! Per-query scan pipeline.
//!
//! fetch → sufficiency gate → attach indicators → derived metrics. Each call
//! is independent; nothing is cached between queries.

use chrono::{Months, NaiveDate};
use tracing::{debug, info};

use crate::domain::error::ScannerError;
use crate::domain::indicator::attach::attach_indicators;
use crate::domain::metrics::{compute_report, ScanReport};
use crate::domain::series::{ensure_sufficient, Series, MIN_BARS};
use crate::ports::data_port::DataPort;

/// Trailing window requested from the data loader.
pub const LOOKBACK_MONTHS: u32 = 6;

/// Tickers are matched case-insensitively; the canonical form is upper case.
pub fn normalize_ticker(input: &str) -> String {
    input.trim().to_uppercase()
}

/// `[today - 6 months, today]`, clamped at the earliest representable date.
pub fn lookback_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = today
        .checked_sub_months(Months::new(LOOKBACK_MONTHS))
        .unwrap_or(NaiveDate::MIN);
    (start, today)
}

pub fn scan(
    data_port: &dyn DataPort,
    ticker: &str,
    today: NaiveDate,
) -> Result<ScanReport, ScannerError> {
    let ticker = normalize_ticker(ticker);
    let (start, end) = lookback_window(today);

    debug!(%ticker, %start, %end, "fetching daily bars");
    let bars = data_port.fetch_daily(&ticker, start, end)?;
    let series = Series::new(ticker.clone(), bars);
    debug!(%ticker, bars = series.len(), "series loaded");

    let series = ensure_sufficient(series, MIN_BARS).inspect_err(|e| {
        info!(%ticker, "rejected: {e}");
    })?;

    let rows = attach_indicators(&series);
    compute_report(&ticker, rows)
}
