#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
pub use tickerscan::domain::ohlcv::OhlcvBar;
use tickerscan::domain::error::ScannerError;
use tickerscan::ports::data_port::DataPort;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory loader keyed by upper-case ticker. Records every request.
pub struct MockDataPort {
    pub data: HashMap<String, Vec<OhlcvBar>>,
    pub errors: HashMap<String, String>,
    pub requests: Mutex<Vec<(String, NaiveDate, NaiveDate)>>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_bars(mut self, ticker: &str, bars: Vec<OhlcvBar>) -> Self {
        self.data.insert(ticker.to_string(), bars);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }

    pub fn requested(&self) -> Vec<(String, NaiveDate, NaiveDate)> {
        self.requests.lock().unwrap().clone()
    }
}

impl DataPort for MockDataPort {
    fn fetch_daily(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, ScannerError> {
        self.requests
            .lock()
            .unwrap()
            .push((ticker.to_string(), start_date, end_date));
        if let Some(reason) = self.errors.get(ticker) {
            return Err(ScannerError::data_source(reason.clone()));
        }
        Ok(self.data.get(ticker).cloned().unwrap_or_default())
    }
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn make_bar(date_str: &str, open: f64, close: f64) -> OhlcvBar {
    OhlcvBar {
        date: date(date_str),
        open,
        high: open.max(close) + 1.0,
        low: open.min(close) - 1.0,
        close,
        volume: 1_000_000,
    }
}

/// `count` consecutive calendar-day bars starting at `start`, each closing
/// one unit above the previous and opening half a unit below its close.
pub fn generate_bars(start: NaiveDate, count: usize, base_price: f64) -> Vec<OhlcvBar> {
    (0..count)
        .map(|i| {
            let close = base_price + i as f64;
            OhlcvBar {
                date: start + Duration::days(i as i64),
                open: close - 0.5,
                high: close + 1.0,
                low: close - 1.5,
                close,
                volume: 1_000_000 + i as u64,
            }
        })
        .collect()
}

/// Bars ending on `today`, so a scan run on `today` sees all of them.
pub fn bars_ending(today: NaiveDate, count: usize, base_price: f64) -> Vec<OhlcvBar> {
    let start = today - Duration::days(count as i64 - 1);
    generate_bars(start, count, base_price)
}
