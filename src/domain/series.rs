//! Per-ticker price series and the sufficiency gate.
//!
//! A [`Series`] always holds bars in strictly increasing date order. Loaders
//! may hand back unsorted data or repeat the current session; construction
//! sorts and collapses duplicate dates, keeping the last observation.

use crate::domain::error::ScannerError;
use crate::domain::ohlcv::OhlcvBar;

/// Fewest bars a series may have before any metric is computed.
pub const MIN_BARS: usize = 60;

#[derive(Debug, Clone)]
pub struct Series {
    ticker: String,
    bars: Vec<OhlcvBar>,
}

impl Series {
    pub fn new(ticker: impl Into<String>, mut bars: Vec<OhlcvBar>) -> Self {
        bars.sort_by_key(|b| b.date);

        let mut deduped: Vec<OhlcvBar> = Vec::with_capacity(bars.len());
        for bar in bars {
            match deduped.last_mut() {
                Some(prev) if prev.date == bar.date => *prev = bar,
                _ => deduped.push(bar),
            }
        }

        Self {
            ticker: ticker.into(),
            bars: deduped,
        }
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn bars(&self) -> &[OhlcvBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last(&self) -> Option<&OhlcvBar> {
        self.bars.last()
    }
}

/// Rejects a series that is empty or shorter than `minimum` bars.
pub fn ensure_sufficient(series: Series, minimum: usize) -> Result<Series, ScannerError> {
    if series.is_empty() || series.len() < minimum {
        return Err(ScannerError::InsufficientData {
            ticker: series.ticker,
            bars: series.bars.len(),
            minimum,
        });
    }
    Ok(series)
}
