//! Simple Moving Average of closing price.
//!
//! Rolling sum over the last n closes. Warmup: first (n-1) bars are undefined.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_sma(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    if period == 0 || bars.is_empty() {
        return IndicatorSeries::empty(IndicatorType::Sma(period));
    }

    let mut values = Vec::with_capacity(bars.len());
    let mut sum = 0.0;

    for (i, bar) in bars.iter().enumerate() {
        sum += bar.close;
        if i >= period {
            sum -= bars[i - period].close;
        }
        let value = if i + 1 >= period {
            Some(sum / period as f64)
        } else {
            None
        };
        values.push(IndicatorPoint {
            date: bar.date,
            value,
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Sma(period),
        values,
    }
}
