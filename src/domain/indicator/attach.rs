//! Attaches the fixed indicator set to every bar of a series.

use crate::domain::indicator::dmi::calculate_dmi;
use crate::domain::indicator::ema::calculate_ema;
use crate::domain::indicator::sma::calculate_sma;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::series::Series;

pub const EMA_FAST: usize = 10;
pub const EMA_SLOW: usize = 20;
pub const SMA_LONG: usize = 50;
pub const DMI_PERIOD: usize = 14;

/// A bar plus its indicator values; `None` inside the warm-up window.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorRow {
    pub bar: OhlcvBar,
    pub ema10: Option<f64>,
    pub ema20: Option<f64>,
    pub sma50: Option<f64>,
    pub adx14: Option<f64>,
    pub plus_di14: Option<f64>,
    pub minus_di14: Option<f64>,
}

/// One row per bar, same order and length as the series.
pub fn attach_indicators(series: &Series) -> Vec<IndicatorRow> {
    let bars = series.bars();
    let ema10 = calculate_ema(bars, EMA_FAST);
    let ema20 = calculate_ema(bars, EMA_SLOW);
    let sma50 = calculate_sma(bars, SMA_LONG);
    let dmi = calculate_dmi(bars, DMI_PERIOD);

    bars.iter()
        .enumerate()
        .map(|(i, bar)| IndicatorRow {
            bar: bar.clone(),
            ema10: ema10.value_at(i),
            ema20: ema20.value_at(i),
            sma50: sma50.value_at(i),
            adx14: dmi.adx.value_at(i),
            plus_di14: dmi.plus_di.value_at(i),
            minus_di14: dmi.minus_di.value_at(i),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn series(count: usize) -> Series {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars = (0..count)
            .map(|i| {
                let c = 100.0 + (i % 7) as f64;
                OhlcvBar {
                    date: start + Duration::days(i as i64),
                    open: c - 0.5,
                    high: c + 1.0,
                    low: c - 1.0,
                    close: c,
                    volume: 1000 + i as u64,
                }
            })
            .collect();
        Series::new("TEST", bars)
    }

    #[test]
    fn rows_align_with_bars() {
        let s = series(70);
        let rows = attach_indicators(&s);
        assert_eq!(rows.len(), 70);
        for (row, bar) in rows.iter().zip(s.bars()) {
            assert_eq!(&row.bar, bar);
        }
    }

    #[test]
    fn warmup_windows() {
        let rows = attach_indicators(&series(70));
        assert!(rows[8].ema10.is_none());
        assert!(rows[9].ema10.is_some());
        assert!(rows[18].ema20.is_none());
        assert!(rows[19].ema20.is_some());
        assert!(rows[48].sma50.is_none());
        assert!(rows[49].sma50.is_some());
        assert!(rows[13].plus_di14.is_none());
        assert!(rows[14].plus_di14.is_some());
        assert!(rows[14].minus_di14.is_some());
        assert!(rows[26].adx14.is_none());
        assert!(rows[27].adx14.is_some());
    }

    #[test]
    fn short_series_leaves_long_indicators_undefined() {
        let rows = attach_indicators(&series(30));
        let last = rows.last().unwrap();
        assert!(last.ema20.is_some());
        assert!(last.sma50.is_none());
    }

    #[test]
    fn empty_series_yields_no_rows() {
        assert!(attach_indicators(&Series::new("NONE", vec![])).is_empty());
    }
}
