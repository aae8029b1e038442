//! Directional Movement Index: +DI, -DI and ADX (Wilder).
//!
//! +DM = up move when it exceeds the down move and is positive, else 0 (and
//! symmetrically for -DM). TR, +DM and -DM are Wilder-smoothed, seeded with the
//! plain average of the first n values:
//!   DI = 100 * sm(DM) / sm(TR)            valid from bar n
//!   DX = 100 * |+DI - -DI| / (+DI + -DI)
//!   ADX = Wilder average of DX            valid from bar 2n-1

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::OhlcvBar;

#[derive(Debug, Clone)]
pub struct DmiSeries {
    pub plus_di: IndicatorSeries,
    pub minus_di: IndicatorSeries,
    pub adx: IndicatorSeries,
}

fn wilder(prev: f64, value: f64, period: f64) -> f64 {
    (prev * (period - 1.0) + value) / period
}

pub fn calculate_dmi(bars: &[OhlcvBar], period: usize) -> DmiSeries {
    if period == 0 || bars.is_empty() {
        return DmiSeries {
            plus_di: IndicatorSeries::empty(IndicatorType::PlusDi(period)),
            minus_di: IndicatorSeries::empty(IndicatorType::MinusDi(period)),
            adx: IndicatorSeries::empty(IndicatorType::Adx(period)),
        };
    }

    let n = bars.len();
    let mut plus_di: Vec<Option<f64>> = vec![None; n];
    let mut minus_di: Vec<Option<f64>> = vec![None; n];
    let mut adx: Vec<Option<f64>> = vec![None; n];

    if n > period {
        // Index 0 has no previous bar and is never read.
        let mut tr = vec![0.0; n];
        let mut plus_dm = vec![0.0; n];
        let mut minus_dm = vec![0.0; n];
        for i in 1..n {
            let up = bars[i].high - bars[i - 1].high;
            let down = bars[i - 1].low - bars[i].low;
            plus_dm[i] = if up > down && up > 0.0 { up } else { 0.0 };
            minus_dm[i] = if down > up && down > 0.0 { down } else { 0.0 };
            tr[i] = bars[i].true_range(bars[i - 1].close);
        }

        let p = period as f64;
        let mut sm_tr = tr[1..=period].iter().sum::<f64>() / p;
        let mut sm_plus = plus_dm[1..=period].iter().sum::<f64>() / p;
        let mut sm_minus = minus_dm[1..=period].iter().sum::<f64>() / p;
        let mut dx = vec![0.0; n];

        for i in period..n {
            if i > period {
                sm_tr = wilder(sm_tr, tr[i], p);
                sm_plus = wilder(sm_plus, plus_dm[i], p);
                sm_minus = wilder(sm_minus, minus_dm[i], p);
            }

            let (pdi, mdi) = if sm_tr > 0.0 {
                (100.0 * sm_plus / sm_tr, 100.0 * sm_minus / sm_tr)
            } else {
                (0.0, 0.0)
            };
            plus_di[i] = Some(pdi);
            minus_di[i] = Some(mdi);

            let sum = pdi + mdi;
            dx[i] = if sum > 0.0 {
                100.0 * (pdi - mdi).abs() / sum
            } else {
                0.0
            };
        }

        let adx_start = 2 * period - 1;
        if n > adx_start {
            let mut value = dx[period..=adx_start].iter().sum::<f64>() / p;
            adx[adx_start] = Some(value);
            for i in (adx_start + 1)..n {
                value = wilder(value, dx[i], p);
                adx[i] = Some(value);
            }
        }
    }

    let to_series = |indicator_type, raw: Vec<Option<f64>>| IndicatorSeries {
        indicator_type,
        values: bars
            .iter()
            .zip(raw)
            .map(|(bar, value)| IndicatorPoint {
                date: bar.date,
                value,
            })
            .collect(),
    };

    DmiSeries {
        plus_di: to_series(IndicatorType::PlusDi(period), plus_di),
        minus_di: to_series(IndicatorType::MinusDi(period), minus_di),
        adx: to_series(IndicatorType::Adx(period), adx),
    }
}
