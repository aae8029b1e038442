//! Daily OHLCV bar representation.

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct OhlcvBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl OhlcvBar {
    /// high - low, not floored at zero.
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// max(high - low, |high - prev_close|, |low - prev_close|)
    pub fn true_range(&self, prev_close: f64) -> f64 {
        let hl = self.high - self.low;
        let hc = (self.high - prev_close).abs();
        let lc = (self.low - prev_close).abs();
        hl.max(hc).max(lc)
    }

    /// Strictly rising session: close above open.
    pub fn is_up(&self) -> bool {
        self.close > self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bar() -> OhlcvBar {
        OhlcvBar {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            open: 100.0,
            high: 110.0,
            low: 90.0,
            close: 105.0,
            volume: 50_000,
        }
    }

    #[test]
    fn range_is_high_minus_low() {
        let bar = sample_bar();
        assert!((bar.range() - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn range_is_not_floored() {
        let bar = OhlcvBar {
            high: 90.0,
            low: 95.0,
            ..sample_bar()
        };
        assert!((bar.range() + 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn true_range_hl_dominates() {
        let bar = sample_bar();
        // high-low=20, |high-100|=10, |low-100|=10 → 20
        assert!((bar.true_range(100.0) - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn true_range_gap_up() {
        let bar = sample_bar();
        // high-low=20, |110-70|=40, |90-70|=20 → 40
        assert!((bar.true_range(70.0) - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn true_range_gap_down() {
        let bar = sample_bar();
        // |90-130|=40
        assert!((bar.true_range(130.0) - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn is_up_requires_strict_gain() {
        let mut bar = sample_bar();
        assert!(bar.is_up());
        bar.close = bar.open;
        assert!(!bar.is_up());
        bar.close = bar.open - 0.01;
        assert!(!bar.is_up());
    }
}
