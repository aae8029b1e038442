//! Market data access port trait.

use crate::domain::error::ScannerError;
use crate::domain::ohlcv::OhlcvBar;
use chrono::NaiveDate;

pub trait DataPort {
    /// Daily bars for `ticker` dated within `[start_date, end_date]`.
    ///
    /// An unknown ticker yields an empty vector rather than an error.
    fn fetch_daily(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, ScannerError>;
}
