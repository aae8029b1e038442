//! CSV file data adapter.
//!
//! One file per ticker, `{base_path}/{TICKER}.csv`, with the header
//! `date,open,high,low,close,volume`. A missing file means the ticker is
//! unknown and yields an empty series.

use crate::domain::error::ScannerError;
use crate::domain::ohlcv::OhlcvBar;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use csv::StringRecord;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", ticker))
    }
}

fn field<T>(record: &StringRecord, index: usize, name: &str, line: u64) -> Result<T, ScannerError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = record.get(index).ok_or_else(|| {
        ScannerError::data_source(format!("line {}: missing {} column", line, name))
    })?;
    raw.trim().parse().map_err(|e| {
        ScannerError::data_source(format!("line {}: invalid {} value '{}': {}", line, name, raw, e))
    })
}

impl DataPort for CsvAdapter {
    fn fetch_daily(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, ScannerError> {
        let path = self.csv_path(ticker);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no csv file for ticker");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(ScannerError::data_source(format!(
                    "failed to read {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result
                .map_err(|e| ScannerError::data_source(format!("CSV parse error: {}", e)))?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();

            let date_str: String = field(&record, 0, "date", line)?;
            let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
                ScannerError::data_source(format!("line {}: invalid date format: {}", line, e))
            })?;

            if date < start_date || date > end_date {
                continue;
            }

            bars.push(OhlcvBar {
                date,
                open: field(&record, 1, "open", line)?,
                high: field(&record, 2, "high", line)?,
                low: field(&record, 3, "low", line)?,
                close: field(&record, 4, "close", line)?,
                volume: field(&record, 5, "volume", line)?,
            });
        }

        bars.sort_by_key(|b| b.date);
        debug!(ticker, bars = bars.len(), "loaded csv bars");
        Ok(bars)
    }
}
