//! Yahoo Finance chart API data adapter.
//!
//! Fetches raw (unadjusted) daily OHLCV bars from the v8 chart endpoint.
//! An unknown ticker comes back as HTTP 404 or as a `chart.error` payload;
//! both are reported as an empty series so the sufficiency gate handles them.

use std::time::Duration;

use chrono::{DateTime, NaiveDate};
use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::config_validation::DEFAULT_TIMEOUT_SECS;
use crate::domain::error::ScannerError;
use crate::domain::ohlcv::OhlcvBar;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    meta: Option<ChartMeta>,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteColumns>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteColumns {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

pub struct YahooAdapter {
    client: Client,
    base_url: Url,
}

impl YahooAdapter {
    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> Result<Self, ScannerError> {
        let base_url = Url::parse(base_url).map_err(|e| ScannerError::ConfigInvalid {
            section: "yahoo".into(),
            key: "base_url".into(),
            reason: e.to_string(),
        })?;
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| ScannerError::data_source(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, ScannerError> {
        let base_url = config
            .get_string("yahoo", "base_url")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let user_agent = config
            .get_string("yahoo", "user_agent")
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        let timeout_secs = config
            .get_int("yahoo", "timeout_secs", DEFAULT_TIMEOUT_SECS)
            .max(1) as u64;
        Self::new(&base_url, Duration::from_secs(timeout_secs), &user_agent)
    }

    /// `{base}/{ticker}?period1=..&period2=..&interval=1d&events=history`.
    ///
    /// `period2` is midnight UTC after `end_date` so the end date is included.
    fn chart_url(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Url, ScannerError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ScannerError::data_source("base URL cannot take a path"))?
            .pop_if_empty()
            .push(ticker);

        let period1 = start_date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp();
        let period2 = end_date
            .succ_opt()
            .unwrap_or(end_date)
            .and_time(chrono::NaiveTime::MIN)
            .and_utc()
            .timestamp();

        url.query_pairs_mut()
            .append_pair("period1", &period1.to_string())
            .append_pair("period2", &period2.to_string())
            .append_pair("interval", "1d")
            .append_pair("events", "history");
        Ok(url)
    }
}

/// Parses a chart payload, skipping rows with any null column.
fn parse_chart(body: &str) -> Result<Vec<OhlcvBar>, ScannerError> {
    let response: ChartResponse = serde_json::from_str(body)
        .map_err(|e| ScannerError::data_source(format!("unparseable chart response: {}", e)))?;

    if let Some(error) = response.chart.error {
        warn!(code = %error.code, "chart endpoint error: {}", error.description);
        return Ok(Vec::new());
    }

    let Some(data) = response.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(Vec::new());
    };

    let offset = data.meta.map(|m| m.gmtoffset).unwrap_or_default();
    let empty = QuoteColumns::default();
    let quote = data.indicators.quote.first().unwrap_or(&empty);

    let mut bars = Vec::with_capacity(data.timestamp.len());
    for (i, &ts) in data.timestamp.iter().enumerate() {
        let column = |col: &Vec<Option<f64>>| col.get(i).copied().flatten();
        let volume = quote.volume.get(i).copied().flatten();

        let (Some(open), Some(high), Some(low), Some(close), Some(volume)) = (
            column(&quote.open),
            column(&quote.high),
            column(&quote.low),
            column(&quote.close),
            volume,
        ) else {
            continue;
        };

        let Some(local) = DateTime::from_timestamp(ts + offset, 0) else {
            continue;
        };

        bars.push(OhlcvBar {
            date: local.date_naive(),
            open,
            high,
            low,
            close,
            volume,
        });
    }

    Ok(bars)
}

impl DataPort for YahooAdapter {
    fn fetch_daily(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, ScannerError> {
        let url = self.chart_url(ticker, start_date, end_date)?;
        debug!(%url, "requesting chart");

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| ScannerError::data_source(format!("request for {} failed: {}", ticker, e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            warn!(ticker, "chart endpoint returned 404");
            return Ok(Vec::new());
        }

        let body = response
            .text()
            .map_err(|e| ScannerError::data_source(format!("reading response for {}: {}", ticker, e)))?;

        if !status.is_success() {
            return Err(ScannerError::data_source(format!(
                "chart endpoint returned HTTP {} for {}",
                status, ticker
            )));
        }

        let bars = parse_chart(&body)?;
        debug!(ticker, bars = bars.len(), "chart parsed");
        Ok(bars)
    }
}
