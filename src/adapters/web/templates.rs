//! HTML templates using Askama.

use askama::Template;

use crate::adapters::report_format::{fmt_indicator, fmt_price, yes_no, TableRow, TABLE_HEADERS};
use crate::domain::error::ScannerError;
use crate::domain::metrics::ScanReport;
use crate::ports::report_port::ReportPort;

/// Full page: ticker form around a report or error fragment.
#[derive(Template)]
#[template(path = "base.html")]
pub struct PageTemplate<'a> {
    pub title: &'a str,
    pub ticker: &'a str,
    pub content: &'a str,
}

#[derive(Template)]
#[template(path = "report.html")]
pub struct ReportTemplate<'a> {
    pub ticker: &'a str,
    pub as_of: String,
    pub current_price: String,
    pub ema10: String,
    pub ema20: String,
    pub sma50: String,
    pub adx14: String,
    pub plus_di14: String,
    pub minus_di14: String,
    pub week: String,
    pub month: String,
    pub quarter: String,
    pub below_ema20: &'static str,
    pub below_sma50: &'static str,
    pub headers: [&'static str; 8],
    pub rows: Vec<TableRow>,
}

impl<'a> ReportTemplate<'a> {
    pub fn from_report(report: &'a ScanReport) -> Self {
        let s = &report.snapshot;
        Self {
            ticker: &report.ticker,
            as_of: report.as_of.to_string(),
            current_price: fmt_price(report.current_price),
            ema10: fmt_indicator(s.ema10),
            ema20: fmt_indicator(s.ema20),
            sma50: fmt_indicator(s.sma50),
            adx14: fmt_indicator(s.adx14),
            plus_di14: fmt_indicator(s.plus_di14),
            minus_di14: fmt_indicator(s.minus_di14),
            week: report.returns.week.to_string(),
            month: report.returns.month.to_string(),
            quarter: report.returns.quarter.to_string(),
            below_ema20: yes_no(report.flags.below_ema20),
            below_sma50: yes_no(report.flags.below_sma50),
            headers: TABLE_HEADERS,
            rows: report.recent.iter().map(TableRow::from_derived).collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub message: &'a str,
    pub status: u16,
}

/// Renders a report as an HTML fragment.
pub struct HtmlReportAdapter;

impl ReportPort for HtmlReportAdapter {
    fn render(&self, report: &ScanReport) -> Result<String, ScannerError> {
        ReportTemplate::from_report(report)
            .render()
            .map_err(|e| ScannerError::Render {
                reason: e.to_string(),
            })
    }
}
