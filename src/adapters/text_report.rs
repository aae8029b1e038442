//! Line-oriented console renderer.

use std::fmt::Write;

use crate::adapters::report_format::{fmt_indicator, fmt_price, yes_no, TableRow, TABLE_HEADERS};
use crate::domain::error::ScannerError;
use crate::domain::metrics::ScanReport;
use crate::ports::report_port::ReportPort;

pub struct TextReportAdapter;

impl ReportPort for TextReportAdapter {
    fn render(&self, report: &ScanReport) -> Result<String, ScannerError> {
        Ok(render_text(report))
    }
}

fn table_line(cells: [&str; 8]) -> String {
    format!(
        "{:<10}  {:>10}  {:>10}  {:>10}  {:>10}  {:>8}  {:>12}  {}",
        cells[0], cells[1], cells[2], cells[3], cells[4], cells[5], cells[6], cells[7]
    )
}

pub fn render_text(report: &ScanReport) -> String {
    let s = &report.snapshot;
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "=== {} Technical Overview (as of {}) ===", report.ticker, report.as_of);
    let _ = writeln!(out, "Current Price: {}", fmt_price(report.current_price));
    let _ = writeln!(out, "EMA 10: {}", fmt_indicator(s.ema10));
    let _ = writeln!(out, "EMA 20: {}", fmt_indicator(s.ema20));
    let _ = writeln!(out, "SMA 50: {}", fmt_indicator(s.sma50));
    let _ = writeln!(
        out,
        "ADX (14): {} | +DI: {} | -DI: {}",
        fmt_indicator(s.adx14),
        fmt_indicator(s.plus_di14),
        fmt_indicator(s.minus_di14)
    );

    let _ = writeln!(out, "\n=== Returns ===");
    let _ = writeln!(out, "1W Change: {}", report.returns.week);
    let _ = writeln!(out, "1M Change: {}", report.returns.month);
    let _ = writeln!(out, "3M Change: {}", report.returns.quarter);

    let _ = writeln!(out, "\n=== Price Flags ===");
    let _ = writeln!(out, "Below 20 EMA: {}", yes_no(report.flags.below_ema20));
    let _ = writeln!(out, "Below 50 SMA: {}", yes_no(report.flags.below_sma50));

    let _ = writeln!(out, "\n=== Last {} Trading Days ===", report.recent.len());
    let _ = writeln!(out, "{}", table_line(TABLE_HEADERS));
    for row in report.recent.iter().map(TableRow::from_derived) {
        let _ = writeln!(
            out,
            "{}",
            table_line([
                row.date.as_str(),
                row.open.as_str(),
                row.close.as_str(),
                row.high.as_str(),
                row.low.as_str(),
                row.range.as_str(),
                row.volume.as_str(),
                row.color,
            ])
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::attach::IndicatorRow;
    use crate::domain::metrics::{
        DerivedRow, IndicatorSnapshot, PeriodReturns, PriceFlags, ReturnMetric,
    };
    use crate::domain::ohlcv::OhlcvBar;
    use chrono::{Duration, NaiveDate};

    fn sample_report() -> ScanReport {
        let start = NaiveDate::from_ymd_opt(2024, 6, 17).unwrap();
        let recent = (0..3)
            .map(|i| {
                DerivedRow::from_row(IndicatorRow {
                    bar: OhlcvBar {
                        date: start + Duration::days(i),
                        open: 100.0 + i as f64,
                        high: 102.0 + i as f64,
                        low: 99.0 + i as f64,
                        close: 100.5,
                        volume: 1_000 + i as u64,
                    },
                    ema10: None,
                    ema20: None,
                    sma50: None,
                    adx14: None,
                    plus_di14: None,
                    minus_di14: None,
                })
            })
            .collect();

        ScanReport {
            ticker: "AAPL".into(),
            as_of: start + Duration::days(2),
            current_price: 100.5,
            snapshot: IndicatorSnapshot {
                ema10: Some(101.234),
                ema20: Some(99.999),
                sma50: None,
                adx14: Some(23.456),
                plus_di14: Some(18.0),
                minus_di14: Some(12.5),
            },
            returns: PeriodReturns {
                week: ReturnMetric::Percent(1.23),
                month: ReturnMetric::Percent(-4.5),
                quarter: ReturnMetric::Unavailable,
            },
            flags: PriceFlags {
                below_ema20: false,
                below_sma50: false,
            },
            recent,
        }
    }

    #[test]
    fn renders_overview() {
        let text = render_text(&sample_report());
        assert!(text.contains("=== AAPL Technical Overview (as of 2024-06-19) ==="));
        assert!(text.contains("Current Price: 100.50"));
        assert!(text.contains("EMA 10: 101.23"));
        assert!(text.contains("EMA 20: 100.00"));
        assert!(text.contains("SMA 50: NaN"));
        assert!(text.contains("ADX (14): 23.46 | +DI: 18.00 | -DI: 12.50"));
    }

    #[test]
    fn renders_returns_and_flags() {
        let text = render_text(&sample_report());
        assert!(text.contains("1W Change: 1.23%"));
        assert!(text.contains("1M Change: -4.50%"));
        assert!(text.contains("3M Change: N/A"));
        assert!(text.contains("Below 20 EMA: No"));
        assert!(text.contains("Below 50 SMA: No"));
    }

    #[test]
    fn table_rows_in_date_order() {
        let text = render_text(&sample_report());
        let lines: Vec<&str> = text.lines().collect();
        let header = lines.iter().position(|l| l.starts_with("Date")).unwrap();
        assert!(lines[header + 1].starts_with("2024-06-17"));
        assert!(lines[header + 2].starts_with("2024-06-18"));
        assert!(lines[header + 3].starts_with("2024-06-19"));
        assert!(lines[header + 1].ends_with("Green"));
        assert!(lines[header + 2].ends_with("Red"));
        assert_eq!(lines.len(), header + 4);
    }

    #[test]
    fn adapter_matches_function() {
        let report = sample_report();
        assert_eq!(TextReportAdapter.render(&report).unwrap(), render_text(&report));
    }
}
