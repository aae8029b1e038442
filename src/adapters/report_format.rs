//! Value formatting shared by the text and HTML renderers.

use crate::domain::metrics::{round2, Color, DerivedRow};

pub fn fmt_price(value: f64) -> String {
    format!("{:.2}", round2(value))
}

/// Undefined indicator values print as `NaN`.
pub fn fmt_indicator(value: Option<f64>) -> String {
    match value {
        Some(v) => fmt_price(v),
        None => "NaN".to_string(),
    }
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

/// One row of the trailing-days table, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub date: String,
    pub open: String,
    pub close: String,
    pub high: String,
    pub low: String,
    pub range: String,
    pub volume: String,
    pub color: &'static str,
    pub up: bool,
}

impl TableRow {
    pub fn from_derived(row: &DerivedRow) -> Self {
        let bar = row.bar();
        Self {
            date: bar.date.format("%Y-%m-%d").to_string(),
            open: fmt_price(bar.open),
            close: fmt_price(bar.close),
            high: fmt_price(bar.high),
            low: fmt_price(bar.low),
            range: fmt_price(row.range),
            volume: bar.volume.to_string(),
            color: row.color.label(),
            up: row.color == Color::Up,
        }
    }
}

pub const TABLE_HEADERS: [&str; 8] = [
    "Date", "Open", "Close", "High", "Low", "Range", "Volume", "Color",
];
