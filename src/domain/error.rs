//! Domain error types.

/// Top-level error type for tickerscan.
#[derive(Debug, thiserror::Error)]
pub enum ScannerError {
    #[error("not enough data for '{ticker}': have {bars} bars, need {minimum}")]
    InsufficientData {
        ticker: String,
        bars: usize,
        minimum: usize,
    },

    #[error("market data error: {reason}")]
    DataSource { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("render error: {reason}")]
    Render { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ScannerError {
    pub fn data_source(reason: impl Into<String>) -> Self {
        ScannerError::DataSource {
            reason: reason.into(),
        }
    }

    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, ScannerError::InsufficientData { .. })
    }
}

impl From<&ScannerError> for std::process::ExitCode {
    fn from(err: &ScannerError) -> Self {
        let code: u8 = match err {
            ScannerError::Io(_) | ScannerError::Render { .. } => 1,
            ScannerError::ConfigParse { .. } | ScannerError::ConfigInvalid { .. } => 2,
            ScannerError::DataSource { .. } => 3,
            ScannerError::InsufficientData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_data_names_ticker() {
        let err = ScannerError::InsufficientData {
            ticker: "ZZZZ".into(),
            bars: 12,
            minimum: 60,
        };
        let msg = err.to_string();
        assert!(msg.contains("'ZZZZ'"));
        assert!(msg.contains("12"));
        assert!(msg.contains("60"));
        assert!(err.is_insufficient_data());
    }

    #[test]
    fn data_source_helper() {
        let err = ScannerError::data_source("timeout");
        assert_eq!(err.to_string(), "market data error: timeout");
        assert!(!err.is_insufficient_data());
    }
}
