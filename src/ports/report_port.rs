//! Report rendering port trait.

use crate::domain::error::ScannerError;
use crate::domain::metrics::ScanReport;

/// Port for turning a computed report into human-readable output.
pub trait ReportPort {
    fn render(&self, report: &ScanReport) -> Result<String, ScannerError>;
}
