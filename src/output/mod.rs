//! Result reporting
//!
//! Only the root worker ever builds an [`EstimateReport`]; the other workers
//! never hold the global estimate.

pub mod json;
pub mod text;

use crate::config::{Inputs, OutputFormat};
use crate::Result;

/// Outcome of a successful estimate run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimateReport {
    /// Number whose logarithm was estimated
    pub log_number: f64,
    /// Reduced midpoint-rule estimate
    pub estimate: f64,
    /// |estimate - ln(log_number)|
    pub abs_error: f64,
    /// Wall-clock seconds between the two barriers
    pub elapsed_secs: f64,
    /// Worker group size
    pub workers: usize,
    /// Total rectangle count
    pub num_intervals: u64,
}

impl EstimateReport {
    /// Build a report, measuring the error against `f64::ln`
    pub fn new(inputs: Inputs, estimate: f64, elapsed_secs: f64, workers: usize) -> Self {
        Self {
            log_number: inputs.log_number,
            estimate,
            abs_error: (estimate - inputs.log_number.ln()).abs(),
            elapsed_secs,
            workers,
            num_intervals: inputs.num_intervals,
        }
    }

    /// Render the report in the requested format, without a trailing newline
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(text::format_report(self)),
            OutputFormat::Json => json::JsonReport::from_report(self).to_json_line(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(log_number: f64, num_intervals: u64) -> Inputs {
        Inputs {
            log_number,
            num_intervals,
        }
    }

    #[test]
    fn test_error_against_ln() {
        let report = EstimateReport::new(inputs(10.0, 1000), 2.3, 0.5, 4);
        assert!((report.abs_error - (2.3 - 10f64.ln()).abs()).abs() < 1e-15);
        assert_eq!(report.workers, 4);
        assert_eq!(report.num_intervals, 1000);
    }

    #[test]
    fn test_exact_zero_error_for_one() {
        let report = EstimateReport::new(inputs(1.0, 5), 0.0, 0.0, 2);
        assert_eq!(report.abs_error, 0.0);
    }

    #[test]
    fn test_render_formats() {
        let report = EstimateReport::new(inputs(1.0, 5), 0.0, 0.25, 2);

        let text = report.render(OutputFormat::Text).unwrap();
        assert!(text.ends_with("0.250000 seconds"));

        let json = report.render(OutputFormat::Json).unwrap();
        assert!(json.starts_with('{'));
        assert!(!json.contains('\n'));
    }
}
