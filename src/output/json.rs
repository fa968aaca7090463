//! JSON output formatting
//!
//! A single-line JSON object carrying the same numbers as the text line plus
//! the run shape (workers, intervals) and an RFC 3339 timestamp.

use super::EstimateReport;
use crate::Result;
use anyhow::Context;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Serializable estimate report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    /// When the report was produced (RFC 3339, UTC)
    pub timestamp: String,
    pub log_number: f64,
    pub estimate: f64,
    pub abs_error: f64,
    pub elapsed_secs: f64,
    pub workers: usize,
    pub num_intervals: u64,
}

impl JsonReport {
    pub fn from_report(report: &EstimateReport) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            log_number: report.log_number,
            estimate: report.estimate,
            abs_error: report.abs_error,
            elapsed_secs: report.elapsed_secs,
            workers: report.workers,
            num_intervals: report.num_intervals,
        }
    }

    /// Serialize to a compact single-line string
    pub fn to_json_line(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize JSON report")
    }
}
