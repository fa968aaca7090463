//! lnpulse - parallel midpoint-rule estimator of ln(x)
//!
//! Estimates the natural logarithm of a number by integrating 1/(x+1) over
//! [0, x-1] with the midpoint rectangle rule, split across a fixed group of
//! cooperating workers.
//!
//! # Architecture
//!
//! - **Quadrature**: each worker's round-robin share of the rectangle sum
//! - **Runtime**: SPMD worker group with barrier and sum-reduce collectives
//! - **Coordinator**: validation, barrier-synchronised timing, reduction, report
//! - **Output**: fixed-precision text line or JSON report from the root worker

pub mod config;
pub mod coordinator;
pub mod output;
pub mod quadrature;
pub mod runtime;
pub mod util;

// Re-export commonly used types
pub use config::RunConfig;
pub use coordinator::{run, RunStatus};
pub use runtime::Collective;

/// Result type used throughout lnpulse
pub type Result<T> = anyhow::Result<T>;
