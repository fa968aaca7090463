//! Configuration module
//!
//! Handles CLI argument parsing and validation of the estimate inputs.

pub mod cli;
pub mod validator;

pub use validator::{parse_arguments, ArgumentError, Inputs};

use cli::Cli;
use std::fmt;

/// How the root worker reports a successful run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Single fixed-precision line
    #[default]
    Text,
    /// Single-line JSON object
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Everything needed to launch one estimate run
///
/// `args` are the raw positionals; they are handed unparsed to every worker.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Program name used in the usage line
    pub program: String,
    /// Raw positional arguments
    pub args: Vec<String>,
    /// Size of the worker group
    pub workers: usize,
    /// Report format
    pub format: OutputFormat,
}

impl RunConfig {
    /// Text-reporting run over `args` with `workers` workers
    pub fn new(program: impl Into<String>, args: Vec<String>, workers: usize) -> Self {
        Self {
            program: program.into(),
            args,
            workers,
            format: OutputFormat::Text,
        }
    }

    /// Build the run configuration from parsed CLI options
    pub fn from_cli(program: impl Into<String>, cli: &Cli) -> Self {
        let format = if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };

        Self::new(program, cli.args.clone(), cli.worker_count()).with_format(format)
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}
