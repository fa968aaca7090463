//! CLI argument parsing using clap

use clap::Parser;

/// lnpulse - parallel midpoint-rule estimate of ln(x)
///
/// Integrates 1/(x+1) over [0, target-1] with a fixed number of rectangles
/// spread round-robin over a group of worker threads.
#[derive(Parser, Debug)]
#[command(name = "lnpulse")]
#[command(version, about, long_about = None)]
#[command(allow_negative_numbers = true)]
pub struct Cli {
    /// Number of workers in the group (default: number of logical CPUs)
    #[arg(short = 'w', long)]
    pub workers: Option<usize>,

    /// Print the result as a JSON object instead of the text line
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging on stderr
    #[arg(long)]
    pub debug: bool,

    /// <logarithm-target> <num-intervals>
    ///
    /// Kept as raw text: every worker validates these itself. Options must
    /// come first; from the first positional on, every word is taken as is.
    #[arg(value_name = "ARGS", allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the options that are not per-worker positionals
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.workers == Some(0) {
            anyhow::bail!("workers must be at least 1");
        }

        Ok(())
    }

    /// Worker count to launch
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get)
    }
}
