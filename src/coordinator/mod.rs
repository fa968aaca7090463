//! Coordinator module
//!
//! Runs one estimate over a worker group. Every worker executes
//! [`run_worker`] with the same configuration:
//!
//! 1. validate the raw positionals (independently, identically everywhere)
//! 2. barrier, then start the clock
//! 3. compute this worker's partial sum
//! 4. sum-reduce the partial sums onto the root
//! 5. barrier, then stop the clock
//! 6. root only: write the report
//!
//! A rejected command line is reported once by the root; every worker then
//! returns before entering any collective, so nobody is left waiting.

use crate::config::{parse_arguments, ArgumentError, RunConfig};
use crate::output::EstimateReport;
use crate::quadrature::{approximate_log, owned_count};
use crate::runtime::{self, Collective, CollectiveError, SoloComm};
use crate::util::time::Timestamp;
use crate::Result;
use std::io::Write;
use std::process::ExitCode;
use std::sync::Mutex;
use thiserror::Error;

/// Why a worker did not complete its run
#[derive(Debug, Error)]
pub enum WorkerError {
    /// The command line was rejected (reported by the root)
    #[error(transparent)]
    Arguments(#[from] ArgumentError),

    /// A barrier or reduction failed
    #[error("collective operation failed: {0}")]
    Collective(#[from] CollectiveError),

    /// Writing the report failed
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),

    /// Rendering the report failed
    #[error(transparent)]
    Report(#[from] anyhow::Error),
}

/// Process-level verdict of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    Failure,
}

impl RunStatus {
    pub fn exit_code(self) -> ExitCode {
        match self {
            RunStatus::Success => ExitCode::SUCCESS,
            RunStatus::Failure => ExitCode::FAILURE,
        }
    }
}

/// Collected results of every worker in a group
#[derive(Debug)]
pub struct RunOutcome {
    /// Root's report, present only on success
    pub report: Option<EstimateReport>,
    /// `(rank, error)` for every worker that failed, in rank order
    pub errors: Vec<(usize, WorkerError)>,
}

impl RunOutcome {
    pub fn status(&self) -> RunStatus {
        if self.errors.is_empty() && self.report.is_some() {
            RunStatus::Success
        } else {
            RunStatus::Failure
        }
    }
}

/// Launch `config.workers` workers, run the estimate, and join them
///
/// Only the root worker writes to `out`. A single worker runs on the calling
/// thread; larger groups get one thread per worker.
pub fn run<W: Write + Send>(config: &RunConfig, out: W) -> Result<RunOutcome> {
    let sink = Mutex::new(out);

    let results = if config.workers == 1 {
        vec![run_worker(&SoloComm::new(), config, &sink)]
    } else {
        runtime::launch(config.workers, |comm| run_worker(comm, config, &sink))?
    };

    let mut report = None;
    let mut errors = Vec::new();
    for (rank, result) in results.into_iter().enumerate() {
        match result {
            Ok(Some(r)) => report = Some(r),
            Ok(None) => {}
            Err(e) => errors.push((rank, e)),
        }
    }

    if !errors.is_empty() {
        log::debug!("{} of {} workers stopped early", errors.len(), config.workers);
    }

    Ok(RunOutcome { report, errors })
}

/// Body executed by every worker of the group
///
/// Returns the report on the root and `None` on every other rank.
pub fn run_worker<C, W>(
    comm: &C,
    config: &RunConfig,
    out: &Mutex<W>,
) -> std::result::Result<Option<EstimateReport>, WorkerError>
where
    C: Collective,
    W: Write,
{
    let id = comm.rank();
    let workers = comm.size();

    let inputs = match parse_arguments(&config.program, config.args.as_slice()) {
        Ok(inputs) => inputs,
        Err(err) => {
            log::debug!("worker {}: {:?}", id, err);
            if comm.is_root() {
                write_line(out, &err.to_string())?;
            }
            return Err(err.into());
        }
    };

    comm.barrier();
    let start = Timestamp::now();

    let local = approximate_log(inputs.log_number, inputs.num_intervals, id, workers);
    log::debug!(
        "worker {}/{}: {} rectangles, partial sum {:.16}",
        id,
        workers,
        owned_count(inputs.num_intervals, id, workers),
        local
    );

    // Every rank reaches the closing barrier even if its reduction failed
    let reduced = comm.sum_reduce(local);
    comm.barrier();
    let end = Timestamp::now();

    let Some(estimate) = reduced? else {
        return Ok(None);
    };

    let elapsed = end.seconds_since(start);
    log::debug!("reduced estimate {:.16} in {:.6}s", estimate, elapsed);

    let report = EstimateReport::new(inputs, estimate, elapsed, workers);
    write_line(out, &report.render(config.format)?)?;

    Ok(Some(report))
}

fn write_line<W: Write>(out: &Mutex<W>, line: &str) -> std::result::Result<(), WorkerError> {
    let mut guard = out
        .lock()
        .map_err(|_| anyhow::anyhow!("Output sink poisoned"))?;
    let writer: &mut W = &mut guard;
    writeln!(writer, "{}", line)?;
    writer.flush()?;
    Ok(())
}
