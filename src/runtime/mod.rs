//! SPMD worker runtime
//!
//! A fixed-size group of workers that talk to each other only through two
//! blocking collectives: a barrier and a sum reduction onto the root rank.
//! Every worker runs the same code and learns its identity from the handle
//! it is given at launch.
//!
//! # Backends
//!
//! - [`ThreadComm`]: one OS thread per worker, a shared barrier object and a
//!   channel that carries contributions to the root
//! - [`SoloComm`]: a group of one, used when only a single worker is asked for
//!
//! Numerical code never sees the backend; it only receives `rank()` and
//! `size()` and hands its partial result to [`Collective::sum_reduce`].

pub mod solo;
pub mod threads;

pub use solo::SoloComm;
pub use threads::{launch, ThreadComm};

use thiserror::Error;

/// Rank that receives reduction results and does all reporting
pub const ROOT: usize = 0;

/// Failures raised by the collective operations
#[derive(Debug, Error, PartialEq)]
pub enum CollectiveError {
    /// A group must contain at least one worker
    #[error("worker group must contain at least one worker")]
    EmptyGroup,

    /// The other side of the reduction channel went away
    #[error("reduction channel disconnected before all contributions arrived")]
    Disconnected,

    /// A contribution carried a rank that does not belong to the group
    #[error("contribution from rank {rank} outside group of {size}")]
    UnexpectedRank { rank: usize, size: usize },

    /// The same rank contributed twice to one reduction
    #[error("rank {rank} contributed twice to the same reduction")]
    DuplicateContribution { rank: usize },

    /// The reduction finished without a value for every rank
    #[error("reduction finished with missing contributions")]
    MissingContributions,
}

/// Collective operations available to every worker of a group
pub trait Collective {
    /// Rank of the calling worker, in `[0, size)`
    fn rank(&self) -> usize;

    /// Number of workers in the group
    fn size(&self) -> usize;

    /// Block until every worker of the group has called `barrier`
    fn barrier(&self);

    /// Sum `local` across the group
    ///
    /// Every worker must call this the same number of times. Returns
    /// `Some(total)` on the root rank and `None` everywhere else.
    fn sum_reduce(&self, local: f64) -> Result<Option<f64>, CollectiveError>;

    /// Whether this worker is the root rank
    fn is_root(&self) -> bool {
        self.rank() == ROOT
    }
}
