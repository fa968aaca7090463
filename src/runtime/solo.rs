//! Single-worker group

use super::{Collective, CollectiveError, ROOT};

/// The only member of a group of one
///
/// Barriers return immediately and a reduction is the identity.
#[derive(Debug, Default, Clone, Copy)]
pub struct SoloComm;

impl SoloComm {
    pub fn new() -> Self {
        Self
    }
}

impl Collective for SoloComm {
    fn rank(&self) -> usize {
        ROOT
    }

    fn size(&self) -> usize {
        1
    }

    fn barrier(&self) {}

    fn sum_reduce(&self, local: f64) -> Result<Option<f64>, CollectiveError> {
        Ok(Some(local))
    }
}
