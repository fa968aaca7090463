//! Thread-backed worker group
//!
//! Each worker is a scoped OS thread holding a [`ThreadComm`]. Barriers use a
//! shared `std::sync::Barrier`. Reductions are channel based: non-root ranks
//! send their value to the root and return at once, the root waits for one
//! contribution per rank and adds them up in rank order, so the result does
//! not depend on thread scheduling.

use super::{Collective, CollectiveError, ROOT};
use crate::Result;
use crossbeam::channel::{unbounded, Receiver, Sender};
use std::cell::{Cell, RefCell};
use std::io;
use std::sync::{Arc, Barrier};
use std::thread;

/// One worker's value for one reduction round
#[derive(Debug, Clone, Copy)]
struct Contribution {
    round: u64,
    rank: usize,
    value: f64,
}

#[derive(Debug)]
enum Role {
    Root {
        receiver: Receiver<Contribution>,
        /// Contributions that arrived ahead of the round being collected.
        /// Holds at most one entry per member that ran into a later round; it
        /// stays empty when reductions are separated by barriers.
        pending: RefCell<Vec<Contribution>>,
    },
    Member {
        sender: Sender<Contribution>,
    },
}

/// Collective handle of a thread-group worker
#[derive(Debug)]
pub struct ThreadComm {
    rank: usize,
    size: usize,
    barrier: Arc<Barrier>,
    round: Cell<u64>,
    role: Role,
}

impl ThreadComm {
    /// Create the handles of a group of `size` workers, in rank order
    pub fn group(size: usize) -> std::result::Result<Vec<ThreadComm>, CollectiveError> {
        if size == 0 {
            return Err(CollectiveError::EmptyGroup);
        }

        let barrier = Arc::new(Barrier::new(size));
        let (sender, receiver) = unbounded();

        let mut comms = Vec::with_capacity(size);
        comms.push(ThreadComm {
            rank: ROOT,
            size,
            barrier: barrier.clone(),
            round: Cell::new(0),
            role: Role::Root {
                receiver,
                pending: RefCell::new(Vec::new()),
            },
        });
        for rank in 1..size {
            comms.push(ThreadComm {
                rank,
                size,
                barrier: barrier.clone(),
                round: Cell::new(0),
                role: Role::Member { sender: sender.clone() },
            });
        }

        Ok(comms)
    }

    /// Advance to the next reduction round and return its number
    fn next_round(&self) -> u64 {
        let round = self.round.get();
        self.round.set(round + 1);
        round
    }

    /// Root side of a reduction: gather this round from `pending` and the
    /// channel, parking contributions tagged with a later round in `pending`
    fn collect(
        &self,
        round: u64,
        local: f64,
        receiver: &Receiver<Contribution>,
        pending: &RefCell<Vec<Contribution>>,
    ) -> std::result::Result<f64, CollectiveError> {
        let mut slots: Vec<Option<f64>> = vec![None; self.size];
        slots[self.rank] = Some(local);

        let mut remaining = self.size - 1;
        while remaining > 0 {
            let early = {
                let mut pending = pending.borrow_mut();
                pending
                    .iter()
                    .position(|c| c.round == round)
                    .map(|pos| pending.remove(pos))
            };
            let contribution = match early {
                Some(c) => c,
                None => {
                    let c = receiver.recv().map_err(|_| CollectiveError::Disconnected)?;
                    if c.round != round {
                        pending.borrow_mut().push(c);
                        continue;
                    }
                    c
                }
            };

            let slot = slots
                .get_mut(contribution.rank)
                .ok_or(CollectiveError::UnexpectedRank {
                    rank: contribution.rank,
                    size: self.size,
                })?;
            if slot.is_some() {
                return Err(CollectiveError::DuplicateContribution {
                    rank: contribution.rank,
                });
            }
            *slot = Some(contribution.value);
            remaining -= 1;
        }

        slots
            .into_iter()
            .sum::<Option<f64>>()
            .ok_or(CollectiveError::MissingContributions)
    }
}

impl Collective for ThreadComm {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }

    fn barrier(&self) {
        self.barrier.wait();
    }

    fn sum_reduce(&self, local: f64) -> std::result::Result<Option<f64>, CollectiveError> {
        let round = self.next_round();

        match &self.role {
            Role::Root { receiver, pending } => {
                self.collect(round, local, receiver, pending).map(Some)
            }
            Role::Member { sender } => {
                sender
                    .send(Contribution {
                        round,
                        rank: self.rank,
                        value: local,
                    })
                    .map_err(|_| CollectiveError::Disconnected)?;
                Ok(None)
            }
        }
    }
}

/// Run `body` on a fresh group of `workers` threads
///
/// Spawns one scoped thread per rank, waits for all of them and returns
/// their results in rank order. A worker that panics is reported as an
/// error once the whole group has been joined.
///
/// No worker starts `body` until every thread of the group exists. If a
/// spawn fails the threads already started are released without running
/// `body` and the spawn error is returned.
///
/// # Example
///
/// ```
/// use lnpulse::runtime::{launch, Collective};
///
/// let totals = launch(4, |comm| comm.sum_reduce(comm.rank() as f64).unwrap())?;
/// assert_eq!(totals, vec![Some(6.0), None, None, None]);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn launch<T, F>(workers: usize, body: F) -> Result<Vec<T>>
where
    F: Fn(&ThreadComm) -> T + Sync,
    T: Send,
{
    launch_with(workers, body, |rank| {
        Ok(thread::Builder::new().name(format!("lnpulse-worker-{}", rank)))
    })
}

fn launch_with<T, F, B>(workers: usize, body: F, builder: B) -> Result<Vec<T>>
where
    F: Fn(&ThreadComm) -> T + Sync,
    T: Send,
    B: Fn(usize) -> io::Result<thread::Builder>,
{
    let comms = ThreadComm::group(workers)?;
    log::debug!("launching worker group of {}", workers);

    thread::scope(|scope| {
        let body = &body;
        // One start token per worker; a closed channel without a token means abort
        let (start_tx, start_rx) = unbounded::<()>();

        let mut handles = Vec::with_capacity(workers);
        let mut spawn_error = None;
        for comm in comms {
            let rank = comm.rank;
            let gate = start_rx.clone();
            let spawned = builder(rank).and_then(|b| {
                b.spawn_scoped(scope, move || {
                    gate.recv().ok()?;
                    Some(body(&comm))
                })
            });
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    spawn_error = Some((rank, e));
                    break;
                }
            }
        }
        drop(start_rx);

        if spawn_error.is_none() {
            for _ in 0..handles.len() {
                // Unbounded and every worker still holds a receiver, so this cannot fail
                let _ = start_tx.send(());
            }
        }
        drop(start_tx);

        let mut results = Vec::with_capacity(handles.len());
        let mut panicked = Vec::new();
        for (rank, handle) in handles.into_iter().enumerate() {
            match handle.join() {
                Ok(Some(value)) => results.push(value),
                Ok(None) => {}
                Err(_) => panicked.push(rank),
            }
        }

        if let Some((rank, e)) = spawn_error {
            log::debug!("spawn of worker {} failed, released ranks 0..{}", rank, rank);
            return Err(anyhow::Error::new(e)
                .context(format!("Failed to spawn worker {} of {}", rank, workers)));
        }
        if !panicked.is_empty() {
            anyhow::bail!("Worker thread panicked (ranks {:?})", panicked);
        }
        Ok(results)
    })
}
