//! Midpoint-rule quadrature for ln(x)
//!
//! ln(target) is the area under 1/(x+1) on [0, target-1]. The interval is cut
//! into `segments` equal rectangles numbered 1..=segments, and each rectangle
//! is evaluated at its midpoint.
//!
//! # Decomposition
//!
//! Rectangles are dealt out round-robin: worker `id` of `worker_count` owns
//! indices `id+1, id+1+P, id+1+2P, ...`. Every worker computes its share with
//! [`approximate_log`] and the shares are summed by a reduction. Workers that
//! own no rectangle (more workers than segments) contribute exactly `0.0`.
//!
//! # Example
//!
//! ```
//! use lnpulse::quadrature::approximate_log;
//!
//! let workers = 4;
//! let estimate: f64 = (0..workers)
//!     .map(|id| approximate_log(10.0, 1000, id, workers))
//!     .sum();
//! assert!((estimate - 10f64.ln()).abs() < 1e-3);
//! ```

/// Compute one worker's contribution to the midpoint estimate of ln(target)
///
/// # Arguments
///
/// * `target` - Number whose logarithm is estimated (>= 1)
/// * `segments` - Total rectangle count across all workers (>= 1)
/// * `id` - Rank of the calling worker (< `worker_count`)
/// * `worker_count` - Size of the worker group (>= 1)
///
/// Inputs are assumed validated. With `target == 1.0` the width is zero and
/// the result is exactly `0.0`.
pub fn approximate_log(target: f64, segments: u64, id: usize, worker_count: usize) -> f64 {
    let dx = (target - 1.0) / segments as f64;

    let mut sum = 0.0;
    for i in owned_segments(segments, id, worker_count) {
        let x = dx * (i as f64 - 0.5);
        sum += 1.0 / (x + 1.0);
    }

    dx * sum
}

/// Single-worker estimate of ln(target) over all `segments` rectangles
pub fn estimate_log(target: f64, segments: u64) -> f64 {
    approximate_log(target, segments, 0, 1)
}

/// Iterate the 1-based rectangle indices owned by worker `id`
///
/// # Examples
///
/// ```
/// use lnpulse::quadrature::owned_segments;
///
/// let owned: Vec<u64> = owned_segments(10, 1, 4).collect();
/// assert_eq!(owned, vec![2, 6, 10]);
/// ```
pub fn owned_segments(segments: u64, id: usize, worker_count: usize) -> impl Iterator<Item = u64> {
    debug_assert!(worker_count > 0, "worker group cannot be empty");
    debug_assert!(id < worker_count, "rank {} outside group of {}", id, worker_count);

    // step_by never steps past `segments`, so large counts cannot overflow
    (id as u64 + 1..=segments).step_by(worker_count.max(1))
}

/// Number of rectangles owned by worker `id`
pub fn owned_count(segments: u64, id: usize, worker_count: usize) -> u64 {
    let first = id as u64 + 1;
    if first > segments {
        0
    } else {
        (segments - first) / worker_count.max(1) as u64 + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashSet;

    fn group_sum(target: f64, segments: u64, workers: usize) -> f64 {
        (0..workers)
            .map(|id| approximate_log(target, segments, id, workers))
            .sum()
    }

    #[test]
    fn test_single_worker_matches_full_sum() {
        assert_eq!(approximate_log(5.0, 777, 0, 1), estimate_log(5.0, 777));
    }

    #[test]
    fn test_partition_invariance() {
        let mut rng = StdRng::seed_from_u64(0x1f2e3d4c);

        for _ in 0..200 {
            let target = rng.gen_range(1.0..1_000.0);
            let segments = rng.gen_range(1..5_000u64);
            let workers = rng.gen_range(1..=32usize);

            let whole = estimate_log(target, segments);
            let split = group_sum(target, segments, workers);
            assert!(
                (whole - split).abs() <= 1e-10 * whole.abs().max(1.0),
                "target={} segments={} workers={}: {} vs {}",
                target, segments, workers, whole, split
            );
        }
    }

    #[test]
    fn test_target_one_is_exactly_zero() {
        for segments in [1u64, 2, 7, 1000] {
            for workers in [1usize, 3, 8, 2000] {
                for id in 0..workers {
                    assert_eq!(approximate_log(1.0, segments, id, workers), 0.0);
                }
                assert_eq!(group_sum(1.0, segments, workers), 0.0);
            }
        }
    }

    #[test]
    fn test_converges_to_e() {
        let estimate = estimate_log(2.718281828, 100_000);
        assert!((estimate - 2.718281828f64.ln()).abs() < 1e-4);
    }

    #[test]
    fn test_ten_with_four_workers() {
        let estimate = group_sum(10.0, 1000, 4);
        assert!((estimate - 2.302585).abs() < 1e-3);
        assert!((estimate - 10f64.ln()).abs() < 1e-3);
    }

    #[test]
    fn test_idle_workers_return_zero() {
        // 3 rectangles, 8 workers: ranks 3..8 own nothing
        for id in 3..8 {
            assert_eq!(owned_count(3, id, 8), 0);
            assert_eq!(approximate_log(50.0, 3, id, 8), 0.0);
        }
        assert!(approximate_log(50.0, 3, 0, 8) > 0.0);
    }

    #[test]
    fn test_ownership_is_partition() {
        for segments in [1u64, 2, 9, 10, 11, 64, 1001] {
            for workers in [1usize, 2, 3, 4, 7, 16, 50] {
                let mut seen = HashSet::new();
                let mut total = 0u64;
                for id in 0..workers {
                    let owned: Vec<u64> = owned_segments(segments, id, workers).collect();
                    assert_eq!(owned.len() as u64, owned_count(segments, id, workers));
                    for i in owned {
                        assert_eq!((i - 1) % workers as u64, id as u64);
                        assert!(seen.insert(i), "index {} owned twice", i);
                        total += 1;
                    }
                }
                assert_eq!(total, segments);
                assert!((1..=segments).all(|i| seen.contains(&i)));
            }
        }
    }

    #[test]
    fn test_owned_segments_huge_count() {
        let first = owned_segments(u64::MAX, 0, 1).take(3).collect::<Vec<_>>();
        assert_eq!(first, vec![1, 2, 3]);
        assert_eq!(owned_count(u64::MAX, 1, 2), u64::MAX / 2);
    }
}
