//! Quickselect for the k-th largest element.
//!
//! Two engines are provided:
//!
//! - [`quick_select1_with`]: a hand-specialized single-pivot quickselect that
//!   splits the working collection into a `small` and a `large` part.
//! - [`general_quick_select`]: a multi-pivot quickselect parameterized by a
//!   [`PivotChooser`]. The working collection is split into one bucket per gap
//!   between consecutive pivots, then the pivots are walked from largest to
//!   smallest to find the bucket (or pivot) holding the target rank.
//!
//! Neither engine mutates its input. Each step builds fresh buckets and
//! continues on one of them, so the number of steps (`calls`) equals the number
//! of recursive activations a recursive quickselect would need.
//!
//! Elements equal to a pivot are counted as part of that pivot's rank range
//! rather than being placed in a bucket, so collections with repeated values
//! are handled correctly.
//!
//! # Examples
//!
//! ```rust
//! use quickselect::select::{general_quick_select, quick_select1_with, TwoRandomPivots};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let xs = [5, 3, 8, 1, 9, 2];
//! let mut rng = StdRng::seed_from_u64(1);
//!
//! assert_eq!(quick_select1_with(&xs, 2, &mut rng).unwrap().kth, 8);
//! assert_eq!(general_quick_select(&xs, 6, &TwoRandomPivots, &mut rng).unwrap().kth, 1);
//! ```

use std::borrow::Cow;
use std::cmp::Ordering;

use log::trace;
use rand::Rng;

use super::pivot::{OneRandomPivot, PivotChooser, TwoRandomPivots};
use crate::cs::error::{Error, Result};

/// The k-th largest element, and the number of recursive calls made to find it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection<T> {
    pub kth: T,
    pub calls: usize,
}

fn check_input<T: PartialOrd>(xs: &[T], k: usize) -> Result<()> {
    if xs.is_empty() {
        return Err(Error::EmptyCollection);
    }
    if k == 0 || k > xs.len() {
        return Err(Error::RankOutOfBounds { k, len: xs.len() });
    }
    if xs.iter().any(|x| x.partial_cmp(x).is_none()) {
        return Err(Error::IncomparableValue);
    }
    Ok(())
}

/// Single-pivot quickselect with a randomly chosen pivot.
///
/// `k` is 1-based: `k = 1` is the maximum and `k = xs.len()` the minimum.
pub fn quick_select1_with<T, R>(xs: &[T], k: usize, rng: &mut R) -> Result<Selection<T>>
where
    T: PartialOrd + Copy,
    R: Rng + ?Sized,
{
    check_input(xs, k)?;

    let mut current = Cow::Borrowed(xs);
    let mut k = k;
    let mut calls = 1;

    loop {
        let pivot = current[rng.gen_range(0..current.len())];
        let mut small = Vec::new();
        let mut large = Vec::new();
        let mut equal = 0;

        for &x in current.iter() {
            match x.partial_cmp(&pivot) {
                Some(Ordering::Less) => small.push(x),
                Some(Ordering::Greater) => large.push(x),
                _ => equal += 1,
            }
        }
        trace!(
            "step {}: n={} k={} small={} equal={} large={}",
            calls,
            current.len(),
            k,
            small.len(),
            equal,
            large.len()
        );

        if k <= large.len() {
            current = Cow::Owned(large);
        } else if k <= large.len() + equal {
            return Ok(Selection { kth: pivot, calls });
        } else {
            k -= large.len() + equal;
            current = Cow::Owned(small);
        }
        calls += 1;
    }
}

/// Where the target rank lies after one partitioning pass.
#[derive(Debug, PartialEq, Eq)]
enum Target {
    /// The target equals the pivot at this index.
    Pivot(usize),
    /// The target is the `rank`-th largest element of bucket `index`.
    Bucket { index: usize, rank: usize },
}

/// One partitioning pass around `m` strictly increasing pivots.
///
/// `buckets[0]` holds values below the smallest pivot, `buckets[i]` values
/// between `pivots[i - 1]` and `pivots[i]`, and `buckets[m]` values above the
/// largest pivot. `equal[i]` counts the elements equal to `pivots[i]`.
struct Partition<T> {
    pivots: Vec<T>,
    equal: Vec<usize>,
    buckets: Vec<Vec<T>>,
}

impl<T: PartialOrd + Copy> Partition<T> {
    fn new(xs: &[T], pivots: Vec<T>) -> Self {
        let m = pivots.len();
        let mut buckets = vec![Vec::new(); m + 1];
        let mut equal = vec![0; m];

        for &x in xs {
            let i = pivots.partition_point(|p| *p < x);
            if i < m && pivots[i] == x {
                equal[i] += 1;
            } else {
                buckets[i].push(x);
            }
        }

        Self {
            pivots,
            equal,
            buckets,
        }
    }

    /// Walks the pivots from largest to smallest, accumulating the number of
    /// elements above the current pivot.
    fn locate(&self, k: usize) -> Target {
        let mut accumulated = 0;
        for i in (0..self.pivots.len()).rev() {
            let effective = accumulated + self.buckets[i + 1].len();
            if k <= effective {
                return Target::Bucket {
                    index: i + 1,
                    rank: k - accumulated,
                };
            }
            if k <= effective + self.equal[i] {
                return Target::Pivot(i);
            }
            accumulated = effective + self.equal[i];
        }
        Target::Bucket {
            index: 0,
            rank: k - accumulated,
        }
    }
}

/// General quickselect: finds the `k`-th largest element of `xs` using pivots
/// picked by `chooser`.
///
/// Pivots are sorted and de-duplicated by value before partitioning. A chooser
/// returning a pivot that does not occur in the working collection is
/// rejected with [`Error::ForeignPivot`].
pub fn general_quick_select<T, C, R>(
    xs: &[T],
    k: usize,
    chooser: &C,
    rng: &mut R,
) -> Result<Selection<T>>
where
    T: PartialOrd + Copy,
    C: PivotChooser<T>,
    R: Rng + ?Sized,
{
    check_input(xs, k)?;

    let mut current = Cow::Borrowed(xs);
    let mut k = k;
    let mut calls = 1;

    loop {
        let mut pivots = chooser.choose(&current, k, rng)?;
        if pivots.is_empty() {
            return Err(Error::InvalidParameter(
                "pivot chooser returned no pivots".to_string(),
            ));
        }
        pivots.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        pivots.dedup_by(|a, b| a == b);

        let mut partition = Partition::new(&current, pivots);
        if partition.equal.contains(&0) {
            return Err(Error::ForeignPivot);
        }
        trace!(
            "step {}: n={} k={} pivots={} buckets={:?}",
            calls,
            current.len(),
            k,
            partition.pivots.len(),
            partition.buckets.iter().map(Vec::len).collect::<Vec<_>>()
        );

        match partition.locate(k) {
            Target::Pivot(i) => {
                return Ok(Selection {
                    kth: partition.pivots[i],
                    calls,
                })
            }
            Target::Bucket { index, rank } => {
                current = Cow::Owned(std::mem::take(&mut partition.buckets[index]));
                k = rank;
            }
        }
        calls += 1;
    }
}

/// Single-pivot quickselect using the thread-local generator.
pub fn quick_select1<T: PartialOrd + Copy>(xs: &[T], k: usize) -> Result<Selection<T>> {
    quick_select1_with(xs, k, &mut rand::thread_rng())
}

/// Two-pivot quickselect using the thread-local generator.
pub fn quick_select2<T: PartialOrd + Copy>(xs: &[T], k: usize) -> Result<Selection<T>> {
    general_quick_select(xs, k, &TwoRandomPivots, &mut rand::thread_rng())
}

/// Single-pivot quickselect through the general engine, using the
/// thread-local generator.
pub fn g_quick_select1<T: PartialOrd + Copy>(xs: &[T], k: usize) -> Result<Selection<T>> {
    general_quick_select(xs, k, &OneRandomPivot, &mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cs::select::pivot::RandomPivots;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Hands out pre-arranged pivot lists, one per step.
    struct Scripted(RefCell<VecDeque<Vec<i32>>>);

    impl Scripted {
        fn new(steps: Vec<Vec<i32>>) -> Self {
            Self(RefCell::new(steps.into()))
        }
    }

    impl PivotChooser<i32> for Scripted {
        fn choose<R: Rng + ?Sized>(
            &self,
            _xs: &[i32],
            _k: usize,
            _rng: &mut R,
        ) -> Result<Vec<i32>> {
            Ok(self.0.borrow_mut().pop_front().unwrap_or_default())
        }
    }

    fn kth_largest(xs: &[i32], k: usize) -> i32 {
        let mut sorted = xs.to_vec();
        sorted.sort_by(|a, b| b.cmp(a));
        sorted[k - 1]
    }

    fn all_engines(xs: &[i32], k: usize, rng: &mut StdRng) -> Vec<Selection<i32>> {
        vec![
            quick_select1_with(xs, k, rng).unwrap(),
            general_quick_select(xs, k, &OneRandomPivot, rng).unwrap(),
            general_quick_select(xs, k, &TwoRandomPivots, rng).unwrap(),
            general_quick_select(xs, k, &RandomPivots::new(4).unwrap(), rng).unwrap(),
        ]
    }

    #[test]
    fn test_known_answers() {
        let xs = [5, 3, 8, 1, 9, 2];
        let mut rng = StdRng::seed_from_u64(5);
        for s in all_engines(&xs, 2, &mut rng) {
            assert_eq!(s.kth, 8);
        }
        for s in all_engines(&xs, 6, &mut rng) {
            assert_eq!(s.kth, 1);
        }
        for s in all_engines(&xs, 1, &mut rng) {
            assert_eq!(s.kth, 9);
        }
        for s in all_engines(&[42], 1, &mut rng) {
            assert_eq!(s, Selection { kth: 42, calls: 1 });
        }
    }

    #[test]
    fn test_matches_sorted_order() {
        let mut rng = StdRng::seed_from_u64(2024);
        for n in 1..40 {
            let xs: Vec<i32> = rand::seq::index::sample(&mut rng, 1000, n)
                .into_iter()
                .map(|i| i as i32 - 500)
                .collect();
            for k in 1..=n {
                let expected = kth_largest(&xs, k);
                for s in all_engines(&xs, k, &mut rng) {
                    assert_eq!(s.kth, expected, "n={} k={}", n, k);
                    assert!(s.calls >= 1 && s.calls <= n, "calls={} n={}", s.calls, n);
                }
            }
        }
    }

    #[test]
    fn test_repeated_queries_agree() {
        let xs: Vec<i32> = (0..200).map(|i| (i * 37) % 211).collect();
        let mut rng = StdRng::seed_from_u64(99);
        let first = quick_select1_with(&xs, 17, &mut rng).unwrap().kth;
        for _ in 0..50 {
            assert_eq!(quick_select1_with(&xs, 17, &mut rng).unwrap().kth, first);
            assert_eq!(
                general_quick_select(&xs, 17, &TwoRandomPivots, &mut rng)
                    .unwrap()
                    .kth,
                first
            );
        }
    }

    #[test]
    fn test_scripted_pivot_path() {
        let xs = [5, 3, 8, 1, 9, 2];
        let mut rng = StdRng::seed_from_u64(0);

        // 9 above 8, so the 2nd largest is the upper pivot itself.
        let chooser = Scripted::new(vec![vec![8, 3]]);
        assert_eq!(
            general_quick_select(&xs, 2, &chooser, &mut rng).unwrap(),
            Selection { kth: 8, calls: 1 }
        );

        // 3rd largest lies strictly between the pivots, in the bucket {5}.
        let chooser = Scripted::new(vec![vec![3, 8], vec![5]]);
        assert_eq!(
            general_quick_select(&xs, 3, &chooser, &mut rng).unwrap(),
            Selection { kth: 5, calls: 2 }
        );

        // 5th largest is below the smallest pivot, in {1, 2}.
        let chooser = Scripted::new(vec![vec![3, 8], vec![1], vec![2]]);
        assert_eq!(
            general_quick_select(&xs, 5, &chooser, &mut rng).unwrap(),
            Selection { kth: 2, calls: 3 }
        );
    }

    #[test]
    fn test_partition_buckets() {
        let partition = Partition::new(&[5, 3, 8, 1, 9, 2, 3], vec![3, 8]);
        assert_eq!(partition.buckets, vec![vec![1, 2], vec![5], vec![9]]);
        assert_eq!(partition.equal, vec![2, 1]);
        assert_eq!(partition.locate(1), Target::Bucket { index: 2, rank: 1 });
        assert_eq!(partition.locate(2), Target::Pivot(1));
        assert_eq!(partition.locate(3), Target::Bucket { index: 1, rank: 1 });
        assert_eq!(partition.locate(4), Target::Pivot(0));
        assert_eq!(partition.locate(5), Target::Pivot(0));
        assert_eq!(partition.locate(6), Target::Bucket { index: 0, rank: 1 });
        assert_eq!(partition.locate(7), Target::Bucket { index: 0, rank: 2 });
    }

    #[test]
    fn test_duplicates() {
        let xs = [4, 4, 4, 1, 9];
        let mut rng = StdRng::seed_from_u64(8);
        for (k, expected) in [(1, 9), (2, 4), (3, 4), (4, 4), (5, 1)] {
            for s in all_engines(&xs, k, &mut rng) {
                assert_eq!(s.kth, expected, "k={}", k);
            }
        }

        // Two positions holding the same value collapse into one pivot.
        let chooser = Scripted::new(vec![vec![4, 4]]);
        assert_eq!(
            general_quick_select(&xs, 3, &chooser, &mut rng).unwrap(),
            Selection { kth: 4, calls: 1 }
        );
    }

    #[test]
    fn test_floats() {
        let xs = [0.5, -1.25, 3.0, 2.75];
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(quick_select1_with(&xs, 1, &mut rng).unwrap().kth, 3.0);
        assert_eq!(
            general_quick_select(&xs, 4, &TwoRandomPivots, &mut rng)
                .unwrap()
                .kth,
            -1.25
        );
        assert_eq!(
            quick_select1_with(&[1.0, f64::NAN], 1, &mut rng),
            Err(Error::IncomparableValue)
        );
    }

    #[test]
    fn test_precondition_errors() {
        let mut rng = StdRng::seed_from_u64(0);
        let empty: [i32; 0] = [];
        assert_eq!(
            quick_select1_with(&empty, 1, &mut rng),
            Err(Error::EmptyCollection)
        );
        assert_eq!(
            quick_select1_with(&[1, 2, 3], 0, &mut rng),
            Err(Error::RankOutOfBounds { k: 0, len: 3 })
        );
        assert_eq!(
            general_quick_select(&[1, 2, 3], 4, &TwoRandomPivots, &mut rng),
            Err(Error::RankOutOfBounds { k: 4, len: 3 })
        );
    }

    #[test]
    fn test_misbehaving_chooser() {
        let mut rng = StdRng::seed_from_u64(0);
        let chooser = Scripted::new(vec![vec![100]]);
        assert_eq!(
            general_quick_select(&[1, 2, 3], 2, &chooser, &mut rng),
            Err(Error::ForeignPivot)
        );

        let chooser = Scripted::new(vec![]);
        assert!(matches!(
            general_quick_select(&[1, 2, 3], 2, &chooser, &mut rng),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_thread_rng_wrappers() {
        let xs = [5, 3, 8, 1, 9, 2];
        assert_eq!(quick_select1(&xs, 2).unwrap().kth, 8);
        assert_eq!(quick_select2(&xs, 2).unwrap().kth, 8);
        assert_eq!(g_quick_select1(&xs, 2).unwrap().kth, 8);
    }
}
