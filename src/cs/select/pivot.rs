//! Pivot choosing heuristics for quickselect.
//!
//! A chooser looks at the current working collection (and the rank being
//! searched for) and returns one or more pivot *values* drawn from it. The
//! returned pivots do not have to be sorted or distinct in value; the
//! selection engine orders and de-duplicates them before partitioning.

use rand::seq::index;
use rand::Rng;

use crate::cs::error::{Error, Result};

/// A pivot choosing heuristic.
///
/// Implementations must only return values that are present in `xs`, and
/// must return at least one pivot for a non-empty collection.
pub trait PivotChooser<T> {
    /// Picks pivots from `xs`. `k` is the 1-based rank currently sought.
    fn choose<R: Rng + ?Sized>(&self, xs: &[T], k: usize, rng: &mut R) -> Result<Vec<T>>;
}

/// Picks a single pivot uniformly at random.
#[derive(Debug, Clone, Copy, Default)]
pub struct OneRandomPivot;

/// Picks two pivots at distinct random positions, or the only element of a
/// single-element collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoRandomPivots;

/// Picks `count` pivots at distinct random positions. When the collection is
/// shorter than `count`, every element becomes a pivot.
#[derive(Debug, Clone, Copy)]
pub struct RandomPivots {
    pub count: usize,
}

impl RandomPivots {
    pub fn new(count: usize) -> Result<Self> {
        if count == 0 {
            return Err(Error::InvalidParameter(
                "pivot count must be at least 1".to_string(),
            ));
        }
        Ok(Self { count })
    }
}

impl<T: Copy> PivotChooser<T> for OneRandomPivot {
    fn choose<R: Rng + ?Sized>(&self, xs: &[T], _k: usize, rng: &mut R) -> Result<Vec<T>> {
        choose_one(xs, rng)
    }
}

impl<T: Copy> PivotChooser<T> for TwoRandomPivots {
    fn choose<R: Rng + ?Sized>(&self, xs: &[T], _k: usize, rng: &mut R) -> Result<Vec<T>> {
        choose_two(xs, rng)
    }
}

impl<T: Copy> PivotChooser<T> for RandomPivots {
    fn choose<R: Rng + ?Sized>(&self, xs: &[T], _k: usize, rng: &mut R) -> Result<Vec<T>> {
        if xs.is_empty() {
            return Err(Error::EmptyCollection);
        }
        let amount = self.count.min(xs.len());
        Ok(index::sample(rng, xs.len(), amount)
            .into_iter()
            .map(|i| xs[i])
            .collect())
    }
}

/// Returns the value at one uniformly random position of `xs`.
pub fn choose_one<T: Copy, R: Rng + ?Sized>(xs: &[T], rng: &mut R) -> Result<Vec<T>> {
    if xs.is_empty() {
        return Err(Error::EmptyCollection);
    }
    Ok(vec![xs[rng.gen_range(0..xs.len())]])
}

/// Returns the values at two distinct random positions of `xs`.
///
/// The second position is resampled until it differs from the first, so the
/// two values can still be equal when `xs` holds duplicates.
pub fn choose_two<T: Copy, R: Rng + ?Sized>(xs: &[T], rng: &mut R) -> Result<Vec<T>> {
    match xs.len() {
        0 => Err(Error::EmptyCollection),
        1 => Ok(vec![xs[0]]),
        len => {
            let first = rng.gen_range(0..len);
            let mut second = first;
            while second == first {
                second = rng.gen_range(0..len);
            }
            Ok(vec![xs[first], xs[second]])
        }
    }
}
