//! Benchmark harness for comparing quickselect variants.
//!
//! Generates distinct-valued test collections, times single selections, and
//! averages the number of recursive calls each variant needs. The reports
//! produced here back the `compare` binary.

use std::hint::black_box;
use std::time::{Duration, Instant};

use log::debug;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;

use super::pivot::{OneRandomPivot, TwoRandomPivots};
use super::quickselect::{general_quick_select, quick_select1_with, Selection};
use crate::cs::error::{Error, Result};

/// The quickselect variants compared by the harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Hand-specialized single-pivot quickselect.
    OnePivot,
    /// Single random pivot through the general engine.
    GeneralOnePivot,
    /// Two random pivots through the general engine.
    TwoPivot,
}

impl Algorithm {
    pub fn run<T, R>(&self, xs: &[T], k: usize, rng: &mut R) -> Result<Selection<T>>
    where
        T: PartialOrd + Copy,
        R: Rng + ?Sized,
    {
        match self {
            Algorithm::OnePivot => quick_select1_with(xs, k, rng),
            Algorithm::GeneralOnePivot => general_quick_select(xs, k, &OneRandomPivot, rng),
            Algorithm::TwoPivot => general_quick_select(xs, k, &TwoRandomPivots, rng),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::OnePivot => "1-pivot",
            Algorithm::GeneralOnePivot => "general 1-pivot",
            Algorithm::TwoPivot => "2-pivot",
        }
    }
}

/// Settings for the comparison reports.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Timed runs per implementation in the implementation comparison
    pub compare_runs: usize,
    /// Collection length used by the implementation comparison
    pub compare_len: usize,
    /// Collection length for the average-call report
    pub calls_n: usize,
    /// Rank for the average-call report
    pub calls_k: usize,
    /// Runs averaged in the average-call report
    pub calls_runs: usize,
    /// Runs averaged per quiz entry
    pub quiz_runs: usize,
    /// Seed for reproducible reports; entropy is used when unset
    pub seed: Option<u64>,
    /// Average call counts on the rayon pool, one generator per trial
    pub parallel: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            compare_runs: 100_000,
            compare_len: 1000,
            calls_n: 500,
            calls_k: 50,
            calls_runs: 20_000,
            quiz_runs: 50_000,
            seed: None,
            parallel: false,
        }
    }
}

impl HarnessConfig {
    /// Generator for a report run, seeded from `seed` when present.
    pub fn rng(&self) -> ChaCha20Rng {
        match self.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        }
    }
}

/// Generates `len` distinct values in `[offset, offset + range)`, in random
/// order.
pub fn generate_xs<R: Rng + ?Sized>(
    len: usize,
    range: i64,
    offset: i64,
    rng: &mut R,
) -> Result<Vec<i64>> {
    let span = usize::try_from(range).map_err(|_| Error::InsufficientRange { len, range })?;
    if span < len {
        return Err(Error::InsufficientRange { len, range });
    }
    Ok(index::sample(rng, span, len)
        .into_iter()
        .map(|i| offset + i as i64)
        .collect())
}

/// Runs `f` once, returning its output and the wall-clock time it took.
pub fn time<O, F: FnOnce() -> O>(f: F) -> (O, Duration) {
    let start = Instant::now();
    let out = black_box(f());
    (out, start.elapsed())
}

fn check_runs(runs: usize) -> Result<()> {
    if runs == 0 {
        return Err(Error::InvalidParameter(
            "number of runs must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Average number of recursive calls `algo` needs to find the `k`-th largest
/// element of a shuffled `0..xs_len`, over `runs` runs on the same collection.
pub fn avg_calls<R: Rng + ?Sized>(
    xs_len: usize,
    k: usize,
    runs: usize,
    algo: Algorithm,
    rng: &mut R,
) -> Result<f64> {
    check_runs(runs)?;
    let xs = generate_xs(xs_len, xs_len as i64, 0, rng)?;

    let mut total = 0;
    for _ in 0..runs {
        total += algo.run(&xs, k, rng)?.calls;
    }
    let avg = total as f64 / runs as f64;
    debug!("{} n={} k={} runs={}: {}", algo.name(), xs_len, k, runs, avg);
    Ok(avg)
}

/// Parallel form of [`avg_calls`]. Every trial draws pivots from its own
/// generator seeded from `seed` and the trial index, so results are
/// reproducible regardless of scheduling.
pub fn avg_calls_parallel(
    xs_len: usize,
    k: usize,
    runs: usize,
    algo: Algorithm,
    seed: u64,
) -> Result<f64> {
    check_runs(runs)?;
    let xs = generate_xs(xs_len, xs_len as i64, 0, &mut ChaCha20Rng::seed_from_u64(seed))?;

    let calls = (0..runs)
        .into_par_iter()
        .map(|i| {
            let mut rng = ChaCha20Rng::seed_from_u64(seed.wrapping_add(i as u64 + 1));
            algo.run(&xs, k, &mut rng).map(|s| s.calls)
        })
        .collect::<Result<Vec<usize>>>()?;

    let avg = calls.iter().sum::<usize>() as f64 / runs as f64;
    debug!(
        "{} n={} k={} runs={} (parallel): {}",
        algo.name(),
        xs_len,
        k,
        runs,
        avg
    );
    Ok(avg)
}

fn mean_calls<R: Rng + ?Sized>(
    config: &HarnessConfig,
    n: usize,
    k: usize,
    runs: usize,
    algo: Algorithm,
    rng: &mut R,
) -> Result<f64> {
    if config.parallel {
        avg_calls_parallel(n, k, runs, algo, rng.gen())
    } else {
        avg_calls(n, k, runs, algo, rng)
    }
}

/// Mean time of the explicit and the general single-pivot quickselect.
#[derive(Debug, Clone, Copy)]
pub struct Comparison {
    pub runs: usize,
    pub len: usize,
    pub explicit: Duration,
    pub general: Duration,
}

/// Times both single-pivot implementations on one collection of
/// `config.compare_len` distinct values, with a fresh random rank per run.
pub fn compare_implementations<R: Rng + ?Sized>(
    config: &HarnessConfig,
    rng: &mut R,
) -> Result<Comparison> {
    let runs = config.compare_runs;
    let len = config.compare_len;
    check_runs(runs)?;
    if len < 2 {
        return Err(Error::InvalidParameter(
            "comparison length must be at least 2".to_string(),
        ));
    }
    let xs = generate_xs(len, len as i64, 0, rng)?;

    let mut totals = [Duration::ZERO; 2];
    for (total, algo) in totals
        .iter_mut()
        .zip([Algorithm::OnePivot, Algorithm::GeneralOnePivot])
    {
        for _ in 0..runs {
            let k = rng.gen_range(1..len);
            let (result, elapsed) = time(|| algo.run(&xs, k, rng));
            result?;
            *total += elapsed;
        }
        debug!("{}: {:?} over {} runs", algo.name(), total, runs);
    }

    Ok(Comparison {
        runs,
        len,
        explicit: totals[0].div_f64(runs as f64),
        general: totals[1].div_f64(runs as f64),
    })
}

/// Average call counts of the one- and two-pivot variants.
#[derive(Debug, Clone, Copy)]
pub struct CallAverages {
    pub n: usize,
    pub k: usize,
    pub one_pivot: f64,
    pub two_pivot: f64,
}

pub fn average_calls<R: Rng + ?Sized>(
    config: &HarnessConfig,
    rng: &mut R,
) -> Result<CallAverages> {
    let (n, k) = (config.calls_n, config.calls_k);
    Ok(CallAverages {
        n,
        k,
        one_pivot: mean_calls(config, n, k, config.calls_runs, Algorithm::OnePivot, rng)?,
        two_pivot: mean_calls(config, n, k, config.calls_runs, Algorithm::TwoPivot, rng)?,
    })
}

/// Fixed `(algorithm, n, k)` cases reported by [`quiz`].
pub const QUIZ_CASES: [(Algorithm, usize, usize); 6] = [
    (Algorithm::OnePivot, 125, 30),
    (Algorithm::OnePivot, 225, 20),
    (Algorithm::OnePivot, 125, 10),
    (Algorithm::OnePivot, 225, 40),
    (Algorithm::TwoPivot, 250, 50),
    (Algorithm::TwoPivot, 125, 10),
];

#[derive(Debug, Clone, Copy)]
pub struct QuizRow {
    pub algorithm: Algorithm,
    pub n: usize,
    pub k: usize,
    pub average: f64,
}

pub fn quiz<R: Rng + ?Sized>(config: &HarnessConfig, rng: &mut R) -> Result<Vec<QuizRow>> {
    QUIZ_CASES
        .iter()
        .map(|&(algorithm, n, k)| {
            Ok(QuizRow {
                algorithm,
                n,
                k,
                average: mean_calls(config, n, k, config.quiz_runs, algorithm, rng)?,
            })
        })
        .collect()
}
