//! Quickselect variants for the k-th largest element.
//!
//! - [`pivot`]: pivot choosing heuristics (one random pivot, two random pivots,
//!   `n` random pivots)
//! - [`quickselect`]: the specialized single-pivot engine and the general
//!   multi-pivot engine
//! - [`harness`]: test-collection generation, timing and call-count averaging

pub mod harness;
pub mod pivot;
pub mod quickselect;

pub use harness::{avg_calls, avg_calls_parallel, generate_xs, time, Algorithm, HarnessConfig};
pub use pivot::{
    choose_one, choose_two, OneRandomPivot, PivotChooser, RandomPivots, TwoRandomPivots,
};
pub use quickselect::{
    g_quick_select1, general_quick_select, quick_select1, quick_select1_with, quick_select2,
    Selection,
};
